use super::*;
use crate::Describable;
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, VecDeque};

#[derive(Clone, Default, Describable)]
struct Order {
    id: u32,
    lines: Vec<u32>,
}

#[derive(Clone, Copy, Default, Describable)]
enum Priority {
    #[default]
    Low,
    High,
}

fn classify_of<T: Describable>() -> TypeDescriptor {
    TypeClassifier::new().classify(&T::type_info())
}

#[test]
fn scalars_are_simple() {
    assert_eq!(classify_of::<i64>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<bool>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<String>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<uuid::Uuid>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<rust_decimal::Decimal>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<chrono::DateTime<chrono::Utc>>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<std::time::Duration>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<Priority>(), TypeDescriptor::Simple);
}

#[test]
fn optional_simple_is_simple() {
    assert_eq!(classify_of::<Option<i32>>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<Option<Option<String>>>(), TypeDescriptor::Simple);
    assert_eq!(classify_of::<Option<Priority>>(), TypeDescriptor::Simple);
}

#[test]
fn sequences_are_collections() {
    assert_eq!(
        classify_of::<Vec<String>>(),
        TypeDescriptor::Collection(CollectionKind::Growable)
    );
    assert_eq!(
        classify_of::<VecDeque<u8>>(),
        TypeDescriptor::Collection(CollectionKind::Growable)
    );
    assert_eq!(
        classify_of::<Box<[u8]>>(),
        TypeDescriptor::Collection(CollectionKind::FixedSize)
    );
    assert_eq!(
        classify_of::<[u8; 4]>(),
        TypeDescriptor::Collection(CollectionKind::FixedSize)
    );
    assert_eq!(
        classify_of::<BTreeMap<String, u8>>(),
        TypeDescriptor::Collection(CollectionKind::Keyed)
    );
}

#[test]
fn text_is_never_a_collection() {
    assert!(!classify_of::<String>().is_collection());
}

#[test]
fn records_are_complex() {
    assert_eq!(classify_of::<Order>(), TypeDescriptor::Complex);
    assert_eq!(classify_of::<Option<Order>>(), TypeDescriptor::Complex);
    assert_eq!(
        classify_of::<Option<Vec<Order>>>(),
        TypeDescriptor::Collection(CollectionKind::Growable)
    );
}

#[test]
fn classify_value_uses_the_concrete_type() {
    let classifier = TypeClassifier::new();
    let order = Order {
        id: 1,
        lines: vec![1, 2],
    };
    assert_eq!(classifier.classify_value(&order), TypeDescriptor::Complex);
    assert_eq!(
        classifier.classify_value(&order.lines),
        TypeDescriptor::Collection(CollectionKind::Growable)
    );
    assert_eq!(classifier.classify_value(&order.id), TypeDescriptor::Simple);
    assert_eq!(order.id, 1);
}

#[test]
fn results_are_cached_once_per_type() {
    let classifier = TypeClassifier::new();
    assert!(classifier.is_empty());

    classifier.classify_type::<Option<u16>>();
    // The wrapper and its content are both cached.
    assert!(classifier.is_cached(TypeId::of::<Option<u16>>()));
    assert!(classifier.is_cached(TypeId::of::<u16>()));
    assert_eq!(classifier.len(), 2);

    classifier.classify_type::<Option<u16>>();
    classifier.classify(&u16::type_info());
    assert_eq!(classifier.len(), 2);
}

#[test]
fn concurrent_first_use_keeps_one_entry_per_type() {
    let classifier = TypeClassifier::new();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                assert_eq!(classifier.classify_type::<Order>(), TypeDescriptor::Complex);
                assert_eq!(classifier.classify_type::<i8>(), TypeDescriptor::Simple);
            });
        }
    });
    assert_eq!(classifier.len(), 2);
}

#[test]
fn global_classifier_is_shared() {
    let first: *const TypeClassifier = classifier();
    let second: *const TypeClassifier = classifier();
    assert_eq!(first, second);
    assert_eq!(classify(&Order::type_info()), TypeDescriptor::Complex);
    assert!(classifier().is_cached(TypeId::of::<Order>()));
}

#[test]
fn descriptor_names() {
    assert_eq!(TypeDescriptor::Simple.to_string(), "simple");
    assert_eq!(
        TypeDescriptor::Collection(CollectionKind::FixedSize).to_string(),
        "fixed-size collection"
    );
    assert!(TypeDescriptor::Complex.is_complex());
    assert_eq!(Priority::High as u8, 1);
}
