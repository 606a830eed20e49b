//! Property-based tests for the copy strategies.
//!
//! Generated inputs check that:
//! 1. an identity structural copy reproduces every simple field
//! 2. rebuilt sequences keep length and order for both container kinds
//! 3. the serialization fallback round-trips acyclic values unchanged

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::VecDeque;

use proptest::prelude::*;
use replica::{structural_copy, universal_copy, Describable};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Describable, Serialize, Deserialize)]
struct Dimensions {
    width: u32,
    height: u32,
    label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable, Serialize, Deserialize)]
struct Item {
    id: i64,
    name: String,
    price: f64,
    active: bool,
    initial: char,
    size: Option<Dimensions>,
    tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct GrowableSeq {
    values: Vec<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct QueueSeq {
    values: VecDeque<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct FixedSeq {
    values: Box<[i32]>,
}

fn dimensions_strategy() -> impl Strategy<Value = Dimensions> {
    (any::<u32>(), any::<u32>(), proptest::option::of("[a-z]{0,8}")).prop_map(
        |(width, height, label)| Dimensions {
            width,
            height,
            label,
        },
    )
}

fn item_strategy() -> impl Strategy<Value = Item> {
    (
        any::<i64>(),
        ".{0,16}",
        (-1_000_000_i32..1_000_000).prop_map(|quarters| f64::from(quarters) / 4.0),
        any::<bool>(),
        any::<char>(),
        proptest::option::of(dimensions_strategy()),
        prop::collection::vec("[a-z0-9]{0,6}", 0..6),
    )
        .prop_map(|(id, name, price, active, initial, size, tags)| Item {
            id,
            name,
            price,
            active,
            initial,
            size,
            tags,
        })
}

proptest! {
    #[test]
    fn identity_structural_copy(item in item_strategy()) {
        let copy: Item = structural_copy(&item).unwrap();
        prop_assert_eq!(copy, item);
    }

    #[test]
    fn growable_keeps_order_and_length(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let source = GrowableSeq { values: values.clone() };

        let queue: QueueSeq = structural_copy(&source).unwrap();
        prop_assert_eq!(queue.values.iter().copied().collect::<Vec<_>>(), values.clone());

        let back: GrowableSeq = structural_copy(&queue).unwrap();
        prop_assert_eq!(back.values, values);
    }

    #[test]
    fn fixed_size_keeps_order_and_length(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let fixed: FixedSeq = structural_copy(&GrowableSeq { values: values.clone() }).unwrap();
        prop_assert_eq!(fixed.values.len(), values.len());
        prop_assert_eq!(fixed.values.to_vec(), values);
    }

    #[test]
    fn universal_copy_round_trips(item in item_strategy()) {
        let copy: Item = universal_copy(&item);
        prop_assert_eq!(copy, item);
    }
}
