#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::shallow_copy;
use crate::{CopyError, Describable};
use pretty_assertions::assert_eq;

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct Address {
    city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct AddressDto {
    city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct Customer {
    id: u64,
    name: String,
    score: i32,
    address: Address,
    tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct CustomerView {
    id: u64,
    name: String,
    score: i64,
    address: Address,
    tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct CustomerDto {
    id: u64,
    address: AddressDto,
}

fn customer() -> Customer {
    Customer {
        id: 7,
        name: "Ann".to_owned(),
        score: 42,
        address: Address {
            city: "Oslo".to_owned(),
        },
        tags: vec!["vip".to_owned()],
    }
}

#[test]
fn copies_exact_name_and_type_matches() {
    let view: CustomerView = shallow_copy(&customer()).unwrap();
    assert_eq!(view.id, 7);
    assert_eq!(view.name, "Ann");
    assert_eq!(view.address.city, "Oslo");
    assert_eq!(view.tags, vec!["vip".to_owned()]);
}

#[test]
fn type_mismatch_keeps_default() {
    let view: CustomerView = shallow_copy(&customer()).unwrap();
    assert_eq!(view.score, 0);
}

#[test]
fn nested_records_of_different_type_are_not_converted() {
    let dto: CustomerDto = shallow_copy(&customer()).unwrap();
    assert_eq!(dto.id, 7);
    assert_eq!(dto.address, AddressDto::default());
}

#[test]
fn matched_fields_are_cloned() {
    let mut source = customer();
    let view: CustomerView = shallow_copy(&source).unwrap();
    source.address.city.push('!');
    source.tags.clear();
    assert_eq!(view.address.city, "Oslo");
    assert_eq!(view.tags.len(), 1);
}

#[derive(Clone, Debug, Default, PartialEq, Describable)]
struct Audited {
    #[describe(readonly)]
    id: u64,
    #[describe(writeonly)]
    name: String,
}

#[test]
fn access_attributes_gate_both_sides() {
    let audited: Audited = shallow_copy(&customer()).unwrap();
    assert_eq!(audited.id, 0);
    assert_eq!(audited.name, "Ann");

    let audited = Audited {
        id: 1,
        name: "hidden".to_owned(),
    };
    let back: Customer = shallow_copy(&audited).unwrap();
    assert_eq!(back.id, 1);
    assert_eq!(back.name, "");
}

#[derive(Clone, Debug, PartialEq, Describable)]
#[describe(no_default)]
struct Sealed {
    id: u64,
}

#[test]
fn unconstructible_destination_fails() {
    let result = shallow_copy::<Sealed>(&customer());
    assert!(matches!(result, Err(CopyError::Instantiation { .. })));
}

#[test]
fn unconstructible_types_still_serve_as_sources() {
    let view: CustomerView = shallow_copy(&Sealed { id: 3 }).unwrap();
    assert_eq!(view.id, 3);
}

#[test]
fn optional_root_is_read_through() {
    let view: CustomerView = shallow_copy(&Some(customer())).unwrap();
    assert_eq!(view.id, 7);
    assert_eq!(view.name, "Ann");

    let empty: CustomerView = shallow_copy(&None::<Customer>).unwrap();
    assert_eq!(empty, CustomerView::default());
}

#[test]
fn non_record_source_copies_nothing() {
    let view: CustomerView = shallow_copy(&"Ann".to_owned()).unwrap();
    assert_eq!(view, CustomerView::default());
}
