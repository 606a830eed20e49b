#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::Describable;
use pretty_assertions::assert_eq;

#[derive(Clone, Default, Describable)]
struct Account {
    id: u64,
    #[describe(rename = "displayName")]
    display_name: String,
    #[describe(readonly)]
    created_by: String,
    #[describe(writeonly)]
    password: String,
    #[describe(skip)]
    #[allow(dead_code)]
    session: u32,
    nickname: Option<String>,
}

#[derive(Clone, Describable)]
#[describe(no_default)]
struct Handle {
    raw: i32,
}

#[test]
fn derive_lists_exposed_fields_in_declaration_order() {
    let info = Account::type_info();
    let names: Vec<_> = info.fields().iter().map(FieldInfo::name).collect();
    assert_eq!(
        names,
        vec!["id", "displayName", "created_by", "password", "nickname"]
    );
}

#[test]
fn derive_records_access_flags() {
    let info = Account::type_info();
    let created_by = info.find_field("created_by").unwrap();
    assert!(created_by.is_readable());
    assert!(!created_by.is_writable());

    let password = info.find_field("password").unwrap();
    assert!(!password.is_readable());
    assert!(password.is_writable());

    assert!(info.find_field("session").is_none());
    assert!(info.find_field("display_name").is_none());
}

#[test]
fn field_access_honours_flags() {
    let mut account = Account {
        created_by: "admin".to_owned(),
        ..Account::default()
    };

    assert!(account.field("password").is_none());
    assert!(account.field_mut("created_by").is_none());
    assert!(account.field("session").is_none());

    let name = account.field_mut("displayName").unwrap();
    name.assign(Box::new("Ann".to_owned())).unwrap();
    assert_eq!(account.display_name, "Ann");

    let created_by = account.field("created_by").unwrap();
    assert_eq!(
        created_by.as_any().downcast_ref::<String>().unwrap(),
        "admin"
    );
}

#[test]
fn field_info_carries_declared_type() {
    let info = Account::type_info();
    let nickname = info.find_field("nickname").unwrap();
    assert_eq!(nickname.type_id(), TypeId::of::<Option<String>>());
    assert!(nickname.type_info().is_optional());
}

#[test]
fn no_default_types_are_not_constructible() {
    let info = Handle::type_info();
    assert!(!info.is_constructible());
    assert_eq!(
        info.instantiate().unwrap_err(),
        FieldCopyError::NotConstructible {
            type_name: info.name()
        }
    );
    assert_eq!(Handle { raw: 7 }.raw, 7);
}

#[test]
fn instantiate_builds_default_value() {
    let instance = Account::type_info().instantiate().unwrap();
    let account = downcast::<Account>(instance).unwrap();
    assert_eq!(account.id, 0);
    assert!(account.nickname.is_none());
}

#[test]
fn downcast_reports_both_type_names() {
    let err = downcast::<String>(Box::new(5_i32)).unwrap_err();
    assert_eq!(
        err,
        FieldCopyError::TypeMismatch {
            expected: "alloc::string::String",
            found: "i32",
        }
    );
}

#[test]
fn unwrap_optional_removes_every_layer() {
    let info = <Option<Option<u8>>>::type_info().unwrap_optional();
    assert_eq!(info.id(), TypeId::of::<u8>());
    assert!(!info.is_optional());
}

#[test]
fn trait_object_debug_shows_type_name() {
    let value: Box<dyn Describable> = Box::new(1_u16);
    assert_eq!(format!("{value:?}"), "<u16>");
}

#[test]
fn scalar_kind_display() {
    assert_eq!(ScalarKind::Identifier.to_string(), "identifier");
    assert_eq!(ScalarKind::Enumeration.to_string(), "enumeration");
}
