//! Structural object-copy engine.
//!
//! Three copy strategies with different fidelity/performance trade-offs:
//!
//! - [`shallow_copy`]: same name and same exact type, one level deep.
//! - [`structural_copy`]: recursive, field-name driven. Nested records and
//!   collections may differ in nominal type; simple fields must match exactly.
//! - [`universal_copy`]: encode to JSON text and decode into the destination,
//!   dropping back-references on the way.
//!
//! # Describing types
//!
//! There is no runtime reflection. Types take part by implementing
//! [`Describable`], normally through `#[derive(Describable)]`, which exposes
//! an ordered list of named, typed fields. Primitives, text, `chrono`
//! temporals, `Uuid`, `Decimal`, `Option`, and the std sequence and map
//! containers are described out of the box.
//!
//! ```text
//! #[derive(Clone, Default, Describable)]
//! struct Person { name: String, age: i32, address: Option<Address> }
//!
//! #[derive(Clone, Default, Describable)]
//! struct PersonDto { name: String, age: i32, address: Option<AddressDto> }
//!
//! let dto: PersonDto = replica::structural_copy(&person)?;
//! ```

// Lets the derive's `::replica::...` paths resolve inside this crate's tests.
#[cfg(test)]
extern crate self as replica;

mod classify;
mod collection;
mod config;
pub mod describe;
mod envelope;
mod error;
mod fallback;
mod impls;
mod logging;
mod report;
mod shallow;
mod shared;
mod stack;
mod structural;

pub use classify::{classifier, classify, CollectionKind, TypeClassifier, TypeDescriptor};
pub use config::{FallbackSettings, ParsePolicyError, ReferenceLoopPolicy, LOOP_POLICY_ENV};
pub use describe::Describable;
pub use envelope::{Response, ResponseResult, TemplateRender};
pub use error::{CopyError, FallbackError, FieldCopyError};
pub use fallback::{
    clone_or_default, clone_via_encoding, encoder, try_universal_copy, universal_copy, Encoder,
};
pub use logging::init_tracing;
pub use replica_macros::Describable;
pub use report::{CopyReport, SkippedField};
pub use shallow::shallow_copy;
pub use shared::{skip_absent_elements, Shared, SharedVec};
pub use stack::ensure_sufficient_stack;
pub use structural::{copy_into, structural_copy, structural_copy_with_report};
