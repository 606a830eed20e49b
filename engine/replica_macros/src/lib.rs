//! Procedural macros for the replica copy engine.
//!
//! The engine never inspects types at runtime. Every participating type
//! carries a compile-time descriptor instead, and this crate generates it:
//!
//! ```text
//! #[derive(Clone, Default, Describable)]
//! pub struct PersonDto {
//!     pub name: String,
//!     pub age: i32,
//!     #[describe(rename = "Address")]
//!     pub address: Option<AddressDto>,
//!     #[describe(skip)]
//!     cache_key: u64,
//! }
//! ```
//!
//! The generated `Describable` impl lists the exposed fields in declaration
//! order together with their types, and provides by-name field access.

mod describable;
mod utils;

use proc_macro::TokenStream;

/// Derive `replica::Describable` for a struct with named fields or a
/// unit-only enum.
///
/// # Attributes
///
/// ## Container-level
/// - `#[describe(no_default)]` - The type has no `Default` impl; the engine
///   reports it as not constructible instead of instantiating it.
///
/// ## Field-level
/// - `#[describe(skip)]` - Hide the field from the engine entirely.
/// - `#[describe(readonly)]` - Readable as a copy source, never written.
/// - `#[describe(writeonly)]` - Written as a copy destination, never read.
/// - `#[describe(rename = "name")]` - Expose the field under another name.
///
/// Structs become records; enums become enumeration scalars, which only copy
/// into fields of the very same enum type.
#[proc_macro_derive(Describable, attributes(describe))]
pub fn derive_describable(input: TokenStream) -> TokenStream {
    describable::derive_describable(input)
}
