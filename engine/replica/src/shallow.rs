//! Shallow copy: one level, exact name and exact type.
//!
//! The cheap projection for near-identical shapes (entity to view model).
//! Every matched field receives a clone of the source value; nothing is
//! classified or recursed into. Fields without an exact name and type match
//! keep the destination's default.

use crate::describe::{type_id_of, Describable};
use crate::error::CopyError;
use crate::structural::instantiate_root;

/// Copy identically named and typed fields of `source` into a new `TDst`.
///
/// An optional source is read through its present value; an absent one
/// yields the default destination. Fails only when `TDst` cannot be
/// instantiated.
pub fn shallow_copy<TDst: Describable>(source: &dyn Describable) -> Result<TDst, CopyError> {
    let mut destination = instantiate_root::<TDst>()?;
    let Some(source) = source.present() else {
        return Ok(destination);
    };
    let source_info = source.info();
    let destination_info = TDst::type_info();

    for field in source_info.fields().iter().filter(|f| f.is_readable()) {
        let matched = destination_info
            .find_field(field.name())
            .is_some_and(|d| d.is_writable() && d.type_id() == field.type_id());
        if !matched {
            continue;
        }
        let Some(value) = source.field(field.name()) else {
            continue;
        };
        // Declared types match, so the value's concrete type does too.
        debug_assert_eq!(type_id_of(value), field.type_id());

        if let Some(slot) = destination.field_mut(field.name()) {
            if let Err(reason) = slot.assign(value.clone_boxed()) {
                tracing::debug!(field = field.name(), %reason, "shallow copy skipped field");
            }
        }
    }

    Ok(destination)
}

#[cfg(test)]
mod tests;
