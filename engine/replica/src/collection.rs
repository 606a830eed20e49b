//! Collection reconstruction for the structural copier.
//!
//! Sequences are rebuilt element by element in source order, each element
//! going through the same dispatch as a record field, with the destination
//! element type standing in for the field type. The destination's assembler
//! then packs the copied elements: fixed-size containers are allocated at
//! the source length, growable ones are appended to from empty.
//!
//! Any element failure fails the whole collection, so a rebuilt container
//! always has exactly as many elements as its source. Assignments and skips
//! inside the elements of a discarded collection are dropped from the report.

use crate::classify::{classifier, CollectionKind, TypeDescriptor};
use crate::describe::{Describable, Shape, TypeInfo};
use crate::error::FieldCopyError;
use crate::structural::StructuralCopier;

impl StructuralCopier {
    /// Rebuild the sequence `source` as a value of `target`.
    pub(crate) fn reconstruct_collection(
        &mut self,
        source: &dyn Describable,
        target: &TypeInfo,
    ) -> Result<Box<dyn Describable>, FieldCopyError> {
        if classifier().classify_value(source) == TypeDescriptor::Collection(CollectionKind::Keyed) {
            return Err(FieldCopyError::UnsupportedContainer {
                type_name: source.info().name(),
            });
        }

        let sequence = match target.shape() {
            Shape::Sequence(sequence) => sequence,
            Shape::Map(_) => {
                return Err(FieldCopyError::UnsupportedContainer {
                    type_name: target.name(),
                })
            }
            _ => {
                return Err(FieldCopyError::KindMismatch {
                    from: "collection",
                    into: target.name(),
                })
            }
        };

        let element = sequence.element_info();
        let items = source.elements();
        tracing::trace!(
            target = target.name(),
            kind = ?sequence.kind,
            len = items.len(),
            "reconstructing collection"
        );

        // Element outcomes only count once the whole collection is assigned.
        let outer = std::mem::take(&mut self.report);
        let rebuilt = self.copy_elements(items, &element).and_then(sequence.assemble);
        let elements = std::mem::replace(&mut self.report, outer);
        if rebuilt.is_ok() {
            self.report.merge(elements);
        }
        rebuilt
    }

    fn copy_elements(
        &mut self,
        items: Vec<&dyn Describable>,
        element: &TypeInfo,
    ) -> Result<Vec<Box<dyn Describable>>, FieldCopyError> {
        let mut copied = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            self.enter(format!("[{index}]"));
            let result = self.copy_value(item, element);
            self.leave();
            copied.push(result?);
        }
        Ok(copied)
    }
}
