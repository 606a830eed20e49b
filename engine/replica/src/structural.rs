//! Structural copy: recursive, field-name driven.
//!
//! For each writable destination field with a readable source field of the
//! same name:
//!
//! 1. an absent source stores the destination's absence marker, without
//!    instantiating anything;
//! 2. a Simple source is cloned only into an identically-typed field;
//! 3. a Collection source is rebuilt by the collection reconstructor;
//! 4. a Complex source is copied into a freshly instantiated value of the
//!    destination field's type, which is then assigned.
//!
//! Field failures are contained: the field keeps its default, the reason is
//! logged and recorded in the [`CopyReport`], and the walk moves on.

use crate::classify::{classifier, TypeDescriptor};
use crate::describe::{downcast, type_id_of, Describable, Shape, TypeInfo};
use crate::error::{CopyError, FieldCopyError};
use crate::report::CopyReport;
use crate::stack::ensure_sufficient_stack;

/// Copy `source` into a new `TDst`.
///
/// Fails only when `TDst` cannot be instantiated.
pub fn structural_copy<TDst: Describable>(source: &dyn Describable) -> Result<TDst, CopyError> {
    structural_copy_with_report(source).map(|(destination, _)| destination)
}

/// Like [`structural_copy`], also returning what was skipped.
#[tracing::instrument(level = "debug", skip_all, fields(
    source = source.info().name(),
    destination = std::any::type_name::<TDst>(),
))]
pub fn structural_copy_with_report<TDst: Describable>(
    source: &dyn Describable,
) -> Result<(TDst, CopyReport), CopyError> {
    let mut destination = instantiate_root::<TDst>()?;
    let report = copy_into(source, &mut destination);
    tracing::debug!(
        copied = report.copied(),
        skipped = report.skipped().len(),
        "structural copy complete"
    );
    Ok((destination, report))
}

/// Copy every matching field of `source` into an existing `destination`.
///
/// Both sides may be any described type; non-record sides copy nothing. An
/// optional source is read through its present value, and an absent one
/// leaves `destination` untouched.
pub fn copy_into(source: &dyn Describable, destination: &mut dyn Describable) -> CopyReport {
    let mut copier = StructuralCopier::default();
    if let Some(source) = source.present() {
        copier.copy_fields(source, destination);
    }
    copier.report
}

/// Default-construct the root of a copy.
pub(crate) fn instantiate_root<TDst: Describable>() -> Result<TDst, CopyError> {
    let info = TDst::type_info();
    let instantiation = CopyError::Instantiation {
        type_name: info.name(),
    };
    let Some(construct) = info.constructor() else {
        tracing::debug!(type_name = info.name(), "destination type has no constructor");
        return Err(instantiation);
    };
    downcast::<TDst>(construct()).map_err(|_| instantiation)
}

/// State of one structural walk.
#[derive(Default)]
pub(crate) struct StructuralCopier {
    pub(crate) report: CopyReport,
    path: Vec<String>,
}

impl StructuralCopier {
    pub(crate) fn copy_fields(&mut self, source: &dyn Describable, destination: &mut dyn Describable) {
        let source_info = source.info();
        let destination_info = destination.info();

        for field in destination_info.fields().iter().filter(|f| f.is_writable()) {
            let readable = source_info
                .find_field(field.name())
                .is_some_and(|f| f.is_readable());
            if !readable {
                continue;
            }
            let Some(value) = source.field(field.name()) else {
                continue;
            };

            self.path.push(field.name().to_owned());
            let target = field.type_info();
            let outcome = self
                .copy_value(value, &target)
                .and_then(|copied| assign_field(destination, field.name(), copied));
            match outcome {
                Ok(()) => self.report.record_copied(),
                Err(reason) => self.skip(reason),
            }
            self.path.pop();
        }
    }

    /// Produce a value of type `target` from `source`.
    pub(crate) fn copy_value(
        &mut self,
        source: &dyn Describable,
        target: &TypeInfo,
    ) -> Result<Box<dyn Describable>, FieldCopyError> {
        ensure_sufficient_stack(|| {
            let Some(present) = source.present() else {
                return absent_into(target);
            };

            let descriptor = classifier().classify_value(source);
            tracing::trace!(path = %self.current_path(), %descriptor, target = target.name(), "copying");

            match descriptor {
                TypeDescriptor::Simple => {
                    if type_id_of(source) == target.id() {
                        Ok(source.clone_boxed())
                    } else {
                        Err(FieldCopyError::TypeMismatch {
                            expected: target.name(),
                            found: source.info().name(),
                        })
                    }
                }
                TypeDescriptor::Collection(_) => {
                    let inner = target.unwrap_optional();
                    let rebuilt = self.reconstruct_collection(present, &inner)?;
                    wrap_optional(target, rebuilt)
                }
                TypeDescriptor::Complex => {
                    let inner = target.unwrap_optional();
                    let inner_kind = classifier().classify(&inner);
                    if !inner_kind.is_complex() {
                        return Err(FieldCopyError::KindMismatch {
                            from: descriptor.name(),
                            into: inner.name(),
                        });
                    }
                    let mut instance = inner.instantiate()?;
                    self.copy_fields(present, &mut *instance);
                    wrap_optional(target, instance)
                }
            }
        })
    }

    pub(crate) fn enter(&mut self, segment: String) {
        self.path.push(segment);
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    fn skip(&mut self, reason: FieldCopyError) {
        let path = self.current_path();
        tracing::debug!(%path, %reason, "field left at default");
        self.report.record_skipped(path, reason);
    }

    /// `a.b[2].c` style path of the field being copied.
    fn current_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }
}

fn assign_field(
    destination: &mut dyn Describable,
    name: &'static str,
    value: Box<dyn Describable>,
) -> Result<(), FieldCopyError> {
    destination
        .field_mut(name)
        .ok_or(FieldCopyError::NotWritable { field: name })?
        .assign(value)
}

/// The absence marker of `target`, when it has one.
fn absent_into(target: &TypeInfo) -> Result<Box<dyn Describable>, FieldCopyError> {
    if target.is_optional() {
        target.instantiate()
    } else {
        Err(FieldCopyError::AbsentIntoRequired {
            type_name: target.name(),
        })
    }
}

/// Store `value` as present in an optional `target`, one layer at a time;
/// pass it through otherwise.
fn wrap_optional(
    target: &TypeInfo,
    value: Box<dyn Describable>,
) -> Result<Box<dyn Describable>, FieldCopyError> {
    let Shape::Optional(inner) = target.shape() else {
        return Ok(value);
    };
    if type_id_of(&*value) == target.id() {
        return Ok(value);
    }
    let value = wrap_optional(&inner(), value)?;
    let mut slot = target.instantiate()?;
    slot.assign(value)?;
    Ok(slot)
}
