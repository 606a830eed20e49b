//! Per-call record of what a structural copy assigned and skipped.

use std::fmt;

use crate::error::FieldCopyError;

/// A destination field left at its default, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedField {
    /// Dotted path from the destination root, e.g. `orders[2].total`.
    pub path: String,
    pub reason: FieldCopyError,
}

impl fmt::Display for SkippedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Outcome of a structural walk.
///
/// `copied` counts field assignments at every depth, so a nested record
/// contributes its own fields plus the assignment of the record itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    copied: usize,
    skipped: Vec<SkippedField>,
}

impl CopyReport {
    pub fn copied(&self) -> usize {
        self.copied
    }

    pub fn skipped(&self) -> &[SkippedField] {
        &self.skipped
    }

    /// True when no field was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Reason a given path was skipped, if it was.
    pub fn reason_for(&self, path: &str) -> Option<&FieldCopyError> {
        self.skipped
            .iter()
            .find(|skipped| skipped.path == path)
            .map(|skipped| &skipped.reason)
    }

    pub(crate) fn record_copied(&mut self) {
        self.copied += 1;
    }

    pub(crate) fn record_skipped(&mut self, path: String, reason: FieldCopyError) {
        self.skipped.push(SkippedField { path, reason });
    }

    /// Fold in the report of a nested walk that reached the destination.
    pub(crate) fn merge(&mut self, other: CopyReport) {
        self.copied += other.copied;
        self.skipped.extend(other.skipped);
    }
}
