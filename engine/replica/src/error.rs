//! Error types for the three copy strategies.
//!
//! Only [`CopyError`] ever reaches a caller of the structural or shallow
//! entry points. [`FieldCopyError`]s are absorbed by the walk and surface
//! only through a [`CopyReport`](crate::CopyReport). [`FallbackError`] is
//! absorbed by `universal_copy` and surfaced by `try_universal_copy`.

use thiserror::Error;

/// The destination root could not be produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CopyError {
    /// The destination type has no constructor.
    #[error("cannot instantiate destination type `{type_name}`")]
    Instantiation { type_name: &'static str },
}

/// Why a single field was left at its default.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldCopyError {
    /// Simple values only copy between identical types.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The source was absent but the destination cannot represent absence.
    #[error("absent value cannot be stored in non-optional `{type_name}`")]
    AbsentIntoRequired { type_name: &'static str },

    /// A nested destination value could not be created.
    #[error("`{type_name}` cannot be instantiated")]
    NotConstructible { type_name: &'static str },

    /// Associative containers are not rebuilt structurally.
    #[error("container `{type_name}` is not supported by structural copy")]
    UnsupportedContainer { type_name: &'static str },

    /// A fixed-length destination does not match the source element count.
    #[error("`{type_name}` holds {expected} elements but the source has {found}")]
    LengthMismatch {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Source and destination disagree on classification, e.g. a record
    /// copied into a collection.
    #[error("cannot copy {from} value into `{into}`")]
    KindMismatch {
        from: &'static str,
        into: &'static str,
    },

    /// The destination exposes the field but does not allow writing it.
    #[error("field `{field}` is not writable")]
    NotWritable { field: &'static str },
}

/// Encode/decode failure in the serialization fallback.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("failed to encode `{type_name}`: {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode into `{type_name}`: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
