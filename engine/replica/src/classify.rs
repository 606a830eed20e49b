//! Type classification: Simple, Collection, or Complex.
//!
//! Classification is a pure function of a type's [`Shape`], memoised in a
//! process-wide cache keyed by `TypeId`. Entries are never invalidated since
//! a type's shape cannot change while the process runs.
//!
//! # Thread Safety
//! The cache sits behind a `parking_lot::RwLock`. Lookups take the read lock;
//! a miss computes outside any lock and then inserts under the write lock
//! with `entry().or_insert`, so two threads racing on the same type may both
//! compute it but only one entry is ever stored.

use std::any::TypeId;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::describe::{type_id_of, Describable, SequenceKind, Shape, TypeInfo};

/// Container flavour of a [`TypeDescriptor::Collection`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CollectionKind {
    /// Array-like, allocated at the source length.
    FixedSize,
    /// List-like, built by appending.
    Growable,
    /// Associative (key and value types). Classified, never reconstructed.
    Keyed,
}

impl From<SequenceKind> for CollectionKind {
    fn from(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::FixedSize => Self::FixedSize,
            SequenceKind::Growable => Self::Growable,
        }
    }
}

/// How the copy engine treats values of a type.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TypeDescriptor {
    /// Atomic by-value data, optionally wrapped in `Option`.
    Simple,
    Collection(CollectionKind),
    /// A record with named fields.
    Complex,
}

impl TypeDescriptor {
    #[inline]
    pub const fn is_simple(self) -> bool {
        matches!(self, Self::Simple)
    }

    #[inline]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Collection(_))
    }

    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Collection(CollectionKind::FixedSize) => "fixed-size collection",
            Self::Collection(CollectionKind::Growable) => "growable collection",
            Self::Collection(CollectionKind::Keyed) => "keyed collection",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Memoising classifier.
pub struct TypeClassifier {
    cache: RwLock<FxHashMap<TypeId, TypeDescriptor>>,
}

impl TypeClassifier {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Classify the type described by `info`.
    pub fn classify(&self, info: &TypeInfo) -> TypeDescriptor {
        if let Some(&descriptor) = self.cache.read().get(&info.id()) {
            return descriptor;
        }
        let descriptor = self.compute(info);
        *self.cache.write().entry(info.id()).or_insert(descriptor)
    }

    /// Classify the concrete type of `value`.
    ///
    /// A cache hit avoids building the value's descriptor at all.
    pub fn classify_value(&self, value: &dyn Describable) -> TypeDescriptor {
        if let Some(&descriptor) = self.cache.read().get(&type_id_of(value)) {
            return descriptor;
        }
        self.classify(&value.info())
    }

    /// Classify `T`.
    pub fn classify_type<T: Describable>(&self) -> TypeDescriptor {
        if let Some(&descriptor) = self.cache.read().get(&TypeId::of::<T>()) {
            return descriptor;
        }
        self.classify(&T::type_info())
    }

    /// Whether `id` has been classified already.
    pub fn is_cached(&self, id: TypeId) -> bool {
        self.cache.read().contains_key(&id)
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    fn compute(&self, info: &TypeInfo) -> TypeDescriptor {
        match info.shape() {
            Shape::Scalar(_) => TypeDescriptor::Simple,
            // Absence is a runtime property; the wrapper classifies as its content.
            Shape::Optional(inner) => self.classify(&inner()),
            Shape::Sequence(sequence) => TypeDescriptor::Collection(sequence.kind.into()),
            Shape::Map(_) => TypeDescriptor::Collection(CollectionKind::Keyed),
            Shape::Record(_) => TypeDescriptor::Complex,
        }
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CLASSIFIER: OnceLock<TypeClassifier> = OnceLock::new();

/// The process-wide classifier (lazily initialized).
pub fn classifier() -> &'static TypeClassifier {
    GLOBAL_CLASSIFIER.get_or_init(TypeClassifier::new)
}

/// Classify a type through the process-wide classifier.
#[inline]
pub fn classify(info: &TypeInfo) -> TypeDescriptor {
    classifier().classify(info)
}

#[cfg(test)]
mod tests;
