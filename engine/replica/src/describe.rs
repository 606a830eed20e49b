//! Compile-time type descriptors.
//!
//! [`Describable`] is the capability every participating type implements. It
//! has two halves:
//!
//! - a static [`TypeInfo`] (name, `TypeId`, [`Shape`], optional constructor),
//!   produced by [`Describable::type_info`];
//! - an object-safe value surface (field access by name, element iteration,
//!   absence, whole-value assignment) used while walking `&dyn Describable`
//!   graphs.
//!
//! Descriptors are cheap to rebuild and carry function pointers rather than
//! references, so generic containers (`Vec<T>`, `Option<T>`) describe
//! themselves without any registry.

use std::any::{type_name, Any, TypeId};
use std::fmt;

use crate::error::FieldCopyError;

/// Builds the descriptor of a type.
pub type TypeInfoFn = fn() -> TypeInfo;

/// Creates a default instance of a type.
pub type Constructor = fn() -> Box<dyn Describable>;

/// Packs copied elements into a concrete container.
pub type Assembler = fn(Vec<Box<dyn Describable>>) -> Result<Box<dyn Describable>, FieldCopyError>;

/// A type that exposes its structure to the copy engine.
///
/// Implement through `#[derive(Describable)]` for records and unit enums.
/// Hand-written impls must keep [`info`](Self::info) consistent with
/// [`type_info`](Self::type_info), and [`field`](Self::field) /
/// [`field_mut`](Self::field_mut) consistent with the record's [`FieldInfo`]s.
pub trait Describable: Any {
    /// Static descriptor of this type.
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Descriptor of the value's concrete type.
    fn info(&self) -> TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Owned copy of this value.
    fn clone_boxed(&self) -> Box<dyn Describable>;

    /// The value with optional wrappers removed, or `None` when absent.
    fn present(&self) -> Option<&dyn Describable>;

    /// Replace `self` with `value`, which must have the same concrete type.
    ///
    /// Optional values also accept their inner type and store it as present.
    fn assign(&mut self, value: Box<dyn Describable>) -> Result<(), FieldCopyError>;

    /// Readable field by exposed name.
    fn field(&self, _name: &str) -> Option<&dyn Describable> {
        None
    }

    /// Writable field by exposed name.
    fn field_mut(&mut self, _name: &str) -> Option<&mut dyn Describable> {
        None
    }

    /// Elements of a sequence, in iteration order. Empty for anything else.
    fn elements(&self) -> Vec<&dyn Describable> {
        Vec::new()
    }
}

impl fmt::Debug for dyn Describable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.info().name())
    }
}

/// `TypeId` of the concrete value behind a trait object.
#[inline]
pub fn type_id_of(value: &dyn Describable) -> TypeId {
    value.as_any().type_id()
}

/// Default-construct `T` behind a trait object. Used as a [`Constructor`].
pub fn construct_default<T: Describable + Default>() -> Box<dyn Describable> {
    Box::new(T::default())
}

/// Take a boxed value back out as its concrete type.
pub fn downcast<T: Describable>(value: Box<dyn Describable>) -> Result<T, FieldCopyError> {
    if !value.as_any().is::<T>() {
        return Err(FieldCopyError::TypeMismatch {
            expected: type_name::<T>(),
            found: value.info().name(),
        });
    }
    value
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| FieldCopyError::TypeMismatch {
            expected: type_name::<T>(),
            found: "<unknown>",
        })
}

/// Kind of an atomic, by-value type.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum ScalarKind {
    Integer,
    Float,
    Bool,
    Char,
    Text,
    Timestamp,
    Duration,
    Identifier,
    Decimal,
    Enumeration,
    Unit,
}

impl ScalarKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Duration => "duration",
            Self::Identifier => "identifier",
            Self::Decimal => "decimal",
            Self::Enumeration => "enumeration",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a sequence has its length fixed at allocation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum SequenceKind {
    /// Array-like: sized once from the source length.
    FixedSize,
    /// List-like: starts empty, elements are appended.
    Growable,
}

/// Descriptor of an ordered container with a single element type.
#[derive(Clone, Copy, Debug)]
pub struct SequenceInfo {
    pub kind: SequenceKind,
    pub element: TypeInfoFn,
    pub assemble: Assembler,
}

impl SequenceInfo {
    pub fn element_info(&self) -> TypeInfo {
        (self.element)()
    }
}

/// Descriptor of an associative container.
#[derive(Clone, Copy, Debug)]
pub struct MapInfo {
    pub key: TypeInfoFn,
    pub value: TypeInfoFn,
}

/// Structure of a described type.
#[derive(Clone, Debug)]
pub enum Shape {
    Scalar(ScalarKind),
    /// `Option`-like wrapper; `None` is the absence marker.
    Optional(TypeInfoFn),
    Sequence(SequenceInfo),
    Map(MapInfo),
    /// Named fields in declaration order.
    Record(Vec<FieldInfo>),
}

/// One exposed field of a record.
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    name: &'static str,
    id: TypeId,
    ty: TypeInfoFn,
    readable: bool,
    writable: bool,
}

impl FieldInfo {
    /// A readable, writable field of type `T`.
    pub fn of<T: Describable>(name: &'static str) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            ty: T::type_info,
            readable: true,
            writable: true,
        }
    }

    #[must_use]
    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    #[must_use]
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `TypeId` of the declared field type.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

/// Static description of a type.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    name: &'static str,
    id: TypeId,
    shape: Shape,
    construct: Option<Constructor>,
}

impl TypeInfo {
    /// Descriptor for `T` with no constructor.
    pub fn new<T: Any>(shape: Shape) -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            shape,
            construct: None,
        }
    }

    #[must_use]
    pub fn with_constructor(mut self, construct: Constructor) -> Self {
        self.construct = Some(construct);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.construct
    }

    pub fn is_constructible(&self) -> bool {
        self.construct.is_some()
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.shape, Shape::Optional(_))
    }

    /// Fields of a record; empty for every other shape.
    pub fn fields(&self) -> &[FieldInfo] {
        match &self.shape {
            Shape::Record(fields) => fields,
            _ => &[],
        }
    }

    /// Exposed field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Descriptor with every optional layer removed.
    pub fn unwrap_optional(&self) -> TypeInfo {
        let mut info = self.clone();
        while let Shape::Optional(inner) = info.shape {
            info = inner();
        }
        info
    }

    /// Create a fresh default instance.
    pub fn instantiate(&self) -> Result<Box<dyn Describable>, FieldCopyError> {
        let construct = self
            .construct
            .ok_or(FieldCopyError::NotConstructible { type_name: self.name })?;
        Ok(construct())
    }
}

#[cfg(test)]
mod tests;
