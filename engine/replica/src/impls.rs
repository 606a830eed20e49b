//! Built-in descriptors for std and ecosystem types.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::describe::{
    construct_default, downcast, Describable, MapInfo, ScalarKind, SequenceInfo, SequenceKind,
    Shape, TypeInfo,
};
use crate::error::FieldCopyError;

/// Members every by-value impl shares.
macro_rules! by_value_members {
    () => {
        fn info(&self) -> TypeInfo {
            <Self as Describable>::type_info()
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
            self
        }

        fn clone_boxed(&self) -> Box<dyn Describable> {
            Box::new(self.clone())
        }

        fn present(&self) -> Option<&dyn Describable> {
            Some(self)
        }

        fn assign(&mut self, value: Box<dyn Describable>) -> Result<(), FieldCopyError> {
            *self = downcast::<Self>(value)?;
            Ok(())
        }
    };
}

macro_rules! impl_scalar {
    (@no_default $kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describable for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>(Shape::Scalar(ScalarKind::$kind))
                }

                by_value_members!();
            }
        )+
    };
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describable for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>(Shape::Scalar(ScalarKind::$kind))
                        .with_constructor(construct_default::<Self>)
                }

                by_value_members!();
            }
        )+
    };
}

impl_scalar!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_scalar!(Float => f32, f64);
impl_scalar!(Bool => bool);
impl_scalar!(Char => char);
impl_scalar!(Text => String);
impl_scalar!(Unit => ());
impl_scalar!(Duration => Duration);
impl_scalar!(Timestamp => DateTime<Utc>, DateTime<FixedOffset>);
impl_scalar!(Timestamp => NaiveDate, NaiveTime, NaiveDateTime);
impl_scalar!(Identifier => Uuid);
impl_scalar!(Decimal => Decimal);

// Clock-dependent or without a `Default`: described, never instantiated.
impl_scalar!(@no_default Timestamp => SystemTime, DateTime<Local>);
impl_scalar!(@no_default Duration => TimeDelta);

impl<T: Describable + Clone> Describable for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Optional(T::type_info)).with_constructor(construct_default::<Self>)
    }

    fn info(&self) -> TypeInfo {
        Self::type_info()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Describable> {
        Box::new(self.clone())
    }

    fn present(&self) -> Option<&dyn Describable> {
        self.as_ref().and_then(Describable::present)
    }

    fn assign(&mut self, value: Box<dyn Describable>) -> Result<(), FieldCopyError> {
        *self = if value.as_any().is::<T>() {
            Some(downcast::<T>(value)?)
        } else {
            downcast::<Self>(value)?
        };
        Ok(())
    }
}

fn downcast_all<T: Describable>(items: Vec<Box<dyn Describable>>) -> Result<Vec<T>, FieldCopyError> {
    items.into_iter().map(downcast::<T>).collect()
}

fn assemble_vec<T: Describable + Clone>(
    items: Vec<Box<dyn Describable>>,
) -> Result<Box<dyn Describable>, FieldCopyError> {
    Ok(Box::new(downcast_all::<T>(items)?))
}

fn assemble_deque<T: Describable + Clone>(
    items: Vec<Box<dyn Describable>>,
) -> Result<Box<dyn Describable>, FieldCopyError> {
    Ok(Box::new(VecDeque::from(downcast_all::<T>(items)?)))
}

fn assemble_boxed_slice<T: Describable + Clone>(
    items: Vec<Box<dyn Describable>>,
) -> Result<Box<dyn Describable>, FieldCopyError> {
    Ok(Box::new(downcast_all::<T>(items)?.into_boxed_slice()))
}

fn assemble_array<T: Describable + Clone, const N: usize>(
    items: Vec<Box<dyn Describable>>,
) -> Result<Box<dyn Describable>, FieldCopyError> {
    let found = items.len();
    let array: [T; N] = downcast_all::<T>(items)?.try_into().map_err(|_| {
        FieldCopyError::LengthMismatch {
            type_name: std::any::type_name::<[T; N]>(),
            expected: N,
            found,
        }
    })?;
    Ok(Box::new(array))
}

macro_rules! sequence_members {
    () => {
        fn elements(&self) -> Vec<&dyn Describable> {
            self.iter().map(|item| item as &dyn Describable).collect()
        }

        by_value_members!();
    };
}

impl<T: Describable + Clone> Describable for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Sequence(SequenceInfo {
            kind: SequenceKind::Growable,
            element: T::type_info,
            assemble: assemble_vec::<T>,
        }))
        .with_constructor(construct_default::<Self>)
    }

    sequence_members!();
}

impl<T: Describable + Clone> Describable for VecDeque<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Sequence(SequenceInfo {
            kind: SequenceKind::Growable,
            element: T::type_info,
            assemble: assemble_deque::<T>,
        }))
        .with_constructor(construct_default::<Self>)
    }

    sequence_members!();
}

impl<T: Describable + Clone> Describable for Box<[T]> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Sequence(SequenceInfo {
            kind: SequenceKind::FixedSize,
            element: T::type_info,
            assemble: assemble_boxed_slice::<T>,
        }))
        .with_constructor(construct_default::<Self>)
    }

    sequence_members!();
}

// Arrays have no constructor: their length comes from the type, not the source.
impl<T: Describable + Clone, const N: usize> Describable for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Sequence(SequenceInfo {
            kind: SequenceKind::FixedSize,
            element: T::type_info,
            assemble: assemble_array::<T, N>,
        }))
    }

    sequence_members!();
}

impl<K, V> Describable for BTreeMap<K, V>
where
    K: Describable + Clone + Ord,
    V: Describable + Clone,
{
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Map(MapInfo {
            key: K::type_info,
            value: V::type_info,
        }))
        .with_constructor(construct_default::<Self>)
    }

    by_value_members!();
}

impl<K, V, S> Describable for HashMap<K, V, S>
where
    K: Describable + Clone + Eq + Hash,
    V: Describable + Clone,
    S: BuildHasher + Clone + Default + 'static,
{
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(Shape::Map(MapInfo {
            key: K::type_info,
            value: V::type_info,
        }))
        .with_constructor(construct_default::<Self>)
    }

    by_value_members!();
}
