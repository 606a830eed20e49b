//! Shared graph nodes whose encoding drops back-references.
//!
//! Owned Rust values cannot form cycles, so graphs that do (parent links,
//! back-pointers) are built from [`Shared`] handles. While a `Shared` node is
//! being encoded its address stays on a thread-local path; meeting the same
//! address again means the edge points at an ancestor, and the active
//! [`ReferenceLoopPolicy`] decides whether it is written as `null` or fails
//! the encode. Siblings that share a node are not loops and are encoded in
//! full each time.
//!
//! A dropped single edge is written as `null`, so it should be typed
//! `Option<Shared<T>>` and decodes as `None`. Sequences of nodes should be a
//! [`SharedVec`], which leaves a looping element out altogether; a plain
//! `Vec<Shared<T>>` can instead decode through [`skip_absent_elements`].

use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashSet;
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};

use crate::config::ReferenceLoopPolicy;

thread_local! {
    static ENCODING_PATH: RefCell<FxHashSet<usize>> = RefCell::new(FxHashSet::default());
    static LOOP_POLICY: Cell<ReferenceLoopPolicy> = const { Cell::new(ReferenceLoopPolicy::Ignore) };
}

/// Reference-counted, lock-protected node of an object graph.
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write()
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }

    /// Whether this node is an ancestor of the value being encoded.
    fn is_on_path(&self) -> bool {
        let address = self.address();
        ENCODING_PATH.with(|path| path.borrow().contains(&address))
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// Never prints the contents: they may lead back here.
impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared")
            .field(&Arc::as_ptr(&self.inner))
            .finish()
    }
}

impl<T: Serialize> Serialize for Shared<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let address = self.address();
        let entered = ENCODING_PATH.with(|path| path.borrow_mut().insert(address));
        if !entered {
            return match LOOP_POLICY.with(Cell::get) {
                ReferenceLoopPolicy::Ignore => {
                    tracing::trace!(node = type_name::<T>(), "dropping back-reference");
                    serializer.serialize_none()
                }
                ReferenceLoopPolicy::Error => Err(ser::Error::custom(format!(
                    "reference loop detected at `{}`",
                    type_name::<T>()
                ))),
            };
        }

        let _on_path = PathEntry(address);
        self.inner.read().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Shared<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}

/// Sequence of shared nodes whose encoding leaves out back-references.
///
/// Under [`ReferenceLoopPolicy::Ignore`] an element that points at an
/// ancestor is skipped rather than written as `null`; under
/// [`ReferenceLoopPolicy::Error`] it fails the encode like any other loop.
/// Decoding tolerates `null` entries and drops them.
pub struct SharedVec<T>(Vec<Shared<T>>);

impl<T> SharedVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<Shared<T>> {
        self.0
    }
}

impl<T> Default for SharedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SharedVec<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T> Deref for SharedVec<T> {
    type Target = Vec<Shared<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for SharedVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<Shared<T>>> for SharedVec<T> {
    fn from(nodes: Vec<Shared<T>>) -> Self {
        Self(nodes)
    }
}

impl<T> FromIterator<Shared<T>> for SharedVec<T> {
    fn from_iter<I: IntoIterator<Item = Shared<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for SharedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if LOOP_POLICY.with(Cell::get) == ReferenceLoopPolicy::Error {
            return serializer.collect_seq(&self.0);
        }
        let kept: Vec<&Shared<T>> = self.0.iter().filter(|node| !node.is_on_path()).collect();
        if kept.len() < self.0.len() {
            tracing::trace!(
                node = type_name::<T>(),
                dropped = self.0.len() - kept.len(),
                "leaving out back-references"
            );
        }
        serializer.collect_seq(kept)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SharedVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        skip_absent_elements(deserializer).map(Self)
    }
}

/// Decode a sequence, dropping `null` entries.
///
/// For `#[serde(deserialize_with = "replica::skip_absent_elements")]` on a
/// `Vec<Shared<T>>` whose back-references were encoded as `null`.
pub fn skip_absent_elements<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Vec::<Option<T>>::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().collect())
}

/// Removes a node from the encoding path when its subtree is done.
struct PathEntry(usize);

impl Drop for PathEntry {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = ENCODING_PATH.try_with(|path| path.borrow_mut().remove(&self.0));
    }
}

/// Installs a loop policy for the current thread until dropped.
pub(crate) struct PolicyScope {
    previous: ReferenceLoopPolicy,
}

impl PolicyScope {
    pub(crate) fn enter(policy: ReferenceLoopPolicy) -> Self {
        let previous = LOOP_POLICY.with(|current| current.replace(policy));
        Self { previous }
    }
}

impl Drop for PolicyScope {
    fn drop(&mut self) {
        let _ = LOOP_POLICY.try_with(|current| current.set(self.previous));
    }
}
