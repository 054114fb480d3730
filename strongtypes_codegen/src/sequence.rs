//! Immutable sequence with value equality.
//!
//! Generation requests hold their name lists in an [`EquatableSeq`] so two
//! requests built from the same declaration compare and hash equal, which is
//! what lets the change detection cache skip unchanged declarations.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared, immutable, structurally compared sequence.
///
/// The backing store may be absent; an absent sequence behaves exactly like
/// an empty one (count 0, equal to every other empty sequence, same hash).
pub struct EquatableSeq<T> {
    items: Option<Arc<[T]>>,
}

impl<T> EquatableSeq<T> {
    pub const fn empty() -> Self {
        Self { items: None }
    }

    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Some(items.into()),
        }
    }

    pub fn count(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Read-only view of the items.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }
}

impl<T: Clone> EquatableSeq<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T> Clone for EquatableSeq<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Default for EquatableSeq<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for EquatableSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for EquatableSeq<T> {}

impl<T: Hash> Hash for EquatableSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for EquatableSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> From<Vec<T>> for EquatableSeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for EquatableSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> AsRef<[T]> for EquatableSeq<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a EquatableSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
