//! Utilities for treating the backing storage for trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the main trait for the backing storages for trees
//! - [`SparseVec`], a `Vec`-backed storage which leaves reusable holes behind removed elements instead of shifting, so that keys held by other elements stay valid
//! - [`DefaultStorage`], a type definition for the default backing storage used by trees unless a different one is specified
//!
//! [`Storage`]: trait.Storage.html " "
//! [`SparseVec`]: struct.SparseVec.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "

mod sparse;
pub use sparse::SparseVec;

use core::fmt::Debug;

/// Trait for various kinds of containers which can be the backing storage for trees.
///
/// There's a number of invariants which have to be followed by the container:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - A key returned by `add` must stay valid and keep pointing to the same element until that element is removed, no matter how many other elements are added or removed in the meantime;
/// - If an element is added at a key, it must be retrieveable in the exact same state as it was inserted until it is removed or modified using a method which explicitly does so.
///
/// Tree structures rely on those invariants for the consistency of their links.
pub trait Storage: Sized {
    /// The type used for element naming.
    type Key: Clone + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Adds an element to the collection with an unspecified key, returning that key.
    fn add(&mut self, element: Self::Element) -> Self::Key;
    /// Removes and returns the element identified by `key` within the storage, or `None` if the key does not exist.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Element>;
    /// Returns the number of elements in the storage, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Creates an empty storage with the specified capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns a reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get(&self, key: &Self::Key) -> Option<&Self::Element>;
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element>;

    /// Returns `true` if the specified key is present in the storage, `false` otherwise.
    #[inline]
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }
    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The default storage type used by the tree types when a storage type is not provided.
///
/// Currently, this is always [`SparseVec`].
///
/// [`SparseVec`]: struct.SparseVec.html " "
pub type DefaultStorage<T> = SparseVec<T>;
