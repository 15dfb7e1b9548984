use core::{mem, num::NonZeroUsize};
use alloc::vec::Vec;
use super::Storage;

/// A `Vec` which leaves holes behind removed elements instead of shifting the elements after them.
///
/// Keys are indices into the underlying `Vec`. Since removal never moves other elements, a key stays valid for as long as its element is stored, which is what tree nodes linking to each other by key rely on. The holes form a free-list and are reused by `add` before the `Vec` grows again.
///
/// Fetching a hole is reported as a missing key: `get`, `get_mut` and `contains_key` treat it exactly like an out-of-bounds index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SparseVec<T> {
    slots: Vec<Slot<T>>,
    /// Number of holes and the index of the most recently punched one.
    hole_list: Option<(NonZeroUsize, usize)>,
}
impl<T> SparseVec<T> {
    /// Returns the number of holes in the storage. This operation returns immediately instead of looping through the entire storage, since the sparse storage tracks the number of holes it creates and fills.
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.hole_list.map_or(0, |x| x.0.get())
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.num_holes() == 0
    }
    /// Returns an iterator over the keys of all elements currently stored, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_element())
            .map(|(index, _)| index)
    }

    fn punch_hole(&mut self, index: usize) -> Option<T> {
        let next = self.hole_list.map(|(_, first)| first);
        let slot = self.slots.get_mut(index)?;
        if slot.is_hole() {
            return None;
        }
        let element = match mem::replace(slot, Slot::Hole(next)) {
            Slot::Element(x) => x,
            Slot::Hole(..) => return None,
        };
        let count = self.num_holes() + 1;
        self.hole_list = NonZeroUsize::new(count).map(|count| (count, index));
        Some(element)
    }
}
impl<T> Default for SparseVec<T> {
    #[inline]
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            hole_list: None,
        }
    }
}
impl<T> Storage for SparseVec<T> {
    type Key = usize;
    type Element = T;

    fn add(&mut self, element: Self::Element) -> usize {
        if let Some((count, first)) = self.hole_list {
            let next = match &self.slots[first] {
                Slot::Hole(next) => *next,
                Slot::Element(..) => crate::util::corrupted("the hole list points to an element"),
            };
            self.slots[first] = Slot::Element(element);
            self.hole_list = NonZeroUsize::new(count.get() - 1).map(|count| {
                let next = next.unwrap_or_else(|| {
                    crate::util::corrupted("the hole list ended before its count ran out")
                });
                (count, next)
            });
            first
        } else {
            self.slots.push(Slot::Element(element));
            self.slots.len() - 1
        }
    }
    #[inline]
    fn remove(&mut self, key: &usize) -> Option<Self::Element> {
        self.punch_hole(*key)
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.slots.len() - self.num_holes()
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            hole_list: None,
        }
    }
    #[inline]
    fn get(&self, key: &usize) -> Option<&Self::Element> {
        match self.slots.get(*key) {
            Some(Slot::Element(x)) => Some(x),
            _ => None,
        }
    }
    #[inline]
    fn get_mut(&mut self, key: &usize) -> Option<&mut Self::Element> {
        match self.slots.get_mut(*key) {
            Some(Slot::Element(x)) => Some(x),
            _ => None,
        }
    }
}

/// A slot inside a sparse storage: either a stored element or a hole linking to the next hole.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Slot<T> {
    Element(T),
    Hole(Option<usize>),
}
impl<T> Slot<T> {
    #[inline(always)]
    const fn is_element(&self) -> bool {
        matches!(self, Self::Element(..))
    }
    #[inline(always)]
    const fn is_hole(&self) -> bool {
        matches!(self, Self::Hole(..))
    }
}
