use core::fmt::Debug;
use crate::Side;

/// A node of a binary tree: a value and three optional links, stored as keys into the tree's storage.
///
/// The node is a plain data holder and does not enforce anything about its links. Keeping the parent link consistent with the children of the parent is the job of [`BinaryTree`], which is the only one to see the whole structure. The setters on this type do **not** maintain that consistency; prefer the editing methods of the tree.
///
/// The parent link is a back-reference used only for upward navigation. A node is owned by the storage of its tree, never by its parent.
///
/// [`BinaryTree`]: struct.BinaryTree.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<T, K>
where K: Clone + Debug + Eq,
{
    pub(super) value: T,
    pub(super) left: Option<K>,
    pub(super) right: Option<K>,
    pub(super) parent: Option<K>,
}
impl<T, K> Node<T, K>
where K: Clone + Debug + Eq,
{
    /// Creates a node without children or parent.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }
    #[inline(always)]
    pub(super) const fn with_links(
        value: T,
        left: Option<K>,
        right: Option<K>,
        parent: Option<K>,
    ) -> Self {
        Self { value, left, right, parent }
    }

    /// Returns a reference to the value of the node.
    #[inline(always)]
    pub const fn value(&self) -> &T {
        &self.value
    }
    /// Returns a *mutable* reference to the value of the node.
    #[inline(always)]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }
    /// Replaces the value of the node, returning the old one.
    #[inline]
    pub fn set_value(&mut self, value: T) -> T {
        core::mem::replace(&mut self.value, value)
    }
    /// Returns the key of the left child.
    #[inline(always)]
    pub const fn left(&self) -> Option<&K> {
        self.left.as_ref()
    }
    /// Sets the key of the left child, returning the previous one. The child's parent link is not touched.
    #[inline]
    pub fn set_left(&mut self, left: Option<K>) -> Option<K> {
        core::mem::replace(&mut self.left, left)
    }
    /// Returns the key of the right child.
    #[inline(always)]
    pub const fn right(&self) -> Option<&K> {
        self.right.as_ref()
    }
    /// Sets the key of the right child, returning the previous one. The child's parent link is not touched.
    #[inline]
    pub fn set_right(&mut self, right: Option<K>) -> Option<K> {
        core::mem::replace(&mut self.right, right)
    }
    /// Returns the key of the parent.
    #[inline(always)]
    pub const fn parent(&self) -> Option<&K> {
        self.parent.as_ref()
    }
    /// Sets the key of the parent, returning the previous one. The parent's child links are not touched.
    #[inline]
    pub fn set_parent(&mut self, parent: Option<K>) -> Option<K> {
        core::mem::replace(&mut self.parent, parent)
    }

    /// Returns the key of the child on the specified side.
    #[inline]
    pub const fn child(&self, side: Side) -> Option<&K> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
    #[inline]
    pub(super) fn child_slot_mut(&mut self, side: Side) -> &mut Option<K> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
    /// Returns `true` if the node has neither a left nor a right child, `false` otherwise.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
    /// Returns the side on which `child` hangs from this node, checking the left side first, or `None` if it is not a child of this node.
    #[inline]
    pub fn side_of(&self, child: &K) -> Option<Side> {
        if self.left.as_ref() == Some(child) {
            Some(Side::Left)
        } else if self.right.as_ref() == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}
