use core::fmt::{self, Debug, Display, Formatter};
use alloc::vec::Vec;
use arrayvec::ArrayVec;
use crate::{
    storage::{Storage, DefaultStorage},
    traversal::{Order, Traversable},
    Side,
};
use super::{info, BinaryTree, Node, NodeInfo, NodeRefMut, SubtreeStats};

/// A reference to a node in a binary tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree.
#[derive(Debug)]
pub struct NodeRef<'a, T, K, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a BinaryTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if it does not exist.
    #[inline]
    pub fn new_raw(tree: &'a BinaryTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(Self { tree, key })
        } else {
            None
        }
    }
    /// Returns a reference the raw storage key for the node.
    #[inline(always)]
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // Clippy has no idea what a destructor is
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns the tree the node belongs to.
    #[inline(always)]
    pub fn tree(&self) -> &'a BinaryTree<T, K, S> {
        self.tree
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node or the root of a detached subtree.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.clone().map(|key| self.at(key))
    }
    /// Returns `true` if the node has no parent, `false` otherwise.
    ///
    /// This is the case for the root node of the tree, but also for the root of every detached subtree. See [`is_attached`] to tell those apart.
    ///
    /// [`is_attached`]: #method.is_attached " "
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node is reachable from the root node of the tree, `false` if it belongs to a detached subtree.
    pub fn is_attached(&self) -> bool {
        let mut current = self.key.clone();
        while let Some(parent) = self.tree.parent_of(&current) {
            current = parent;
        }
        current == self.tree.root
    }
    /// Returns `true` if the node is the node at `ancestor` or one of its descendants, `false` otherwise.
    pub fn is_in_subtree_of(&self, ancestor: &K) -> bool {
        let mut current = Some(self.key.clone());
        while let Some(key) = current {
            if key == *ancestor {
                return true;
            }
            current = self.tree.parent_of(&key);
        }
        false
    }
    /// Returns `true` if the node is a *leaf*, i.e. has neither a left nor a right child; `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
    /// Returns a reference to the value stored in the node.
    #[inline(always)]
    pub fn value(&self) -> &'a T {
        &self.node().value
    }
    /// Returns the side of its parent on which the node hangs, or `None` if it has no parent.
    pub fn side(&self) -> Option<Side> {
        let parent = self.parent()?;
        let side = parent.node().side_of(&self.key);
        if side.is_none() {
            crate::util::corrupted(format_args!(
                "{:?} is not a child of its parent {:?}",
                self.key,
                parent.key,
            ));
        }
        side
    }
    /// Returns a reference to the left child, or `None` if there is none.
    #[inline]
    pub fn left_child(&self) -> Option<Self> {
        self.child(Side::Left)
    }
    /// Returns a reference to the right child, or `None` if there is none.
    #[inline]
    pub fn right_child(&self) -> Option<Self> {
        self.child(Side::Right)
    }
    /// Returns a reference to the child on the specified side, or `None` if there is none.
    #[inline]
    pub fn child(&self, side: Side) -> Option<Self> {
        self.node().child(side).cloned().map(|key| self.at(key))
    }
    /// Returns references to the existing children, left one first.
    pub fn children(&self) -> ArrayVec<[Self; 2]> {
        let mut children = ArrayVec::new();
        children.extend(self.left_child());
        children.extend(self.right_child());
        children
    }

    /// Searches the subtree starting at this node for the specified value, returning the first match in the specified order.
    #[inline]
    pub fn search(&self, value: &T, order: Order) -> Option<Self>
    where T: PartialEq,
    {
        self.tree
            .search_from(&self.key, value, order)
            .map(|key| self.at(key))
    }
    /// Walks the subtree starting at this node in the specified order.
    pub fn descendants(&self, order: Order) -> impl Iterator<Item = NodeRef<'a, T, K, S>> + 'a
    where T: 'a, K: 'a, S: 'a,
    {
        let tree = self.tree;
        tree.traverse_from(self.key.clone(), order)
            .map(move |key| NodeRef { tree, key })
    }
    /// Returns the number of nodes and the height of the subtree starting at this node.
    ///
    /// A subtree with only this node has a size of 1 and a height of 0.
    #[inline]
    pub fn stats(&self) -> SubtreeStats {
        info::stats(self.tree, self.key.clone())
    }
    /// Returns summaries of all nodes of the subtree starting at this node, in breadth-first order.
    #[inline]
    pub fn flatten(&self) -> Vec<NodeInfo<&'a T>> {
        info::flatten(self.tree, self.key.clone())
    }
    /// Returns the summary of this node: its value, the values of its children and the value of its parent.
    pub fn info(&self) -> NodeInfo<&'a T> {
        info::node_info(self.tree, &self.key)
    }

    #[inline(always)]
    fn at(&self, key: K) -> Self {
        Self { tree: self.tree, key }
    }
    #[inline(always)]
    #[track_caller]
    fn node(&self) -> &'a Node<T, K> {
        self.tree.node_at(&self.key)
    }
}
impl<'a, T, K, S> Clone for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            key: self.key.clone(),
        }
    }
}
impl<'a, T, K, S> Copy for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{}
impl<'a, T, K, S> PartialEq for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Two references are equal if they point to the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}
impl<'a, T, K, S> Eq for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{}
impl<'a, T, K, S> From<&'a NodeRefMut<'_, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline]
    fn from(op: &'a NodeRefMut<'_, T, K, S>) -> Self {
        Self {
            tree: op.tree(),
            key: op.raw_key().clone(),
        }
    }
}
impl<'a, T, K, S> From<NodeRefMut<'a, T, K, S>> for NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline]
    fn from(op: NodeRefMut<'a, T, K, S>) -> Self {
        let (tree, key) = op.into_parts();
        Self { tree, key }
    }
}
impl<'a, T, K, S> Display for NodeRef<'a, T, K, S>
where
    T: Display,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}
