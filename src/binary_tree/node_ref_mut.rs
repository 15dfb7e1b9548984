use core::{fmt::Debug, mem};
use arrayvec::ArrayVec;
use log::{debug, trace};
use crate::{
    storage::{Storage, DefaultStorage},
    Side,
    TreeError,
};
use super::{BinaryTree, Node, NodeRef};

/// A *mutable* reference to a node in a binary tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree and modify it as a whole.
///
/// Every structural edit made through this type keeps the parent link of each affected node consistent with the child links of its parent.
#[derive(Debug)]
pub struct NodeRefMut<'a, T, K, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a mut BinaryTree<T, K, S>,
    key: K,
}
impl<'a, T, K, S> NodeRefMut<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRefMut` pointing to the specified key in the storage, or `None` if it does not exist.
    pub fn new_raw(tree: &'a mut BinaryTree<T, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(Self { tree, key })
        } else {
            None
        }
    }
    /// Returns a reference to the raw storage key for the node.
    #[inline(always)]
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Consumes the reference and returns the underlying raw storage key for the node.
    #[inline(always)]
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns the tree the node belongs to.
    #[inline(always)]
    pub fn tree(&self) -> &BinaryTree<T, K, S> {
        self.tree
    }
    #[inline(always)]
    pub(super) fn into_parts(self) -> (&'a mut BinaryTree<T, K, S>, K) {
        (self.tree, self.key)
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it has no parent.
    #[inline]
    pub fn parent(&self) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::from(self).parent()
    }
    /// Returns a *mutable* reference to the parent node of the pointee, or `None` if it has no parent.
    pub fn parent_mut(&mut self) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.node().parent.clone()?;
        Some(NodeRefMut {
            tree: &mut *self.tree,
            key,
        })
    }
    /// Returns `true` if the node has no parent, `false` otherwise.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` if the node is a *leaf*, i.e. has neither a left nor a right child; `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
    /// Returns a reference to the value stored in the node.
    #[inline]
    pub fn value(&self) -> &T {
        &self.node().value
    }
    /// Returns a *mutable* reference to the value stored in the node.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.node_mut().value
    }
    /// Replaces the value stored in the node, returning the previous one. The links of the tree are never touched.
    #[inline]
    pub fn set_value(&mut self, value: T) -> T {
        self.node_mut().set_value(value)
    }
    /// Returns a reference to the child on the specified side, or `None` if there is none.
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::from(self).child(side)
    }
    /// Returns a *mutable* reference to the child on the specified side, or `None` if there is none.
    pub fn child_mut(&mut self, side: Side) -> Option<NodeRefMut<'_, T, K, S>> {
        let key = self.node().child(side).cloned()?;
        Some(NodeRefMut {
            tree: &mut *self.tree,
            key,
        })
    }

    /// Adds a new node with the specified value as the left child, returning its key. An existing left subtree is pushed down to the left of the new node.
    #[inline]
    pub fn add_left(&mut self, value: T) -> K {
        self.add_child_pushing(Side::Left, value, Side::Left)
    }
    /// Adds a new node with the specified value as the right child, returning its key. An existing right subtree is pushed down to the right of the new node.
    #[inline]
    pub fn add_right(&mut self, value: T) -> K {
        self.add_child_pushing(Side::Right, value, Side::Right)
    }
    /// Adds a new node with the specified value as the child on side `side`, returning its key.
    ///
    /// If that side was already occupied, the existing subtree is pushed down one level: it becomes the child on side `push_to` of the new node, and its parent link is redirected to the new node. The other side of the new node is left empty.
    pub fn add_child_pushing(&mut self, side: Side, value: T, push_to: Side) -> K {
        let displaced = self.node().child(side).cloned();
        let (left, right) = match (displaced.clone(), push_to) {
            (None, _) => (None, None),
            (Some(displaced), Side::Left) => (Some(displaced), None),
            (Some(displaced), Side::Right) => (None, Some(displaced)),
        };
        let new_key = self.tree.storage.add(Node::with_links(
            value,
            left,
            right,
            Some(self.key.clone()),
        ));
        if let Some(displaced) = &displaced {
            self.tree.node_at_mut(displaced).parent = Some(new_key.clone());
            trace!(
                "inserted {:?} above {:?} on the {:?} of {:?}",
                new_key,
                displaced,
                side,
                self.key,
            );
        } else {
            trace!("inserted {:?} on the {:?} of {:?}", new_key, side, self.key);
        }
        *self.node_mut().child_slot_mut(side) = Some(new_key.clone());
        new_key
    }
    /// Attaches the subtree rooted at `subtree_root` as the child on the specified side, returning the key of the subtree which was previously attached there, if any. That subtree is overwritten and becomes detached.
    ///
    /// If `subtree_root` was attached somewhere else, it's detached from its old parent first.
    ///
    /// # Errors
    /// Will fail in the following scenarios, leaving the tree unchanged:
    /// - `subtree_root` is not in the tree ([`TreeError::NoSuchNode`]);
    /// - `subtree_root` is the root node of the tree, even if this node is part of a detached subtree ([`TreeError::WasRootNode`]);
    /// - `subtree_root` is this node or one of its ancestors ([`TreeError::WouldCreateCycle`]);
    /// - `subtree_root` has to be moved, but its parent link was broken by hand ([`TreeError::InconsistentLink`]).
    ///
    /// The checks are made in that order.
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    /// [`TreeError::WouldCreateCycle`]: ../enum.TreeError.html#variant.WouldCreateCycle " "
    /// [`TreeError::InconsistentLink`]: ../enum.TreeError.html#variant.InconsistentLink " "
    pub fn attach_subtree(&mut self, subtree_root: &K, side: Side) -> Result<Option<K>, TreeError> {
        if !self.tree.storage.contains_key(subtree_root) {
            return Err(TreeError::NoSuchNode);
        }
        if *subtree_root == self.tree.root {
            return Err(TreeError::WasRootNode);
        }
        if NodeRef::from(&*self).is_in_subtree_of(subtree_root) {
            return Err(TreeError::WouldCreateCycle);
        }
        if self.tree.node_at(subtree_root).parent.is_some() {
            NodeRefMut {
                tree: &mut *self.tree,
                key: subtree_root.clone(),
            }
            .detach()?;
        }
        let previous = self.node_mut().child_slot_mut(side).replace(subtree_root.clone());
        if let Some(previous) = &previous {
            self.tree.node_at_mut(previous).parent = None;
            debug!(
                "attaching {:?} on the {:?} of {:?} detached {:?}",
                subtree_root,
                side,
                self.key,
                previous,
            );
        }
        self.tree.node_at_mut(subtree_root).parent = Some(self.key.clone());
        trace!("attached {:?} on the {:?} of {:?}", subtree_root, side, self.key);
        Ok(previous)
    }
    /// Detaches the node, together with its descendants, from its parent. The node stays in the storage as the root of a detached subtree.
    ///
    /// # Errors
    /// Will fail in the following scenarios, leaving the tree unchanged:
    /// - The node has no parent, i.e. is the root node of the tree or the root of a detached subtree ([`TreeError::WasRootNode`]);
    /// - The parent link was rewritten by hand and the parent does not hold the node as a child ([`TreeError::InconsistentLink`]).
    ///
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    /// [`TreeError::InconsistentLink`]: ../enum.TreeError.html#variant.InconsistentLink " "
    pub fn detach(&mut self) -> Result<(), TreeError> {
        let parent_key = self.node().parent.clone().ok_or(TreeError::WasRootNode)?;
        let parent = self
            .tree
            .storage
            .get_mut(&parent_key)
            .ok_or(TreeError::InconsistentLink)?;
        // Left is checked first
        let side = match parent.side_of(&self.key) {
            Some(side) => side,
            None => {
                debug!(
                    "{:?} has {:?} as its parent, which does not hold it as a child",
                    self.key,
                    parent_key,
                );
                return Err(TreeError::InconsistentLink);
            }
        };
        *parent.child_slot_mut(side) = None;
        self.node_mut().parent = None;
        trace!("detached {:?} from the {:?} of {:?}", self.key, side, parent_key);
        Ok(())
    }
    /// Detaches both children of the node, returning their keys, left one first. The value of the node is left untouched.
    pub fn detach_children(&mut self) -> ArrayVec<[K; 2]> {
        let node = self.node_mut();
        let mut children = ArrayVec::new();
        children.extend(mem::take(&mut node.left));
        children.extend(mem::take(&mut node.right));
        for child in &children {
            self.tree.node_at_mut(child).parent = None;
        }
        if !children.is_empty() {
            trace!("detached {} children of {:?}", children.len(), self.key);
        }
        children
    }

    #[inline(always)]
    #[track_caller]
    fn node(&self) -> &Node<T, K> {
        self.tree.node_at(&self.key)
    }
    #[inline(always)]
    #[track_caller]
    fn node_mut(&mut self) -> &mut Node<T, K> {
        self.tree.node_at_mut(&self.key)
    }
}
