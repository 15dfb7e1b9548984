use core::fmt::{self, Debug, Display, Formatter};
use alloc::vec::Vec;
use arrayvec::ArrayVec;
use log::debug;
use crate::{
    storage::{Storage, DefaultStorage, SparseVec},
    traversal::{Order, Traversable},
    util::{corrupted, Queue},
    Side,
    TreeError,
};
use super::{Node, NodeInfo, NodeRef, NodeRefMut, SubtreeStats};

/// A binary tree.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryTree<T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) storage: S,
    pub(super) root: K,
}
impl<T, K, S> BinaryTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a binary tree with the specified value for the root node.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// // The only way to create a tree...
    /// let tree = BinaryTree::<_>::new(87);
    /// // ...is to simply create the root node and storage. The turbofish there is needed to
    /// // state that we are using the default storage method instead of asking the compiler to
    /// // infer it, which would be impossible.
    ///
    /// // No other nodes have been created yet:
    /// assert!(tree.root().is_leaf());
    /// ```
    pub fn new(root: T) -> Self {
        Self::from_storage(S::new(), root)
    }
    /// Creates a binary tree with the specified capacity for the storage.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::BinaryTree;
    /// // Let's create a tree, but with some preallocated space for more nodes:
    /// let mut tree = BinaryTree::<_>::with_capacity(5, "Variable Names");
    ///
    /// // Capacity does not affect the actual nodes:
    /// assert!(tree.root().is_leaf());
    /// ```
    pub fn with_capacity(capacity: usize, root: T) -> Self {
        Self::from_storage(S::with_capacity(capacity), root)
    }
    fn from_storage(mut storage: S, root: T) -> Self {
        // The root node cannot have a parent
        let root = storage.add(Node::new(root));
        Self { storage, root }
    }

    /// Returns a reference to the root node of the tree.
    pub fn root(&self) -> NodeRef<'_, T, K, S> {
        NodeRef::new_raw(self, self.root.clone())
            .unwrap_or_else(|| corrupted("the root node is not in the storage"))
    }
    /// Returns a *mutable* reference to the root node of the tree, allowing modifications to the entire tree.
    pub fn root_mut(&mut self) -> NodeRefMut<'_, T, K, S> {
        let root = self.root.clone();
        NodeRefMut::new_raw(self, root)
            .unwrap_or_else(|| corrupted("the root node is not in the storage"))
    }
    /// Returns the key of the root node.
    #[inline(always)]
    pub fn root_key(&self) -> &K {
        &self.root
    }
    /// Returns a reference to the node at the specified key, or `None` if there's no such node.
    ///
    /// Nodes of detached subtrees are still in the tree's storage and can be referenced too.
    #[inline]
    pub fn node(&self, key: &K) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::new_raw(self, key.clone())
    }
    /// Returns a *mutable* reference to the node at the specified key, or `None` if there's no such node.
    #[inline]
    pub fn node_mut(&mut self, key: &K) -> Option<NodeRefMut<'_, T, K, S>> {
        NodeRefMut::new_raw(self, key.clone())
    }
    /// Returns the raw node record at the specified key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&Node<T, K>> {
        self.storage.get(key)
    }
    /// Returns the raw node record at the specified key, allowing its links to be rewritten.
    ///
    /// The setters of [`Node`] perform no consistency checks: rewriting links this way can leave parent links which disagree with child links, or even cycles. All other operations of the tree assume that neither happens.
    ///
    /// [`Node`]: struct.Node.html " "
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Node<T, K>> {
        self.storage.get_mut(key)
    }
    /// Returns the number of nodes in the storage, *including* the nodes of detached subtrees.
    ///
    /// The number of nodes reachable from the root is returned by [`stats`].
    ///
    /// [`stats`]: #method.stats " "
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns `true` if the root node has no children, `false` otherwise.
    ///
    /// A tree always has a root node, which is why "empty" refers to the root being a leaf rather than to the tree having no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_at(&self.root).is_leaf()
    }
    /// Returns `true` if the node at the specified key has neither child, `false` otherwise.
    ///
    /// # Errors
    /// Fails with [`TreeError::NoSuchNode`] if the key is not in the tree.
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    #[inline]
    pub fn is_leaf(&self, key: &K) -> Result<bool, TreeError> {
        self.storage.get(key).map(Node::is_leaf).ok_or(TreeError::NoSuchNode)
    }
    /// Returns `true` if the node at the specified key can be reached from the root node, `false` if it's part of a detached subtree or not in the tree at all.
    pub fn is_attached(&self, key: &K) -> bool {
        self.node(key).map_or(false, |x| x.is_attached())
    }

    /// Adds a new node with the specified value as the left child of `parent`, returning its key.
    ///
    /// If `parent` already has a left child, the existing left subtree is pushed down one level and becomes the *left* subtree of the new node.
    ///
    /// # Errors
    /// Fails with [`TreeError::NoSuchNode`] if `parent` is not in the tree.
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    #[inline]
    pub fn add_left(&mut self, parent: &K, value: T) -> Result<K, TreeError> {
        self.add_left_pushing(parent, value, Side::Left)
    }
    /// Adds a new node with the specified value as the left child of `parent`, pushing an existing left subtree down to the specified side of the new node.
    ///
    /// # Errors
    /// Same as [`add_left`].
    ///
    /// [`add_left`]: #method.add_left " "
    pub fn add_left_pushing(&mut self, parent: &K, value: T, push_to: Side) -> Result<K, TreeError> {
        self.node_mut(parent)
            .map(|mut parent| parent.add_child_pushing(Side::Left, value, push_to))
            .ok_or(TreeError::NoSuchNode)
    }
    /// Adds a new node with the specified value as the right child of `parent`, returning its key.
    ///
    /// If `parent` already has a right child, the existing right subtree is pushed down one level and becomes the *right* subtree of the new node.
    ///
    /// # Errors
    /// Fails with [`TreeError::NoSuchNode`] if `parent` is not in the tree.
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    #[inline]
    pub fn add_right(&mut self, parent: &K, value: T) -> Result<K, TreeError> {
        self.add_right_pushing(parent, value, Side::Right)
    }
    /// Adds a new node with the specified value as the right child of `parent`, pushing an existing right subtree down to the specified side of the new node.
    ///
    /// # Errors
    /// Same as [`add_right`].
    ///
    /// [`add_right`]: #method.add_right " "
    pub fn add_right_pushing(&mut self, parent: &K, value: T, push_to: Side) -> Result<K, TreeError> {
        self.node_mut(parent)
            .map(|mut parent| parent.add_child_pushing(Side::Right, value, push_to))
            .ok_or(TreeError::NoSuchNode)
    }
    /// Attaches the subtree rooted at `subtree_root` to the specified side of `parent`, keeping the subtree's own descendants intact.
    ///
    /// Whatever was attached to that side before is **overwritten**, not merged: it becomes a detached subtree, unreachable from the root, and its key is returned. If `subtree_root` was attached somewhere else, it's moved, i.e. detached from its old parent first.
    ///
    /// # Errors
    /// Will fail in the following scenarios, leaving the tree unchanged:
    /// - Either key is not in the tree ([`TreeError::NoSuchNode`]);
    /// - `subtree_root` is the root node of the tree, which cannot be moved anywhere ([`TreeError::WasRootNode`]);
    /// - `subtree_root` is `parent` itself or one of its ancestors ([`TreeError::WouldCreateCycle`]);
    /// - `subtree_root` has to be moved, but its parent link was broken by hand ([`TreeError::InconsistentLink`]).
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    /// [`TreeError::WouldCreateCycle`]: ../enum.TreeError.html#variant.WouldCreateCycle " "
    /// [`TreeError::InconsistentLink`]: ../enum.TreeError.html#variant.InconsistentLink " "
    pub fn add_subtree(
        &mut self,
        subtree_root: &K,
        parent: &K,
        side: Side,
    ) -> Result<Option<K>, TreeError> {
        self.node_mut(parent)
            .ok_or(TreeError::NoSuchNode)?
            .attach_subtree(subtree_root, side)
    }
    /// Detaches both children of the root node, returning the keys of the subtrees which were detached. The value of the root node is left untouched.
    pub fn clear(&mut self) -> ArrayVec<[K; 2]> {
        self.root_mut().detach_children()
    }

    /// Searches the whole tree for the specified value in the specified order, returning the key of the first matching node or `None` if there is none.
    ///
    /// # Example
    /// ```rust
    /// # use sapling::{BinaryTree, Order};
    /// let mut tree = BinaryTree::<_>::new("root");
    /// let root = tree.root_key().clone();
    /// let left = tree.add_left(&root, "leaf")?;
    /// tree.add_right(&root, "leaf")?;
    ///
    /// // Breadth-first and pre-order both meet the left "leaf" first.
    /// assert_eq!(tree.search(&"leaf", Order::Queue), Some(left));
    /// assert_eq!(tree.search(&"leaf", Order::PreOrder), Some(left));
    /// assert_eq!(tree.search(&"branch", Order::default()), None);
    /// # Ok::<(), sapling::TreeError>(())
    /// ```
    #[inline]
    pub fn search(&self, value: &T, order: Order) -> Option<K>
    where T: PartialEq,
    {
        self.search_from(&self.root, value, order)
    }
    /// Searches the subtree starting at `start` for the specified value in the specified order, returning the key of the first matching node or `None` if there is none.
    ///
    /// The subtree may also be a detached one. A `start` key which is not in the tree is an empty scope, in which nothing is ever found.
    #[inline]
    pub fn search_from(&self, start: &K, value: &T, order: Order) -> Option<K>
    where T: PartialEq,
    {
        self.find_from(start.clone(), order, |x| x == value)
    }
    /// Searches the tree for `value` in the specified order and replaces the value of the first matching node with `new_value`, returning the key of that node or `None` if there was no match. The links of the tree are never touched.
    pub fn change_value(&mut self, value: &T, new_value: T, order: Order) -> Option<K>
    where T: PartialEq,
    {
        let key = self.search(value, order)?;
        self.node_at_mut(&key).value = new_value;
        Some(key)
    }
    /// Replaces the value of the node at the specified key, returning the previous value. The links of the tree are never touched.
    ///
    /// # Errors
    /// Fails with [`TreeError::NoSuchNode`] if the key is not in the tree.
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    #[inline]
    pub fn change_node(&mut self, key: &K, new_value: T) -> Result<T, TreeError> {
        self.storage
            .get_mut(key)
            .map(|node| node.set_value(new_value))
            .ok_or(TreeError::NoSuchNode)
    }
    /// Searches the tree for `value` in the specified order and detaches the subtree rooted at the first matching node, returning its key, or `Ok(None)` if there was no match.
    ///
    /// The detached node keeps its descendants. See [`remove_node`] for the details.
    ///
    /// # Errors
    /// Fails with [`TreeError::WasRootNode`] if the value was found in the root node, which can never be removed. The tree is left unchanged in such a case.
    ///
    /// [`remove_node`]: #method.remove_node " "
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    pub fn remove_value(&mut self, value: &T, order: Order) -> Result<Option<K>, TreeError>
    where T: PartialEq,
    {
        match self.search(value, order) {
            Some(key) => self.remove_node(&key).map(Some),
            None => Ok(None),
        }
    }
    /// Detaches the subtree rooted at the specified node from its parent, returning the key of the node.
    ///
    /// This removes a whole subtree, not a single node: the descendants of the node stay linked to it. The node loses its parent link and, together with its descendants, is no longer reachable from the root. It stays in the storage, so it can be attached again with [`add_subtree`], moved into its own tree with [`split_off`] or released with [`prune`].
    ///
    /// # Errors
    /// Will fail in the following scenarios, leaving the tree unchanged:
    /// - The key is not in the tree ([`TreeError::NoSuchNode`]);
    /// - The node has no parent to be detached from: it is the root node or the root of an already detached subtree ([`TreeError::WasRootNode`]);
    /// - The parent link was broken by hand through [`get_mut`] ([`TreeError::InconsistentLink`]).
    ///
    /// [`get_mut`]: #method.get_mut " "
    /// [`TreeError::InconsistentLink`]: ../enum.TreeError.html#variant.InconsistentLink " "
    /// [`add_subtree`]: #method.add_subtree " "
    /// [`split_off`]: #method.split_off " "
    /// [`prune`]: #method.prune " "
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    pub fn remove_node(&mut self, key: &K) -> Result<K, TreeError> {
        let mut node = self.node_mut(key).ok_or(TreeError::NoSuchNode)?;
        node.detach()?;
        Ok(node.into_raw_key())
    }

    /// Moves the subtree rooted at the specified node out into a tree of its own, in which that node is the root.
    ///
    /// If the node is still attached, it's detached first. The nodes are removed from this tree's storage, so their keys in this tree become invalid; the keys in the new tree are unrelated to the old ones.
    ///
    /// # Errors
    /// Will fail in the following scenarios, leaving the tree unchanged:
    /// - The key is not in the tree ([`TreeError::NoSuchNode`]);
    /// - The node is the root node of this tree ([`TreeError::WasRootNode`]).
    ///
    /// [`TreeError::NoSuchNode`]: ../enum.TreeError.html#variant.NoSuchNode " "
    /// [`TreeError::WasRootNode`]: ../enum.TreeError.html#variant.WasRootNode " "
    pub fn split_off(&mut self, key: &K) -> Result<Self, TreeError> {
        self.detach_for_release(key)?;
        let root_node = self
            .storage
            .remove(key)
            .unwrap_or_else(|| corrupted("a checked node disappeared from the storage"));
        let (mut pending, mut new_tree) = {
            let Node { value, left, right, .. } = root_node;
            let new_tree = Self::new(value);
            let mut pending = Queue::new();
            pending.extend(left.map(|x| (x, new_tree.root.clone(), Side::Left)));
            pending.extend(right.map(|x| (x, new_tree.root.clone(), Side::Right)));
            (pending, new_tree)
        };
        let mut moved = 1_usize;
        while let Some((old_key, new_parent, side)) = pending.pop_front() {
            let Node { value, left, right, .. } = self.storage.remove(&old_key).unwrap_or_else(|| {
                corrupted(format_args!("child {:?} is linked but not stored", old_key))
            });
            let new_key = new_tree.storage.add(Node::with_links(
                value,
                None,
                None,
                Some(new_parent.clone()),
            ));
            *new_tree.node_at_mut(&new_parent).child_slot_mut(side) = Some(new_key.clone());
            pending.extend(left.map(|x| (x, new_key.clone(), Side::Left)));
            pending.extend(right.map(|x| (x, new_key, Side::Right)));
            moved += 1;
        }
        debug!("split off {} nodes rooted at {:?} into a new tree", moved, key);
        Ok(new_tree)
    }
    /// Releases the subtree rooted at the specified node, dropping the values of all of its nodes, and returns the number of nodes released.
    ///
    /// If the node is still attached, it's detached first.
    ///
    /// # Errors
    /// Same as [`split_off`].
    ///
    /// [`split_off`]: #method.split_off " "
    pub fn prune(&mut self, key: &K) -> Result<usize, TreeError> {
        self.detach_for_release(key)?;
        let doomed = self.traverse_from(key.clone(), Order::Queue).collect::<Vec<_>>();
        for doomed_key in &doomed {
            self.storage.remove(doomed_key);
        }
        debug!("pruned {} nodes rooted at {:?}", doomed.len(), key);
        Ok(doomed.len())
    }
    fn detach_for_release(&mut self, key: &K) -> Result<(), TreeError> {
        if *key == self.root {
            return Err(TreeError::WasRootNode);
        }
        let mut node = self.node_mut(key).ok_or(TreeError::NoSuchNode)?;
        if !node.is_root() {
            node.detach()?;
        }
        Ok(())
    }

    /// Returns the number of nodes and the height of the tree, counting only nodes reachable from the root.
    #[inline]
    pub fn stats(&self) -> SubtreeStats {
        self.root().stats()
    }
    /// Returns summaries of all nodes reachable from the root, in breadth-first order.
    #[inline]
    pub fn flatten(&self) -> Vec<NodeInfo<&'_ T>> {
        self.root().flatten()
    }

    /// Returns the node at a key which is known to be valid.
    #[track_caller]
    pub(super) fn node_at(&self, key: &K) -> &Node<T, K> {
        self.storage
            .get(key)
            .unwrap_or_else(|| corrupted(format_args!("key {:?} is linked but not stored", key)))
    }
    /// Mutable counterpart of `node_at`.
    #[track_caller]
    pub(super) fn node_at_mut(&mut self, key: &K) -> &mut Node<T, K> {
        match self.storage.get_mut(key) {
            Some(node) => node,
            None => corrupted(format_args!("key {:?} is linked but not stored", key)),
        }
    }
}
impl<T> BinaryTree<T, usize, SparseVec<Node<T, usize>>> {
    /// Releases every node which cannot be reached from the root node, i.e. all detached subtrees, and returns the number of nodes released.
    ///
    /// # Example
    /// ```rust
    /// use sapling::{BinaryTree, Order};
    ///
    /// let mut tree = BinaryTree::<_>::new('a');
    /// let root = *tree.root_key();
    /// let b = tree.add_left(&root, 'b')?;
    /// tree.add_left(&b, 'c')?;
    /// tree.add_right(&root, 'd')?;
    ///
    /// tree.remove_value(&'b', Order::default())?;
    /// // Detached nodes are still stored...
    /// assert_eq!(tree.len(), 4);
    /// // ...until they are collected:
    /// assert_eq!(tree.collect_detached(), 2);
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), sapling::TreeError>(())
    /// ```
    pub fn collect_detached(&mut self) -> usize {
        let reachable = {
            let mut reachable = Vec::new();
            for key in self.traverse(Order::Queue) {
                if key >= reachable.len() {
                    reachable.resize(key + 1, false);
                }
                reachable[key] = true;
            }
            reachable
        };
        let doomed = self
            .storage
            .keys()
            .filter(|&key| !reachable.get(key).copied().unwrap_or(false))
            .collect::<Vec<_>>();
        for key in &doomed {
            self.storage.remove(key);
        }
        if !doomed.is_empty() {
            debug!("collected {} detached nodes", doomed.len());
        }
        doomed.len()
    }
    /// Returns the number of holes in the storage, left behind by released nodes and reused by new ones.
    #[inline]
    pub fn num_holes(&self) -> usize {
        self.storage.num_holes()
    }
}
impl<T, K, S> Default for BinaryTree<T, K, S>
where
    T: Default,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl<T, K, S> Display for BinaryTree<T, K, S>
where
    T: Display,
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let SubtreeStats { size, height } = self.stats();
        write!(
            f,
            "binary tree (root value = {}, size = {}, height = {})",
            self.root().value(),
            size,
            height,
        )
    }
}
