use core::fmt::{self, Debug, Display, Formatter};
use alloc::vec::Vec;
use crate::{
    storage::Storage,
    traversal::{Order, Traversable},
    util::Queue,
};
use super::{BinaryTree, Node};

/// The number of nodes and the height of a subtree, as returned by [`NodeRef::stats`].
///
/// [`NodeRef::stats`]: struct.NodeRef.html#method.stats " "
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubtreeStats {
    /// The number of nodes in the subtree, including its root.
    pub size: usize,
    /// The number of links on the longest downward path from the root of the subtree to a leaf. A lone node has a height of zero.
    pub height: usize,
}

/// A summary of a node: its value and the values of its relatives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeInfo<V> {
    /// The value of the node.
    pub value: V,
    /// The value of the left child, if there is one.
    pub left: Option<V>,
    /// The value of the right child, if there is one.
    pub right: Option<V>,
    /// The value of the parent, if there is one.
    pub parent: Option<V>,
}
impl<V> NodeInfo<V> {
    /// Applies a function to all values of the summary.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> NodeInfo<U> {
        NodeInfo {
            value: f(self.value),
            left: self.left.map(&mut f),
            right: self.right.map(&mut f),
            parent: self.parent.map(&mut f),
        }
    }
}
impl<V: Clone> NodeInfo<&V> {
    /// Maps a `NodeInfo<&V>` to a `NodeInfo<V>` by cloning the values.
    #[inline]
    pub fn cloned(self) -> NodeInfo<V> {
        self.map(Clone::clone)
    }
}
impl<V> From<NodeInfo<V>> for (V, Option<V>, Option<V>, Option<V>) {
    #[inline]
    fn from(op: NodeInfo<V>) -> Self {
        (op.value, op.left, op.right, op.parent)
    }
}
impl<V: Display> Display for NodeInfo<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        struct Relative<'a, V>(&'a Option<V>);
        impl<V: Display> Display for Relative<'_, V> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(x) => Display::fmt(x, f),
                    None => f.pad("none"),
                }
            }
        }
        write!(
            f,
            "binary tree node (value = {}, left child value = {}, right child value = {}, parent value = {})",
            self.value,
            Relative(&self.left),
            Relative(&self.right),
            Relative(&self.parent),
        )
    }
}

pub(super) fn node_info<'a, T, K, S>(tree: &'a BinaryTree<T, K, S>, key: &K) -> NodeInfo<&'a T>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let node = tree.node_at(key);
    let value_at = move |key: &K| &tree.node_at(key).value;
    NodeInfo {
        value: &node.value,
        left: node.left.as_ref().map(value_at),
        right: node.right.as_ref().map(value_at),
        parent: node.parent.as_ref().map(value_at),
    }
}

/// Walks the subtree level by level, tracking the depth of every node.
pub(super) fn stats<T, K, S>(tree: &BinaryTree<T, K, S>, start: K) -> SubtreeStats
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    let mut queue = Queue::new();
    queue.push_back((start, 0_usize));
    let mut stats = SubtreeStats::default();
    while let Some((key, depth)) = queue.pop_front() {
        let node = tree.node_at(&key);
        stats.size += 1;
        stats.height = stats.height.max(depth);
        queue.extend(node.left.clone().map(|x| (x, depth + 1)));
        queue.extend(node.right.clone().map(|x| (x, depth + 1)));
    }
    stats
}

pub(super) fn flatten<'a, T, K, S>(tree: &'a BinaryTree<T, K, S>, start: K) -> Vec<NodeInfo<&'a T>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree.traverse_from(start, Order::Queue)
        .map(|key| node_info(tree, &key))
        .collect()
}
