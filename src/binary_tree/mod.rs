//! Trees which allow at most two children for their nodes, with a parent link on every node.
//!
//! The [Wikipedia article] on binary trees covers their use cases and specifics in more detail.
//!
//! The tree is shaped entirely by the caller: a node may have no children, only a left one, only a right one, or both, and nothing is ever reordered or rebalanced. Every node knows its parent, and every structural edit keeps the parent link of a node consistent with the child links of that parent.
//!
//! # Detached subtrees
//! Removing a node from the tree does not drop it. The node and all of its descendants are *detached*: the node loses its parent link, its descendants stay linked to it, and all of their keys stay valid. A detached subtree can be attached again anywhere with [`add_subtree`], moved into a tree of its own with [`split_off`], or released with [`prune`] or [`collect_detached`].
//!
//! Attaching a subtree to a side which is already occupied **overwrites** that side: the previous occupant becomes a detached subtree and is no longer reachable from the root. Its key is returned by [`add_subtree`] so that it doesn't get lost.
//!
//! # Example
//! ```rust
//! use sapling::{BinaryTree, Order, Side};
//!
//! // Create the tree. The only thing we need for that is the value for the root node. The
//! // turbofish there is needed to state that we are using the default storage method instead of
//! // asking the compiler to infer it, which would be impossible.
//! let mut tree = BinaryTree::<_>::new(0);
//! let root = tree.root_key().clone();
//! // A root without children makes for an empty tree.
//! assert!(tree.is_empty());
//!
//! let one = tree.add_left(&root, 1)?;
//! let two = tree.add_right(&root, 2)?;
//! tree.add_left(&one, 3)?;
//! assert!(!tree.is_empty());
//!
//! // Insert 7 above 3, pushing 3 down to the right of the new node.
//! let seven = tree.add_left_pushing(&one, 7, Side::Right)?;
//! let three = tree.search(&3, Order::PreOrder).expect("3 is in the tree");
//! assert_eq!(tree.node(&three).and_then(|x| x.parent()).map(|x| *x.value()), Some(7));
//!
//! // Move the subtree rooted at 7 under 2.
//! tree.add_subtree(&seven, &two, Side::Left)?;
//! assert_eq!(tree.stats().size, 5);
//! assert_eq!(tree.stats().height, 3);
//! # Ok::<(), sapling::TreeError>(())
//! ```
//!
//! [Wikipedia article]: https://en.wikipedia.org/wiki/Binary_tree " "
//! [`add_subtree`]: struct.BinaryTree.html#method.add_subtree " "
//! [`split_off`]: struct.BinaryTree.html#method.split_off " "
//! [`prune`]: struct.BinaryTree.html#method.prune " "
//! [`collect_detached`]: struct.BinaryTree.html#method.collect_detached " "

mod base;
mod impl_traversable;
mod info;
mod node;
mod node_ref;
mod node_ref_mut;

pub use base::BinaryTree;
pub use info::{NodeInfo, SubtreeStats};
pub use node::Node;
pub use node_ref::NodeRef;
pub use node_ref_mut::NodeRefMut;
