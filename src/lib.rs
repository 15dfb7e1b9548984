//! A mutable, arena-allocated binary tree with parent links, structural editing and five search orders.
//!
//! # Overview
//! Sapling implements an arbitrary, caller-shaped binary tree (there is no ordering by comparison and no rebalancing) using a technique called ["arena-allocated trees"][arena tree blog post], described by Ben Lovy. Nodes are stored in a backing storage, and instead of using pointers to link to children and parents, keys into the storage are used instead. This makes the parent back-link a plain key which is never consulted to decide when a node may be released, so the usual `Rc`/`Weak` cycle problem does not exist.
//!
//! Every node holds a value, optional left and right children and an optional parent. The tree always has a root node; a tree whose root has no children is considered *empty*.
//!
//! # Structural editing
//! - [`add_left`] and [`add_right`] insert a new node under a parent. If that side is already occupied, the existing subtree is pushed down one level and hung from the new node.
//! - [`add_subtree`] attaches an existing subtree to a parent, overwriting whatever was on that side. The overwritten subtree is *detached*, not dropped.
//! - [`remove_node`] and [`remove_value`] detach a whole subtree from its parent.
//! - [`clear`] detaches both children of the root.
//!
//! Detached subtrees stay in the storage, keep their keys and can be re-attached. They are released explicitly with [`prune`], [`collect_detached`] or moved into a new tree with [`split_off`].
//!
//! # Searching
//! Five orders are available through [`Order`]: pre-order, post-order, in-order, stack-based (LIFO) and queue-based (FIFO, breadth-first, the default). None of them recurse on the call stack, so arbitrarily deep trees can be searched.
//!
//! # Feature flags
//! - `std` (**enabled by default**): enables the full standard library, disabling `no_std` for the crate. Currently, this only switches `thiserror` to its `std` mode, so that [`Error`] is the `std` trait.
//! - `doc_cfg`: enables nightly-only documentation attributes on docs.rs. **Requires a nightly compiler.**
//!
//! # Public dependencies
//! - `arrayvec` (**required**): `^0.5`
//!
//! [`add_left`]: binary_tree/struct.BinaryTree.html#method.add_left " "
//! [`add_right`]: binary_tree/struct.BinaryTree.html#method.add_right " "
//! [`add_subtree`]: binary_tree/struct.BinaryTree.html#method.add_subtree " "
//! [`remove_node`]: binary_tree/struct.BinaryTree.html#method.remove_node " "
//! [`remove_value`]: binary_tree/struct.BinaryTree.html#method.remove_value " "
//! [`clear`]: binary_tree/struct.BinaryTree.html#method.clear " "
//! [`prune`]: binary_tree/struct.BinaryTree.html#method.prune " "
//! [`collect_detached`]: binary_tree/struct.BinaryTree.html#method.collect_detached " "
//! [`split_off`]: binary_tree/struct.BinaryTree.html#method.split_off " "
//! [`Order`]: traversal/enum.Order.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::let_unit_value,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage};

pub mod binary_tree;
pub use binary_tree::BinaryTree;

pub mod traversal;
pub use traversal::{Order, Traversable};

/// A prelude for using Sapling, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        SparseVec as SparseTreeStorage,
        DefaultStorage as DefaultTreeStorage,
    };
    #[doc(no_inline)]
    pub use crate::binary_tree::{
        BinaryTree,
        NodeRef as BinaryTreeNodeRef,
        NodeRefMut as BinaryTreeNodeRefMut,
    };
    #[doc(no_inline)]
    pub use crate::traversal::{Order as TraversalOrder, Traversable};
    #[doc(no_inline)]
    pub use crate::{Side, TreeError};
}

pub(crate) mod util;

use thiserror::Error;

/// One of the two flanks of a node.
///
/// Used to pick the slot a subtree is attached to, and the flank a displaced subtree is pushed down to when a node is inserted above it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left child slot.
    Left,
    /// The right child slot.
    Right,
}

/// The error type returned by fallible operations on trees.
///
/// Failing to find a value is never an error: lookups return `None` instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    /// The key does not point to a node in the tree's storage.
    #[error("the key does not point to a node in the tree")]
    NoSuchNode,
    /// The node has no parent to be detached from: it is either the root node of the tree or the root of an already detached subtree.
    #[error("cannot detach a node which has no parent, such as the root node of a tree")]
    WasRootNode,
    /// The subtree to attach contains the node it was about to be attached to.
    #[error("attaching the subtree would make a node its own ancestor")]
    WouldCreateCycle,
    /// The parent link of the node does not match the child links of that parent. This only happens after links were rewritten by hand through [`BinaryTree::get_mut`].
    ///
    /// [`BinaryTree::get_mut`]: binary_tree/struct.BinaryTree.html#method.get_mut " "
    #[error("the node is not a child of the node its parent link points to")]
    InconsistentLink,
}
