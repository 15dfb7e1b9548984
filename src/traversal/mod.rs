//! Everything related to traversing trees in general.
//!
//! The module is home to the following items:
//! - [`Order`]: the five visiting orders supported by searches
//! - [`Traversable`]: a *trait for types which describe binary tree-like structures* which can be walked in any of those orders
//! - [`Traverse`]: the iterator produced by walking a `Traversable`, yielding cursors
//!
//! None of the orders use recursion on the call stack: the depth-first ones keep their pending nodes on a heap-allocated stack, which produces exactly the visiting order of the textbook recursive definition while staying safe on degenerate, list-like trees of any depth.
//!
//! [`Order`]: enum.Order.html " "
//! [`Traversable`]: trait.Traversable.html " "
//! [`Traverse`]: struct.Traverse.html " "

use core::{
    iter::FusedIterator,
    fmt::{self, Debug, Formatter},
};
use crate::{
    util::{Stack, Queue},
    Side,
};

/// The order in which a traversal visits the nodes of a subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Visit the node, then its left subtree, then its right subtree.
    PreOrder,
    /// Visit the left subtree, then the right subtree, then the node.
    PostOrder,
    /// Visit the left subtree, then the node, then the right subtree.
    InOrder,
    /// Pop a node from a LIFO stack, visit it and push its right and then its left child.
    ///
    /// Both children are queued before either is explored. Since the left child is pushed last, it is popped first and the visiting sequence matches [`PreOrder`].
    ///
    /// [`PreOrder`]: #variant.PreOrder " "
    Stack,
    /// Pop a node from a FIFO queue, visit it and enqueue its left and then its right child. This is breadth-first, or level, order.
    Queue,
}
impl Order {
    /// All orders, in declaration order.
    pub const ALL: [Order; 5] = [
        Order::PreOrder,
        Order::PostOrder,
        Order::InOrder,
        Order::Stack,
        Order::Queue,
    ];
}
impl Default for Order {
    /// Breadth-first, since it has no depth-related overhead at all.
    #[inline(always)]
    fn default() -> Self {
        Self::Queue
    }
}

/// Binary tree-like data structures which can be walked in any [`Order`].
///
/// Implementors only describe the shape of the structure; walking and searching are provided.
///
/// [`Order`]: enum.Order.html " "
pub trait Traversable: Sized {
    /// The payload of the nodes.
    type Value;
    /// The type for the cursor which will be used for keeping track of the traversed nodes.
    ///
    /// Must be very cheaply clonable, but not required to be `Copy`.
    type Cursor: Clone + Debug + Eq;

    /// Returns the cursor pointing to the root node.
    fn cursor_to_root(&self) -> Self::Cursor;
    /// Returns `true` if the cursor points to a node of the structure, `false` otherwise.
    fn contains_cursor(&self, cursor: &Self::Cursor) -> bool;
    /// Returns a reference to the value of the node at the specified cursor.
    ///
    /// # Panics
    /// Required to panic if the cursor is invalid.
    fn value_of(&self, cursor: &Self::Cursor) -> &Self::Value;
    /// Returns a cursor to the parent of the node at the specified cursor, or `None` if that node has no parent.
    fn parent_of(&self, cursor: &Self::Cursor) -> Option<Self::Cursor>;
    /// Returns a cursor to the child on the specified side of the node at the specified cursor, or `None` if there is no such child.
    fn child_of(&self, cursor: &Self::Cursor, side: Side) -> Option<Self::Cursor>;

    /// Walks the entire structure from the root node in the specified order.
    #[inline]
    fn traverse(&self, order: Order) -> Traverse<'_, Self> {
        self.traverse_from(self.cursor_to_root(), order)
    }
    /// Walks the subtree starting at the specified cursor in the specified order. An invalid starting cursor produces an empty walk.
    #[inline]
    fn traverse_from(&self, start: Self::Cursor, order: Order) -> Traverse<'_, Self> {
        let start = if self.contains_cursor(&start) { Some(start) } else { None };
        Traverse::new(self, start, order)
    }
    /// Returns the cursor of the first node in the specified order, within the subtree starting at `start`, whose value satisfies the predicate. The walk stops at the first match.
    fn find_from<P>(&self, start: Self::Cursor, order: Order, mut predicate: P) -> Option<Self::Cursor>
    where P: FnMut(&Self::Value) -> bool,
    {
        self.traverse_from(start, order)
            .find(|cursor| predicate(self.value_of(cursor)))
    }
}

/// An iterator walking a [`Traversable`] in a specific [`Order`], yielding cursors.
///
/// Created by [`Traversable::traverse`] and [`Traversable::traverse_from`].
///
/// [`Traversable`]: trait.Traversable.html " "
/// [`Order`]: enum.Order.html " "
/// [`Traversable::traverse`]: trait.Traversable.html#method.traverse " "
/// [`Traversable::traverse_from`]: trait.Traversable.html#method.traverse_from " "
pub struct Traverse<'a, T: Traversable> {
    traversable: &'a T,
    order: Order,
    state: State<T::Cursor>,
}
enum State<C> {
    /// Pending nodes, the next one to visit on top. Used by both pre-order and stack order.
    Lifo(Stack<C>),
    /// Pending nodes with a flag telling whether their children were already scheduled.
    PostOrder(Stack<(C, bool)>),
    /// Ancestors whose left subtree is being walked, and the next subtree to descend into.
    InOrder {
        ancestors: Stack<C>,
        descend_into: Option<C>,
    },
    Fifo(Queue<C>),
}
impl<'a, T: Traversable> Traverse<'a, T> {
    fn new(traversable: &'a T, start: Option<T::Cursor>, order: Order) -> Self {
        let state = match order {
            Order::PreOrder | Order::Stack => State::Lifo(start.into_iter().collect()),
            Order::PostOrder => {
                State::PostOrder(start.into_iter().map(|cursor| (cursor, false)).collect())
            }
            Order::InOrder => State::InOrder {
                ancestors: Stack::new(),
                descend_into: start,
            },
            Order::Queue => State::Fifo(start.into_iter().collect()),
        };
        Self {
            traversable,
            order,
            state,
        }
    }
}
impl<'a, T: Traversable> Iterator for Traverse<'a, T> {
    type Item = T::Cursor;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.traversable;
        match &mut self.state {
            State::Lifo(stack) => {
                let cursor = stack.pop()?;
                stack.extend(tree.child_of(&cursor, Side::Right));
                stack.extend(tree.child_of(&cursor, Side::Left));
                Some(cursor)
            }
            State::PostOrder(stack) => loop {
                let (cursor, children_scheduled) = stack.pop()?;
                if children_scheduled {
                    return Some(cursor);
                }
                let left = tree.child_of(&cursor, Side::Left);
                let right = tree.child_of(&cursor, Side::Right);
                stack.push((cursor, true));
                stack.extend(right.map(|x| (x, false)));
                stack.extend(left.map(|x| (x, false)));
            },
            State::InOrder {
                ancestors,
                descend_into,
            } => {
                while let Some(cursor) = descend_into.take() {
                    *descend_into = tree.child_of(&cursor, Side::Left);
                    ancestors.push(cursor);
                }
                let cursor = ancestors.pop()?;
                *descend_into = tree.child_of(&cursor, Side::Right);
                Some(cursor)
            }
            State::Fifo(queue) => {
                let cursor = queue.pop_front()?;
                queue.extend(tree.child_of(&cursor, Side::Left));
                queue.extend(tree.child_of(&cursor, Side::Right));
                Some(cursor)
            }
        }
    }
}
impl<'a, T: Traversable> FusedIterator for Traverse<'a, T> {}
impl<'a, T: Traversable> Debug for Traverse<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pending = match &self.state {
            State::Lifo(stack) => stack.len(),
            State::PostOrder(stack) => stack.len(),
            State::InOrder {
                ancestors,
                descend_into,
            } => ancestors.len() + usize::from(descend_into.is_some()),
            State::Fifo(queue) => queue.len(),
        };
        f.debug_struct("Traverse")
            .field("order", &self.order)
            .field("pending", &pending)
            .finish()
    }
}
