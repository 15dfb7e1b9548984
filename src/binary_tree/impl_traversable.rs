use core::fmt::Debug;
use crate::{
    storage::Storage,
    traversal::Traversable,
    Side,
};
use super::{BinaryTree, Node};

impl<T, K, S> Traversable for BinaryTree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Value = T;
    type Cursor = K;

    #[inline(always)]
    fn cursor_to_root(&self) -> Self::Cursor {
        self.root.clone()
    }
    #[inline]
    fn contains_cursor(&self, cursor: &Self::Cursor) -> bool {
        self.storage.contains_key(cursor)
    }
    #[track_caller]
    fn value_of(&self, cursor: &Self::Cursor) -> &Self::Value {
        self.storage
            .get(cursor)
            .map(Node::value)
            .unwrap_or_else(|| panic!("invalid cursor: {:?}", cursor))
    }
    #[track_caller]
    fn parent_of(&self, cursor: &Self::Cursor) -> Option<Self::Cursor> {
        self.storage
            .get(cursor)
            .unwrap_or_else(|| panic!("invalid cursor: {:?}", cursor))
            .parent()
            .cloned()
    }
    #[track_caller]
    fn child_of(&self, cursor: &Self::Cursor, side: Side) -> Option<Self::Cursor> {
        self.storage
            .get(cursor)
            .unwrap_or_else(|| panic!("invalid cursor: {:?}", cursor))
            .child(side)
            .cloned()
    }
}
