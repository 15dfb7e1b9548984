use core::fmt::Display;
use alloc::{vec::Vec, collections::VecDeque};

/// The LIFO container used by the iterative traversals.
pub(crate) type Stack<T> = Vec<T>;
/// The FIFO container used by the breadth-first walks.
pub(crate) type Queue<T> = VecDeque<T>;

/// Reports a key which is linked from another node but not stored.
#[cold]
#[track_caller]
pub(crate) fn corrupted(msg: impl Display) -> ! {
    panic!("tree corruption: {}", msg)
}
