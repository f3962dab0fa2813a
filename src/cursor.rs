//! Container cursors
//!
//! A cursor is a non-owning position inside one container's chain. Each
//! container kind has its own cursor type implementing [`Cursor`]; the
//! closed set of kinds is gathered in [`AnyCursor`], which is what a
//! handle actually stores.
//!
//! Equality first compares kinds and only then positions, so a stack
//! cursor never equals a queue cursor, not even when both sit at the end.

use std::cell::RefCell;
use std::fmt;
use std::ptr;

use crate::node::Node;
use crate::queue::QueueCursor;
use crate::stack::StackCursor;

/// Which container a cursor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// LIFO container
    Stack,
    /// FIFO container
    Queue,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Stack => f.write_str("stack"),
            ContainerKind::Queue => f.write_str("queue"),
        }
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Capability set every container-specific cursor provides.
///
/// Sealed: the cursor kinds are exactly the ones [`AnyCursor`] can hold.
///
/// ```compile_fail
/// use std::cell::RefCell;
/// use fwdseq::{ContainerKind, Cursor};
///
/// #[derive(Clone, Copy, Debug)]
/// struct Outside;
///
/// impl<'a> Cursor<'a, i32> for Outside {
///     const KIND: ContainerKind = ContainerKind::Stack;
///     fn current(&self) -> Option<&'a RefCell<i32>> {
///         None
///     }
///     fn advance(&mut self) {}
///     fn same_position(&self, _: &Self) -> bool {
///         true
///     }
/// }
/// ```
pub trait Cursor<'a, T: 'a>: sealed::Sealed + Copy + fmt::Debug {
    /// Kind discriminant of the owning container
    const KIND: ContainerKind;

    /// Cell of the element under the cursor, `None` at the end
    fn current(&self) -> Option<&'a RefCell<T>>;

    /// Step to the successor; a no-op at the end
    fn advance(&mut self);

    /// Same node (or both at the end)
    fn same_position(&self, other: &Self) -> bool;

    /// True at the end sentinel
    fn is_end(&self) -> bool {
        self.current().is_none()
    }
}

/// Node position shared by the concrete cursor kinds
pub(crate) struct Position<'a, T> {
    node: Option<&'a Node<T>>,
}

impl<'a, T> Position<'a, T> {
    pub(crate) fn at(node: Option<&'a Node<T>>) -> Self {
        Self { node }
    }

    pub(crate) fn end() -> Self {
        Self { node: None }
    }

    pub(crate) fn current(&self) -> Option<&'a RefCell<T>> {
        self.node.map(Node::value)
    }

    pub(crate) fn advance(&mut self) {
        if let Some(node) = self.node {
            self.node = node.successor();
        }
    }

    pub(crate) fn same(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub(crate) fn address(&self) -> Option<*const Node<T>> {
        self.node.map(|node| node as *const Node<T>)
    }
}

impl<T> Clone for Position<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<'_, T> {}

impl<T> fmt::Debug for Position<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Some(address) => write!(f, "{address:p}"),
            None => f.write_str("end"),
        }
    }
}

/// A cursor of any container kind
pub enum AnyCursor<'a, T> {
    /// Position in a [`Stack`](crate::Stack)
    Stack(StackCursor<'a, T>),
    /// Position in a [`Queue`](crate::Queue)
    Queue(QueueCursor<'a, T>),
}

impl<'a, T: 'a> AnyCursor<'a, T> {
    /// Kind discriminant
    pub fn kind(&self) -> ContainerKind {
        match self {
            AnyCursor::Stack(_) => <StackCursor<'a, T> as Cursor<'a, T>>::KIND,
            AnyCursor::Queue(_) => <QueueCursor<'a, T> as Cursor<'a, T>>::KIND,
        }
    }

    /// Cell of the element under the cursor, `None` at the end
    pub fn current(&self) -> Option<&'a RefCell<T>> {
        match self {
            AnyCursor::Stack(cursor) => cursor.current(),
            AnyCursor::Queue(cursor) => cursor.current(),
        }
    }

    /// Step to the successor; a no-op at the end
    pub fn advance(&mut self) {
        match self {
            AnyCursor::Stack(cursor) => cursor.advance(),
            AnyCursor::Queue(cursor) => cursor.advance(),
        }
    }

    /// True at the end sentinel
    pub fn is_end(&self) -> bool {
        self.current().is_none()
    }
}

impl<'a, T: 'a> PartialEq for AnyCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyCursor::Stack(a), AnyCursor::Stack(b)) => a.same_position(b),
            (AnyCursor::Queue(a), AnyCursor::Queue(b)) => a.same_position(b),
            _ => false,
        }
    }
}

impl<T> Clone for AnyCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AnyCursor<'_, T> {}

impl<T> fmt::Debug for AnyCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyCursor::Stack(cursor) => fmt::Debug::fmt(cursor, f),
            AnyCursor::Queue(cursor) => fmt::Debug::fmt(cursor, f),
        }
    }
}

impl<'a, T> From<StackCursor<'a, T>> for AnyCursor<'a, T> {
    fn from(cursor: StackCursor<'a, T>) -> Self {
        AnyCursor::Stack(cursor)
    }
}

impl<'a, T> From<QueueCursor<'a, T>> for AnyCursor<'a, T> {
    fn from(cursor: QueueCursor<'a, T>) -> Self {
        AnyCursor::Queue(cursor)
    }
}
