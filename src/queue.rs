//! FIFO container
//!
//! Elements are removed from the head of the chain and appended after its
//! tail. Iteration starts at the front, so it runs from the oldest element
//! to the newest.

use std::cell::Ref;

use crate::container::linked_container;
use crate::error::{ContainerError, Result};

linked_container! {
    /// Linked FIFO queue
    ///
    /// Collecting into a queue or extending one panics if the node budget
    /// runs out; [`Queue::push`] and `read_text` report exhaustion as an
    /// error instead.
    pub struct Queue;
    /// Position inside a [`Queue`]
    pub struct QueueCursor;
    kind: Queue,
    front: front / front_mut,
    splice: append,
}

impl<T> Queue<T> {
    /// Append at the back
    pub fn push(&mut self, value: T) -> Result<()> {
        self.chain.push_back(value)
    }

    /// Borrow the front (oldest) element
    pub fn front(&self) -> Result<Ref<'_, T>> {
        self.chain
            .head()
            .map(|node| node.value().borrow())
            .ok_or(ContainerError::EmptyContainer)
    }

    /// Mutably borrow the front element
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.chain.head_mut().ok_or(ContainerError::EmptyContainer)
    }

    /// Borrow the back (newest) element
    pub fn back(&self) -> Result<Ref<'_, T>> {
        self.chain
            .tail()
            .map(|node| node.value().borrow())
            .ok_or(ContainerError::EmptyContainer)
    }

    /// Mutably borrow the back element
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.chain.tail_mut().ok_or(ContainerError::EmptyContainer)
    }
}
