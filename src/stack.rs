//! LIFO container
//!
//! The top of the stack is the head of the chain: push, pop and iteration
//! all start there, so iteration runs from the most recently pushed element
//! down to the oldest.

use std::cell::Ref;

use crate::container::linked_container;
use crate::error::{ContainerError, Result};

linked_container! {
    /// Linked LIFO stack
    ///
    /// Collecting into a stack or extending one panics if the node budget
    /// runs out; [`Stack::push`] and `read_text` report exhaustion as an
    /// error instead.
    pub struct Stack;
    /// Position inside a [`Stack`]
    pub struct StackCursor;
    kind: Stack,
    front: peek / peek_mut,
    // Pushing each parsed value in input order leaves the last one on top.
    splice: prepend_reversed,
}

impl<T> Stack<T> {
    /// Push onto the top
    pub fn push(&mut self, value: T) -> Result<()> {
        self.chain.push_front(value)
    }

    /// Borrow the top element
    pub fn peek(&self) -> Result<Ref<'_, T>> {
        self.chain
            .head()
            .map(|node| node.value().borrow())
            .ok_or(ContainerError::EmptyContainer)
    }

    /// Mutably borrow the top element
    pub fn peek_mut(&mut self) -> Result<&mut T> {
        self.chain.head_mut().ok_or(ContainerError::EmptyContainer)
    }
}
