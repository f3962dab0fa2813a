//! Singly linked node chain
//!
//! `Chain` is the storage shared by both containers. Each node owns its
//! successor; the chain owns the first node and keeps a non-owning pointer
//! to the last one so the queue can append in O(1).
//!
//! Nodes are allocated one at a time through the global allocator so that
//! allocation failure is reported as `ResourceExhaustion` instead of
//! aborting. Drop, clear and deep copy walk the chain in a loop; nothing
//! here recurses per node.
//!
//! Element values sit in a `RefCell`. Mutable handles are clonable, so two
//! of them may name the same node; the cell turns an overlapping write into
//! a borrow panic instead of two live `&mut T`.

use std::alloc::{self, Layout};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::{ContainerError, Result};

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// Layout of one node, for reporting allocator failure
pub(crate) fn node_layout<T>() -> Layout {
    Layout::new::<Node<T>>()
}

/// One cell of a chain
pub struct Node<T> {
    value: RefCell<T>,
    next: Link<T>,
}

impl<T> Node<T> {
    fn allocate(value: T, next: Link<T>) -> Result<NonNull<Node<T>>> {
        let layout = node_layout::<T>();
        // SAFETY: a node always stores its link, so the layout is non-zero.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let ptr = NonNull::new(raw).ok_or_else(ContainerError::out_of_memory)?;
        // SAFETY: `ptr` is a fresh allocation with `Node<T>`'s layout.
        unsafe {
            ptr.as_ptr().write(Node {
                value: RefCell::new(value),
                next,
            })
        };
        Ok(ptr)
    }

    /// Free a node and hand back its payload and successor.
    ///
    /// # Safety
    /// `ptr` must come from `allocate`, must already be unlinked from its
    /// predecessor, and no reference into it may be alive.
    unsafe fn release(ptr: NonNull<Node<T>>) -> (T, Link<T>) {
        let node = ptr.as_ptr().read();
        alloc::dealloc(ptr.as_ptr().cast(), node_layout::<T>());
        (node.value.into_inner(), node.next)
    }

    /// Cell holding the element
    pub(crate) fn value(&self) -> &RefCell<T> {
        &self.value
    }

    /// Next node, borrowed for as long as this one is
    pub(crate) fn successor(&self) -> Option<&Node<T>> {
        // SAFETY: the successor is owned through this node and lives at
        // least as long as the borrow of `self`.
        self.next.map(|next| unsafe { &*next.as_ptr() })
    }
}

/// Owned singly linked sequence of nodes
pub(crate) struct Chain<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    capacity: Option<usize>,
    marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the chain exclusively owns its nodes; moving it to another thread
// moves the elements with it.
unsafe impl<T: Send> Send for Chain<T> {}

impl<T> Chain<T> {
    /// Empty chain with an optional node budget
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            capacity,
            marker: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn reserve_one(&self) -> Result<()> {
        match self.capacity {
            Some(limit) if self.len >= limit => Err(ContainerError::budget(limit)),
            _ => Ok(()),
        }
    }

    /// Link a new node before the first one
    pub(crate) fn push_front(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        let node = Node::allocate(value, self.head)?;
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Link a new node after the last one
    pub(crate) fn push_back(&mut self, value: T) -> Result<()> {
        self.reserve_one()?;
        let node = Node::allocate(value, None)?;
        match self.tail {
            // SAFETY: `tail` is owned by this chain and `&mut self` rules
            // out any outstanding reference into it.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Unlink and free the first node
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        self.head.map(|head| {
            // SAFETY: `head` is owned by this chain and is unlinked by the
            // assignment below; `&mut self` rules out live references.
            let (value, next) = unsafe { Node::release(head) };
            self.head = next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            value
        })
    }

    pub(crate) fn head(&self) -> Option<&Node<T>> {
        // SAFETY: nodes live until they are popped, which needs `&mut self`.
        self.head.map(|head| unsafe { &*head.as_ptr() })
    }

    pub(crate) fn tail(&self) -> Option<&Node<T>> {
        // SAFETY: as for `head`.
        self.tail.map(|tail| unsafe { &*tail.as_ptr() })
    }

    pub(crate) fn head_mut(&mut self) -> Option<&mut T> {
        // SAFETY: exclusive access to the chain gives exclusive access to
        // every node in it.
        self.head.map(|head| unsafe { (*head.as_ptr()).value.get_mut() })
    }

    pub(crate) fn tail_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as for `head_mut`.
        self.tail.map(|tail| unsafe { (*tail.as_ptr()).value.get_mut() })
    }

    /// Walk the nodes from head to tail
    pub(crate) fn nodes(&self) -> Nodes<'_, T> {
        Nodes { next: self.head() }
    }

    /// Free every node, head first
    pub(crate) fn clear(&mut self) {
        let dropped = self.len;
        while self.pop_front().is_some() {}
        if dropped > 0 {
            trace!(dropped, "chain cleared");
        }
    }

    /// Move the whole chain out, leaving an empty one with the same budget
    pub(crate) fn take(&mut self) -> Chain<T> {
        let capacity = self.capacity;
        mem::replace(self, Chain::new(capacity))
    }

    /// Deep copy in the same order under a (possibly different) budget.
    ///
    /// On failure the partial copy is freed before the error is returned.
    pub(crate) fn try_clone(&self, capacity: Option<usize>) -> Result<Chain<T>>
    where
        T: Clone,
    {
        let mut copy = Chain::new(capacity);
        for node in self.nodes() {
            copy.push_back(node.value.borrow().clone())?;
        }
        Ok(copy)
    }

    /// Relink all of `other`'s nodes after the last node, keeping order
    pub(crate) fn append(&mut self, mut other: Chain<T>) {
        let Some(other_head) = other.head.take() else {
            return;
        };
        match self.tail {
            // SAFETY: `tail` is owned by this chain and exclusively borrowed.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(other_head) },
            None => self.head = Some(other_head),
        }
        self.tail = other.tail.take();
        let moved = mem::take(&mut other.len);
        self.len += moved;
        trace!(moved, len = self.len, "chain appended");
    }

    /// Relink `other`'s nodes one by one in front of the head.
    ///
    /// The result is what pushing `other`'s elements to the front in order
    /// would produce, without allocating.
    pub(crate) fn prepend_reversed(&mut self, mut other: Chain<T>) {
        let moved = other.len;
        while let Some(node) = other.head {
            // SAFETY: `node` is owned by `other`; it is detached from `other`
            // and re-linked in front of `self.head` before anything else can
            // observe either chain.
            unsafe {
                other.head = (*node.as_ptr()).next;
                (*node.as_ptr()).next = self.head;
            }
            if self.tail.is_none() {
                self.tail = Some(node);
            }
            self.head = Some(node);
            other.len -= 1;
            self.len += 1;
        }
        other.tail = None;
        if moved > 0 {
            trace!(moved, len = self.len, "chain prepended");
        }
    }
}

impl<T> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Borrowing walk over the nodes of a chain
pub(crate) struct Nodes<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.successor();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(chain: &Chain<i32>) -> Vec<i32> {
        chain.nodes().map(|node| *node.value().borrow()).collect()
    }

    #[test]
    fn test_push_front_and_back() {
        let mut chain = Chain::new(None);
        chain.push_back(2).unwrap();
        chain.push_front(1).unwrap();
        chain.push_back(3).unwrap();

        assert_eq!(values(&chain), vec![1, 2, 3]);
        assert_eq!(chain.len(), 3);
        assert_eq!(*chain.tail().unwrap().value().borrow(), 3);
    }

    #[test]
    fn test_pop_front_clears_tail() {
        let mut chain = Chain::new(None);
        chain.push_back(7).unwrap();
        assert_eq!(chain.pop_front(), Some(7));
        assert!(chain.head().is_none());
        assert!(chain.tail().is_none());
        assert_eq!(chain.pop_front(), None);

        // The tail must be re-seeded after the chain ran dry.
        chain.push_back(8).unwrap();
        chain.push_back(9).unwrap();
        assert_eq!(values(&chain), vec![8, 9]);
    }

    #[test]
    fn test_budget() {
        let mut chain = Chain::new(Some(2));
        chain.push_front(1).unwrap();
        chain.push_back(2).unwrap();

        let err = chain.push_front(3).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::ResourceExhaustion { capacity: Some(2) }
        ));
        assert_eq!(values(&chain), vec![1, 2]);
    }

    #[test]
    fn test_try_clone_respects_target_budget() {
        let mut chain = Chain::new(None);
        for i in 0..5 {
            chain.push_back(i).unwrap();
        }

        let copy = chain.try_clone(None).unwrap();
        assert_eq!(values(&copy), values(&chain));

        assert!(chain.try_clone(Some(3)).is_err());
        assert_eq!(chain.len(), 5);
    }

    #[test]
    fn test_append_and_prepend_reversed() {
        let mut chain = Chain::new(None);
        chain.push_back(1).unwrap();

        let mut staged = Chain::new(None);
        staged.push_back(2).unwrap();
        staged.push_back(3).unwrap();
        chain.append(staged);
        assert_eq!(values(&chain), vec![1, 2, 3]);
        chain.push_back(4).unwrap();
        assert_eq!(values(&chain), vec![1, 2, 3, 4]);

        let mut staged = Chain::new(None);
        staged.push_back(5).unwrap();
        staged.push_back(6).unwrap();
        chain.prepend_reversed(staged);
        assert_eq!(values(&chain), vec![6, 5, 1, 2, 3, 4]);
        assert_eq!(chain.len(), 6);

        let mut empty = Chain::new(None);
        let mut staged = Chain::new(None);
        staged.push_back(1).unwrap();
        empty.prepend_reversed(staged);
        empty.push_back(2).unwrap();
        assert_eq!(values(&empty), vec![1, 2]);
    }

    #[test]
    fn test_long_chain_drops_iteratively() {
        let mut chain = Chain::new(None);
        for i in 0..200_000 {
            chain.push_front(i).unwrap();
        }
        let copy = chain.try_clone(None).unwrap();
        assert_eq!(copy.len(), 200_000);
        drop(chain);
        drop(copy);
    }

    #[test]
    fn test_take_keeps_budget() {
        let mut chain = Chain::new(Some(4));
        chain.push_back(1).unwrap();
        let moved = chain.take();
        assert_eq!(moved.len(), 1);
        assert_eq!(chain.len(), 0);
        for i in 0..4 {
            chain.push_back(i).unwrap();
        }
        assert!(chain.push_back(4).is_err());
    }
}
