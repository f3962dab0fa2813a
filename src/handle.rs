//! Value-semantic iterator handles
//!
//! A [`Handle`] owns zero or one [`AnyCursor`] and is generic over an
//! access marker: [`IterMut`] may write through the cursor, [`Iter`] may
//! only read. Both flavours compare against each other, and a mutable
//! handle converts into a read-only one. There is no conversion back.
//!
//! Cloning a handle copies its cursor. Moving one out with
//! [`std::mem::take`] leaves the source detached, which compares equal only
//! to other detached handles.
//!
//! Handles are also ordinary Rust iterators: `next` yields a guard for the
//! current element and then advances.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::cursor::{AnyCursor, ContainerKind};

mod private {
    pub trait Sealed {}
}

/// Access level of a handle
pub trait Access: private::Sealed + fmt::Debug {
    /// Guard yielded when the handle is used as an iterator
    type Guard<'a, T: 'a>;

    /// Borrow the element cell at this access level.
    ///
    /// # Panics
    /// Panics if the borrow conflicts with a live guard for the same element.
    fn guard<'a, T: 'a>(cell: &'a RefCell<T>) -> Self::Guard<'a, T>;
}

/// Marker for handles that may write through their cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct Mutable;

/// Marker for handles that only read through their cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl private::Sealed for Mutable {}
impl private::Sealed for ReadOnly {}

impl Access for Mutable {
    type Guard<'a, T: 'a> = RefMut<'a, T>;

    fn guard<'a, T: 'a>(cell: &'a RefCell<T>) -> RefMut<'a, T> {
        cell.borrow_mut()
    }
}

impl Access for ReadOnly {
    type Guard<'a, T: 'a> = Ref<'a, T>;

    fn guard<'a, T: 'a>(cell: &'a RefCell<T>) -> Ref<'a, T> {
        cell.borrow()
    }
}

/// Iterator handle over either container kind
pub struct Handle<'a, T, A: Access> {
    cursor: Option<AnyCursor<'a, T>>,
    access: PhantomData<A>,
}

/// Read-only handle
pub type Iter<'a, T> = Handle<'a, T, ReadOnly>;

/// Mutable handle
pub type IterMut<'a, T> = Handle<'a, T, Mutable>;

const END_DEREF: &str = "dereferenced an iterator handle at the end of its sequence";

impl<'a, T: 'a, A: Access> Handle<'a, T, A> {
    pub(crate) fn from_cursor(cursor: impl Into<AnyCursor<'a, T>>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            access: PhantomData,
        }
    }

    /// Handle without a cursor
    pub fn detached() -> Self {
        Self {
            cursor: None,
            access: PhantomData,
        }
    }

    /// True when the handle owns no cursor
    pub fn is_detached(&self) -> bool {
        self.cursor.is_none()
    }

    /// Kind of the container the cursor walks
    pub fn kind(&self) -> Option<ContainerKind> {
        self.cursor.as_ref().map(AnyCursor::kind)
    }

    /// True at the end sentinel, and for detached handles
    pub fn is_end(&self) -> bool {
        self.cursor.as_ref().map_or(true, AnyCursor::is_end)
    }

    fn cell(&self) -> Option<&'a RefCell<T>> {
        self.cursor.as_ref().and_then(AnyCursor::current)
    }

    /// Read the current element, `None` at the end
    pub fn try_get(&self) -> Option<Ref<'a, T>> {
        self.cell().map(RefCell::borrow)
    }

    /// Read the current element.
    ///
    /// # Panics
    /// Panics at the end sentinel, on a detached handle, or while a mutable
    /// guard for the same element is alive.
    pub fn get(&self) -> Ref<'a, T> {
        match self.try_get() {
            Some(value) => value,
            None => panic!("{END_DEREF}"),
        }
    }

    /// Step forward (pre-increment); a no-op at the end
    pub fn advance(&mut self) -> &mut Self {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.advance();
        }
        self
    }

    /// Step forward and return the position held before (post-increment)
    pub fn post_advance(&mut self) -> Self {
        let snapshot = self.clone();
        self.advance();
        snapshot
    }

    /// Read-only handle at the same position
    pub fn to_read_only(&self) -> Iter<'a, T> {
        Handle {
            cursor: self.cursor,
            access: PhantomData,
        }
    }
}

impl<'a, T: 'a> IterMut<'a, T> {
    /// Mutably borrow the current element, `None` at the end
    pub fn try_get_mut(&self) -> Option<RefMut<'a, T>> {
        self.cell().map(RefCell::borrow_mut)
    }

    /// Mutably borrow the current element.
    ///
    /// Writes land in the container's storage and are seen by every later
    /// read through any handle or accessor.
    ///
    /// # Panics
    /// Panics at the end sentinel, on a detached handle, or while another
    /// guard for the same element is alive.
    pub fn get_mut(&self) -> RefMut<'a, T> {
        match self.try_get_mut() {
            Some(value) => value,
            None => panic!("{END_DEREF}"),
        }
    }

    /// Overwrite the current element and return the previous value.
    ///
    /// # Panics
    /// As for [`get_mut`](Self::get_mut).
    pub fn set(&self, value: T) -> T {
        std::mem::replace(&mut *self.get_mut(), value)
    }
}

impl<'a, T: 'a> From<IterMut<'a, T>> for Iter<'a, T> {
    fn from(handle: IterMut<'a, T>) -> Self {
        Handle {
            cursor: handle.cursor,
            access: PhantomData,
        }
    }
}

impl<T, A: Access> Clone for Handle<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            access: PhantomData,
        }
    }
}

impl<'a, T: 'a, A: Access> Default for Handle<'a, T, A> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<'a, T: 'a, A: Access, B: Access> PartialEq<Handle<'a, T, B>> for Handle<'a, T, A> {
    fn eq(&self, other: &Handle<'a, T, B>) -> bool {
        match (&self.cursor, &other.cursor) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a, T: 'a, A: Access> Eq for Handle<'a, T, A> {}

impl<'a, T: 'a, A: Access> Iterator for Handle<'a, T, A> {
    type Item = A::Guard<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cell()?;
        self.advance();
        Some(A::guard(cell))
    }
}

impl<'a, T: 'a, A: Access> FusedIterator for Handle<'a, T, A> {}

impl<T, A: Access> fmt::Debug for Handle<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("access", &self.access)
            .field("cursor", &self.cursor)
            .finish()
    }
}
