//! Container-agnostic interface
//!
//! [`FwdContainer`] is what generic code programs against. It is object
//! safe, so `&dyn FwdContainer<T>` works for either container kind, and
//! [`ContainerRef`] recovers the concrete kind without dynamic casting.

use std::cell::Ref;
use std::fmt;
use std::io;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::cursor::ContainerKind;
use crate::error::Result;
use crate::handle::{Iter, IterMut};
use crate::node::Chain;
use crate::queue::Queue;
use crate::stack::Stack;
use crate::text;

/// Borrow of a container with its concrete kind recovered
pub enum ContainerRef<'a, T> {
    /// A stack
    Stack(&'a Stack<T>),
    /// A queue
    Queue(&'a Queue<T>),
}

impl<T> ContainerRef<'_, T> {
    /// Kind discriminant
    pub fn kind(&self) -> ContainerKind {
        match self {
            ContainerRef::Stack(_) => ContainerKind::Stack,
            ContainerRef::Queue(_) => ContainerKind::Queue,
        }
    }
}

impl<T> fmt::Debug for ContainerRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerRef({})", self.kind())
    }
}

/// Forward-iterable sequence container
///
/// "Front" is the removal point: the top of a stack, the oldest element of
/// a queue. Iteration starts there.
pub trait FwdContainer<T> {
    /// Kind discriminant
    fn kind(&self) -> ContainerKind;

    /// Insert at the container's natural position.
    ///
    /// Fails with `ResourceExhaustion` when no node can be allocated.
    fn push(&mut self, value: T) -> Result<()>;

    /// Remove and return the front element, or `EmptyContainer`.
    fn pop(&mut self) -> Result<T>;

    /// Borrow the front element, or `EmptyContainer`.
    fn front(&self) -> Result<Ref<'_, T>>;

    /// Mutably borrow the front element, or `EmptyContainer`.
    fn front_mut(&mut self) -> Result<&mut T>;

    /// Number of elements
    fn len(&self) -> usize;

    /// True when there are no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every element
    fn clear(&mut self);

    /// Mutable handle at the front
    fn begin(&mut self) -> IterMut<'_, T>;

    /// Mutable end sentinel.
    ///
    /// The end position references no node, so the returned handle does not
    /// keep the container borrowed.
    fn end<'b>(&self) -> IterMut<'b, T>;

    /// Read-only handle at the front
    fn cbegin(&self) -> Iter<'_, T>;

    /// Read-only end sentinel
    fn cend<'b>(&self) -> Iter<'b, T>;

    /// Concrete kind of this container
    fn as_variant(&self) -> ContainerRef<'_, T>;

    /// Replace the contents with a deep copy of `source`.
    ///
    /// `source` must be the same kind as `self`, otherwise `TypeMismatch` is
    /// returned and nothing changes. If the copy runs out of nodes, `self`
    /// is left empty and `ResourceExhaustion` is returned.
    fn assign_from(&mut self, source: &dyn FwdContainer<T>) -> Result<()>
    where
        T: Clone;

    /// Write the elements in iteration order, separated by single spaces.
    ///
    /// Write failures surface as `StreamFault`.
    fn write_text(&self, out: &mut dyn io::Write) -> Result<()>
    where
        T: fmt::Display,
    {
        text::write_sequence(self.cbegin(), out)
    }

    /// Read whitespace-separated values to the end of `input`, pushing each.
    ///
    /// Returns the number of values read. On `StreamFault`, `ParseFailure`
    /// or `ResourceExhaustion` the container is left exactly as it was.
    fn read_text(&mut self, input: &mut dyn io::Read) -> Result<usize>
    where
        T: FromStr,
        <T as FromStr>::Err: fmt::Display;
}

/// Owning iterator that pops elements in removal order
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(chain: Chain<T>) -> Self {
        Self { chain }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.chain.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.chain.len())
            .finish()
    }
}

/// Body shared by the linked containers.
///
/// Generates the container struct and its cursor type, the kind-agnostic
/// inherent methods, the [`FwdContainer`] impl and the std trait impls.
/// The invoking module supplies the kind-specific parts: an inherent
/// `push`, the front accessors named by `front:`, and the `Chain` method
/// named by `splice:` that moves a parsed staging chain into place.
macro_rules! linked_container {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
        $(#[$cursor_meta:meta])*
        pub struct $cursor:ident;
        kind: $kind:ident,
        front: $front:ident / $front_mut:ident,
        splice: $splice:ident $(,)?
    ) => {
        $(#[$meta])*
        pub struct $name<T> {
            chain: $crate::node::Chain<T>,
            config: $crate::config::ContainerConfig,
        }

        $(#[$cursor_meta])*
        pub struct $cursor<'a, T> {
            position: $crate::cursor::Position<'a, T>,
        }

        impl<'a, T> $cursor<'a, T> {
            pub(crate) fn end() -> Self {
                Self {
                    position: $crate::cursor::Position::end(),
                }
            }
        }

        impl<T> $crate::cursor::sealed::Sealed for $cursor<'_, T> {}

        impl<'a, T: 'a> $crate::cursor::Cursor<'a, T> for $cursor<'a, T> {
            const KIND: $crate::cursor::ContainerKind = $crate::cursor::ContainerKind::$kind;

            fn current(&self) -> Option<&'a ::std::cell::RefCell<T>> {
                self.position.current()
            }

            fn advance(&mut self) {
                self.position.advance();
            }

            fn same_position(&self, other: &Self) -> bool {
                self.position.same(&other.position)
            }
        }

        impl<T> Clone for $cursor<'_, T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $cursor<'_, T> {}

        impl<T> ::std::fmt::Debug for $cursor<'_, T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($cursor)).field(&self.position).finish()
            }
        }

        impl<T> $name<T> {
            const KIND: $crate::cursor::ContainerKind = $crate::cursor::ContainerKind::$kind;

            #[doc = concat!("Create an empty ", stringify!($kind), " with no node budget")]
            pub fn new() -> Self {
                Self::with_config($crate::config::ContainerConfig::default())
            }

            #[doc = concat!("Create an empty ", stringify!($kind), " with the given configuration")]
            pub fn with_config(config: $crate::config::ContainerConfig) -> Self {
                Self {
                    chain: $crate::node::Chain::new(config.capacity),
                    config,
                }
            }

            /// Configuration this container was built with
            pub fn config(&self) -> &$crate::config::ContainerConfig {
                &self.config
            }

            /// Remove the front element, or `EmptyContainer`
            pub fn pop(&mut self) -> $crate::error::Result<T> {
                self.chain
                    .pop_front()
                    .ok_or($crate::error::ContainerError::EmptyContainer)
            }

            /// Number of elements
            pub fn len(&self) -> usize {
                self.chain.len()
            }

            /// True when there are no elements
            pub fn is_empty(&self) -> bool {
                self.chain.len() == 0
            }

            /// Drop every element
            pub fn clear(&mut self) {
                self.chain.clear();
            }

            pub(crate) fn cursor(&self) -> $cursor<'_, T> {
                $cursor {
                    position: $crate::cursor::Position::at(self.chain.head()),
                }
            }

            /// Read-only handle from the front
            pub fn iter(&self) -> $crate::handle::Iter<'_, T> {
                $crate::handle::Handle::from_cursor(self.cursor())
            }

            /// Mutable handle from the front
            pub fn iter_mut(&mut self) -> $crate::handle::IterMut<'_, T> {
                $crate::handle::Handle::from_cursor(self.cursor())
            }

            /// Deep copy keeping this container's configuration.
            ///
            /// Fails with `ResourceExhaustion` if a node cannot be allocated;
            /// the partial copy is released first.
            pub fn try_clone(&self) -> $crate::error::Result<Self>
            where
                T: Clone,
            {
                Ok(Self {
                    chain: self.chain.try_clone(self.config.capacity)?,
                    config: self.config,
                })
            }

            /// Replace the contents with a deep copy of `source`.
            ///
            /// The copy is made under this container's own node budget. On
            /// failure this container is left empty.
            pub fn assign(&mut self, source: &Self) -> $crate::error::Result<()>
            where
                T: Clone,
            {
                match source.chain.try_clone(self.config.capacity) {
                    Ok(chain) => {
                        self.chain = chain;
                        Ok(())
                    }
                    Err(err) => {
                        self.chain.clear();
                        ::tracing::debug!(
                            kind = %Self::KIND,
                            %err,
                            "deep copy failed, target emptied"
                        );
                        Err(err)
                    }
                }
            }

            /// Move the contents out, leaving this container empty
            pub fn take(&mut self) -> Self {
                Self {
                    chain: self.chain.take(),
                    config: self.config,
                }
            }
        }

        impl<T> $crate::container::FwdContainer<T> for $name<T> {
            fn kind(&self) -> $crate::cursor::ContainerKind {
                Self::KIND
            }

            fn push(&mut self, value: T) -> $crate::error::Result<()> {
                $name::push(self, value)
            }

            fn pop(&mut self) -> $crate::error::Result<T> {
                $name::pop(self)
            }

            fn front(&self) -> $crate::error::Result<::std::cell::Ref<'_, T>> {
                $name::$front(self)
            }

            fn front_mut(&mut self) -> $crate::error::Result<&mut T> {
                $name::$front_mut(self)
            }

            fn len(&self) -> usize {
                self.chain.len()
            }

            fn clear(&mut self) {
                self.chain.clear();
            }

            fn begin(&mut self) -> $crate::handle::IterMut<'_, T> {
                self.iter_mut()
            }

            fn end<'b>(&self) -> $crate::handle::IterMut<'b, T> {
                $crate::handle::Handle::from_cursor($cursor::end())
            }

            fn cbegin(&self) -> $crate::handle::Iter<'_, T> {
                self.iter()
            }

            fn cend<'b>(&self) -> $crate::handle::Iter<'b, T> {
                $crate::handle::Handle::from_cursor($cursor::end())
            }

            fn as_variant(&self) -> $crate::container::ContainerRef<'_, T> {
                $crate::container::ContainerRef::$kind(self)
            }

            fn assign_from(
                &mut self,
                source: &dyn $crate::container::FwdContainer<T>,
            ) -> $crate::error::Result<()>
            where
                T: Clone,
            {
                match source.as_variant() {
                    $crate::container::ContainerRef::$kind(same) => self.assign(same),
                    other => {
                        ::tracing::debug!(
                            expected = %Self::KIND,
                            found = %other.kind(),
                            "rejected cross-kind assignment"
                        );
                        Err($crate::error::ContainerError::TypeMismatch {
                            expected: Self::KIND,
                            found: other.kind(),
                        })
                    }
                }
            }

            fn read_text(
                &mut self,
                input: &mut dyn ::std::io::Read,
            ) -> $crate::error::Result<usize>
            where
                T: ::std::str::FromStr,
                <T as ::std::str::FromStr>::Err: ::std::fmt::Display,
            {
                let staged =
                    $crate::text::read_staged(Self::KIND, input, self.chain.len(), &self.config)?;
                let read = staged.len();
                self.chain.$splice(staged);
                Ok(read)
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: Clone> Clone for $name<T> {
            fn clone(&self) -> Self {
                match self.try_clone() {
                    Ok(copy) => copy,
                    Err(_) => {
                        ::std::alloc::handle_alloc_error($crate::node::node_layout::<T>())
                    }
                }
            }
        }

        impl<T: PartialEq> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| *a == *b)
            }
        }

        impl<T: Eq> Eq for $name<T> {}

        impl<T: ::std::fmt::Debug> ::std::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_list().entries(self.iter()).finish()
            }
        }

        impl<T: ::std::fmt::Display> ::std::fmt::Display for $name<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::text::fmt_sequence(self.iter(), f)
            }
        }

        impl<T> Extend<T> for $name<T> {
            /// # Panics
            /// Panics if a push fails; use `push` to handle exhaustion.
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                for value in iter {
                    if let Err(err) = self.push(value) {
                        panic!("extending {} failed: {err}", Self::KIND);
                    }
                }
            }
        }

        impl<T> FromIterator<T> for $name<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut container = Self::new();
                container.extend(iter);
                container
            }
        }

        impl<T> IntoIterator for $name<T> {
            type Item = T;
            type IntoIter = $crate::container::IntoIter<T>;

            fn into_iter(mut self) -> Self::IntoIter {
                $crate::container::IntoIter::new(self.chain.take())
            }
        }

        impl<'a, T> IntoIterator for &'a $name<T> {
            type Item = ::std::cell::Ref<'a, T>;
            type IntoIter = $crate::handle::Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<'a, T> IntoIterator for &'a mut $name<T> {
            type Item = ::std::cell::RefMut<'a, T>;
            type IntoIter = $crate::handle::IterMut<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter_mut()
            }
        }
    };
}

pub(crate) use linked_container;
