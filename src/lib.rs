//! # Linked Sequences with Polymorphic Forward Cursors
//!
//! Two singly linked containers, a LIFO [`Stack`] and a FIFO [`Queue`],
//! behind one forward-iteration interface.
//!
//! ## Core Design
//!
//! 1. **Chain**: each container owns a chain of heap nodes; drop and deep
//!    copy walk it iteratively
//! 2. **Cursor**: a non-owning node position tagged with its container
//!    kind ([`AnyCursor`]); different kinds never compare equal
//! 3. **Handle**: a value-semantic iterator owning one cursor, in a
//!    mutable ([`IterMut`]) and a read-only ([`Iter`]) flavour that compare
//!    with each other; mutable converts to read-only, never the reverse
//! 4. **Interface**: [`FwdContainer`] lets generic code push, pop, iterate,
//!    assign and (de)serialize either container through `dyn`
//!
//! ## Usage Example
//!
//! ```
//! use fwdseq::{FwdContainer, Queue, Stack};
//!
//! let mut stack = Stack::new();
//! for value in [10, 20, 30] {
//!     stack.push(value)?;
//! }
//! assert_eq!(stack.to_string(), "30 20 10");
//!
//! // Mutable handles write straight into the container.
//! for mut value in stack.iter_mut() {
//!     *value += 1;
//! }
//! assert_eq!(stack.pop()?, 31);
//!
//! let mut queue: Queue<i32> = Queue::new();
//! queue.read_text(&mut "1 2 3".as_bytes())?;
//! assert_eq!(*queue.front()?, 1);
//!
//! // Assignment through the generic interface checks the kind.
//! assert!(stack.assign_from(&queue).is_err());
//! # Ok::<(), fwdseq::ContainerError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod algorithm; // Generic algorithms over handle ranges
pub mod config;    // Node budget
pub mod container; // Container-agnostic interface
pub mod cursor;    // Kind-tagged node positions
pub mod error;     // Error type
pub mod handle;    // Value-semantic iterators
pub mod queue;     // FIFO container
pub mod stack;     // LIFO container

mod node;
mod text;

// Re-exports for convenience
pub use config::ContainerConfig;
pub use container::{ContainerRef, FwdContainer, IntoIter};
pub use cursor::{AnyCursor, ContainerKind, Cursor};
pub use error::{ContainerError, Result};
pub use handle::{Access, Handle, Iter, IterMut, Mutable, ReadOnly};
pub use queue::{Queue, QueueCursor};
pub use stack::{Stack, StackCursor};
