//! Error type shared by both containers and the text codec

use std::io;

use thiserror::Error;

use crate::cursor::ContainerKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;

/// Errors reported by container operations.
///
/// Every fallible operation returns one of these to its immediate caller.
/// Nothing is retried or suppressed internally.
#[derive(Error, Debug)]
pub enum ContainerError {
    /// `pop`, `peek` or `front` on a container with no elements.
    #[error("container is empty")]
    EmptyContainer,

    /// A node could not be allocated.
    ///
    /// `capacity` is the configured node budget that was hit, or `None` when
    /// the global allocator itself refused the request.
    #[error("{}", exhaustion_message(.capacity))]
    ResourceExhaustion {
        /// Configured budget, if the failure came from the budget.
        capacity: Option<usize>,
    },

    /// Assignment through the generic interface crossed container kinds.
    #[error("cannot assign a {found} into a {expected}")]
    TypeMismatch {
        /// Kind of the assignment target.
        expected: ContainerKind,
        /// Kind of the assignment source.
        found: ContainerKind,
    },

    /// The read or write target failed.
    #[error("stream fault: {0}")]
    StreamFault(#[from] io::Error),

    /// A token in the input did not parse as the element type.
    #[error("cannot parse token {index} ({token:?}): {reason}")]
    ParseFailure {
        /// Offending token.
        token: String,
        /// Zero-based index of the token in the input.
        index: usize,
        /// Rendered parse error of the element type.
        reason: String,
    },
}

fn exhaustion_message(capacity: &Option<usize>) -> String {
    match capacity {
        Some(limit) => format!("node budget of {limit} exhausted"),
        None => "node allocation failed".to_string(),
    }
}

impl ContainerError {
    /// Budget exhaustion at `limit` nodes.
    pub(crate) fn budget(limit: usize) -> Self {
        Self::ResourceExhaustion {
            capacity: Some(limit),
        }
    }

    /// Allocator refused a node.
    pub(crate) fn out_of_memory() -> Self {
        Self::ResourceExhaustion { capacity: None }
    }

    /// True for `EmptyContainer`.
    pub fn is_empty_container(&self) -> bool {
        matches!(self, Self::EmptyContainer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ContainerError::EmptyContainer.to_string(), "container is empty");
        assert_eq!(
            ContainerError::budget(4).to_string(),
            "node budget of 4 exhausted"
        );
        assert_eq!(
            ContainerError::out_of_memory().to_string(),
            "node allocation failed"
        );

        let err = ContainerError::TypeMismatch {
            expected: ContainerKind::Stack,
            found: ContainerKind::Queue,
        };
        assert_eq!(err.to_string(), "cannot assign a queue into a stack");
    }

    #[test]
    fn test_io_error_converts_to_stream_fault() {
        let err: ContainerError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, ContainerError::StreamFault(_)));
        assert!(!err.is_empty_container());
    }
}
