//! Container configuration
//!
//! A container carries its node budget with it. The budget behaves exactly
//! like allocator exhaustion: the push that would exceed it fails with
//! `ResourceExhaustion` and leaves the container untouched.

/// Configuration parameters for a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerConfig {
    /// Maximum number of live nodes (`None` = limited only by the allocator)
    pub capacity: Option<usize>,
}

impl ContainerConfig {
    /// No node budget
    pub fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// At most `capacity` live nodes
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    /// Nodes that can still be allocated when `len` are live
    pub fn remaining(&self, len: usize) -> Option<usize> {
        self.capacity.map(|limit| limit.saturating_sub(len))
    }
}
