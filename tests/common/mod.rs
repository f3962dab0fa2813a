//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Once;

use fwdseq::{FwdContainer, Queue, Stack};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-friendly subscriber once per test binary.
///
/// Set `RUST_LOG=fwdseq=trace` to see the container events.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Stack built by pushing `values` in order
pub fn stack_of(values: &[i32]) -> Stack<i32> {
    let mut stack = Stack::new();
    for &value in values {
        stack.push(value).expect("unbounded push");
    }
    stack
}

/// Queue built by pushing `values` in order
pub fn queue_of(values: &[i32]) -> Queue<i32> {
    let mut queue = Queue::new();
    for &value in values {
        queue.push(value).expect("unbounded push");
    }
    queue
}

/// Elements in iteration order, through the generic interface
pub fn contents<T: Clone>(container: &dyn FwdContainer<T>) -> Vec<T> {
    container.cbegin().map(|value| value.clone()).collect()
}
