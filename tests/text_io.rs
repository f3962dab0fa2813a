//! Text serialization tests
//!
//! Space-joined output, whole-input reads, stream faults and rollback.

use std::io::{self, Write};

use anyhow::Result;
use fwdseq::{ContainerConfig, ContainerError, FwdContainer, Queue, Stack};

mod common;
use common::*;

/// Writer that accepts `budget` bytes and then fails
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that yields `prefix` and then fails
struct FailingReader {
    prefix: &'static [u8],
}

impl io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.prefix.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source lost"));
        }
        let n = buf.len().min(self.prefix.len());
        buf[..n].copy_from_slice(&self.prefix[..n]);
        self.prefix = &self.prefix[n..];
        Ok(n)
    }
}

fn written(container: &dyn FwdContainer<i32>) -> Result<String> {
    let mut out = Vec::new();
    container.write_text(&mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_stack_writes_top_first() -> Result<()> {
    init_tracing();
    let s = stack_of(&[0, 1, 2, 3, 4, 5]);
    assert_eq!(written(&s)?, "5 4 3 2 1 0");
    assert_eq!(s.to_string(), "5 4 3 2 1 0");

    let empty: Stack<i32> = Stack::new();
    assert_eq!(written(&empty)?, "");
    Ok(())
}

#[test]
fn test_queue_writes_oldest_first() -> Result<()> {
    let q = queue_of(&[0, 1, 2]);
    assert_eq!(written(&q)?, "0 1 2");
    Ok(())
}

#[test]
fn test_stack_read_pushes_in_input_order() -> Result<()> {
    let mut s: Stack<i32> = Stack::new();
    let read = s.read_text(&mut "1 2 3".as_bytes())?;
    assert_eq!(read, 3);
    assert_eq!(s.to_string(), "3 2 1");
    assert_eq!(s.pop()?, 3);

    // A second round trip restores push order.
    let mut again: Stack<i32> = Stack::new();
    again.read_text(&mut s.to_string().as_bytes())?;
    assert_eq!(again.to_string(), "1 2");
    Ok(())
}

#[test]
fn test_queue_round_trip_preserves_order() -> Result<()> {
    let q = queue_of(&[7, -3, 12]);
    let mut copy: Queue<i32> = Queue::new();
    copy.read_text(&mut written(&q)?.as_bytes())?;
    assert_eq!(copy, q);
    Ok(())
}

#[test]
fn test_read_appends_to_existing_contents() -> Result<()> {
    let mut q = queue_of(&[1]);
    q.read_text(&mut "2\n3\t 4".as_bytes())?;
    assert_eq!(q.to_string(), "1 2 3 4");

    let mut s = stack_of(&[1]);
    s.read_text(&mut "2 3".as_bytes())?;
    assert_eq!(s.to_string(), "3 2 1");
    Ok(())
}

#[test]
fn test_empty_input_reads_nothing() -> Result<()> {
    let mut s = stack_of(&[4]);
    assert_eq!(s.read_text(&mut "   \n".as_bytes())?, 0);
    assert_eq!(s.to_string(), "4");
    Ok(())
}

#[test]
fn test_failing_writer_is_a_stream_fault() {
    let s = stack_of(&[10, 20, 30]);
    let mut sink = FailingWriter { budget: 4 };
    let err = s.write_text(&mut sink).unwrap_err();
    assert!(
        matches!(err, ContainerError::StreamFault(_)),
        "write failure should surface as a stream fault, got {err}"
    );
}

#[test]
fn test_failing_reader_rolls_back() {
    let mut q = queue_of(&[1, 2]);
    let mut source = FailingReader { prefix: b"3 4 5" };
    let err = q.read_text(&mut source).unwrap_err();
    assert!(matches!(err, ContainerError::StreamFault(_)));
    assert_eq!(q.to_string(), "1 2");
}

#[test]
fn test_bad_token_rolls_back() {
    let mut s = stack_of(&[1, 2]);
    let err = s.read_text(&mut "3 4 five 6".as_bytes()).unwrap_err();
    match err {
        ContainerError::ParseFailure { token, index, .. } => {
            assert_eq!(token, "five");
            assert_eq!(index, 2);
        }
        other => panic!("expected a parse failure, got {other}"),
    }
    assert_eq!(s.to_string(), "2 1", "stack must be unchanged after a failed read");
    assert_eq!(s.len(), 2);
}

#[test]
fn test_read_over_budget_rolls_back() {
    let mut q = Queue::with_config(ContainerConfig::bounded(4));
    q.push(1).unwrap();
    q.push(2).unwrap();

    let err = q.read_text(&mut "3 4 5".as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ContainerError::ResourceExhaustion { capacity: Some(4) }
    ));
    assert_eq!(q.to_string(), "1 2");

    q.read_text(&mut "3 4".as_bytes()).unwrap();
    assert_eq!(q.to_string(), "1 2 3 4");
}

#[test]
fn test_non_integer_elements() -> Result<()> {
    let mut q: Queue<String> = Queue::new();
    q.read_text(&mut "alpha beta".as_bytes())?;
    assert_eq!(q.to_string(), "alpha beta");

    let mut s: Stack<f64> = Stack::new();
    s.read_text(&mut "1.5 2.25".as_bytes())?;
    assert_eq!(s.to_string(), "2.25 1.5");
    Ok(())
}
