//! Whitespace-separated text form of a container
//!
//! Output: each element's `Display` form in iteration order, joined by a
//! single space, with no leading or trailing separator.
//!
//! Input: values are parsed into a detached staging chain first. The
//! container only sees them once the whole input has been read and parsed,
//! so a failure at any point leaves it exactly as it was.

use std::fmt;
use std::io;
use std::str::FromStr;

use tracing::debug;

use crate::config::ContainerConfig;
use crate::cursor::ContainerKind;
use crate::error::{ContainerError, Result};
use crate::handle::Iter;
use crate::node::Chain;

pub(crate) fn write_sequence<T: fmt::Display>(
    items: Iter<'_, T>,
    out: &mut dyn io::Write,
) -> Result<()> {
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{}", *item)?;
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn fmt_sequence<T: fmt::Display>(
    items: Iter<'_, T>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    for (index, item) in items.enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", *item)?;
    }
    Ok(())
}

/// Parse all of `input` into a staging chain that fits next to `len` live
/// nodes under `config`'s budget.
pub(crate) fn read_staged<T>(
    kind: ContainerKind,
    input: &mut dyn io::Read,
    len: usize,
    config: &ContainerConfig,
) -> Result<Chain<T>>
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    stage(input, config.remaining(len)).map_err(|err| {
        debug!(%kind, %err, "text read rolled back");
        match err {
            ContainerError::ResourceExhaustion { capacity: Some(_) } => {
                ContainerError::ResourceExhaustion {
                    capacity: config.capacity,
                }
            }
            other => other,
        }
    })
}

fn stage<T>(input: &mut dyn io::Read, budget: Option<usize>) -> Result<Chain<T>>
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut staged = Chain::new(budget);
    for (index, token) in text.split_whitespace().enumerate() {
        let value = token
            .parse::<T>()
            .map_err(|err| ContainerError::ParseFailure {
                token: token.to_string(),
                index,
                reason: err.to_string(),
            })?;
        staged.push_back(value)?;
    }
    Ok(staged)
}
