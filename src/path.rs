//! Dotted-key resolution.
//!
//! A dotted key such as `"server.http.port"` is walked one segment at a time
//! from a root [`Config`]. Resolution stops at the *parent* of the final
//! segment and hands back that parent together with the final segment name;
//! the caller reads, writes or removes the leaf itself.
//!
//! Only intermediate segments are ever created. A key without a `.` resolves
//! to the root itself.

use crate::config::Config;
use crate::error::{NestconfError, Result};
use crate::value::Value;

/// What to do with intermediate segments while walking a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intermediate {
    /// Every intermediate segment must already exist as a node.
    Existing,
    /// Missing intermediate segments are created as empty nodes.
    Create,
    /// Like `Create`, and a non-node value sitting on the path is replaced by
    /// an empty node. Used when overlaying sources.
    Replace,
}

/// Reject keys with an empty segment (`""`, `".a"`, `"a."`, `"a..b"`).
pub fn validate_key(key: &str) -> Result<()> {
    if key.split('.').any(str::is_empty) {
        return Err(NestconfError::InvalidPath {
            key: key.into(),
            reason: "empty path segment".into(),
        });
    }
    Ok(())
}

/// Resolve `key` to its parent node and final segment, without creating anything.
pub fn resolve<'a, 'k>(root: &'a Config, key: &'k str) -> Result<(&'a Config, &'k str)> {
    validate_key(key)?;
    let mut current = root;
    let mut rest = key;

    while let Some((head, tail)) = rest.split_once('.') {
        current = match current.entries.get(head) {
            Some(Value::Node(child)) => child,
            Some(other) => return Err(not_a_node(key, head, other)),
            None => return Err(NestconfError::KeyNotFound(key.into())),
        };
        rest = tail;
    }

    Ok((current, rest))
}

/// Resolve `key` to its parent node and final segment for mutation.
pub fn resolve_mut<'a, 'k>(
    root: &'a mut Config,
    key: &'k str,
    mode: Intermediate,
) -> Result<(&'a mut Config, &'k str)> {
    validate_key(key)?;
    let mut current = root;
    let mut rest = key;

    while let Some((head, tail)) = rest.split_once('.') {
        let needs_node = match current.entries.get(head) {
            None => mode != Intermediate::Existing,
            Some(Value::Node(_)) => false,
            Some(_) => mode == Intermediate::Replace,
        };
        if needs_node {
            current
                .entries
                .insert(head.to_string(), Value::Node(Config::new()));
        }

        current = match current.entries.get_mut(head) {
            Some(Value::Node(child)) => child,
            Some(other) => return Err(not_a_node(key, head, other)),
            None => return Err(NestconfError::KeyNotFound(key.into())),
        };
        rest = tail;
    }

    Ok((current, rest))
}

fn not_a_node(key: &str, segment: &str, found: &Value) -> NestconfError {
    NestconfError::InvalidPath {
        key: key.into(),
        reason: format!("'{segment}' holds a {}, not a node", found.type_name()),
    }
}
