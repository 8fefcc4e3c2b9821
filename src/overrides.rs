//! Typed overrides of existing leaves.
//!
//! An [`Override`] names a dotted key that must already exist, a raw string
//! value, and an optional type hint. The raw string is coerced to the hinted
//! type, or to the type of the value currently stored at the key, and written
//! back in place. Overrides never create keys.

use tracing::debug;

use crate::config::Config;
use crate::error::{NestconfError, Result};
use crate::path::{self, Intermediate};
use crate::value::{Value, ValueType};

/// A single `key = raw[:type]` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub key: String,
    pub raw: String,
    pub type_hint: Option<ValueType>,
}

impl Override {
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
            type_hint: None,
        }
    }

    pub fn typed(key: impl Into<String>, raw: impl Into<String>, type_hint: ValueType) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
            type_hint: Some(type_hint),
        }
    }
}

/// Apply overrides in order, stopping at the first failure.
///
/// Overrides applied before a failing one stay applied.
pub fn apply_overrides<'a>(
    config: &mut Config,
    overrides: impl IntoIterator<Item = &'a Override>,
) -> Result<()> {
    for ov in overrides {
        apply_override(config, ov)?;
    }
    Ok(())
}

pub fn apply_override(config: &mut Config, ov: &Override) -> Result<()> {
    let current = config
        .get(&ov.key)
        .map_err(|_| NestconfError::OverrideTargetMissing(ov.key.clone()))?;

    let target = match ov.type_hint.or_else(|| current.value_type()) {
        Some(t) => t,
        None => {
            return Err(NestconfError::InvalidOverrideValue {
                key: ov.key.clone(),
                value: ov.raw.clone(),
                reason: format!(
                    "cannot infer a type from the current {} value; add a type hint",
                    current.type_name()
                ),
            });
        }
    };

    let value = coerce(&ov.key, &ov.raw, target)?;
    debug!(key = %ov.key, value = %value, ty = %target, "applying override");

    let (parent, leaf) = path::resolve_mut(config, &ov.key, Intermediate::Existing)?;
    parent.entries.insert(leaf.to_string(), value);
    Ok(())
}

/// Coerce a raw string to `target`.
///
/// Booleans accept exactly `true`/`True`/`1` and `false`/`False`/`0`.
pub fn coerce(key: &str, raw: &str, target: ValueType) -> Result<Value> {
    let invalid = |reason: String| NestconfError::InvalidOverrideValue {
        key: key.into(),
        value: raw.into(),
        reason,
    };

    match target {
        ValueType::Bool => match raw {
            "true" | "True" | "1" => Ok(Value::Bool(true)),
            "false" | "False" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid(
                "expected one of true, True, 1, false, False, 0".into(),
            )),
        },
        ValueType::Int => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| invalid(format!("expected int: {e}"))),
        ValueType::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| invalid(format!("expected float: {e}"))),
        ValueType::String => Ok(Value::String(raw.to_string())),
    }
}
