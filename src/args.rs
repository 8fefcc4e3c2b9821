//! Split command-line override tokens into [`Override`]s.
//!
//! Two shapes are accepted, and may be mixed freely:
//!
//! ```text
//! --server.port=9090          one token
//! --server.port 9090          two tokens
//! --server.port=9090:int      explicit type hint
//! ```
//!
//! A trailing `:tag` is only a type hint when `tag` is one of the recognized
//! [`ValueType`] tags, so values such as `http://host:8080` pass through whole.
//! The whole list is checked before anything is returned: a malformed token
//! rejects the batch.

use std::ffi::OsString;

use crate::error::{NestconfError, Result};
use crate::overrides::Override;
use crate::value::ValueType;

pub fn parse_args<I, S>(args: I) -> Result<Vec<Override>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = args.into_iter().collect();
    let mut overrides = Vec::with_capacity(tokens.len());
    let mut index = 0;

    while index < tokens.len() {
        let arg = tokens[index].as_ref();
        let malformed = |reason: &str| NestconfError::MalformedOverride {
            arg: arg.into(),
            reason: reason.into(),
        };

        let body = arg
            .strip_prefix("--")
            .filter(|body| !body.is_empty() && !body.starts_with('-'))
            .ok_or_else(|| malformed("expected '--key=value' or '--key value'"))?;

        let (key, value) = match body.split_once('=') {
            Some((key, value)) => {
                index += 1;
                (key, value)
            }
            None => {
                let value = tokens
                    .get(index + 1)
                    .ok_or_else(|| malformed("missing value"))?;
                index += 2;
                (body, value.as_ref())
            }
        };

        if key.is_empty() {
            return Err(malformed("empty key"));
        }

        let (raw, type_hint) = split_type_hint(value);
        overrides.push(Override {
            key: key.to_string(),
            raw: raw.to_string(),
            type_hint,
        });
    }

    Ok(overrides)
}

fn split_type_hint(value: &str) -> (&str, Option<ValueType>) {
    if let Some((raw, tag)) = value.rsplit_once(':')
        && let Some(hint) = ValueType::from_tag(tag)
    {
        return (raw, Some(hint));
    }
    (value, None)
}

/// Convert OS-level arguments to UTF-8 strings. A token that is not valid
/// UTF-8 is a malformed override.
pub(crate) fn utf8_args<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| NestconfError::MalformedOverride {
                arg: arg.to_string_lossy().into_owned(),
                reason: "argument is not valid UTF-8".into(),
            })
        })
        .collect()
}
