//! Nested configuration addressed by dotted keys.
//!
//! Nestconf stores settings as a tree of ordered nodes but lets you address
//! any leaf with a flat-looking dotted key such as `"server.http.port"`. Trees
//! are built by layering sources (config files, in-memory maps, keyword
//! pairs) and can then be adjusted from the command line with typed
//! overrides.
//!
//! ```ignore
//! let config = Config::builder()
//!     .file("defaults.toml")
//!     .file("local.json")
//!     .set("server.workers", 8)
//!     .args(["--server.http.port=9090", "--debug", "true"])
//!     .build()?;
//!
//! assert_eq!(config.get("server.http.port")?.as_i64(), Some(9090));
//! ```
//!
//! # Dotted keys
//!
//! A dotted key is one or more non-empty segments joined by `.`. Every
//! segment but the last names a nested node; the last names the leaf.
//!
//! - [`Config::get`] and [`Config::remove`] fail with
//!   [`KeyNotFound`](NestconfError::KeyNotFound) when the key is absent.
//! - [`Config::set`] creates any missing intermediate nodes.
//! - [`Config::contains`] never fails.
//!
//! Keys with an empty segment (`"a..b"`, `".a"`) and keys that walk through a
//! leaf (`"port.x"` when `port` is an integer) fail with
//! [`InvalidPath`](NestconfError::InvalidPath), which is kept distinct from
//! `KeyNotFound`.
//!
//! # Layer precedence
//!
//! ```text
//! Sources              .file() / .source() / .plain(), in the order given
//!        ↑ overlaid by
//! Keyword pairs        .set("key", value)
//!        ↑ overridden by
//! Override tokens      .args(["--key=value"]), existing keys only
//! ```
//!
//! Overlaying is a union. Each leaf of a new source replaces the leaf at the
//! same dotted path, and keys the source does not mention are kept. Non-empty
//! nested mappings in a source are descended into rather than assigned, so
//! `{a: {b: 2}}` on top of `{a: {c: 1}}` yields `{a: {c: 1, b: 2}}`. Empty
//! mappings are kept as empty nodes.
//!
//! # Overrides
//!
//! Override tokens have the shape `--key=value[:type]` or `--key value[:type]`.
//! An override may only replace a key that already exists; naming a missing
//! key fails with [`OverrideTargetMissing`](NestconfError::OverrideTargetMissing).
//! The raw string is coerced to the type of the current value, or to the
//! explicit type tag (`int`, `float`, `bool`, `string`). Booleans accept
//! exactly `true`/`True`/`1` and `false`/`False`/`0`.
//!
//! A batch of overrides is fail-fast: the first failure stops the batch and
//! overrides already applied stay applied.
//!
//! # Enumeration
//!
//! [`Config::all_keys`], [`Config::all_values`] and [`Config::all_items`]
//! walk the whole tree lazily in either [`Order::DepthFirst`] (pre-order) or
//! [`Order::BreadthFirst`] (level order). Both keep insertion order among
//! siblings. Arrays are leaves.
//!
//! # Snapshots
//!
//! [`Config::to_plain`] exports a plain nested JSON map and
//! [`Config::from_plain`] restores one. `Config` also implements serde's
//! `Serialize` and `Deserialize`.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`OverrideArgs`] collects the
//! override tokens that follow `--` on a clap command line.

pub mod error;
pub mod traverse;
pub mod value;

mod args;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod config;
mod file;
pub(crate) mod merge;
mod overrides;
pub mod path;
mod persist;

#[cfg(test)]
mod fixtures;

pub use args::parse_args;
pub use builder::{ConfigBuilder, Source};
#[cfg(feature = "clap")]
pub use cli::OverrideArgs;
pub use config::Config;
pub use error::{NestconfError, Result};
pub use file::{Format, load_document, parse_document, write_document};
pub use overrides::{Override, apply_override, apply_overrides, coerce};
pub use traverse::Order;
pub use value::{Value, ValueType};
