//! The [`Config`] tree node.
//!
//! A `Config` is an insertion-ordered map from segment names to [`Value`]s.
//! Two access surfaces sit side by side:
//!
//! - **Dotted keys** (`get`, `set`, `remove`, `contains`) walk nested nodes
//!   through [`path`](crate::path), so `"server.http.port"` reads like a flat key.
//! - **Immediate entries** (`insert`, `entry`, `keys`, `iter`) touch only this
//!   node's own children and never interpret dots.

use std::path::Path;

use indexmap::IndexMap;

use crate::args;
use crate::builder::ConfigBuilder;
use crate::error::{NestconfError, Result};
use crate::file;
use crate::merge;
use crate::overrides::{self, Override};
use crate::path::{self, Intermediate};
use crate::traverse::{self, Items, Order};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub(crate) entries: IndexMap<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a config from ordered sources. See [`ConfigBuilder`].
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load a single configuration document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::new();
        config.overlay(&file::load_document(path.as_ref())?)?;
        Ok(config)
    }

    /// Build a node from entries verbatim, without interpreting dotted keys.
    pub(crate) fn from_raw(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    // -- Dotted-key access ---------------------------------------------------

    /// Look up a value by dotted key.
    pub fn get(&self, key: &str) -> Result<&Value> {
        let (parent, leaf) = path::resolve(self, key)?;
        parent
            .entries
            .get(leaf)
            .ok_or_else(|| NestconfError::KeyNotFound(key.into()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        let (parent, leaf) = path::resolve_mut(self, key, Intermediate::Existing)?;
        parent
            .entries
            .get_mut(leaf)
            .ok_or_else(|| NestconfError::KeyNotFound(key.into()))
    }

    /// Assign a value by dotted key, creating intermediate nodes as needed.
    ///
    /// Fails with [`NestconfError::InvalidPath`] if the key has an empty
    /// segment or walks through a value that is not a node.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let (parent, leaf) = path::resolve_mut(self, key, Intermediate::Create)?;
        parent.entries.insert(leaf.to_string(), value.into());
        Ok(())
    }

    /// Remove a value by dotted key and return it.
    ///
    /// Sibling order is preserved. Intermediate nodes left empty are kept.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        let (parent, leaf) = path::resolve_mut(self, key, Intermediate::Existing)?;
        parent
            .entries
            .shift_remove(leaf)
            .ok_or_else(|| NestconfError::KeyNotFound(key.into()))
    }

    /// Whether a dotted key exists. Never fails: invalid or unreachable keys
    /// are simply absent.
    pub fn contains(&self, key: &str) -> bool {
        match path::resolve(self, key) {
            Ok((parent, leaf)) => parent.entries.contains_key(leaf),
            Err(_) => false,
        }
    }

    // -- Immediate entries ---------------------------------------------------

    /// Insert a direct child of this node. The key is taken verbatim.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// A direct child of this node, looked up verbatim.
    pub fn entry(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // -- Enumeration ---------------------------------------------------------

    /// Every dotted key in the tree, nodes included.
    pub fn all_keys(&self, order: Order) -> impl Iterator<Item = String> + '_ {
        self.all_items(order).map(|(key, _)| key)
    }

    pub fn all_values(&self, order: Order) -> impl Iterator<Item = &Value> {
        self.all_items(order).map(|(_, value)| value)
    }

    pub fn all_items(&self, order: Order) -> Items<'_> {
        traverse::items(self, order)
    }

    // -- Layering ------------------------------------------------------------

    /// Overlay `source` onto this tree. Leaves in `source` win, untouched
    /// siblings are kept.
    pub fn overlay(&mut self, source: &Config) -> Result<()> {
        merge::merge_structural(self, source)
    }

    /// A copy of this tree with `source` overlaid on top.
    pub fn overlaid(&self, source: &Config) -> Result<Config> {
        let mut config = self.clone();
        config.overlay(source)?;
        Ok(config)
    }

    // -- Overrides -----------------------------------------------------------

    /// Apply typed overrides in order. See [`overrides`](crate::overrides).
    pub fn apply_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a Override>,
    ) -> Result<()> {
        overrides::apply_overrides(self, overrides)
    }

    /// Parse `--key=value[:type]` / `--key value` tokens and apply them.
    ///
    /// Malformed tokens reject the whole list before anything is applied.
    /// After that, application is fail-fast with no rollback.
    pub fn apply_args<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = args::parse_args(args)?;
        overrides::apply_overrides(self, &parsed)
    }

    /// [`apply_args`](Self::apply_args) with the process arguments, minus the
    /// program name. An argument that is not valid UTF-8 fails with
    /// [`MalformedOverride`](NestconfError::MalformedOverride).
    pub fn apply_process_args(&mut self) -> Result<()> {
        let args = args::utf8_args(std::env::args_os().skip(1))?;
        self.apply_args(args)
    }
}
