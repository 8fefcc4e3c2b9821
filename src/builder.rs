use std::path::{Path, PathBuf};

use tracing::debug;

use crate::args;
use crate::config::Config;
use crate::error::Result;
use crate::file;
use crate::merge;
use crate::overrides;
use crate::value::Value;

/// One positional construction source.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A document on disk, decoded by extension.
    File(PathBuf),
    /// An in-memory nested mapping.
    Map(Config),
}

impl From<Config> for Source {
    fn from(config: Config) -> Self {
        Source::Map(config)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

/// Builder for a layered [`Config`].
///
/// Layers apply in this order, each overlaying everything before it:
///
/// 1. Sources, in the order they were added ([`file`](Self::file),
///    [`source`](Self::source), [`plain`](Self::plain)).
/// 2. Keyword pairs from [`set`](Self::set), one at a time in call order.
/// 3. Override tokens from [`args`](Self::args). These only replace existing
///    leaves.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    sources: Vec<Source>,
    pairs: Vec<(String, Value)>,
    args: Vec<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document on disk as the next source.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    /// Add an in-memory tree as the next source.
    pub fn source(mut self, source: impl Into<Source>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Add a plain JSON map (for example a snapshot) as the next source.
    pub fn plain(mut self, map: serde_json::Map<String, serde_json::Value>) -> Self {
        let raw = Value::from(serde_json::Value::Object(map));
        if let Value::Node(node) = raw {
            self.sources.push(Source::Map(node));
        }
        self
    }

    /// Set a keyword pair. All pairs are applied after every source.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Add command-line override tokens (`--key=value[:type]` or `--key value`).
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Merge every layer into a new tree.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::new();

        for source in &self.sources {
            match source {
                Source::File(path) => {
                    let node = file::load_document(path)?;
                    merge::merge_structural(&mut config, &node)?;
                    debug!(path = %path.display(), "merged file source");
                }
                Source::Map(node) => {
                    merge::merge_structural(&mut config, node)?;
                    debug!(keys = node.len(), "merged map source");
                }
            }
        }

        if !self.pairs.is_empty() {
            debug!(count = self.pairs.len(), "merging keyword pairs");
            merge::merge_flat(&mut config, self.pairs)?;
        }

        if !self.args.is_empty() {
            let parsed = args::parse_args(&self.args)?;
            overrides::apply_overrides(&mut config, &parsed)?;
        }

        Ok(config)
    }
}
