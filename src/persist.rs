//! Snapshot and restore.
//!
//! [`Config::to_plain`] exports the tree as a plain nested JSON map, with
//! every nested node unwrapped into an ordinary object. [`Config::from_plain`]
//! goes the other way through the same structural merge used for file
//! sources. The serde impls follow the same two rules, so a `Config` can be
//! written and read with any serde format.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::Config;
use crate::error::Result;
use crate::merge;
use crate::value::Value;

impl Config {
    pub fn to_plain(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
            .collect()
    }

    /// Rebuild a tree from a plain map. Dotted keys in `map` are expanded.
    pub fn from_plain(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let raw = Config::from_raw(map.into_iter().map(|(k, v)| (k, Value::from(v))));
        merge::structured(&raw)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConfigVisitor)
    }
}

struct ConfigVisitor;

impl<'de> Visitor<'de> for ConfigVisitor {
    type Value = Config;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Config, A::Error> {
        let mut raw = Config::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            raw.entries.insert(key, value);
        }
        merge::structured(&raw).map_err(de::Error::custom)
    }
}
