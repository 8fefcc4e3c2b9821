//! Reading and writing configuration documents.
//!
//! The document format is picked from the file extension:
//!
//! - `.toml`: TOML, via the `toml` crate.
//! - `.json`, `.json5` and anything else: JSON. Documents are decoded with the
//!   `json5` crate, so comments and trailing commas are accepted. Output is
//!   always plain JSON written by `serde_json`.
//!
//! Decoding yields a verbatim node: document keys are kept as written, in
//! document order, and only become dotted paths once the node is merged into
//! a tree. The document root must be a mapping.

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{NestconfError, Result};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }
}

/// Read and decode the document at `path`.
pub fn load_document(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| NestconfError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = Format::from_path(path);
    debug!(path = %path.display(), ?format, "loading config document");
    parse_document(&content, format, path)
}

/// Decode `content` as `format`. `origin` is only used in error messages.
pub fn parse_document(content: &str, format: Format, origin: &Path) -> Result<Config> {
    let parse_error = |reason: String| NestconfError::ParseError {
        path: origin.to_path_buf(),
        reason,
    };

    let value = match format {
        Format::Json => {
            let json: serde_json::Value =
                json5::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Value::from(json)
        }
        Format::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Value::from(toml::Value::Table(table))
        }
    };

    match value {
        Value::Node(node) => Ok(node),
        other => Err(parse_error(format!(
            "document root is a {}, expected a mapping",
            other.type_name()
        ))),
    }
}

/// Encode `config` in the format implied by `path` and write it, creating
/// parent directories as needed.
///
/// TOML has no null: null leaves are left out of TOML output.
pub fn write_document(path: &Path, config: &Config) -> Result<()> {
    let serialize_error = |reason: String| NestconfError::SerializeError {
        path: path.to_path_buf(),
        reason,
    };

    let content = match Format::from_path(path) {
        Format::Json => {
            serde_json::to_string_pretty(config).map_err(|e| serialize_error(e.to_string()))?
        }
        Format::Toml => {
            toml::to_string_pretty(config).map_err(|e| serialize_error(e.to_string()))?
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| NestconfError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| NestconfError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), "wrote config document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("app.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("app.TOML")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("app.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("app.conf")), Format::Json);
        assert_eq!(Format::from_path(Path::new("app")), Format::Json);
    }

    #[test]
    fn parse_json_keeps_document_order() {
        let node = parse_document(
            r#"{"zeta": 1, "alpha": {"y": true, "b": null}}"#,
            Format::Json,
            Path::new("inline.json"),
        )
        .unwrap();
        let keys: Vec<&str> = node.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        let alpha = node.entry("alpha").unwrap().as_node().unwrap();
        assert!(alpha.entry("b").unwrap().is_null());
    }

    #[test]
    fn parse_json_with_comments_and_trailing_commas() {
        let node = parse_document(
            "{\n  // listen port\n  \"port\": 1,\n  \"hosts\": [\"a\", \"b\",],\n}",
            Format::Json,
            Path::new("app.json"),
        )
        .unwrap();
        assert_eq!(node.entry("port").unwrap().as_i64(), Some(1));
        assert_eq!(node.entry("hosts").unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn parse_toml() {
        let node = parse_document(
            "name = \"demo\"\n[server]\nport = 8080\n",
            Format::Toml,
            Path::new("inline.toml"),
        )
        .unwrap();
        let server = node.entry("server").unwrap().as_node().unwrap();
        assert_eq!(server.entry("port").unwrap().as_i64(), Some(8080));
    }

    #[test]
    fn parse_keeps_dotted_keys_verbatim() {
        let node =
            parse_document(r#"{"a.b": 1}"#, Format::Json, Path::new("inline.json")).unwrap();
        assert!(node.entry("a.b").is_some());
    }

    #[test]
    fn non_mapping_root_is_parse_error() {
        let err = parse_document("[1, 2]", Format::Json, Path::new("list.json")).unwrap_err();
        match err {
            NestconfError::ParseError { path, reason } => {
                assert_eq!(path, Path::new("list.json"));
                assert!(reason.contains("array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = parse_document("{not json", Format::Json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, NestconfError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, NestconfError::IoError { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.toml");
        fs::write(&path, "[database]\nurl = \"pg://\"\n").unwrap();
        let node = load_document(&path).unwrap();
        let db = node.entry("database").unwrap().as_node().unwrap();
        assert_eq!(db.entry("url").unwrap().as_str(), Some("pg://"));
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("dir").join("out.json");
        let mut config = Config::new();
        config.set("server.port", 8080).unwrap();
        write_document(&path, &config).unwrap();

        let back = load_document(&path).unwrap();
        let server = back.entry("server").unwrap().as_node().unwrap();
        assert_eq!(server.entry("port").unwrap().as_i64(), Some(8080));
    }

    #[test]
    fn write_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.toml");
        let mut config = Config::new();
        config.set("name", "demo").unwrap();
        config.set("server.port", 8080).unwrap();
        write_document(&path, &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("name = \"demo\""));
        assert!(content.contains("port = 8080"));
    }
}
