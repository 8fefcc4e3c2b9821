use tracing::trace;

use crate::config::Config;
use crate::error::Result;
use crate::path::{self, Intermediate};
use crate::traverse;
use crate::value::Value;

/// Overlay `source` onto `target`, one leaf at a time.
///
/// `source` is walked depth-first. Non-empty nodes are descended into rather
/// than assigned, so every leaf lands at its full dotted path and siblings
/// already in `target` survive. Empty nodes are assigned as leaves. Keys in
/// `source` that contain dots are expanded like any other dotted key.
///
/// A scalar in `target` that sits where `source` needs a node is replaced.
/// Every key in `source` is validated before anything is assigned, so a
/// failed merge leaves `target` untouched.
pub fn merge_structural(target: &mut Config, source: &Config) -> Result<()> {
    for (full_key, _) in traverse::depth_first(source) {
        path::validate_key(&full_key)?;
    }

    for (full_key, value) in traverse::depth_first(source) {
        if let Value::Node(node) = value
            && !node.is_empty()
        {
            continue;
        }
        assign(target, &full_key, value.clone())?;
    }
    Ok(())
}

/// Overlay keyword-style `(dotted_key, value)` pairs onto `target`.
///
/// Pairs are applied one at a time in the order given, so a later pair
/// always wins over an earlier one it overlaps.
pub fn merge_flat(
    target: &mut Config,
    pairs: impl IntoIterator<Item = (String, Value)>,
) -> Result<()> {
    for pair in pairs {
        merge_structural(target, &Config::from_raw([pair]))?;
    }
    Ok(())
}

/// Rebuild a verbatim node so that dotted keys become nested paths.
pub fn structured(raw: &Config) -> Result<Config> {
    let mut config = Config::new();
    merge_structural(&mut config, raw)?;
    Ok(config)
}

fn assign(target: &mut Config, full_key: &str, value: Value) -> Result<()> {
    let (parent, leaf) = path::resolve_mut(target, full_key, Intermediate::Replace)?;
    trace!(key = full_key, value = %value, "assign");
    parent.entries.insert(leaf.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NestconfError;
    use crate::fixtures::test::{abcd, json};
    use crate::traverse::Order;

    fn merged(target: Config, source: &Config) -> Config {
        let mut target = target;
        merge_structural(&mut target, source).unwrap();
        target
    }

    #[test]
    fn disjoint_keys_merge() {
        let config = merged(json(r#"{"host": "localhost"}"#), &json(r#"{"port": 3000}"#));
        assert_eq!(config.get("host").unwrap().as_str(), Some("localhost"));
        assert_eq!(config.get("port").unwrap().as_i64(), Some(3000));
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let config = merged(json(r#"{"port": 8080}"#), &json(r#"{"port": 3000}"#));
        assert_eq!(config.get("port").unwrap().as_i64(), Some(3000));
    }

    #[test]
    fn overlay_is_union_not_replace() {
        let config = merged(json(r#"{"a": {"c": 1}}"#), &json(r#"{"a": {"b": 2}}"#));
        assert_eq!(config.get("a.c").unwrap().as_i64(), Some(1));
        assert_eq!(config.get("a.b").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn deeply_nested_three_levels() {
        let config = merged(
            json(r#"{"a": {"b": {"c": {"val": 1, "other": "keep"}}}}"#),
            &json(r#"{"a": {"b": {"c": {"val": 99}}}}"#),
        );
        assert_eq!(config.get("a.b.c.val").unwrap().as_i64(), Some(99));
        assert_eq!(config.get("a.b.c.other").unwrap().as_str(), Some("keep"));
    }

    #[test]
    fn empty_node_is_kept_as_leaf() {
        let config = merged(Config::new(), &json(r#"{"a": {}}"#));
        let a = config.get("a").unwrap().as_node().unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn empty_node_replaces_existing_subtree() {
        let config = merged(abcd(), &json(r#"{"a": {}}"#));
        assert!(config.get("a").unwrap().as_node().unwrap().is_empty());
        assert_eq!(config.get("d").unwrap().as_i64(), Some(3));
    }

    #[test]
    fn overlay_scalar_replaces_node() {
        let config = merged(abcd(), &json(r#"{"a": "flat"}"#));
        assert_eq!(config.get("a").unwrap().as_str(), Some("flat"));
    }

    #[test]
    fn overlay_node_replaces_scalar() {
        let config = merged(abcd(), &json(r#"{"d": {"e": 5}}"#));
        assert_eq!(config.get("d.e").unwrap().as_i64(), Some(5));
    }

    #[test]
    fn dotted_source_keys_expand() {
        let config = merged(abcd(), &json(r#"{"a.x": 7, "server.http": {"port": 80}}"#));
        assert_eq!(config.get("a.x").unwrap().as_i64(), Some(7));
        assert_eq!(config.get("a.b").unwrap().as_i64(), Some(1));
        assert_eq!(config.get("server.http.port").unwrap().as_i64(), Some(80));
    }

    #[test]
    fn source_order_is_kept_for_new_keys() {
        let config = merged(
            Config::new(),
            &json(r#"{"z": 1, "m": {"y": 2, "b": 3}, "a": 4}"#),
        );
        let keys: Vec<String> = config.all_keys(Order::DepthFirst).collect();
        assert_eq!(keys, vec!["z", "m", "m.y", "m.b", "a"]);
    }

    #[test]
    fn existing_key_keeps_its_position() {
        let config = merged(abcd(), &json(r#"{"d": 30, "a": {"b": 10}}"#));
        let keys: Vec<String> = config.all_keys(Order::DepthFirst).collect();
        assert_eq!(keys, vec!["a", "a.b", "a.c", "d"]);
    }

    #[test]
    fn arrays_are_assigned_whole() {
        let config = merged(
            json(r#"{"hosts": ["a", "b", "c"]}"#),
            &json(r#"{"hosts": ["z"]}"#),
        );
        assert_eq!(config.get("hosts").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_segment_in_source_is_invalid_path() {
        let mut target = Config::new();
        let err = merge_structural(&mut target, &json(r#"{"a": {"": 1}}"#)).unwrap_err();
        assert!(matches!(err, NestconfError::InvalidPath { .. }));
    }

    #[test]
    fn flat_merge_last_pair_wins() {
        let mut config = abcd();
        merge_flat(
            &mut config,
            vec![
                ("a.b".to_string(), Value::from(5)),
                ("port".to_string(), Value::from(1)),
                ("a.b".to_string(), Value::from(6)),
            ],
        )
        .unwrap();
        assert_eq!(config.get("a.b").unwrap().as_i64(), Some(6));
        assert_eq!(config.get("a.c").unwrap().as_i64(), Some(2));
        assert_eq!(config.get("port").unwrap().as_i64(), Some(1));
    }

    #[test]
    fn flat_merge_applies_pairs_in_given_order() {
        let mut config = Config::new();
        merge_flat(
            &mut config,
            vec![
                ("x".to_string(), Value::from(1)),
                ("x.y".to_string(), Value::from(2)),
                ("x".to_string(), Value::from(3)),
            ],
        )
        .unwrap();
        assert_eq!(config.get("x").unwrap(), &Value::Integer(3));
    }

    #[test]
    fn invalid_key_leaves_target_untouched() {
        let mut target = abcd();
        let before = target.clone();
        let err = merge_structural(&mut target, &json(r#"{"a": {"x": 1, "": 2}}"#)).unwrap_err();
        assert!(matches!(err, NestconfError::InvalidPath { .. }));
        assert_eq!(target, before);
    }

    #[test]
    fn flat_merge_descends_into_node_values() {
        let mut config = abcd();
        let mut patch = Config::new();
        patch.insert("c", 20);
        merge_flat(&mut config, vec![("a".to_string(), Value::Node(patch))]).unwrap();
        assert_eq!(config.get("a.b").unwrap().as_i64(), Some(1));
        assert_eq!(config.get("a.c").unwrap().as_i64(), Some(20));
    }

    #[test]
    fn multiple_sequential_merges() {
        let mut config = Config::new();
        for source in [
            json(r#"{"host": "a"}"#),
            json(r#"{"port": 1000}"#),
            json(r#"{"host": "c"}"#),
        ] {
            merge_structural(&mut config, &source).unwrap();
        }
        assert_eq!(config.get("host").unwrap().as_str(), Some("c"));
        assert_eq!(config.get("port").unwrap().as_i64(), Some(1000));
    }
}
