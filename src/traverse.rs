//! Lazy enumeration of every `(dotted_key, value)` pair in a tree.
//!
//! Both orders walk keys in insertion order and yield a node *before* its
//! children. Only [`Value::Node`] values are descended into; arrays are
//! leaves even when they contain nodes.

use std::collections::VecDeque;
use std::str::FromStr;

use indexmap::map::Iter;
use thiserror::Error;

use crate::config::Config;
use crate::value::Value;

/// Traversal order for [`Config::all_items`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Pre-order: a key, then all of its descendants, then its next sibling.
    #[default]
    DepthFirst,
    /// Level by level: every depth-1 key before any depth-2 key, and so on.
    BreadthFirst,
}

#[derive(Debug, Error)]
#[error("Unknown traversal order '{0}' (expected 'dfs' or 'bfs')")]
pub struct UnknownOrder(pub String);

impl FromStr for Order {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfs" | "depth-first" => Ok(Order::DepthFirst),
            "bfs" | "breadth-first" => Ok(Order::BreadthFirst),
            other => Err(UnknownOrder(other.to_string())),
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

pub fn items(root: &Config, order: Order) -> Items<'_> {
    match order {
        Order::DepthFirst => Items::Depth(depth_first(root)),
        Order::BreadthFirst => Items::Breadth(breadth_first(root)),
    }
}

pub fn depth_first(root: &Config) -> DepthFirst<'_> {
    DepthFirst {
        stack: vec![(root.entries.iter(), String::new())],
    }
}

pub fn breadth_first(root: &Config) -> BreadthFirst<'_> {
    BreadthFirst {
        queue: VecDeque::from([(root, String::new())]),
        current: None,
    }
}

/// Iterator returned by [`items`].
pub enum Items<'a> {
    Depth(DepthFirst<'a>),
    Breadth(BreadthFirst<'a>),
}

impl<'a> Iterator for Items<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Items::Depth(it) => it.next(),
            Items::Breadth(it) => it.next(),
        }
    }
}

pub struct DepthFirst<'a> {
    stack: Vec<(Iter<'a, String, Value>, String)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.stack.last_mut() {
                Some((iter, prefix)) => iter.next().map(|(key, value)| (join(prefix, key), value)),
                None => return None,
            };

            match step {
                Some((full_key, value)) => {
                    if let Value::Node(child) = value {
                        self.stack.push((child.entries.iter(), full_key.clone()));
                    }
                    return Some((full_key, value));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub struct BreadthFirst<'a> {
    queue: VecDeque<(&'a Config, String)>,
    current: Option<(Iter<'a, String, Value>, String)>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((iter, prefix)) = &mut self.current {
                if let Some((key, value)) = iter.next() {
                    let full_key = join(prefix, key);
                    if let Value::Node(child) = value {
                        self.queue.push_back((child, full_key.clone()));
                    }
                    return Some((full_key, value));
                }
                self.current = None;
            }

            let (node, prefix) = self.queue.pop_front()?;
            self.current = Some((node.entries.iter(), prefix));
        }
    }
}
