//! JSON tree crawler.
//!
//! Walks a document breadth-first and collects its canonical key paths:
//! member names joined by dots, with every array element collapsed onto
//! the `#` wildcard. Sibling elements of an array therefore share one
//! path, and by default a path is expanded only the first time it is
//! reached. Elements with divergent shapes can hide nested keys that way;
//! `fullscan` expands every node to find them.

use std::collections::{BTreeSet, VecDeque};

use serde_json::Value;

use crate::path::{escape_name, WILDCARD};

struct Node<'a> {
    path: String,
    value: &'a Value,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            path: String::new(),
            value,
        }
    }

    fn child(&self, segment: &str, value: &'a Value) -> Node<'a> {
        let mut path = String::with_capacity(self.path.len() + segment.len() + 1);
        if !self.path.is_empty() {
            path.push_str(&self.path);
            path.push('.');
        }
        path.push_str(segment);
        Node { path, value }
    }
}

/// How a top-level array shows up in crawled paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootArray {
    /// Elements are crawled as if each were the document root.
    Strip,
    /// Elements live under a leading `#`.
    Wildcard,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeCrawler {
    fullscan: bool,
}

impl TreeCrawler {
    pub fn new(fullscan: bool) -> Self {
        Self { fullscan }
    }

    /// Sorted canonical paths below `document`.
    pub fn crawl(&self, document: &Value) -> BTreeSet<String> {
        self.walk(document, RootArray::Strip, |_, _| {})
    }

    /// Crawls `document`, reporting every expanded node to `visit`.
    pub(crate) fn walk<'a, F>(&self, document: &'a Value, root: RootArray, visit: F) -> BTreeSet<String>
    where
        F: FnMut(&str, &'a Value),
    {
        let seeds = match (document, root) {
            (Value::Array(items), RootArray::Strip) => items.iter().map(Node::root).collect(),
            (Value::Array(items), RootArray::Wildcard) => {
                let root = Node::root(document);
                items.iter().map(|item| root.child(WILDCARD, item)).collect()
            }
            _ => VecDeque::from([Node::root(document)]),
        };
        self.run(seeds, visit)
    }

    fn run<'a, F>(&self, mut queue: VecDeque<Node<'a>>, mut visit: F) -> BTreeSet<String>
    where
        F: FnMut(&str, &'a Value),
    {
        let mut visited = BTreeSet::new();
        while let Some(node) = queue.pop_front() {
            // The root path is never recorded, so every seed is expanded.
            let fresh = node.path.is_empty() || visited.insert(node.path.clone());
            if !fresh && !self.fullscan {
                continue;
            }
            if !node.path.is_empty() {
                visit(&node.path, node.value);
            }
            self.expand(&node, &visited, &mut queue);
        }
        log::trace!(
            "crawled {} key paths (fullscan={})",
            visited.len(),
            self.fullscan
        );
        visited
    }

    fn expand<'a>(&self, node: &Node<'a>, visited: &BTreeSet<String>, queue: &mut VecDeque<Node<'a>>) {
        let children: Box<dyn Iterator<Item = Node<'a>> + '_> = match node.value {
            Value::Object(map) => Box::new(
                map.iter()
                    .map(|(name, value)| node.child(&escape_name(name), value)),
            ),
            Value::Array(items) => Box::new(items.iter().map(|item| node.child(WILDCARD, item))),
            _ => return,
        };
        for child in children {
            if self.fullscan || !visited.contains(&child.path) {
                queue.push_back(child);
            }
        }
    }
}

/// Sorted canonical paths of a JSON document.
pub fn find_keys(document: &Value, fullscan: bool) -> Vec<String> {
    TreeCrawler::new(fullscan).crawl(document).into_iter().collect()
}

/// One line of a numbered key listing. Numbers are 1-based and right
/// aligned to `width`; they are the key numbers accepted in key
/// expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedKey {
    pub number: usize,
    pub width: usize,
    pub path: String,
}

impl std::fmt::Display for ListedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>width$} {}", self.number, self.path, width = self.width)
    }
}

/// Numbered, sorted listing of the keys found in `document`.
pub fn list_keys(document: &Value, fullscan: bool) -> impl Iterator<Item = ListedKey> {
    let keys = find_keys(document, fullscan);
    let width = itoa::Buffer::new().format(keys.len()).len();
    keys.into_iter().enumerate().map(move |(idx, path)| ListedKey {
        number: idx + 1,
        width,
        path,
    })
}
