//! Type and shape summaries.
//!
//! Every occurrence of every canonical path is visited, so the summary of
//! `list.#.name` covers all elements of `list`. Per path the observed
//! kinds are kept in first-seen order with min/max statistics: member
//! count for objects, element count for arrays, length for strings and
//! value for numbers.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Number, Value};

use crate::crawl::{RootArray, TreeCrawler};
use crate::num::{compare_numbers, format_number};

#[derive(Debug, Clone, PartialEq)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

impl<T: Clone> MinMax<T> {
    fn new(value: T) -> Self {
        Self {
            min: value.clone(),
            max: value,
        }
    }

    fn widen_by(&mut self, value: T, cmp: impl Fn(&T, &T) -> Ordering) {
        if cmp(&value, &self.min) == Ordering::Less {
            self.min = value.clone();
        }
        if cmp(&value, &self.max) == Ordering::Greater {
            self.max = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSummary {
    Null,
    True,
    False,
    Object(MinMax<usize>),
    Array(MinMax<usize>),
    Text(MinMax<usize>),
    Number(MinMax<Number>),
}

impl TypeSummary {
    fn observe(value: &Value) -> Self {
        match value {
            Value::Null => TypeSummary::Null,
            Value::Bool(true) => TypeSummary::True,
            Value::Bool(false) => TypeSummary::False,
            Value::Object(map) => TypeSummary::Object(MinMax::new(map.len())),
            Value::Array(items) => TypeSummary::Array(MinMax::new(items.len())),
            Value::String(text) => TypeSummary::Text(MinMax::new(text.chars().count())),
            Value::Number(number) => TypeSummary::Number(MinMax::new(number.clone())),
        }
    }

    /// Folds `other` in when both describe the same kind.
    fn merge(&mut self, other: &TypeSummary) -> bool {
        match (self, other) {
            (TypeSummary::Null, TypeSummary::Null)
            | (TypeSummary::True, TypeSummary::True)
            | (TypeSummary::False, TypeSummary::False) => true,
            (TypeSummary::Object(mm), TypeSummary::Object(seen))
            | (TypeSummary::Array(mm), TypeSummary::Array(seen))
            | (TypeSummary::Text(mm), TypeSummary::Text(seen)) => {
                mm.widen_by(seen.min, Ord::cmp);
                true
            }
            (TypeSummary::Number(mm), TypeSummary::Number(seen)) => {
                mm.widen_by(seen.min.clone(), compare_numbers);
                true
            }
            _ => false,
        }
    }
}

fn render<T>(f: &mut fmt::Formatter<'_>, kind: &str, stat: &str, mm: &MinMax<T>, same: bool, show: impl Fn(&T) -> String) -> fmt::Result {
    if same {
        write!(f, "{kind}({stat}={})", show(&mm.min))
    } else {
        write!(
            f,
            "{kind}(min{stat}={}, max{stat}={})",
            show(&mm.min),
            show(&mm.max)
        )
    }
}

impl fmt::Display for TypeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |n: &usize| n.to_string();
        match self {
            TypeSummary::Null => f.write_str("null"),
            TypeSummary::True => f.write_str("true"),
            TypeSummary::False => f.write_str("false"),
            TypeSummary::Object(mm) => render(f, "object", "keys", mm, mm.min == mm.max, count),
            TypeSummary::Array(mm) => render(f, "array", "count", mm, mm.min == mm.max, count),
            TypeSummary::Text(mm) => render(f, "text", "len", mm, mm.min == mm.max, count),
            TypeSummary::Number(mm) => {
                let same = compare_numbers(&mm.min, &mm.max) == Ordering::Equal;
                render(f, "number", "val", mm, same, format_number)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectedKey {
    pub path: String,
    pub types: Vec<TypeSummary>,
}

impl InspectedKey {
    /// The observed kinds joined by ` | `.
    pub fn summary(&self) -> String {
        self.types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Summarises every canonical path of `document`, sorted by path. A
/// top-level array shows up as `#`; a scalar document has no paths.
pub fn inspect_json(document: &Value) -> Vec<InspectedKey> {
    let mut summaries: BTreeMap<String, Vec<TypeSummary>> = BTreeMap::new();
    TreeCrawler::new(true).walk(document, RootArray::Wildcard, |path, value| {
        let observed = TypeSummary::observe(value);
        let types = summaries.entry(path.to_string()).or_default();
        if !types.iter_mut().any(|summary| summary.merge(&observed)) {
            types.push(observed);
        }
    });
    summaries
        .into_iter()
        .map(|(path, types)| InspectedKey { path, types })
        .collect()
}

/// The two columns of an inspection or count line, handed to the styling
/// hook of [`format_inspection`] and [`format_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
}

/// `path :summary` lines with paths padded to a common width. `style`
/// decorates each padded column; pass `|_, text| text` for plain lines.
pub fn format_inspection<F>(keys: &[InspectedKey], style: F) -> Vec<String>
where
    F: Fn(Field, String) -> String,
{
    let width = keys.iter().map(|key| key.path.chars().count()).max().unwrap_or(0);
    keys.iter()
        .map(|key| {
            let path = style(Field::Key, format!("{:<width$}", key.path));
            format!("{path} :{}", style(Field::Value, key.summary()))
        })
        .collect()
}

/// Lengths of the arrays at the top of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayCounts {
    /// The document itself is an array of this length.
    Root(usize),
    /// Array-valued members of a top-level object, in document order.
    Members(Vec<(String, usize)>),
}

/// `None` for scalar documents.
pub fn count_arrays(document: &Value) -> Option<ArrayCounts> {
    match document {
        Value::Array(items) => Some(ArrayCounts::Root(items.len())),
        Value::Object(map) => Some(ArrayCounts::Members(
            map.iter()
                .filter_map(|(key, value)| value.as_array().map(|items| (key.clone(), items.len())))
                .collect(),
        )),
        _ => None,
    }
}

/// The bare length for a root array, `key : length` per member
/// otherwise, styled like [`format_inspection`].
pub fn format_counts<F>(counts: &ArrayCounts, style: F) -> Vec<String>
where
    F: Fn(Field, String) -> String,
{
    match counts {
        ArrayCounts::Root(len) => vec![style(Field::Value, len.to_string())],
        ArrayCounts::Members(members) => {
            let width = members.iter().map(|(key, _)| key.chars().count()).max().unwrap_or(0);
            members
                .iter()
                .map(|(key, len)| {
                    let key = style(Field::Key, format!("{key:<width$}"));
                    format!("{key} : {}", style(Field::Value, len.to_string()))
                })
                .collect()
        }
    }
}
