//! Structured JSON Keys.
//!
//! A [`Path`] is an ordered list of [`Segment`]s: object member names,
//! array indexes and array slices. Paths parsed from user text hold names
//! only; whether a name such as `0` or `1:3` addresses an array element is
//! decided per step, against the container it is applied to.

pub mod slice;

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

pub use slice::SliceSpec;

/// Stands in for every element of an array in a canonical path.
pub const WILDCARD: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Name(SmolStr),
    Index(i64),
    Slice(SliceSpec),
}

impl Segment {
    pub fn name(name: impl AsRef<str>) -> Self {
        Segment::Name(SmolStr::new(name))
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Segment::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_name() == Some(WILDCARD)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index(index) => {
                let mut buffer = itoa::Buffer::new();
                f.write_str(buffer.format(*index))
            }
            Segment::Slice(spec) => spec.fmt(f),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::name(name)
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Name(SmolStr::from(name))
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}

impl From<SliceSpec> for Segment {
    fn from(spec: SliceSpec) -> Self {
        Segment::Slice(spec)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(SmallVec<[Segment; 4]>);

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(Segment::is_wildcard)
    }

    /// Output name for a value selected by this path: the last segment, or
    /// every segment joined by dots when `fullpath` is set.
    pub fn into_key(&self, fullpath: bool) -> String {
        if !fullpath {
            return self.last().map(ToString::to_string).unwrap_or_default();
        }
        let mut out = String::new();
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                out.push('.');
            }
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path(SmallVec::from_vec(segments))
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the key-expression form: dot-joined with literal dots escaped,
/// so the text parses back into the same path.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Name(name) => f.write_str(&escape_name(name))?,
                other => other.fmt(f)?,
            }
        }
        Ok(())
    }
}

/// Escapes literal dots in a member name (`a.b` becomes `a\.b`).
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if memchr::memchr(b'.', name.as_bytes()).is_none() {
        return Cow::Borrowed(name);
    }
    Cow::Owned(name.replace('.', "\\."))
}
