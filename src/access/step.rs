use serde_json::Value;

use crate::kind::ValueKind;
use crate::path::{Segment, SliceSpec};
use crate::{Error, Result};

/// A segment classified against the container it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'s> {
    Member(&'s str),
    Index(i64),
    Slice(SliceSpec),
}

/// Decides how `segment` addresses `container`.
///
/// Objects take every name literally, digits included. Against an array a
/// name must read as an index (`0`, `-1`) or a slice (`1:3`, `::2`).
/// Everything else is a key type error.
pub(crate) fn classify<'s>(segment: &'s Segment, container: &Value) -> Result<Step<'s>> {
    let step = match (container, segment) {
        (Value::Object(_), Segment::Name(name)) => Some(Step::Member(name.as_str())),
        (Value::Array(_), Segment::Name(name)) => classify_name(name),
        (Value::Array(_), Segment::Index(index)) => Some(Step::Index(*index)),
        (Value::Array(_), Segment::Slice(spec)) => Some(Step::Slice(*spec)),
        _ => None,
    };
    step.ok_or_else(|| Error::key_type(segment, ValueKind::of(container)))
}

fn classify_name(name: &str) -> Option<Step<'static>> {
    if name.is_empty()
        || !name
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'-' || b == b':')
    {
        return None;
    }
    if name.contains(':') {
        return SliceSpec::parse(name).map(Step::Slice);
    }
    name.parse::<i64>().ok().map(Step::Index)
}

/// Maps a possibly negative index onto `0..len`.
pub(crate) fn resolve_index(index: i64, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        index + len as i64
    } else {
        index
    };
    if (0..len as i64).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(Error::index_out_of_range(index, len))
    }
}

/// Element positions a slice selects; a zero step cannot address anything.
pub(crate) fn slice_indices(spec: &SliceSpec, len: usize) -> Result<Vec<usize>> {
    spec.indices(len)
        .ok_or_else(|| Error::key_type(&Segment::Slice(*spec), ValueKind::Array))
}
