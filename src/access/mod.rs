//! Path-based get, set and delete over JSON documents.
//!
//! Every step classifies its segment against the current container and
//! dispatches on the result; nothing is attempted and then retried.
//! Mutations happen in place on the caller's document.
//!
//! The single-path functions return context-free errors. The batch and
//! root operations attach an [`ErrorContext`] naming the operation, the
//! record number and the paths involved.

mod step;

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::kind::ValueKind;
use crate::path::{Path, Segment, SliceSpec};
use crate::{CutOptions, Error, ErrorContext, ErrorKind, Operation, Result};

use step::{classify, resolve_index, slice_indices, Step};

fn step_into<'a>(value: &'a Value, segment: &Segment) -> Result<Cow<'a, Value>> {
    match (classify(segment, value)?, value) {
        (Step::Member(name), Value::Object(map)) => map
            .get(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| Error::key_not_found(name)),
        (Step::Index(index), Value::Array(items)) => {
            let idx = resolve_index(index, items.len())?;
            Ok(Cow::Borrowed(&items[idx]))
        }
        (Step::Slice(spec), Value::Array(items)) => {
            let selected = slice_indices(&spec, items.len())?
                .into_iter()
                .map(|idx| items[idx].clone())
                .collect();
            Ok(Cow::Owned(Value::Array(selected)))
        }
        (_, other) => Err(Error::key_type(segment, ValueKind::of(other))),
    }
}

/// The value `path` points to.
///
/// An empty path selects the document itself. A slice selects a new array
/// holding the chosen elements, which later segments then index into.
pub fn select_key<'a>(document: &'a Value, path: &Path) -> Result<Cow<'a, Value>> {
    let mut current = Cow::Borrowed(document);
    for segment in path {
        current = match current {
            Cow::Borrowed(value) => step_into(value, segment)?,
            Cow::Owned(value) => Cow::Owned(step_into(&value, segment)?.into_owned()),
        };
    }
    Ok(current)
}

/// Like [`select_key`], but a missing member yields `default`.
///
/// Out-of-range indexes and key type errors still surface.
pub fn select_or(document: &Value, path: &Path, default: &Value) -> Result<Value> {
    match select_key(document, path) {
        Ok(value) => Ok(value.into_owned()),
        Err(err) if err.kind() == ErrorKind::KeyNotFound => Ok(default.clone()),
        Err(err) => Err(err),
    }
}

/// Re-roots the document at `path`, typically an array of records that
/// the batch operations then walk one by one.
pub fn get_rootkey(document: &Value, path: &Path) -> Result<Value> {
    select_key(document, path)
        .map(Cow::into_owned)
        .map_err(|err| {
            err.or_context(ErrorContext::new(
                Operation::RootKey,
                0,
                path,
                std::slice::from_ref(path),
                document,
            ))
        })
}

/// Output name for a value selected by `path`.
pub fn into_key(path: &Path, fullpath: bool) -> String {
    path.into_key(fullpath)
}

/// Selects several paths from one record into a new object, keyed by
/// [`into_key`] and in path order.
///
/// With `options.any` a missing member is skipped; otherwise the first one
/// aborts the batch. Out-of-range indexes and key type errors always
/// abort. `item_number` is the 1-based record number reported on failure.
pub fn get_items(
    document: &Value,
    key_lists: &[Path],
    options: &CutOptions,
    item_number: usize,
) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    for path in key_lists {
        match select_key(document, path) {
            Ok(value) => {
                result.insert(path.into_key(options.fullpath), value.into_owned());
            }
            Err(err) if options.any && err.kind() == ErrorKind::KeyNotFound => {}
            Err(err) => {
                return Err(err.or_context(ErrorContext::new(
                    Operation::Get,
                    item_number,
                    path,
                    key_lists,
                    document,
                )))
            }
        }
    }
    Ok(result)
}

/// Selects several paths, substituting each path's own default when its
/// member is missing.
pub fn get_defaults(
    document: &Value,
    defaults: &[(Path, Value)],
    fullpath: bool,
    item_number: usize,
) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    for (path, default) in defaults {
        let value = select_or(document, path, default).map_err(|err| {
            let key_lists: Vec<Path> = defaults.iter().map(|(path, _)| path.clone()).collect();
            err.or_context(ErrorContext::new(
                Operation::GetDefaults,
                item_number,
                path,
                &key_lists,
                document,
            ))
        })?;
        result.insert(path.into_key(fullpath), value);
    }
    Ok(result)
}

/// Finds the container the last step of `segments` applies to, and that
/// step. A slice followed by an index is folded into a single index on the
/// underlying array, so mutations through `list.1:3.0` reach the element.
fn locate<'v, 's>(root: &'v mut Value, segments: &'s [Segment]) -> Result<(&'v mut Value, Step<'s>)> {
    let mut current = root;
    let mut pos = 0;
    loop {
        let segment = &segments[pos];
        let mut step = classify(segment, current)?;
        let mut consumed = 1;
        if let (Step::Slice(spec), Some(next)) = (step, segments.get(pos + 1)) {
            step = Step::Index(narrow(&spec, next, current)?);
            consumed = 2;
        }
        if pos + consumed == segments.len() {
            return Ok((current, step));
        }
        current = descend(current, step, segment)?;
        pos += consumed;
    }
}

fn narrow(spec: &SliceSpec, next: &Segment, array: &Value) -> Result<i64> {
    let len = match array {
        Value::Array(items) => items.len(),
        other => return Err(Error::key_type(next, ValueKind::of(other))),
    };
    let selected = slice_indices(spec, len)?;
    match classify(next, array)? {
        Step::Index(index) => {
            let idx = resolve_index(index, selected.len())?;
            Ok(selected[idx] as i64)
        }
        _ => Err(Error::key_type(next, ValueKind::Array)),
    }
}

fn descend<'v>(value: &'v mut Value, step: Step<'_>, segment: &Segment) -> Result<&'v mut Value> {
    match (step, value) {
        (Step::Member(name), Value::Object(map)) => {
            map.get_mut(name).ok_or_else(|| Error::key_not_found(name))
        }
        (Step::Index(index), Value::Array(items)) => {
            let idx = resolve_index(index, items.len())?;
            Ok(&mut items[idx])
        }
        (Step::Slice(_), _) => Err(Error::key_type(segment, ValueKind::Array)),
        (_, other) => Err(Error::key_type(segment, ValueKind::of(other))),
    }
}

fn root_error(document: &Value) -> Error {
    Error::key_type(&Segment::name(""), ValueKind::of(document))
}

/// Assigns `value` at `path`, in place.
///
/// The last segment inserts or overwrites an object member, replaces an
/// array element, or replaces the elements a slice selects with the
/// elements of an array `value`. Unless `strict`, a missing parent leaves
/// the document untouched.
pub fn set_value(document: &mut Value, path: &Path, value: Value, strict: bool) -> Result<()> {
    match assign(document, path, value) {
        Err(err) if !strict && err.is_absence() => Ok(()),
        other => other,
    }
}

fn assign(document: &mut Value, path: &Path, value: Value) -> Result<()> {
    if path.is_empty() {
        return Err(root_error(document));
    }
    let segments = path.segments();
    let (parent, step) = locate(document, segments)?;
    let last = &segments[segments.len() - 1];
    match (step, parent) {
        (Step::Member(name), Value::Object(map)) => {
            map.insert(name.to_string(), value);
            Ok(())
        }
        (Step::Index(index), Value::Array(items)) => {
            let idx = resolve_index(index, items.len())?;
            items[idx] = value;
            Ok(())
        }
        (Step::Slice(spec), Value::Array(items)) => splice(items, &spec, value, last),
        (_, other) => Err(Error::key_type(last, ValueKind::of(other))),
    }
}

fn splice(items: &mut Vec<Value>, spec: &SliceSpec, value: Value, segment: &Segment) -> Result<()> {
    let Value::Array(replacement) = value else {
        return Err(Error::key_type(segment, ValueKind::of(&value)));
    };
    if let Some(range) = spec.range(items.len()) {
        items.splice(range, replacement);
        return Ok(());
    }
    let selected = slice_indices(spec, items.len())?;
    if selected.len() != replacement.len() {
        return Err(Error::key_type(segment, ValueKind::Array));
    }
    for (idx, element) in selected.into_iter().zip(replacement) {
        items[idx] = element;
    }
    Ok(())
}

/// Deletes the member, element or slice `path` points to, in place.
///
/// Unless `strict`, deleting something that is not there is a no-op.
/// Key type errors always surface.
pub fn drop_key(document: &mut Value, path: &Path, strict: bool) -> Result<()> {
    match remove(document, path) {
        Err(err) if !strict && err.is_absence() => Ok(()),
        other => other,
    }
}

fn remove(document: &mut Value, path: &Path) -> Result<()> {
    if path.is_empty() {
        return Err(root_error(document));
    }
    let segments = path.segments();
    let (parent, step) = locate(document, segments)?;
    let last = &segments[segments.len() - 1];
    match (step, parent) {
        (Step::Member(name), Value::Object(map)) => map
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::key_not_found(name)),
        (Step::Index(index), Value::Array(items)) => {
            let idx = resolve_index(index, items.len())?;
            items.remove(idx);
            Ok(())
        }
        (Step::Slice(spec), Value::Array(items)) => {
            let mut doomed = vec![false; items.len()];
            for idx in slice_indices(&spec, items.len())? {
                doomed[idx] = true;
            }
            let mut flags = doomed.into_iter();
            items.retain(|_| !flags.next().unwrap_or(false));
            Ok(())
        }
        (_, other) => Err(Error::key_type(last, ValueKind::of(other))),
    }
}

/// Applies every assignment to one record, in order.
///
/// Strict unless `options.any` is set.
pub fn set_items(
    document: &mut Value,
    assignments: &[(Path, Value)],
    options: &CutOptions,
    item_number: usize,
) -> Result<()> {
    for (path, value) in assignments {
        if let Err(err) = set_value(document, path, value.clone(), !options.any) {
            let key_lists: Vec<Path> = assignments.iter().map(|(path, _)| path.clone()).collect();
            return Err(err.or_context(ErrorContext::new(
                Operation::Set,
                item_number,
                path,
                &key_lists,
                document,
            )));
        }
    }
    Ok(())
}

/// Deletes several paths from one record, in order.
///
/// Strict unless `options.any` is set: the first missing key aborts the
/// batch.
pub fn del_items(
    document: &mut Value,
    key_lists: &[Path],
    options: &CutOptions,
    item_number: usize,
) -> Result<()> {
    for path in key_lists {
        if let Err(err) = drop_key(document, path, !options.any) {
            return Err(err.or_context(ErrorContext::new(
                Operation::Del,
                item_number,
                path,
                key_lists,
                document,
            )));
        }
    }
    Ok(())
}
