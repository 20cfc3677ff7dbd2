//! Flattening documents into `full.dotted.name -> value` maps.
//!
//! Only leaves are kept: a path whose value is an object is skipped, since
//! its members show up under their own paths. Arrays are kept whole, and
//! wildcard paths (`list.#.name`) never appear.

use serde_json::{Map, Value};

use crate::access::select_key;
use crate::crawl::find_keys;
use crate::keys::parse_key_name;
use crate::path::Path;
use crate::{ErrorContext, Operation, Result};

/// Flattens every key of `document`.
pub fn flatten_all(document: &Value) -> Result<Map<String, Value>> {
    flatten_by_keys::<&str>(document, None)
}

/// Flattens the given key names, or every key when `keys` is `None`.
/// An unknown key fails with key not found.
pub fn flatten_by_keys<S: AsRef<str>>(
    document: &Value,
    keys: Option<&[S]>,
) -> Result<Map<String, Value>> {
    let paths: Vec<Path> = match keys {
        Some(keys) => keys.iter().map(|key| parse_key_name(key.as_ref())).collect(),
        None => find_keys(document, false)
            .iter()
            .map(|key| parse_key_name(key))
            .collect(),
    };
    flatten_paths(document, &paths, 0)
}

/// Flattens structured paths. `item_number` is reported on failure.
pub fn flatten_paths(
    document: &Value,
    paths: &[Path],
    item_number: usize,
) -> Result<Map<String, Value>> {
    let mut flattened = Map::new();
    fill(document, paths, item_number, &mut flattened)?;
    Ok(flattened)
}

fn fill(
    document: &Value,
    paths: &[Path],
    item_number: usize,
    destination: &mut Map<String, Value>,
) -> Result<()> {
    for path in paths.iter().filter(|path| !path.has_wildcard()) {
        get_key_content(document, path, destination).map_err(|err| {
            err.or_context(ErrorContext::new(
                Operation::Flatten,
                item_number,
                path,
                paths,
                document,
            ))
        })?;
    }
    Ok(())
}

/// Copies the value at `key` into `destination` under its full dotted
/// name, unless that value is an object.
pub fn get_key_content(
    source: &Value,
    key: &Path,
    destination: &mut Map<String, Value>,
) -> Result<()> {
    let value = select_key(source, key)?;
    if !value.is_object() {
        destination.insert(key.into_key(true), value.into_owned());
    }
    Ok(())
}

/// One flattened row per record of the array at `rootkey`; a value that
/// is not an array is a single record. Every row starts with the
/// `prepend` keys of the whole document, named by their full path.
pub fn generate_rows(
    document: &Value,
    rootkey: &Path,
    prepend: &[Path],
) -> Result<impl Iterator<Item = Result<Map<String, Value>>>> {
    let prefix = flatten_paths(document, prepend, 0)?;
    let records = match select_key(document, rootkey)?.into_owned() {
        Value::Array(items) => items,
        other => vec![other],
    };
    log::debug!(
        "generating {} rows with {} prepended keys",
        records.len(),
        prefix.len()
    );
    Ok(records.into_iter().enumerate().map(move |(idx, record)| {
        let mut row = prefix.clone();
        let paths: Vec<Path> = find_keys(&record, false)
            .iter()
            .map(|key| parse_key_name(key))
            .collect();
        fill(&record, &paths, idx + 1, &mut row)?;
        Ok(row)
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_objects_are_not_leaves() {
        let doc = json!({"data": {"temp": 90}});
        let mut out = Map::new();
        get_key_content(&doc, &parse_key_name("data"), &mut out).expect("content");
        assert!(out.is_empty());
        get_key_content(&doc, &parse_key_name("data.temp"), &mut out).expect("content");
        assert_eq!(out["data.temp"], json!(90));
    }

    #[rstest::rstest]
    fn test_wildcard_paths_are_skipped() {
        let doc = json!({"list": [{"a": 1}]});
        let flat = flatten_all(&doc).expect("flatten");
        assert_eq!(flat.keys().collect::<Vec<_>>(), ["list"]);
    }

    #[rstest::rstest]
    fn test_flatten_errors_carry_context() {
        let err = flatten_by_keys(&json!({"a": 1}), Some(&["b"][..])).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(
            err.context().map(|context| context.operation),
            Some(Operation::Flatten)
        );
    }
}
