//! The `cut` pipeline: re-root, edit every record, then render a view.
//!
//! Edits run per record in a fixed order: get, get with defaults, set,
//! delete. Key numbers in every key expression refer to the numbered
//! listing of the document as it was before any edit.

mod items;

use serde_json::{Map, Value};

use crate::access::{del_items, get_defaults, get_items, get_rootkey, set_items};
use crate::crawl::{find_keys, list_keys, ListedKey};
use crate::flatten::{flatten_paths, generate_rows};
use crate::inspect::{count_arrays, inspect_json, ArrayCounts, InspectedKey};
use crate::keys::{parse_defaults, parse_key_name, parse_keystr, KeySource};
use crate::path::Path;
use crate::{CutOptions, CutRequest, Result, View};

pub use items::Items;

/// What a [`cut`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Document(Value),
    Keys(Vec<ListedKey>),
    Inspection(Vec<InspectedKey>),
    /// `None` when the document has no top-level arrays to count.
    Counts(Option<ArrayCounts>),
}

/// Runs one request against `document`.
pub fn cut(document: Value, request: &CutRequest, options: &CutOptions) -> Result<Output> {
    let document = match request.rootkey.as_deref() {
        Some(keystr) => reroot(document, keystr, options)?,
        None => document,
    };
    let document = if request.has_edits() {
        edit(document, request, options)?
    } else {
        document
    };
    render(document, &request.view, options)
}

fn first_path(document: &Value, keystr: &str, options: &CutOptions) -> Result<Option<Path>> {
    let mut paths = parse_keystr(
        keystr,
        KeySource::Document(document),
        options.quote_char,
        options.fullscan,
    )?;
    Ok(if paths.is_empty() {
        None
    } else {
        Some(paths.swap_remove(0))
    })
}

fn reroot(document: Value, keystr: &str, options: &CutOptions) -> Result<Value> {
    match first_path(&document, keystr, options)? {
        Some(path) => {
            log::debug!("re-rooting at {path}");
            get_rootkey(&document, &path)
        }
        None => Ok(document),
    }
}

fn edit(document: Value, request: &CutRequest, options: &CutOptions) -> Result<Value> {
    let keys = find_keys(&document, options.fullscan);
    let source = KeySource::Listed(&keys);
    let (quote, fullscan) = (options.quote_char, options.fullscan);
    let parse = |keystr: &str| parse_keystr(keystr, source, quote, fullscan);
    let parse_pairs = |pairs: &[(String, String)]| -> Result<Vec<(Path, Value)>> {
        let mut parsed = Vec::new();
        for (keystr, value) in pairs {
            parsed.extend(parse_defaults(keystr, value, source, quote, fullscan)?);
        }
        Ok(parsed)
    };

    let getkeys = request.getkeys.as_deref().map(parse).transpose()?;
    let defaults = parse_pairs(&request.getdefaults)?;
    let assignments = parse_pairs(&request.setkeys)?;
    let delkeys = request.delkeys.as_deref().map(parse).transpose()?;

    let mut items = Items::new(document, options.slice);
    log::debug!("editing {} records", items.len());
    for (idx, record) in items.records.iter_mut().enumerate() {
        let item_number = idx + 1;
        if let Some(paths) = &getkeys {
            let mut selected = get_items(record, paths, options, item_number)?;
            if !defaults.is_empty() {
                selected.extend(get_defaults(record, &defaults, options.fullpath, item_number)?);
            }
            *record = Value::Object(selected);
        } else if !defaults.is_empty() {
            let found = get_defaults(record, &defaults, options.fullpath, item_number)?;
            merge_into(record, found);
        }
        if !assignments.is_empty() {
            set_items(record, &assignments, options, item_number)?;
        }
        if let Some(paths) = &delkeys {
            del_items(record, paths, options, item_number)?;
        }
    }
    Ok(items.into_value())
}

fn render(document: Value, view: &View, options: &CutOptions) -> Result<Output> {
    match view {
        View::Document => Ok(Output::Document(document)),
        View::List => Ok(Output::Keys(list_keys(&document, options.fullscan).collect())),
        View::Inspect => Ok(Output::Inspection(inspect_json(&document))),
        View::Count => Ok(Output::Counts(count_arrays(&document))),
        View::Flatten(keys) => flatten(document, keys.as_deref(), options),
        View::Rows { rootkey, prepend } => rows(&document, rootkey, prepend.as_deref(), options),
    }
}

/// Flattens each record. `None` and `"0"` select every key of each
/// record; otherwise the keys are resolved against the whole document.
fn flatten(document: Value, keys: Option<&str>, options: &CutOptions) -> Result<Output> {
    let chosen = match keys {
        None | Some("0") => None,
        Some(keystr) => Some(parse_keystr(
            keystr,
            KeySource::Document(&document),
            options.quote_char,
            options.fullscan,
        )?),
    };
    let mut items = Items::new(document, false);
    for (idx, record) in items.records.iter_mut().enumerate() {
        let flattened = match &chosen {
            Some(paths) => flatten_paths(record, paths, idx + 1)?,
            None => {
                let paths: Vec<Path> = find_keys(record, options.fullscan)
                    .iter()
                    .map(|key| parse_key_name(key))
                    .collect();
                flatten_paths(record, &paths, idx + 1)?
            }
        };
        *record = Value::Object(flattened);
    }
    Ok(Output::Document(items.into_value()))
}

fn rows(
    document: &Value,
    rootkey: &str,
    prepend: Option<&str>,
    options: &CutOptions,
) -> Result<Output> {
    let root = first_path(document, rootkey, options)?.unwrap_or_default();
    let prepend = match prepend {
        Some(keystr) => parse_keystr(
            keystr,
            KeySource::Document(document),
            options.quote_char,
            options.fullscan,
        )?,
        None => Vec::new(),
    };
    let rows = generate_rows(document, &root, &prepend)?
        .map(|row| row.map(Value::Object))
        .collect::<Result<Vec<_>>>()?;
    Ok(Output::Document(Value::Array(rows)))
}

/// Merges `extra` into an object record, replacing a non-object one.
fn merge_into(record: &mut Value, extra: Map<String, Value>) {
    match record {
        Value::Object(map) => map.extend(extra),
        other => *other = Value::Object(extra),
    }
}
