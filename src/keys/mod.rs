//! Key expressions.
//!
//! A key expression is a comma-separated list of tokens. Each token is a
//! dotted key name (`name.last`, `names.0.first`, `rows.2:5`, with `\.`
//! for a literal dot), a 1-based key number taken from the numbered key
//! listing (`3`), or a key number range (`2-4`, `2-`, `-4`; a colon works
//! as well as a dash).

pub mod literal;
pub mod tokenizer;

use std::borrow::Cow;

use serde_json::Value;

use crate::crawl::find_keys;
use crate::path::{Path, Segment};
use crate::{Error, Result};

pub use literal::parse_literal;
pub use tokenizer::parse_csv;

/// Where key numbers are looked up.
#[derive(Debug, Clone, Copy)]
pub enum KeySource<'a> {
    /// Crawl this document when a key number is used.
    Document(&'a Value),
    /// A listing that was crawled already.
    Listed(&'a [String]),
}

impl<'a> KeySource<'a> {
    fn keys(self, fullscan: bool) -> Cow<'a, [String]> {
        match self {
            KeySource::Document(document) => Cow::Owned(find_keys(document, fullscan)),
            KeySource::Listed(keys) => Cow::Borrowed(keys),
        }
    }
}

/// Splits a key name on unescaped dots. Leading dots are ignored and `\.`
/// becomes a literal dot inside a name.
pub fn parse_key_name(token: &str) -> Path {
    let text = token.trim_start_matches('.');
    let bytes = text.as_bytes();
    let mut path = Path::new();
    let mut start = 0;
    for pos in memchr::memchr_iter(b'.', bytes) {
        if pos > 0 && bytes[pos - 1] == b'\\' {
            continue;
        }
        path.push(unescape(&text[start..pos]));
        start = pos + 1;
    }
    path.push(unescape(&text[start..]));
    path
}

fn unescape(name: &str) -> Segment {
    if memchr::memchr(b'\\', name.as_bytes()).is_none() {
        return Segment::name(name);
    }
    Segment::from(name.replace("\\.", "."))
}

/// True when the token is shaped like a key number or range.
pub fn is_key_number(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'-' || b == b':')
}

/// Resolves a key number or range against a numbered key listing.
///
/// `N` picks the N-th key, `N-M` the inclusive range, `N-` everything from
/// N on and `-M` everything up to M. A bare `-` selects every key. A
/// reversed range selects nothing; only endpoints outside the listing fail.
pub fn parse_key_number(token: &str, keys: &[String]) -> Result<Vec<Path>> {
    let out_of_range = || Error::key_number_out_of_range(token);
    let normalized = token.replace(':', "-");
    let endpoint = |raw: &str| -> Result<Option<usize>> {
        if raw.is_empty() {
            return Ok(None);
        }
        match raw.parse::<usize>() {
            Ok(number) if (1..=keys.len()).contains(&number) => Ok(Some(number)),
            _ => Err(out_of_range()),
        }
    };

    let range = match normalized.split_once('-') {
        None => {
            let number = endpoint(&normalized)?.ok_or_else(out_of_range)?;
            number - 1..number
        }
        Some((first, last)) => {
            let start = endpoint(first)?.map_or(0, |number| number - 1);
            let stop = endpoint(last)?.unwrap_or(keys.len());
            start..stop.max(start)
        }
    };
    Ok(keys[range].iter().map(|key| parse_key_name(key)).collect())
}

/// Parses a key expression into structured paths, in token order.
///
/// Key numbers are resolved against `source`, which is only crawled when
/// the expression actually contains one.
pub fn parse_keystr(
    keystr: &str,
    source: KeySource<'_>,
    quote: char,
    fullscan: bool,
) -> Result<Vec<Path>> {
    let tokens = parse_csv(keystr, quote);
    let keys = if tokens.iter().any(|token| is_key_number(token)) {
        source.keys(fullscan)
    } else {
        Cow::Borrowed(&[][..])
    };

    let mut paths = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if is_key_number(token) {
            paths.extend(parse_key_number(token, &keys)?);
        } else {
            paths.push(parse_key_name(token));
        }
    }
    log::debug!("key expression {keystr:?} resolved to {} paths", paths.len());
    Ok(paths)
}

/// Pairs every path of a key expression with the same default value.
pub fn parse_defaults(
    keystr: &str,
    value: &str,
    source: KeySource<'_>,
    quote: char,
    fullscan: bool,
) -> Result<Vec<(Path, Value)>> {
    let default = parse_literal(value);
    let paths = parse_keystr(keystr, source, quote, fullscan)?;
    Ok(paths
        .into_iter()
        .map(|path| (path, default.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn names(path: &Path) -> Vec<String> {
        path.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case(".k 1.k\\.2.k3", &["k 1", "k.2", "k3"])]
    #[case("name", &["name"])]
    #[case("names.0.name.last", &["names", "0", "name", "last"])]
    #[case("names.2:5", &["names", "2:5"])]
    #[case("..leading", &["leading"])]
    fn test_parse_key_name(#[case] token: &str, #[case] expected: &[&str]) {
        assert_eq!(names(&parse_key_name(token)), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("2-", true)]
    #[case("-3", true)]
    #[case("1:4", true)]
    #[case("a1", false)]
    #[case("", false)]
    fn test_is_key_number(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_key_number(token), expected);
    }

    #[rstest]
    fn test_bare_dash_selects_everything() {
        let keys = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parse_key_number("-", &keys).expect("range").len(), 2);
    }
}
