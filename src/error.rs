use std::fmt;

use serde_json::Value;

use crate::crawl::find_keys;
use crate::kind::ValueKind;
use crate::path::{Path, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    KeyNotFound,
    IndexOutOfRange,
    KeyTypeError,
    KeyNumberOutOfRange,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::KeyNotFound => "KeyNotFound",
            ErrorKind::IndexOutOfRange => "IndexOutOfRange",
            ErrorKind::KeyTypeError => "KeyTypeError",
            ErrorKind::KeyNumberOutOfRange => "KeyNumberOutOfRange",
        }
    }
}

/// The operation that was running when an accessor error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RootKey,
    Get,
    GetDefaults,
    Set,
    Del,
    Flatten,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::RootKey => "rootkey",
            Operation::Get => "get",
            Operation::GetDefaults => "getdefaults",
            Operation::Set => "set",
            Operation::Del => "del",
            Operation::Flatten => "flatten",
        };
        f.write_str(name)
    }
}

/// Where an error happened: which operation, which record of the batch,
/// which path, and a snapshot of the record it was applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub operation: Operation,
    /// 1-based record number; 0 when the operation is not part of a batch.
    pub item_number: usize,
    pub path: Path,
    pub key_lists: Vec<Path>,
    pub document: Value,
}

impl ErrorContext {
    pub fn new(
        operation: Operation,
        item_number: usize,
        path: &Path,
        key_lists: &[Path],
        document: &Value,
    ) -> Self {
        Self {
            operation,
            item_number,
            path: path.clone(),
            key_lists: key_lists.to_vec(),
            document: document.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("key not found: {key:?}")]
    KeyNotFound {
        key: String,
        context: Option<Box<ErrorContext>>,
    },
    #[error("index out of range: {index} (length {len})")]
    IndexOutOfRange {
        index: i64,
        len: usize,
        context: Option<Box<ErrorContext>>,
    },
    #[error("key type error: {segment:?} cannot address {found}")]
    KeyTypeError {
        segment: String,
        found: ValueKind,
        context: Option<Box<ErrorContext>>,
    },
    #[error("key number out of range: {token:?}")]
    KeyNumberOutOfRange { token: String },
}

impl Error {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Error::KeyNotFound {
            key: key.into(),
            context: None,
        }
    }

    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Error::IndexOutOfRange {
            index,
            len,
            context: None,
        }
    }

    pub fn key_type(segment: &Segment, found: ValueKind) -> Self {
        Error::KeyTypeError {
            segment: segment.to_string(),
            found,
            context: None,
        }
    }

    pub fn key_number_out_of_range(token: impl Into<String>) -> Self {
        Error::KeyNumberOutOfRange {
            token: token.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::KeyTypeError { .. } => ErrorKind::KeyTypeError,
            Error::KeyNumberOutOfRange { .. } => ErrorKind::KeyNumberOutOfRange,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::KeyNotFound { context, .. }
            | Error::IndexOutOfRange { context, .. }
            | Error::KeyTypeError { context, .. } => context.as_deref(),
            Error::KeyNumberOutOfRange { .. } => None,
        }
    }

    /// Attaches `context` unless the error already carries one; the
    /// innermost operation knows the record best.
    pub fn or_context(mut self, new: ErrorContext) -> Self {
        match &mut self {
            Error::KeyNotFound { context, .. }
            | Error::IndexOutOfRange { context, .. }
            | Error::KeyTypeError { context, .. } => {
                if context.is_none() {
                    *context = Some(Box::new(new));
                }
            }
            Error::KeyNumberOutOfRange { .. } => {}
        }
        self
    }

    /// Nothing to act on: the key or element is simply absent.
    pub(crate) fn is_absence(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::KeyNotFound | ErrorKind::IndexOutOfRange
        )
    }

    /// Canonical paths of the document the failing operation ran against.
    /// Crawled on demand; only missing-key and out-of-range errors carry
    /// a listing.
    pub fn available_keys(&self) -> Option<Vec<String>> {
        match self.kind() {
            ErrorKind::KeyNotFound | ErrorKind::IndexOutOfRange => self
                .context()
                .map(|context| find_keys(&context.document, false)),
            _ => None,
        }
    }
}
