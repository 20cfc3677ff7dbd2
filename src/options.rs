pub const DEFAULT_QUOTE_CHAR: char = '"';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutOptions {
    /// Quote character around key names in key expressions.
    pub quote_char: char,
    /// Crawl every array element when numbering keys, not just the first
    /// occurrence of each path.
    pub fullscan: bool,
    /// Name selected values by their full dotted path.
    pub fullpath: bool,
    /// Skip missing keys instead of failing the batch.
    pub any: bool,
    /// Treat a root array as one record instead of a sequence of records.
    pub slice: bool,
}

impl CutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn with_fullscan(mut self, fullscan: bool) -> Self {
        self.fullscan = fullscan;
        self
    }

    pub fn with_fullpath(mut self, fullpath: bool) -> Self {
        self.fullpath = fullpath;
        self
    }

    pub fn with_any(mut self, any: bool) -> Self {
        self.any = any;
        self
    }

    pub fn with_slice(mut self, slice: bool) -> Self {
        self.slice = slice;
        self
    }
}

impl Default for CutOptions {
    fn default() -> Self {
        Self {
            quote_char: DEFAULT_QUOTE_CHAR,
            fullscan: false,
            fullpath: false,
            any: false,
            slice: false,
        }
    }
}

/// What `cut` hands back once the edits are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// The (edited) document.
    #[default]
    Document,
    /// Numbered key listing.
    List,
    /// Per-key type summary.
    Inspect,
    /// Lengths of top-level arrays.
    Count,
    /// Flattened document; `None` or `"0"` flattens every key.
    Flatten(Option<String>),
    /// One flattened row per record below `rootkey`, prefixed with the
    /// `prepend` keys of the top-level document.
    Rows {
        rootkey: String,
        prepend: Option<String>,
    },
}

/// The edits and view requested for one `cut` invocation. Key arguments
/// are key expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutRequest {
    pub rootkey: Option<String>,
    pub getkeys: Option<String>,
    /// `(keys, default)` pairs; defaults are literal text.
    pub getdefaults: Vec<(String, String)>,
    /// `(keys, value)` pairs; values are literal text.
    pub setkeys: Vec<(String, String)>,
    pub delkeys: Option<String>,
    pub view: View,
}

impl CutRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rootkey(mut self, keys: impl Into<String>) -> Self {
        self.rootkey = Some(keys.into());
        self
    }

    pub fn with_get(mut self, keys: impl Into<String>) -> Self {
        self.getkeys = Some(keys.into());
        self
    }

    pub fn with_default(mut self, keys: impl Into<String>, default: impl Into<String>) -> Self {
        self.getdefaults.push((keys.into(), default.into()));
        self
    }

    pub fn with_set(mut self, keys: impl Into<String>, value: impl Into<String>) -> Self {
        self.setkeys.push((keys.into(), value.into()));
        self
    }

    pub fn with_del(mut self, keys: impl Into<String>) -> Self {
        self.delkeys = Some(keys.into());
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub(crate) fn has_edits(&self) -> bool {
        self.getkeys.is_some()
            || !self.getdefaults.is_empty()
            || !self.setkeys.is_empty()
            || self.delkeys.is_some()
    }
}
