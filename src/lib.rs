pub mod access;
pub mod crawl;
pub mod cut;
pub mod error;
pub mod flatten;
pub mod inspect;
pub mod keys;
pub mod kind;
pub mod num;
pub mod options;
pub mod path;

pub use crate::access::{
    del_items, drop_key, get_defaults, get_items, get_rootkey, into_key, select_key, select_or,
    set_items, set_value,
};
pub use crate::crawl::{find_keys, list_keys, ListedKey, TreeCrawler};
pub use crate::cut::{cut, Items, Output};
pub use crate::error::{Error, ErrorContext, ErrorKind, Operation};
pub use crate::flatten::{flatten_all, flatten_by_keys, generate_rows, get_key_content};
pub use crate::inspect::{count_arrays, inspect_json, ArrayCounts, InspectedKey};
pub use crate::keys::{parse_defaults, parse_keystr, KeySource};
pub use crate::kind::ValueKind;
pub use crate::options::{CutOptions, CutRequest, View, DEFAULT_QUOTE_CHAR};
pub use crate::path::{Path, Segment, SliceSpec};

pub type Result<T> = std::result::Result<T, Error>;
