//! Structural paths for jsonc-edit.
//!
//! A [`Path`] is a sequence of [`PathStep`]s: object keys and array
//! indices. Paths can be written in dotted form (`"server.ports.0"`) or as
//! JSON Pointers (`"/server/ports/0"`), and resolved against plain
//! [`serde_json::Value`] trees.
//!
//! # Example
//!
//! ```
//! use jsonc_edit_path::{format_pointer, get, parse_dotted_path, set};
//! use serde_json::json;
//!
//! let path = parse_dotted_path("server.ports.0");
//! assert_eq!(format_pointer(&path), "/server/ports/0");
//!
//! let mut doc = json!({"server": {"ports": [80]}});
//! assert_eq!(get(&doc, &path), Some(&json!(80)));
//!
//! set(&mut doc, &path, json!(8080)).unwrap();
//! assert_eq!(doc, json!({"server": {"ports": [8080]}}));
//! ```

use thiserror::Error;

pub mod get;
pub mod set;
pub mod types;
pub mod util;
pub mod validate;

pub use get::{get, get_mut};
pub use set::{remove, set};
pub use types::{Path, PathStep};
pub use util::{
    escape_component, format_dotted_path, format_pointer, is_child, is_path_equal, is_prefix,
    is_root, is_valid_index, parent, parse_dotted_path, parse_pointer, unescape_component,
};
pub use validate::{validate_path, validate_pointer, MAX_PATH_LENGTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("root path has no parent")]
    NoParent,
    #[error("invalid array index: {0:?}")]
    InvalidIndex(String),
    #[error("value at {0:?} is not a container")]
    NotAContainer(String),
    #[error("pointer must start with '/'")]
    PointerInvalid,
    #[error("pointer too long")]
    PointerTooLong,
    #[error("path too long")]
    PathTooLong,
}
