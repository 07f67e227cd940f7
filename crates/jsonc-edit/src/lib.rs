//! jsonc-edit: comment and formatting preserving editor for JSON with
//! comments and trailing commas.
//!
//! A [`JsoncDocument`] is parsed from text, edited through per-container
//! accessors or dotted paths, and written back with only the changed values
//! rewritten. Comments, whitespace and trailing commas elsewhere survive
//! byte for byte. When an edit cannot be applied to the text, the document
//! is re-serialized instead.
//!
//! ```
//! use jsonc_edit::JsoncDocument;
//! use serde_json::json;
//!
//! let text = "{\n  \"name\": \"app\", // display name\n  \"ports\": [80, /* tls */ 443]\n}\n";
//! let mut doc = JsoncDocument::parse(text).unwrap();
//! doc.update("ports.0", json!(8080)).unwrap();
//! doc.update("debug", json!(true)).unwrap();
//! assert_eq!(
//!     doc.to_string(),
//!     "{\n  \"name\": \"app\", // display name\n  \"ports\": [8080, /* tls */ 443],\n  \"debug\": true\n}\n"
//! );
//! assert_eq!(doc.extract("ports", json!([])), json!([8080, 443]));
//! ```

// Text layer
pub mod parser;
pub mod format;
pub mod splice;
pub mod edit;

// Tracking layer
pub mod tracked;
pub mod document;
pub mod diff;
pub mod access;

pub mod error;
pub mod fs;
pub mod cli;

pub use access::ToPath;
pub use diff::Diff;
pub use document::{Entry, JsoncDocument, NodeMut};
pub use edit::{ArrayEditor, PathEditor, PropertyEditor};
pub use error::{DocumentError, EditError};
pub use format::FormattingOptions;
pub use parser::{parse, parse_value, ParseError};
pub use splice::{apply_splices, Splice};
pub use tracked::{ContainerKind, NodeId};

pub use jsonc_edit_path::{Path, PathStep};
