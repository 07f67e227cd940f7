//! Error types for text surgery and document access.

use jsonc_edit_path::PathError;
use jsonc_edit_util::ValueKind;
use thiserror::Error;

use crate::parser::ParseError;

/// Failure while computing or applying text splices.
///
/// These never reach the caller of [`JsoncDocument`](crate::JsoncDocument)
/// serialization; they trigger the re-stringify fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("splice {offset}+{length} is out of bounds")]
    OutOfBounds { offset: usize, length: usize },
    #[error("splice at {offset} overlaps the previous splice")]
    Overlap { offset: usize },
    #[error("offset {0} is not on a char boundary")]
    NotCharBoundary(usize),
    #[error("cannot edit through non-container value at {0:?}")]
    InvalidParent(String),
    #[error("cannot delete the root value")]
    DeleteRoot,
    #[error("edited text no longer matches the tracked value")]
    Diverged,
}

/// Failure raised synchronously by document construction and accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("document root must be an object or array, found {0}")]
    RootNotContainer(ValueKind),
    #[error("invalid array index: {0:?}")]
    InvalidIndex(String),
    #[error("cannot update root")]
    EmptyPath,
    #[error("parent is not an object: {0:?}")]
    ParentNotObject(String),
    #[error("cannot reconcile {found} into {expected}")]
    KindMismatch { expected: ValueKind, found: ValueKind },
    #[error("value does not convert: {0}")]
    Convert(String),
}
