//! Reading and writing documents on disk.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::document::JsoncDocument;
use crate::error::DocumentError;
use crate::tracked::ContainerKind;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl FileError {
    fn io(path: &Path) -> impl Fn(io::Error) -> FileError + '_ {
        move |source| FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and parse the document at `path`. `Ok(None)` when there is no file.
pub fn read_document(path: impl AsRef<Path>) -> Result<Option<JsoncDocument>, FileError> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(FileError::io(path)(err)),
    };
    JsoncDocument::parse(&text)
        .map(Some)
        .map_err(|source| FileError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Replace the file at `path` with `contents`.
///
/// The text goes to a temporary file next to the target, which is then
/// renamed over it. Missing parent directories are created.
pub fn write_atomic(path: impl AsRef<Path>, contents: impl Display) -> Result<(), FileError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(FileError::io(dir))?;

    let mut file = NamedTempFile::new_in(dir).map_err(FileError::io(dir))?;
    write!(file, "{contents}").map_err(FileError::io(path))?;
    file.as_file().sync_all().map_err(FileError::io(path))?;
    file.persist(path).map_err(|err| FileError::io(path)(err.error))?;
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// Write `value` to the document at `path`.
///
/// An existing document of the same root kind is reconciled with `value`,
/// so its comments and layout survive wherever the data did not change.
/// Otherwise the file is written fresh.
pub fn write_config(path: impl AsRef<Path>, value: &Value) -> Result<(), FileError> {
    let path = path.as_ref();
    let doc = match read_document(path)? {
        Some(mut doc) if ContainerKind::of(value) == Some(doc.kind(doc.root())) => {
            let root = doc.root();
            doc.reconcile(root, value)?;
            doc
        }
        _ => JsoncDocument::from_value(value.clone(), None)?,
    };
    write_atomic(path, &doc)
}
