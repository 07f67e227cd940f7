//! `jsonc-edit`: read and edit values in JSONC files from the shell.
//!
//! Provides the logic behind the binary:
//! - `get <file> <path>`: print the value at a dotted path
//! - `set <file> <path> <value>`: write a JSONC value, creating the file if needed
//! - `delete <file> <path>`: remove the value at a dotted path
//!
//! A path starting with `/` is read as a JSON Pointer instead.

use std::path::PathBuf;

use jsonc_edit_path::{parse_dotted_path, parse_pointer, validate_pointer, Path, PathError};
use jsonc_edit_util::ValueKind;

use crate::document::JsoncDocument;
use crate::error::DocumentError;
use crate::format::stringify;
use crate::fs::{read_document, write_atomic, FileError};
use crate::parser::{parse_value, ParseError};

pub const USAGE: &str = "usage: jsonc-edit <get|set|delete> <file> <path> [value]";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    File(FileError),
    Document(DocumentError),
    Value(ParseError),
    Path(PathError),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(e)    => write!(f, "{e}\n{USAGE}"),
            CliError::File(e)     => write!(f, "{e}"),
            CliError::Document(e) => write!(f, "{e}"),
            CliError::Value(e)    => write!(f, "invalid value: {e}"),
            CliError::Path(e)     => write!(f, "invalid path: {e}"),
            CliError::NotFound(e) => write!(f, "not found: {e}"),
        }
    }
}

impl From<FileError> for CliError {
    fn from(e: FileError) -> Self { CliError::File(e) }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self { CliError::Document(e) }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self { CliError::Value(e) }
}

impl From<PathError> for CliError {
    fn from(e: PathError) -> Self { CliError::Path(e) }
}

// ── Commands ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get { file: PathBuf, path: String },
    Set { file: PathBuf, path: String, value: String },
    Delete { file: PathBuf, path: String },
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let arg = |i: usize, what: &str| {
        args.get(i)
            .cloned()
            .ok_or_else(|| CliError::Usage(format!("missing {what}")))
    };
    let command = arg(0, "command")?;
    let file = PathBuf::from(arg(1, "file")?);
    let path = arg(2, "path")?;
    let (command, expected) = match command.as_str() {
        "get" => (Command::Get { file, path }, 3),
        "delete" => (Command::Delete { file, path }, 3),
        "set" => {
            let value = arg(3, "value")?;
            (Command::Set { file, path, value }, 4)
        }
        other => return Err(CliError::Usage(format!("unknown command {other:?}"))),
    };
    if args.len() > expected {
        return Err(CliError::Usage(format!("unexpected argument {:?}", args[expected])));
    }
    Ok(command)
}

/// Dotted path, or JSON Pointer when it starts with `/`.
pub fn resolve_path(raw: &str) -> Result<Path, CliError> {
    if raw.starts_with('/') {
        validate_pointer(raw)?;
        return Ok(parse_pointer(raw));
    }
    Ok(parse_dotted_path(raw))
}

/// Run `command`. Returns the text to print, if any.
pub fn run(command: &Command) -> Result<Option<String>, CliError> {
    match command {
        Command::Get { file, path } => {
            let doc = read_document(file)?
                .ok_or_else(|| CliError::NotFound(file.display().to_string()))?;
            let value = doc
                .lookup(resolve_path(path)?)
                .ok_or_else(|| CliError::NotFound(path.clone()))?;
            Ok(Some(stringify(&value, doc.options(), "", true)))
        }
        Command::Set { file, path, value } => {
            let value = parse_value(value)?;
            let mut doc = match read_document(file)? {
                Some(doc) => doc,
                None => JsoncDocument::from_value(ValueKind::Object.empty_value(), None)?,
            };
            doc.update(resolve_path(path)?, value)?;
            write_atomic(file, &doc)?;
            Ok(None)
        }
        Command::Delete { file, path } => {
            let mut doc = read_document(file)?
                .ok_or_else(|| CliError::NotFound(file.display().to_string()))?;
            if !doc.remove(resolve_path(path)?)? {
                return Err(CliError::NotFound(path.clone()));
            }
            write_atomic(file, &doc)?;
            Ok(None)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
