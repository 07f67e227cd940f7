//! Byte-range text edits.

use crate::error::EditError;

/// Replace `length` bytes at `offset` with `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub offset: usize,
    pub length: usize,
    pub content: String,
}

impl Splice {
    pub fn new(offset: usize, length: usize, content: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            content: content.into(),
        }
    }

    pub fn insert(offset: usize, content: impl Into<String>) -> Self {
        Self::new(offset, 0, content)
    }

    pub fn remove(start: usize, end: usize) -> Self {
        Self::new(start, end - start, String::new())
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Apply a batch of splices computed against the same `text`.
///
/// Splices may come in any order but must not overlap. Insertions at the
/// same offset keep their relative order.
///
/// ```
/// use jsonc_edit::splice::{apply_splices, Splice};
///
/// let out = apply_splices("[1, 2]", &[Splice::new(4, 1, "3"), Splice::new(1, 1, "0")]).unwrap();
/// assert_eq!(out, "[0, 3]");
/// ```
pub fn apply_splices(text: &str, splices: &[Splice]) -> Result<String, EditError> {
    let mut order: Vec<&Splice> = splices.iter().collect();
    order.sort_by_key(|s| s.offset);

    let mut prev_end = 0;
    for splice in &order {
        if splice.end() > text.len() {
            return Err(EditError::OutOfBounds {
                offset: splice.offset,
                length: splice.length,
            });
        }
        if splice.offset < prev_end {
            return Err(EditError::Overlap {
                offset: splice.offset,
            });
        }
        for at in [splice.offset, splice.end()] {
            if !text.is_char_boundary(at) {
                return Err(EditError::NotCharBoundary(at));
            }
        }
        prev_end = splice.end();
    }

    let mut out = text.to_owned();
    for splice in order.iter().rev() {
        out.replace_range(splice.offset..splice.end(), &splice.content);
    }
    Ok(out)
}
