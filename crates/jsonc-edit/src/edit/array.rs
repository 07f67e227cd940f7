use jsonc_edit_path::{format_pointer, PathStep};
use serde_json::Value;
use tracing::debug;

use super::layout::spans_lines;
use super::{remove_entry, replace_node, rewrite_array, PathEditor, PropertyEditor};
use crate::error::EditError;
use crate::format::FormattingOptions;
use crate::parser::{parse, NodeKind, SyntaxNode};
use crate::splice::Splice;

/// Array-aware editing on top of another [`PathEditor`].
///
/// Paths that reach into an existing array are split at the first index:
/// an element within range is replaced or removed in place, anything else
/// rewrites the array. Paths that never reach an array go to the inner
/// editor.
#[derive(Debug, Clone)]
pub struct ArrayEditor<E = PropertyEditor> {
    inner: E,
    options: FormattingOptions,
}

impl ArrayEditor<PropertyEditor> {
    pub fn new(options: FormattingOptions) -> Self {
        Self::wrap(PropertyEditor::new(options.clone()), options)
    }
}

impl Default for ArrayEditor<PropertyEditor> {
    fn default() -> Self {
        Self::new(FormattingOptions::default())
    }
}

impl<E: PathEditor> ArrayEditor<E> {
    pub fn wrap(inner: E, options: FormattingOptions) -> Self {
        Self { inner, options }
    }
}

enum Target<'t> {
    /// No array on the way; the inner editor takes it.
    General,
    Element {
        prefix: usize,
        array: &'t SyntaxNode,
        index: usize,
    },
    /// The path names an array slot but no array is there.
    Missing,
}

fn locate<'t>(tree: &'t SyntaxNode, path: &[PathStep]) -> Target<'t> {
    let mut node = tree;
    for (i, step) in path.iter().enumerate() {
        match node.kind {
            NodeKind::Array => {
                return match step.as_index() {
                    Some(index) => Target::Element {
                        prefix: i,
                        array: node,
                        index,
                    },
                    None => Target::General,
                };
            }
            NodeKind::Object if step.is_index() => return Target::Missing,
            NodeKind::Object => match node.child(step) {
                Some(child) => node = child,
                None if path[i..].iter().any(PathStep::is_index) => return Target::Missing,
                None => return Target::General,
            },
            _ => return Target::General,
        }
    }
    Target::General
}

impl<E: PathEditor> PathEditor for ArrayEditor<E> {
    fn edit_for_set(
        &self,
        text: &str,
        path: &[PathStep],
        value: &Value,
    ) -> Result<Vec<Splice>, EditError> {
        let parsed = parse(text)?;
        match locate(&parsed.tree, path) {
            Target::General => self.inner.edit_for_set(text, path, value),
            Target::Missing => {
                debug!(path = %format_pointer(path), "no array at path, skipping set");
                Ok(Vec::new())
            }
            Target::Element {
                prefix,
                array,
                index,
            } => {
                let nested = prefix + 1 < path.len();
                match array.children.get(index) {
                    Some(element) if !nested => Ok(vec![replace_node(
                        text,
                        element,
                        value,
                        &self.options,
                        spans_lines(text, array),
                    )]),
                    _ => rewrite_array(text, array, &path[prefix..], Some(value), &self.options),
                }
            }
        }
    }

    fn edit_for_delete(&self, text: &str, path: &[PathStep]) -> Result<Vec<Splice>, EditError> {
        let parsed = parse(text)?;
        match locate(&parsed.tree, path) {
            Target::General => self.inner.edit_for_delete(text, path),
            Target::Missing => {
                debug!(path = %format_pointer(path), "no array at path, skipping delete");
                Ok(Vec::new())
            }
            Target::Element {
                prefix,
                array,
                index,
            } => {
                if prefix + 1 < path.len() {
                    return rewrite_array(text, array, &path[prefix..], None, &self.options);
                }
                if index >= array.children.len() {
                    debug!(path = %format_pointer(path), "array index out of range, skipping delete");
                    return Ok(Vec::new());
                }
                Ok(remove_entry(text, &array.children, index))
            }
        }
    }
}
