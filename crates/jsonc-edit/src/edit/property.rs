use jsonc_edit_path::{format_dotted_path, PathStep};
use jsonc_edit_util::quote;
use serde_json::Value;

use super::layout::{indent_at, line_trivia_end, spans_lines, starts_line};
use super::{nest, remove_entry, replace_node, rewrite_array, PathEditor};
use crate::error::EditError;
use crate::format::{stringify, FormattingOptions};
use crate::parser::{parse, NodeKind, SyntaxNode};
use crate::splice::Splice;

/// Edits object properties in place.
///
/// Arrays met on the way are not entered: the edit is applied to the
/// array's value and the whole array is written back.
#[derive(Debug, Clone, Default)]
pub struct PropertyEditor {
    options: FormattingOptions,
}

impl PropertyEditor {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Add `key: value` as the last property of `obj`.
    fn insert_property(
        &self,
        text: &str,
        obj: &SyntaxNode,
        key: &str,
        value: &Value,
        is_root: bool,
    ) -> Vec<Splice> {
        let eol = &self.options.eol;
        let key = quote(key);

        let Some(last) = obj.children.last() else {
            return self.insert_first(text, obj, &key, value, is_root);
        };

        if !starts_line(text, last.offset) {
            let entry = format!("{key}: {}", stringify(value, &self.options, "", false));
            return match last.separator {
                Some(sep) => vec![Splice::insert(sep + 1, format!(" {entry},"))],
                None => vec![Splice::insert(last.end(), format!(", {entry}"))],
            };
        }

        let indent = indent_at(text, last.offset);
        let entry = format!(
            "{eol}{indent}{key}: {}",
            stringify(value, &self.options, indent, true)
        );
        match last.separator {
            Some(sep) => vec![Splice::insert(
                line_trivia_end(text, sep + 1),
                format!("{entry},"),
            )],
            None => {
                let value_end = last.end();
                let at = line_trivia_end(text, value_end);
                if at == value_end {
                    vec![Splice::insert(value_end, format!(",{entry}"))]
                } else {
                    vec![Splice::insert(value_end, ","), Splice::insert(at, entry)]
                }
            }
        }
    }

    fn insert_first(
        &self,
        text: &str,
        obj: &SyntaxNode,
        key: &str,
        value: &Value,
        is_root: bool,
    ) -> Vec<Splice> {
        let eol = &self.options.eol;
        let indent = indent_at(text, obj.offset);
        let inner = format!("{indent}{}", self.options.unit());
        let interior_start = obj.offset + 1;
        let interior_end = obj.end() - 1;
        let interior = &text[interior_start..interior_end];

        if !interior.trim().is_empty() {
            // Only comments can live here; keep them after the new entry.
            let content = format!(
                "{eol}{inner}{key}: {}",
                stringify(value, &self.options, &inner, true)
            );
            return vec![Splice::insert(interior_start, content)];
        }

        let content = if is_root || text.contains('\n') {
            format!(
                "{eol}{inner}{key}: {}{eol}{indent}",
                stringify(value, &self.options, &inner, true)
            )
        } else {
            format!("{key}: {}", stringify(value, &self.options, "", false))
        };
        vec![Splice::new(
            interior_start,
            interior_end - interior_start,
            content,
        )]
    }
}

impl PathEditor for PropertyEditor {
    fn edit_for_set(
        &self,
        text: &str,
        path: &[PathStep],
        value: &Value,
    ) -> Result<Vec<Splice>, EditError> {
        let parsed = parse(text)?;
        let root = &parsed.tree;
        let mut node = root;
        let mut parent: Option<&SyntaxNode> = None;
        for (i, step) in path.iter().enumerate() {
            match node.kind {
                NodeKind::Object => match node.child(step) {
                    Some(child) => {
                        parent = Some(node);
                        node = child;
                    }
                    None => {
                        let value = nest(&path[i + 1..], value.clone());
                        let is_root = std::ptr::eq(node, root);
                        return Ok(self.insert_property(text, node, &step.to_key(), &value, is_root));
                    }
                },
                NodeKind::Array => {
                    return rewrite_array(text, node, &path[i..], Some(value), &self.options);
                }
                _ => return Err(EditError::InvalidParent(format_dotted_path(&path[..i]))),
            }
        }
        let multiline = parent.map_or(true, |p| spans_lines(text, p));
        Ok(vec![replace_node(text, node, value, &self.options, multiline)])
    }

    fn edit_for_delete(&self, text: &str, path: &[PathStep]) -> Result<Vec<Splice>, EditError> {
        let Some((last, init)) = path.split_last() else {
            return Err(EditError::DeleteRoot);
        };
        let parsed = parse(text)?;
        let mut node = &parsed.tree;
        for (i, step) in init.iter().enumerate() {
            match node.kind {
                NodeKind::Object => match node.child(step) {
                    Some(child) => node = child,
                    None => return Ok(Vec::new()),
                },
                NodeKind::Array => return rewrite_array(text, node, &path[i..], None, &self.options),
                _ => return Ok(Vec::new()),
            }
        }
        match node.kind {
            NodeKind::Object => Ok(node
                .property_index(&last.to_key())
                .map(|idx| remove_entry(text, &node.children, idx))
                .unwrap_or_default()),
            NodeKind::Array => rewrite_array(text, node, std::slice::from_ref(last), None, &self.options),
            _ => Ok(Vec::new()),
        }
    }
}
