//! Path-addressed text edits.
//!
//! A [`PathEditor`] turns "set the value at this path" or "delete the value
//! at this path" into [`Splice`]s against the current text, leaving every
//! byte outside the edited entry alone.
//!
//! [`PropertyEditor`] handles object properties and treats arrays as opaque
//! values. [`ArrayEditor`] wraps any editor and handles array elements
//! itself.

mod array;
pub(crate) mod layout;
mod property;

pub use array::ArrayEditor;
pub use property::PropertyEditor;

use jsonc_edit_path::{remove, set, PathStep};
use serde_json::{Map, Value};

use crate::error::EditError;
use crate::format::{stringify, FormattingOptions};
use crate::parser::SyntaxNode;
use crate::splice::Splice;
use layout::{
    indent_at, is_horizontal_only, line_start, newline_len, skip_horizontal,
    skip_horizontal_back, spans_lines, starts_line,
};

pub trait PathEditor {
    /// Splices that make `path` hold `value`.
    fn edit_for_set(
        &self,
        text: &str,
        path: &[PathStep],
        value: &Value,
    ) -> Result<Vec<Splice>, EditError>;

    /// Splices that remove the entry at `path`. Nothing to remove yields no
    /// splices.
    fn edit_for_delete(&self, text: &str, path: &[PathStep]) -> Result<Vec<Splice>, EditError>;
}

/// Overwrite exactly the byte range of `node`.
pub(crate) fn replace_node(
    text: &str,
    node: &SyntaxNode,
    value: &Value,
    options: &FormattingOptions,
    multiline: bool,
) -> Splice {
    let content = stringify(value, options, indent_at(text, node.offset), multiline);
    Splice::new(node.offset, node.length, content)
}

/// Apply `path` (relative to `array`) to the array's plain value and write
/// the whole array back.
pub(crate) fn rewrite_array(
    text: &str,
    array: &SyntaxNode,
    path: &[PathStep],
    value: Option<&Value>,
    options: &FormattingOptions,
) -> Result<Vec<Splice>, EditError> {
    let mut current = array.to_value(text)?;
    match value {
        Some(value) => set(&mut current, path, value.clone())?,
        None => {
            if remove(&mut current, path).is_none() {
                return Ok(Vec::new());
            }
        }
    }
    Ok(vec![replace_node(
        text,
        array,
        &current,
        options,
        spans_lines(text, array),
    )])
}

/// Remove entry `idx` of a container (an array element or an object
/// property).
///
/// The entry goes together with its following comma and the spaces after
/// it. If the entry starts its line and nothing else follows on that line,
/// the whole line goes. An entry that ends its line but shares it with an
/// earlier entry also takes the spaces before it. An entry without a following comma takes the comma
/// of the previous entry with it, so the container keeps its trailing comma
/// state.
pub(crate) fn remove_entry(text: &str, entries: &[SyntaxNode], idx: usize) -> Vec<Splice> {
    let node = &entries[idx];
    let mut start = node.offset;
    let mut end = skip_horizontal(text, node.separator.map_or(node.end(), |sep| sep + 1));
    if starts_line(text, node.offset) {
        let newline = newline_len(text, end);
        if newline > 0 {
            end += newline;
            start = line_start(text, node.offset);
        }
    } else if newline_len(text, end) > 0
        || (node.separator.is_some() && idx + 1 == entries.len())
    {
        start = skip_horizontal_back(text, start);
    }

    let mut splices = Vec::with_capacity(2);
    if node.separator.is_none() {
        if let Some(prev_sep) = idx.checked_sub(1).and_then(|i| entries[i].separator) {
            if is_horizontal_only(&text[prev_sep + 1..node.offset]) {
                start = prev_sep;
            } else {
                splices.push(Splice::new(prev_sep, 1, ""));
            }
        }
    }
    splices.push(Splice::remove(start, end));
    splices
}

/// Wrap `value` so that it sits at `steps` below a new entry.
pub(crate) fn nest(steps: &[PathStep], value: Value) -> Value {
    steps.iter().rev().fold(value, |inner, step| match step {
        PathStep::Index(i) => {
            let mut arr = vec![Value::Null; *i];
            arr.push(inner);
            Value::Array(arr)
        }
        PathStep::Key(k) => {
            let mut map = Map::new();
            map.insert(k.clone(), inner);
            Value::Object(map)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::splice::apply_splices;
    use serde_json::json;

    fn delete_at(text: &str, idx: usize) -> String {
        let tree = parse(text).unwrap().tree;
        let entries = &tree.children;
        apply_splices(text, &remove_entry(text, entries, idx)).unwrap()
    }

    #[test]
    fn remove_inline_entries() {
        assert_eq!(delete_at("[1, 2, 3]", 0), "[2, 3]");
        assert_eq!(delete_at("[1, 2, 3]", 1), "[1, 3]");
        assert_eq!(delete_at("[1, 2, 3]", 2), "[1, 2]");
        assert_eq!(delete_at("[1, 2, 3,]", 2), "[1, 2,]");
        assert_eq!(delete_at("[1]", 0), "[]");
    }

    #[test]
    fn remove_whole_lines() {
        let text = "[\n  1,\n  2,\n  3\n]";
        assert_eq!(delete_at(text, 1), "[\n  1,\n  3\n]");
        assert_eq!(delete_at(text, 2), "[\n  1,\n  2\n]");
        assert_eq!(delete_at(text, 0), "[\n  2,\n  3\n]");
    }

    #[test]
    fn remove_keeps_trailing_comma_state() {
        let text = "{\n  \"a\": 1,\n  \"b\": 2,\n}";
        assert_eq!(delete_at(text, 1), "{\n  \"a\": 1,\n}");
    }

    #[test]
    fn remove_keeps_comments_between_entries() {
        let text = r#"["a", /* keep */ "b"]"#;
        assert_eq!(delete_at(text, 1), r#"["a" /* keep */ ]"#);
    }

    #[test]
    fn remove_keeps_same_line_comment() {
        let text = "[\n  1, // one\n  2\n]";
        assert_eq!(delete_at(text, 0), "[\n  // one\n  2\n]");
    }

    #[test]
    fn remove_entry_ending_a_shared_line() {
        let text = "// keep\n[1, 2,\n 3, 4]";
        let tree = parse(text).unwrap().tree;
        let out = apply_splices(text, &remove_entry(text, &tree.children, 1)).unwrap();
        assert_eq!(out, "// keep\n[1,\n 3, 4]");
        assert_eq!(delete_at("[1, /* c */ 2,\n 3]", 1), "[1, /* c */\n 3]");
        assert_eq!(delete_at("[1, 2\n]", 1), "[1\n]");
    }

    #[test]
    fn remove_crlf_line() {
        let text = "[\r\n  1,\r\n  2\r\n]";
        assert_eq!(delete_at(text, 0), "[\r\n  2\r\n]");
    }

    #[test]
    fn nest_builds_objects_and_padded_arrays() {
        let steps = [PathStep::key("a"), PathStep::Index(1)];
        assert_eq!(nest(&steps, json!(true)), json!({"a": [null, true]}));
        assert_eq!(nest(&[], json!(1)), json!(1));
    }
}
