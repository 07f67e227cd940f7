//! Formatting options and JSON text generation for freshly written values.

use jsonc_edit_util::quote;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How freshly serialized values are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattingOptions {
    pub tab_size: usize,
    pub insert_spaces: bool,
    pub eol: String,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            tab_size: 2,
            insert_spaces: true,
            eol: "\n".to_owned(),
        }
    }
}

impl FormattingOptions {
    /// One level of indentation.
    pub fn unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_owned()
        }
    }

    /// Infer the options used by `text`.
    ///
    /// The indentation unit comes from the first indented line, the line
    /// terminator from the first line break. Anything not found keeps its
    /// default.
    ///
    /// ```
    /// use jsonc_edit::FormattingOptions;
    ///
    /// let options = FormattingOptions::detect("{\r\n\t\"a\": 1\r\n}");
    /// assert!(!options.insert_spaces);
    /// assert_eq!(options.eol, "\r\n");
    /// ```
    pub fn detect(text: &str) -> Self {
        let mut options = Self::default();
        if let Some(pos) = text.find('\n') {
            if pos > 0 && text.as_bytes()[pos - 1] == b'\r' {
                options.eol = "\r\n".to_owned();
            }
        }
        for line in text.lines().skip(1) {
            let trimmed = line.trim_start_matches([' ', '\t']);
            if trimmed.is_empty() || trimmed.starts_with('*') {
                continue;
            }
            let indent = &line[..line.len() - trimmed.len()];
            if indent.starts_with('\t') {
                options.insert_spaces = false;
                break;
            }
            if !indent.is_empty() {
                options.tab_size = indent.len();
                break;
            }
        }
        options
    }
}

/// Serialize `value`.
///
/// In multi-line mode containers put each entry on its own line, indented
/// one unit past `base_indent`, and the closing bracket at `base_indent`.
/// Otherwise the output is a single line with `", "` and `": "` separators.
pub fn stringify(
    value: &Value,
    options: &FormattingOptions,
    base_indent: &str,
    multiline: bool,
) -> String {
    let mut out = String::new();
    let unit = options.unit();
    write_value(&mut out, value, options, &unit, base_indent, multiline);
    out
}

fn write_value(
    out: &mut String,
    value: &Value,
    options: &FormattingOptions,
    unit: &str,
    indent: &str,
    multiline: bool,
) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(arr) if arr.is_empty() => out.push_str("[]"),
        Value::Object(obj) if obj.is_empty() => out.push_str("{}"),
        Value::Array(arr) => {
            let inner = format!("{indent}{unit}");
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                open_entry(out, i, options, &inner, multiline);
                write_value(out, item, options, unit, &inner, multiline);
            }
            close(out, options, indent, multiline);
            out.push(']');
        }
        Value::Object(obj) => {
            let inner = format!("{indent}{unit}");
            out.push('{');
            for (i, (key, item)) in obj.iter().enumerate() {
                open_entry(out, i, options, &inner, multiline);
                out.push_str(&quote(key));
                out.push_str(": ");
                write_value(out, item, options, unit, &inner, multiline);
            }
            close(out, options, indent, multiline);
            out.push('}');
        }
    }
}

fn open_entry(out: &mut String, i: usize, options: &FormattingOptions, inner: &str, multiline: bool) {
    if i > 0 {
        out.push(',');
        if !multiline {
            out.push(' ');
        }
    }
    if multiline {
        out.push_str(&options.eol);
        out.push_str(inner);
    }
}

fn close(out: &mut String, options: &FormattingOptions, indent: &str, multiline: bool) {
    if multiline {
        out.push_str(&options.eol);
        out.push_str(indent);
    }
}

/// Full re-serialization: two-space indentation and one trailing newline.
///
/// ```
/// use jsonc_edit::format::to_pretty_string;
/// use serde_json::json;
///
/// assert_eq!(to_pretty_string(&json!({"a": [1]})), "{\n  \"a\": [\n    1\n  ]\n}\n");
/// ```
pub fn to_pretty_string(value: &Value) -> String {
    let mut out = stringify(value, &FormattingOptions::default(), "", true);
    out.push('\n');
    out
}
