use std::fmt::Write;

/// Escape special characters in a string for JSON serialization.
///
/// Quotes, backslashes and control characters (0x00-0x1F) are escaped, using
/// the short forms (`\n`, `\t`, ...) where JSON has one and `\u00XX`
/// otherwise. Everything else, including non-ASCII text, is kept verbatim.
///
/// # Examples
///
/// ```
/// use jsonc_edit_util::strings::escape;
///
/// assert_eq!(escape("hello"), "hello");
/// assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last = 0;

    for (i, ch) in s.char_indices() {
        let short = match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            '\u{0008}' => Some("\\b"),
            '\u{000C}' => Some("\\f"),
            _ => None,
        };
        if short.is_none() && ch >= '\u{0020}' {
            continue;
        }

        result.push_str(&s[last..i]);
        match short {
            Some(esc) => result.push_str(esc),
            None => {
                let _ = write!(result, "\\u{:04x}", ch as u32);
            }
        }
        last = i + ch.len_utf8();
    }

    result.push_str(&s[last..]);
    result
}

/// Escape `s` and wrap it in double quotes.
///
/// ```
/// use jsonc_edit_util::strings::quote;
///
/// assert_eq!(quote("a\"b"), "\"a\\\"b\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    out.push_str(&escape(s));
    out.push('"');
    out
}
