//! Text layout queries around syntax nodes.

use crate::parser::SyntaxNode;

fn is_horizontal(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Offset of the first byte of the line containing `offset`.
pub(crate) fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn indent_at(text: &str, offset: usize) -> &str {
    let line = &text[line_start(text, offset)..];
    let width = line.bytes().take_while(|&b| is_horizontal(b)).count();
    &line[..width]
}

/// True when only spaces or tabs precede `offset` on its line.
pub(crate) fn starts_line(text: &str, offset: usize) -> bool {
    text[line_start(text, offset)..offset]
        .bytes()
        .all(is_horizontal)
}

pub(crate) fn skip_horizontal(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && is_horizontal(bytes[pos]) {
        pos += 1;
    }
    pos
}

pub(crate) fn skip_horizontal_back(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos > 0 && is_horizontal(bytes[pos - 1]) {
        pos -= 1;
    }
    pos
}

pub(crate) fn is_horizontal_only(text: &str) -> bool {
    text.bytes().all(is_horizontal)
}

/// Length of the line terminator at `pos`, if any.
pub(crate) fn newline_len(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    }
}

/// Skip spaces and comments that end on the current line.
///
/// Returns the offset of the line terminator, or of the first token that is
/// not trivia.
pub(crate) fn line_trivia_end(text: &str, mut pos: usize) -> usize {
    loop {
        pos = skip_horizontal(text, pos);
        let rest = &text[pos..];
        if rest.starts_with("//") {
            let end = rest.find('\n').map_or(text.len(), |i| pos + i);
            return if end > pos && text.as_bytes()[end - 1] == b'\r' {
                end - 1
            } else {
                end
            };
        }
        if rest.starts_with("/*") {
            match rest.find("*/") {
                Some(close) if !rest[..close].contains('\n') => pos += close + 2,
                _ => return pos,
            }
            continue;
        }
        return pos;
    }
}

pub(crate) fn spans_lines(text: &str, node: &SyntaxNode) -> bool {
    text[node.offset..node.end()].contains('\n')
}
