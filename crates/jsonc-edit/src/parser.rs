//! Parser for JSON with comments and trailing commas.
//!
//! One pass over the source produces both the plain [`Value`] and a
//! concrete [`SyntaxNode`] tree that records the byte range of every value,
//! every property, and the comma that follows each entry of a container.

use std::fmt;

use jsonc_edit_path::PathStep;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid string")]
    InvalidString,
    #[error("invalid number")]
    InvalidNumber,
    #[error("unexpected content after the root value")]
    TrailingContent,
    #[error("document is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    Property,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::Property => "property",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A node of the concrete syntax tree.
///
/// Objects hold `Property` children, each with exactly two children: the key
/// string and the value. Arrays hold their element values directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub offset: usize,
    pub length: usize,
    pub children: Vec<SyntaxNode>,
    /// Unescaped key, set on `Property` nodes.
    pub key: Option<String>,
    /// Offset of the comma following this entry inside its container.
    pub separator: Option<usize>,
}

impl SyntaxNode {
    fn leaf(kind: NodeKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            children: Vec::new(),
            key: None,
            separator: None,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The value node of a `Property`.
    pub fn value(&self) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::Property => self.children.get(1),
            _ => None,
        }
    }

    /// Index of the property named `key` among this object's children.
    /// With duplicate keys the last one wins, like the parsed value.
    pub fn property_index(&self, key: &str) -> Option<usize> {
        if self.kind != NodeKind::Object {
            return None;
        }
        self.children
            .iter()
            .rposition(|prop| prop.key.as_deref() == Some(key))
    }

    /// The value node addressed by one step from this container.
    pub fn child(&self, step: &PathStep) -> Option<&SyntaxNode> {
        match self.kind {
            NodeKind::Object => self.children[self.property_index(&step.to_key())?].value(),
            NodeKind::Array => self.children.get(step.as_index()?),
            _ => None,
        }
    }

    /// Locate the value node at `path`.
    pub fn find(&self, path: &[PathStep]) -> Option<&SyntaxNode> {
        let mut node = self;
        for step in path {
            node = node.child(step)?;
        }
        Some(node)
    }

    /// Re-derive the plain value of this subtree from the source text.
    pub fn to_value(&self, text: &str) -> Result<Value, ParseError> {
        let raw = text
            .get(self.offset..self.end())
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEnd, self.offset))?;
        Ok(match self.kind {
            NodeKind::Object => {
                let mut map = Map::new();
                for prop in &self.children {
                    if let (Some(key), Some(value)) = (&prop.key, prop.value()) {
                        map.insert(key.clone(), value.to_value(text)?);
                    }
                }
                Value::Object(map)
            }
            NodeKind::Array => Value::Array(
                self.children
                    .iter()
                    .map(|child| child.to_value(text))
                    .collect::<Result<_, _>>()?,
            ),
            NodeKind::Property => match self.value() {
                Some(value) => value.to_value(text)?,
                None => Value::Null,
            },
            NodeKind::String => Value::String(
                decode_json_string(&raw.as_bytes()[1..raw.len() - 1])
                    .map_err(|_| ParseError::new(ParseErrorKind::InvalidString, self.offset))?,
            ),
            NodeKind::Number => Value::Number(
                decode_number(raw)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidNumber, self.offset))?,
            ),
            NodeKind::Boolean => Value::Bool(raw == "true"),
            NodeKind::Null => Value::Null,
        })
    }
}

/// Decode a JSON number token.
///
/// Well-formed numbers too large for `f64` saturate to `±f64::MAX`.
fn decode_number(s: &str) -> Option<Number> {
    if let Ok(n) = serde_json::from_str::<Number>(s) {
        return Some(n);
    }
    let v: f64 = s.parse().ok()?;
    if !v.is_infinite() || !is_number_token(s) {
        return None;
    }
    Number::from_f64(f64::MAX.copysign(v))
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_number_token(s: &str) -> bool {
    fn digits(b: &[u8]) -> usize {
        b.iter().take_while(|c| c.is_ascii_digit()).count()
    }
    let b = s.strip_prefix('-').unwrap_or(s).as_bytes();
    let int = digits(b);
    if int == 0 || (int > 1 && b[0] == b'0') {
        return false;
    }
    let mut rest = &b[int..];
    if let Some(frac) = rest.strip_prefix(b".") {
        let n = digits(frac);
        if n == 0 {
            return false;
        }
        rest = &frac[n..];
    }
    if let Some(exp) = rest.strip_prefix(b"e").or_else(|| rest.strip_prefix(b"E")) {
        let exp = exp
            .strip_prefix(b"+")
            .or_else(|| exp.strip_prefix(b"-"))
            .unwrap_or(exp);
        let n = digits(exp);
        if n == 0 {
            return false;
        }
        rest = &exp[n..];
    }
    rest.is_empty()
}

/// Result of parsing a document.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub value: Value,
    pub tree: SyntaxNode,
}

/// Parse `text` into a value and its syntax tree.
///
/// ```
/// use jsonc_edit::parser::{parse, NodeKind};
///
/// let parsed = parse("{\n  // port\n  \"port\": 80,\n}").unwrap();
/// assert_eq!(parsed.value, serde_json::json!({"port": 80}));
/// assert_eq!(parsed.tree.kind, NodeKind::Object);
/// assert!(parsed.tree.children[0].separator.is_some());
/// ```
pub fn parse(text: &str) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(text.as_bytes());
    if parser.data.starts_with("\u{feff}".as_bytes()) {
        parser.x = 3;
    }
    parser.skip_trivia()?;
    if parser.x >= parser.data.len() {
        return Err(ParseError::new(ParseErrorKind::Empty, parser.x));
    }
    let (value, tree) = parser.read_any()?;
    parser.skip_trivia()?;
    if parser.x < parser.data.len() {
        return Err(ParseError::new(ParseErrorKind::TrailingContent, parser.x));
    }
    Ok(Parsed { value, tree })
}

/// Parse `text` and keep only the plain value.
pub fn parse_value(text: &str) -> Result<Value, ParseError> {
    parse(text).map(|parsed| parsed.value)
}

struct Parser<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.x)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                b'/' => match self.data.get(self.x + 1) {
                    Some(b'/') => {
                        while self.x < self.data.len() && self.data[self.x] != b'\n' {
                            self.x += 1;
                        }
                    }
                    Some(b'*') => {
                        let start = self.x;
                        self.x += 2;
                        loop {
                            if self.x + 1 >= self.data.len() {
                                return Err(ParseError::new(
                                    ParseErrorKind::UnterminatedComment,
                                    start,
                                ));
                            }
                            if self.data[self.x] == b'*' && self.data[self.x + 1] == b'/' {
                                self.x += 2;
                                break;
                            }
                            self.x += 1;
                        }
                    }
                    _ => return Err(self.error(ParseErrorKind::UnexpectedToken)),
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn read_any(&mut self) -> Result<(Value, SyntaxNode), ParseError> {
        let ch = self
            .peek()
            .ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))?;
        match ch {
            b'"' => {
                let start = self.x;
                let s = self.read_str()?;
                let node = SyntaxNode::leaf(NodeKind::String, start, self.x - start);
                Ok((Value::String(s), node))
            }
            b'[' => self.read_arr(),
            b'{' => self.read_obj(),
            b't' => self.read_keyword("true", Value::Bool(true), NodeKind::Boolean),
            b'f' => self.read_keyword("false", Value::Bool(false), NodeKind::Boolean),
            b'n' => self.read_keyword("null", Value::Null, NodeKind::Null),
            b'-' | b'0'..=b'9' => self.read_num(),
            _ => Err(self.error(ParseErrorKind::UnexpectedToken)),
        }
    }

    fn read_keyword(
        &mut self,
        word: &str,
        value: Value,
        kind: NodeKind,
    ) -> Result<(Value, SyntaxNode), ParseError> {
        let start = self.x;
        if !self.data[start..].starts_with(word.as_bytes()) {
            return Err(self.error(ParseErrorKind::UnexpectedToken));
        }
        self.x += word.len();
        if self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            return Err(ParseError::new(ParseErrorKind::UnexpectedToken, start));
        }
        Ok((value, SyntaxNode::leaf(kind, start, word.len())))
    }

    fn read_num(&mut self) -> Result<(Value, SyntaxNode), ParseError> {
        let start = self.x;
        let data = self.data;
        let len = data.len();
        let mut x = self.x;

        // Consume sign, digits, decimal, exponent
        if x < len && data[x] == b'-' {
            x += 1;
        }
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x < len && data[x] == b'.' {
            x += 1;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        self.x = x;

        let invalid = || ParseError::new(ParseErrorKind::InvalidNumber, start);
        let s = std::str::from_utf8(&data[start..x]).map_err(|_| invalid())?;
        let n = decode_number(s).ok_or_else(invalid)?;
        Ok((Value::Number(n), SyntaxNode::leaf(NodeKind::Number, start, x - start)))
    }

    fn read_str(&mut self) -> Result<String, ParseError> {
        let start = self.x;
        self.x += 1; // skip opening quote
        let x0 = self.x;
        loop {
            match self.peek() {
                None => return Err(ParseError::new(ParseErrorKind::InvalidString, start)),
                Some(b'"') => break,
                Some(b'\\') => self.x += 2,
                Some(b) if b < 0x20 => {
                    return Err(self.error(ParseErrorKind::InvalidString));
                }
                Some(_) => self.x += 1,
            }
        }
        let s = decode_json_string(&self.data[x0..self.x])
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidString, start))?;
        self.x += 1; // skip closing quote
        Ok(s)
    }

    /// Skip trivia, then consume a comma if one follows and return its offset.
    fn read_separator(&mut self) -> Result<Option<usize>, ParseError> {
        self.skip_trivia()?;
        if self.peek() == Some(b',') {
            self.x += 1;
            return Ok(Some(self.x - 1));
        }
        Ok(None)
    }

    fn read_arr(&mut self) -> Result<(Value, SyntaxNode), ParseError> {
        let start = self.x;
        self.x += 1;
        let mut arr = Vec::new();
        let mut nodes: Vec<SyntaxNode> = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(b']') => break,
                Some(_) => {}
            }
            if nodes.last().is_some_and(|prev| prev.separator.is_none()) {
                return Err(self.error(ParseErrorKind::UnexpectedToken));
            }
            let (value, mut node) = self.read_any()?;
            node.separator = self.read_separator()?;
            arr.push(value);
            nodes.push(node);
        }
        self.x += 1;
        let mut node = SyntaxNode::leaf(NodeKind::Array, start, self.x - start);
        node.children = nodes;
        Ok((Value::Array(arr), node))
    }

    fn read_obj(&mut self) -> Result<(Value, SyntaxNode), ParseError> {
        let start = self.x;
        self.x += 1;
        let mut obj = Map::new();
        let mut props: Vec<SyntaxNode> = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(b'}') => break,
                Some(b'"') => {}
                Some(_) => return Err(self.error(ParseErrorKind::UnexpectedToken)),
            }
            if props.last().is_some_and(|prev| prev.separator.is_none()) {
                return Err(self.error(ParseErrorKind::UnexpectedToken));
            }
            let key_start = self.x;
            let key = self.read_key()?;
            let key_node = SyntaxNode::leaf(NodeKind::String, key_start, self.x - key_start);
            self.skip_trivia()?;
            match self.peek() {
                Some(b':') => self.x += 1,
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(_) => return Err(self.error(ParseErrorKind::UnexpectedToken)),
            }
            self.skip_trivia()?;
            let (value, value_node) = self.read_any()?;
            let mut prop =
                SyntaxNode::leaf(NodeKind::Property, key_start, value_node.end() - key_start);
            prop.key = Some(key.clone());
            prop.children = vec![key_node, value_node];
            prop.separator = self.read_separator()?;
            obj.insert(key, value);
            props.push(prop);
        }
        self.x += 1;
        let mut node = SyntaxNode::leaf(NodeKind::Object, start, self.x - start);
        node.children = props;
        Ok((Value::Object(obj), node))
    }

    /// Read a quoted key (without outer quotes in result).
    fn read_key(&mut self) -> Result<String, ParseError> {
        self.read_str()
    }
}

/// Decode a JSON string body (between the quotes) handling escape sequences.
/// Uses serde_json for correctness.
fn decode_json_string(bytes: &[u8]) -> Result<String, serde_json::Error> {
    // Fast path: no backslash
    if !bytes.contains(&b'\\') {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }
    // Wrap in quotes and use serde_json for proper unescaping
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kind_of(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().kind
    }

    #[test]
    fn parses_plain_json() {
        let parsed = parse(r#"{"a": [1, 2.5, "x", true, null], "b": {}}"#).unwrap();
        assert_eq!(parsed.value, json!({"a": [1, 2.5, "x", true, null], "b": {}}));
    }

    #[test]
    fn skips_comments_and_trailing_commas() {
        let text = "// head\n{\n  /* a */ \"a\": 1, // tail\n  \"b\": [1, 2,],\n}\n";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.value, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn records_ranges() {
        let text = r#"{"key": "value"}"#;
        let tree = parse(text).unwrap().tree;
        assert_eq!((tree.offset, tree.length), (0, text.len()));
        let prop = &tree.children[0];
        assert_eq!(prop.key.as_deref(), Some("key"));
        assert_eq!(&text[prop.offset..prop.end()], r#""key": "value""#);
        let value = prop.value().unwrap();
        assert_eq!(&text[value.offset..value.end()], r#""value""#);
    }

    #[test]
    fn records_separators() {
        let text = "[1 , 2, 3]";
        let tree = parse(text).unwrap().tree;
        assert_eq!(tree.children[0].separator, Some(3));
        assert_eq!(tree.children[1].separator, Some(6));
        assert_eq!(tree.children[2].separator, None);
    }

    #[test]
    fn find_accepts_both_index_forms() {
        let text = r#"{"a": [10, {"b": 20}]}"#;
        let tree = parse(text).unwrap().tree;
        let node = tree
            .find(&[PathStep::key("a"), PathStep::key("1"), PathStep::key("b")])
            .unwrap();
        assert_eq!(&text[node.offset..node.end()], "20");
        let node = tree.find(&[PathStep::key("a"), PathStep::Index(0)]).unwrap();
        assert_eq!(&text[node.offset..node.end()], "10");
        assert!(tree.find(&[PathStep::key("a"), PathStep::Index(2)]).is_none());
        assert!(tree.find(&[PathStep::key("a"), PathStep::key("x")]).is_none());
    }

    #[test]
    fn duplicate_keys_resolve_to_last() {
        let text = r#"{"a": 1, "a": 2}"#;
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.value, json!({"a": 2}));
        let node = parsed.tree.find(&[PathStep::key("a")]).unwrap();
        assert_eq!(&text[node.offset..node.end()], "2");
    }

    #[test]
    fn to_value_matches_parse() {
        let text = "{\n  \"s\": \"a\\nb\", // c\n  \"l\": [1, -2e3, false,],\n}";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.tree.to_value(text).unwrap(), parsed.value);
    }

    #[test]
    fn huge_numbers_saturate() {
        let text = "{\"a\": 1e400, \"b\": [-1e400], \"c\": 1e-400}";
        let parsed = parse(text).unwrap();
        assert_eq!(parsed.value, json!({"a": f64::MAX, "b": [-f64::MAX], "c": 0.0}));
        assert_eq!(parsed.tree.to_value(text).unwrap(), parsed.value);
        assert_eq!(kind_of("[01e400]"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind_of("[1.e400]"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind_of("[1e]"), ParseErrorKind::InvalidNumber);
    }

    #[test]
    fn escapes_and_unicode_in_strings() {
        let parsed = parse(r#"["\u00e9\"", "é"]"#).unwrap();
        assert_eq!(parsed.value, json!(["é\"", "é"]));
    }

    #[test]
    fn strips_bom() {
        assert_eq!(parse("\u{feff}[1]").unwrap().value, json!([1]));
    }

    #[test]
    fn scalar_roots_parse() {
        assert_eq!(parse_value(" 42 ").unwrap(), json!(42));
        assert_eq!(parse_value("\"x\"").unwrap(), json!("x"));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(kind_of(""), ParseErrorKind::Empty);
        assert_eq!(kind_of("  // only a comment\n"), ParseErrorKind::Empty);
        assert_eq!(kind_of("{"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind_of("[1 2]"), ParseErrorKind::UnexpectedToken);
        assert_eq!(kind_of("[,]"), ParseErrorKind::UnexpectedToken);
        assert_eq!(kind_of("{a: 1}"), ParseErrorKind::UnexpectedToken);
        assert_eq!(kind_of("/* open"), ParseErrorKind::UnterminatedComment);
        assert_eq!(kind_of("\"abc"), ParseErrorKind::InvalidString);
        assert_eq!(kind_of("\"\\q\""), ParseErrorKind::InvalidString);
        assert_eq!(kind_of("01"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind_of("-"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind_of("{} {}"), ParseErrorKind::TrailingContent);
        assert_eq!(kind_of("nul"), ParseErrorKind::UnexpectedToken);
        assert_eq!(kind_of("truex"), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn error_offsets() {
        let err = parse("{\"a\": 1,, }").unwrap_err();
        assert_eq!(err.offset, 8);
        assert_eq!(err.to_string(), "unexpected token at offset 8");
    }
}
