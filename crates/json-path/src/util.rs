use crate::types::{Path, PathStep};
use crate::PathError;

/// Unescapes a JSON Pointer path component (`~1` → `/`, `~0` → `~`).
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component (`~` → `~0`, `/` → `~1`).
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into a path.
///
/// Numeral components become `Index` steps, everything else `Key`.
///
/// ```
/// use jsonc_edit_path::{parse_pointer, PathStep};
///
/// assert_eq!(parse_pointer(""), vec![]);
/// assert_eq!(
///     parse_pointer("/list/0/a~1b"),
///     vec![PathStep::key("list"), PathStep::Index(0), PathStep::key("a/b")]
/// );
/// ```
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|component| {
            let step = PathStep::Key(unescape_component(component));
            match step.as_index() {
                Some(i) => PathStep::Index(i),
                None => step,
            }
        })
        .collect()
}

/// Format a path as a JSON Pointer string. The root path is `""`.
pub fn format_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.to_key()));
    }
    out
}

/// Parse a dotted path such as `"server.ports.0"`.
///
/// Empty segments are dropped, so `""`, `"."` and `"a..b"` are all fine.
/// Every segment is a `Key`; numeral keys still address array slots when
/// navigation meets an array.
///
/// ```
/// use jsonc_edit_path::{parse_dotted_path, PathStep};
///
/// assert_eq!(parse_dotted_path("a..b."), vec![PathStep::key("a"), PathStep::key("b")]);
/// assert!(parse_dotted_path("").is_empty());
/// ```
pub fn parse_dotted_path(path: &str) -> Path {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(PathStep::from)
        .collect()
}

/// Format a path with `.` separators.
pub fn format_dotted_path(path: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&step.to_key());
    }
    out
}

/// Check if a path points to the root value.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `prefix` is `path` itself or one of its ancestors.
pub fn is_prefix(prefix: &[PathStep], path: &[PathStep]) -> bool {
    prefix.len() <= path.len() && prefix.iter().zip(path).all(|(a, b)| a.same_as(b))
}

/// Check if `parent` strictly contains `child`.
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && is_prefix(parent, child)
}

/// Check if two paths address the same location.
pub fn is_path_equal(p1: &[PathStep], p2: &[PathStep]) -> bool {
    p1.len() == p2.len() && is_prefix(p1, p2)
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root path.
pub fn parent(path: &[PathStep]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Check if a string represents a valid non-negative integer array index.
///
/// ```
/// use jsonc_edit_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> Path {
        items.iter().map(|s| PathStep::from(*s)).collect()
    }

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b"), "a~b");
        assert_eq!(unescape_component("c~1d"), "c/d");
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b/c"), "a~0b~1c");
    }

    #[test]
    fn test_pointer_roundtrip() {
        for pointer in ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d/1", "/foo///"] {
            assert_eq!(format_pointer(&parse_pointer(pointer)), pointer);
        }
    }

    #[test]
    fn test_pointer_numeral_components_are_indices() {
        assert_eq!(
            parse_pointer("/a/10/01"),
            vec![PathStep::key("a"), PathStep::Index(10), PathStep::key("01")]
        );
    }

    #[test]
    fn test_dotted_roundtrip() {
        let path = parse_dotted_path("server.ports.0");
        assert_eq!(path, keys(&["server", "ports", "0"]));
        assert_eq!(format_dotted_path(&path), "server.ports.0");
    }

    #[test]
    fn test_prefix_and_child() {
        let parent_path = keys(&["a"]);
        let child = vec![PathStep::key("a"), PathStep::Index(0)];
        assert!(is_prefix(&parent_path, &child));
        assert!(is_prefix(&child, &child));
        assert!(is_child(&parent_path, &child));
        assert!(!is_child(&child, &child));
        assert!(!is_child(&child, &parent_path));
        assert!(is_prefix(&keys(&["a", "0"]), &child));
    }

    #[test]
    fn test_is_path_equal_crosses_index_forms() {
        assert!(is_path_equal(&keys(&["a", "1"]), &[PathStep::key("a"), PathStep::Index(1)]));
        assert!(!is_path_equal(&keys(&["a"]), &keys(&["a", "b"])));
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent(&keys(&["foo", "bar"])).unwrap(), keys(&["foo"]));
        assert_eq!(parent(&keys(&["foo"])).unwrap(), Path::new());
        assert!(matches!(parent(&[]), Err(PathError::NoParent)));
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(&[]));
        assert!(!is_root(&keys(&["x"])));
    }
}
