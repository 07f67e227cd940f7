//! Path-addressed reads and writes over a whole document.

use jsonc_edit_path::{format_dotted_path, parse_dotted_path, validate_path, Path, PathStep};
use jsonc_edit_util::{fill_defaults, ValueKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::{Entry, JsoncDocument};
use crate::error::DocumentError;

/// Anything that names a location in a document.
///
/// Strings are dotted paths (`"a.b.0"`); empty segments are ignored.
pub trait ToPath {
    fn to_path(&self) -> Path;
}

impl ToPath for str {
    fn to_path(&self) -> Path {
        parse_dotted_path(self)
    }
}

impl ToPath for String {
    fn to_path(&self) -> Path {
        parse_dotted_path(self)
    }
}

impl ToPath for [PathStep] {
    fn to_path(&self) -> Path {
        self.to_vec()
    }
}

impl ToPath for Vec<PathStep> {
    fn to_path(&self) -> Path {
        self.clone()
    }
}

impl<T: ToPath + ?Sized> ToPath for &T {
    fn to_path(&self) -> Path {
        (**self).to_path()
    }
}

/// Wrap `value` in one object per step.
fn nest_objects(steps: &[PathStep], value: Value) -> Value {
    steps.iter().rev().fold(value, |inner, step| {
        let mut map = Map::new();
        map.insert(step.to_key().into_owned(), inner);
        Value::Object(map)
    })
}

impl JsoncDocument {
    /// Current value at `path`, or `None` if any step is missing.
    pub fn lookup(&self, path: impl ToPath) -> Option<Value> {
        let path = path.to_path();
        let mut id = self.root();
        for (i, step) in path.iter().enumerate() {
            match self.get(id, step.clone())? {
                Entry::Node(child) => id = child,
                Entry::Value(value) => return jsonc_edit_path::get(value, &path[i + 1..]).cloned(),
            }
        }
        Some(self.materialize(id))
    }

    /// Read `path`, falling back to `default`.
    ///
    /// A missing value, or one of a different kind than `default`, yields
    /// `default`. Found objects are completed from `default` at every level.
    /// A `null` default accepts whatever is found.
    pub fn extract(&self, path: impl ToPath, default: Value) -> Value {
        let Some(found) = self.lookup(path) else {
            return default;
        };
        if default.is_null() {
            return found;
        }
        if ValueKind::of(&found) != ValueKind::of(&default) {
            return default;
        }
        fill_defaults(found, &default)
    }

    /// [`extract`](Self::extract) into a typed value.
    pub fn extract_as<T>(&self, path: impl ToPath, default: T) -> Result<T, DocumentError>
    where
        T: Serialize + DeserializeOwned,
    {
        let default =
            serde_json::to_value(default).map_err(|err| DocumentError::Convert(err.to_string()))?;
        serde_json::from_value(self.extract(path, default))
            .map_err(|err| DocumentError::Convert(err.to_string()))
    }

    /// Write `value` at `path`, creating missing intermediate objects.
    ///
    /// A `null` intermediate is replaced by an object. Any other scalar on
    /// the way is an error.
    pub fn update(&mut self, path: impl ToPath, value: Value) -> Result<(), DocumentError> {
        let path = path.to_path();
        validate_path(&path)?;
        let Some((last, init)) = path.split_last() else {
            return Err(DocumentError::EmptyPath);
        };
        let mut id = self.root();
        for (i, step) in init.iter().enumerate() {
            match self.get(id, step.clone()) {
                Some(Entry::Node(child)) => id = child,
                None | Some(Entry::Value(Value::Null)) => {
                    return self.set(id, step.clone(), nest_objects(&path[i + 1..], value));
                }
                Some(Entry::Value(_)) => {
                    return Err(DocumentError::ParentNotObject(format_dotted_path(&path[..=i])));
                }
            }
        }
        self.set(id, last.clone(), value)
    }

    /// Delete the value at `path`. Returns whether anything was removed.
    pub fn remove(&mut self, path: impl ToPath) -> Result<bool, DocumentError> {
        let path = path.to_path();
        validate_path(&path)?;
        let Some((last, init)) = path.split_last() else {
            return Err(DocumentError::EmptyPath);
        };
        let mut id = self.root();
        for step in init {
            match self.get(id, step.clone()) {
                Some(Entry::Node(child)) => id = child,
                _ => return Ok(false),
            }
        }
        self.delete(id, last.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn doc(text: &str) -> JsoncDocument {
        JsoncDocument::parse(text).unwrap()
    }

    #[test]
    fn dotted_paths_skip_empty_segments() {
        assert_eq!("a..b.".to_path(), vec![PathStep::key("a"), PathStep::key("b")]);
        assert!("".to_path().is_empty());
    }

    #[test]
    fn lookup_walks_nodes_and_plain_values() {
        let mut d = doc(r#"{"a": {"b": [1, {"c": 2}]}}"#);
        assert_eq!(d.lookup("a.b.1.c"), Some(json!(2)));
        assert_eq!(d.lookup("a.b.5"), None);
        assert_eq!(d.lookup("a.b.x"), None);
        d.update("a.n", json!({"deep": [true]})).unwrap();
        assert_eq!(d.lookup("a.n.deep.0"), Some(json!(true)));
        assert_eq!(d.lookup(""), Some(d.materialize(d.root())));
    }

    #[test]
    fn extract_returns_default_when_missing() {
        let d = doc("{}");
        let default = json!({"x": 1, "y": [1]});
        assert_eq!(d.extract("a.b.c", default.clone()), default);
    }

    #[test]
    fn extract_returns_default_on_kind_mismatch() {
        let d = doc(r#"{"a": "text", "n": 1.5}"#);
        assert_eq!(d.extract("a", json!(0)), json!(0));
        assert_eq!(d.extract("n", json!(0)), json!(1.5));
        assert_eq!(d.extract("a", Value::Null), json!("text"));
    }

    #[test]
    fn extract_fills_objects_deeply() {
        let d = doc(r#"{"a": {"b": {"c": {"x": 1, "nested": {"p": 1}}}}}"#);
        let default = json!({"x": 0, "y": 0, "nested": {"p": 0, "q": 0}});
        assert_eq!(
            d.extract("a.b.c", default),
            json!({"x": 1, "nested": {"p": 1, "q": 0}, "y": 0})
        );
    }

    #[test]
    fn extract_leaves_arrays_alone() {
        let d = doc(r#"{"l": [1]}"#);
        assert_eq!(d.extract("l", json!([1, 2, 3])), json!([1]));
    }

    #[test]
    fn extract_as_deserializes() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Server {
            host: String,
            port: u16,
        }
        let d = doc(r#"{"server": {"port": 8080}}"#);
        let server = d
            .extract_as(
                "server",
                Server {
                    host: "localhost".into(),
                    port: 80,
                },
            )
            .unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".into(),
                port: 8080
            }
        );
    }

    #[test]
    fn update_then_extract() {
        let mut d = doc(r#"{"a": {"b": 1}, "s": null}"#);
        d.update("a.b", json!(2)).unwrap();
        d.update("x.y.z", json!([1])).unwrap();
        d.update("s.t", json!(true)).unwrap();
        assert_eq!(d.extract("a.b", json!(0)), json!(2));
        assert_eq!(d.extract("x.y.z", json!([])), json!([1]));
        assert_eq!(d.extract("s", json!({})), json!({"t": true}));
    }

    #[test]
    fn update_writes_inside_changed_values() {
        let mut d = doc(r#"{"a": 1}"#);
        d.update("o", json!({"p": {}, "l": [0]})).unwrap();
        d.update("o.p.q", json!(1)).unwrap();
        d.update("o.l.2", json!(2)).unwrap();
        assert!(d.remove("o.l.0").unwrap());
        assert_eq!(d.lookup("o"), Some(json!({"p": {"q": 1}, "l": [null, 2]})));
        assert_eq!(d.diff().changes.len(), 1);
        assert_eq!(
            d.to_string(),
            "{\"a\": 1, \"o\": {\"p\": {\"q\": 1}, \"l\": [null, 2]}}\n"
        );
    }

    #[test]
    fn update_rejects_bad_paths() {
        let mut d = doc(r#"{"a": 1, "l": [1]}"#);
        assert_eq!(d.update("", json!(1)), Err(DocumentError::EmptyPath));
        assert_eq!(d.update("..", json!(1)), Err(DocumentError::EmptyPath));
        assert_eq!(
            d.update("a.b.c", json!(1)),
            Err(DocumentError::ParentNotObject("a".into()))
        );
        assert_eq!(
            d.update("l.x", json!(1)),
            Err(DocumentError::InvalidIndex("x".into()))
        );
        let deep = vec!["k"; 300].join(".");
        assert_eq!(
            d.update(deep.as_str(), json!(1)),
            Err(DocumentError::Path(jsonc_edit_path::PathError::PathTooLong))
        );
    }

    #[test]
    fn update_serializes_in_place() {
        let mut d = doc("{\n  // keep\n  \"a\": {\n    \"b\": 1 // one\n  }\n}\n");
        d.update("a.b", json!(2)).unwrap();
        d.update("a.c", json!("x")).unwrap();
        assert_eq!(
            d.to_string(),
            "{\n  // keep\n  \"a\": {\n    \"b\": 2, // one\n    \"c\": \"x\"\n  }\n}\n"
        );
    }

    #[test]
    fn remove_by_path() {
        let mut d = doc(r#"{"a": {"b": 1, "c": 2}, "v": 1}"#);
        assert!(d.remove("a.b").unwrap());
        assert!(!d.remove("a.b").unwrap());
        assert!(!d.remove("v.x").unwrap());
        d.update("o", json!({"p": 1, "q": 2})).unwrap();
        assert!(d.remove("o.p").unwrap());
        assert_eq!(d.materialize(d.root()), json!({"a": {"c": 2}, "v": 1, "o": {"q": 2}}));
        assert_eq!(d.remove(""), Err(DocumentError::EmptyPath));
    }
}
