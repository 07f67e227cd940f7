use serde_json::Value;

use crate::types::PathStep;

/// Get a value from a JSON document by path.
///
/// Arrays accept native indices and numeral keys; objects accept any step,
/// with indices looked up by their decimal key. Returns `None` when a step
/// is missing or lands on a scalar.
///
/// ```
/// use jsonc_edit_path::{get, parse_dotted_path};
/// use serde_json::json;
///
/// let doc = json!({"servers": [{"port": 80}]});
/// assert_eq!(get(&doc, &parse_dotted_path("servers.0.port")), Some(&json!(80)));
/// assert_eq!(get(&doc, &parse_dotted_path("servers.1")), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get(step.as_index()?)?,
            Value::Object(map) => map.get(&*step.to_key())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference to a value in a JSON document by path.
pub fn get_mut<'a>(val: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => arr.get_mut(step.as_index()?)?,
            Value::Object(map) => map.get_mut(&*step.to_key())?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_root() {
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_mixed_steps() {
        let doc = json!({"a": [10, {"b": true}]});
        assert_eq!(get(&doc, &[PathStep::key("a"), PathStep::Index(0)]), Some(&json!(10)));
        assert_eq!(
            get(&doc, &[PathStep::key("a"), PathStep::key("1"), PathStep::key("b")]),
            Some(&json!(true))
        );
    }

    #[test]
    fn test_get_index_on_object_uses_decimal_key() {
        let doc = json!({"0": "zero"});
        assert_eq!(get(&doc, &[PathStep::Index(0)]), Some(&json!("zero")));
    }

    #[test]
    fn test_get_non_numeral_key_on_array() {
        let doc = json!([1, 2]);
        assert_eq!(get(&doc, &[PathStep::key("x")]), None);
        assert_eq!(get(&doc, &[PathStep::key("-")]), None);
    }

    #[test]
    fn test_get_through_scalar() {
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, &[PathStep::key("a"), PathStep::key("b")]), None);
    }

    #[test]
    fn test_get_mut_writes_in_place() {
        let mut doc = json!({"a": [1, 2]});
        *get_mut(&mut doc, &[PathStep::key("a"), PathStep::Index(1)]).unwrap() = json!(5);
        assert_eq!(doc, json!({"a": [1, 5]}));
    }
}
