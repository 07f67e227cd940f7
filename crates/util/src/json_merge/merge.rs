use serde_json::Value;

/// Fill the gaps of `found` from `defaults`.
///
/// When both values are objects, every key of `found` wins and keys only
/// present in `defaults` are added; objects nested on both sides are merged
/// the same way, at every level. Anything else (arrays, scalars, or a kind
/// mismatch) returns `found` untouched.
///
/// ```
/// use serde_json::json;
/// use jsonc_edit_util::fill_defaults;
///
/// let found = json!({"a": {"x": 1}});
/// let defaults = json!({"a": {"x": 0, "y": 0}, "b": true});
/// assert_eq!(
///     fill_defaults(found, &defaults),
///     json!({"a": {"x": 1, "y": 0}, "b": true})
/// );
/// ```
pub fn fill_defaults(found: Value, defaults: &Value) -> Value {
    match (found, defaults) {
        (Value::Object(mut map), Value::Object(default_map)) => {
            for (key, default_val) in default_map {
                match map.get_mut(key) {
                    Some(existing) => {
                        if existing.is_object() && default_val.is_object() {
                            let taken = existing.take();
                            *existing = fill_defaults(taken, default_val);
                        }
                    }
                    None => {
                        map.insert(key.clone(), default_val.clone());
                    }
                }
            }
            Value::Object(map)
        }
        (found, _) => found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_come_from_defaults() {
        let out = fill_defaults(json!({"a": 1}), &json!({"a": 0, "b": 2}));
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn nested_objects_merge_at_every_level() {
        let found = json!({"a": {"b": {"c": 1}}});
        let defaults = json!({"a": {"b": {"c": 0, "d": 0}, "e": 0}});
        assert_eq!(
            fill_defaults(found, &defaults),
            json!({"a": {"b": {"c": 1, "d": 0}, "e": 0}})
        );
    }

    #[test]
    fn arrays_are_never_merged() {
        let out = fill_defaults(json!([1]), &json!([1, 2, 3]));
        assert_eq!(out, json!([1]));
        let out = fill_defaults(json!({"list": [1]}), &json!({"list": [1, 2]}));
        assert_eq!(out, json!({"list": [1]}));
    }

    #[test]
    fn found_value_wins_on_kind_mismatch() {
        let out = fill_defaults(json!({"a": "text"}), &json!({"a": {"x": 1}}));
        assert_eq!(out, json!({"a": "text"}));
    }
}
