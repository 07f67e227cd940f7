use serde_json::{Map, Value};

use crate::types::PathStep;
use crate::util::format_dotted_path;
use crate::PathError;

/// Write `new` at `path`, creating whatever is missing on the way.
///
/// A missing or `null` intermediate becomes an array when the step that
/// addresses into it is a native [`PathStep::Index`], and an object
/// otherwise. Arrays are padded with `null` up to the target slot.
///
/// # Errors
///
/// - [`PathError::NotAContainer`] when a step lands on a string, number or
///   boolean.
/// - [`PathError::InvalidIndex`] when a non-numeral key addresses an array.
///
/// ```
/// use jsonc_edit_path::{set, PathStep};
/// use serde_json::json;
///
/// let mut doc = json!({});
/// set(&mut doc, &[PathStep::key("a"), PathStep::Index(1)], json!(true)).unwrap();
/// assert_eq!(doc, json!({"a": [null, true]}));
/// ```
pub fn set(val: &mut Value, path: &[PathStep], new: Value) -> Result<(), PathError> {
    let mut current = val;
    for (depth, step) in path.iter().enumerate() {
        if current.is_null() {
            *current = match step {
                PathStep::Index(_) => Value::Array(Vec::new()),
                PathStep::Key(_) => Value::Object(Map::new()),
            };
        }
        current = match current {
            Value::Array(arr) => {
                let idx = step
                    .as_index()
                    .ok_or_else(|| PathError::InvalidIndex(step.to_string()))?;
                if arr.len() <= idx {
                    arr.resize(idx + 1, Value::Null);
                }
                &mut arr[idx]
            }
            Value::Object(map) => map.entry(step.to_key().into_owned()).or_insert(Value::Null),
            _ => return Err(PathError::NotAContainer(format_dotted_path(&path[..depth]))),
        };
    }
    *current = new;
    Ok(())
}

/// Remove the value at `path` and return it.
///
/// Array elements after the removed slot shift down. Object keys keep their
/// relative order. Returns `None` when nothing lives at `path`; the root can
/// not be removed.
pub fn remove(val: &mut Value, path: &[PathStep]) -> Option<Value> {
    let (last, init) = path.split_last()?;
    match crate::get::get_mut(val, init)? {
        Value::Array(arr) => {
            let idx = last.as_index()?;
            (idx < arr.len()).then(|| arr.remove(idx))
        }
        Value::Object(map) => map.shift_remove(&*last.to_key()),
        _ => None,
    }
}
