//! Deep merge over JSON trees.
//!
//! A key is merged recursively only when both sides hold objects. Any other
//! combination (array, string, number, bool, null) replaces the destination
//! wholesale, so a three-color override fully replaces a twelve-color default
//! rather than being mixed element by element.

use serde_json::{Map, Value};

/// Merge `src` on top of `dst`, returning the combined tree.
///
/// `dst` is taken by value so callers decide whether to clone; defaults
/// shared across sessions must be cloned before merging.
///
/// ```
/// use serde_json::json;
/// use tincture::merge::merge_deep;
///
/// let merged = merge_deep(
///     json!({"bar": {"width": 20, "gap": 4}, "colors": ["#a", "#b", "#c"]}),
///     &json!({"bar": {"width": 32}, "colors": ["#x"]}),
/// );
/// assert_eq!(merged, json!({"bar": {"width": 32, "gap": 4}, "colors": ["#x"]}));
/// ```
pub fn merge_deep(dst: Value, src: &Value) -> Value {
    match (dst, src) {
        (Value::Object(mut dst_map), Value::Object(src_map)) => {
            merge_maps(&mut dst_map, src_map);
            Value::Object(dst_map)
        }
        (_, src) => src.clone(),
    }
}

fn merge_maps(dst: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, src_value) in src {
        let both_objects = src_value.is_object() && dst.get(key).is_some_and(Value::is_object);
        if both_objects {
            if let Some(dst_value) = dst.get_mut(key) {
                let taken = std::mem::take(dst_value);
                *dst_value = merge_deep(taken, src_value);
            }
        } else {
            dst.insert(key.clone(), src_value.clone());
        }
    }
}

/// Merge a sequence of override layers onto a base, left to right.
pub fn merge_layers<'a>(base: Value, layers: impl IntoIterator<Item = &'a Value>) -> Value {
    layers
        .into_iter()
        .fold(base, |acc, layer| merge_deep(acc, layer))
}
