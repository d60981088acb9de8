//! Value-level layer merging
//!
//! Config layers merge at the JSON-value level before the typed model is
//! built:
//! - objects: deep-merge by key
//! - arrays: REPLACE (last wins entirely, so a project's `overrides` list
//!   replaces the built-in list rather than appending to it)
//! - scalars: override (last wins)

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        // Arrays replace, no concatenation
        (Value::Array(_), overlay @ Value::Array(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge layers in order; the first is the base, the last has the highest
/// precedence.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}
