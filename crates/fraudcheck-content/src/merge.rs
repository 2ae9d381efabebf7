//! Overlay of stored partial records onto compiled defaults

use serde_json::{Map, Value};

/// Overlays `stored` onto `default`.
///
/// Top-level fields present in `stored` replace the default's. Fields named
/// in `nested` are merged one level deeper, so a stored `hero` that only
/// carries a title keeps the default subtitle. A `null` stands for a missing
/// field. A `stored` value that is not an object contributes nothing.
pub fn overlay(default: Value, stored: Value, nested: &[&str]) -> Value {
    let (mut base, stored) = match (default, stored) {
        (Value::Object(base), Value::Object(stored)) => (base, stored),
        (default, _) => return default,
    };

    for (key, value) in stored {
        if value.is_null() {
            continue;
        }

        if nested.contains(&key.as_str()) {
            if let (Some(Value::Object(inner)), Value::Object(patch)) = (base.get_mut(&key), &value)
            {
                merge_fields(inner, patch);
                continue;
            }
        }

        base.insert(key, value);
    }

    Value::Object(base)
}

fn merge_fields(inner: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (field, value) in patch {
        if !value.is_null() {
            inner.insert(field.clone(), value.clone());
        }
    }
}
