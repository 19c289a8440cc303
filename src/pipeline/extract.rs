use serde_json::Value;
use tracing::debug;

use crate::types::{RawRecord, ResourceKind};

/// Pull the list of raw items out of a listing response.
///
/// Precedence:
/// 1. the document itself when it is an array
/// 2. the wrapper field named after the resource (`artists`, `events`, `tags`) when it is an array
/// 3. every value of the object flattened one level, falsy entries dropped
///
/// Anything else (null, a bare scalar) yields nothing.
pub fn extract_list(data: RawRecord, kind: ResourceKind) -> Vec<RawRecord> {
    match data {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapper = kind.as_str();
            if matches!(map.get(wrapper), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = map.remove(wrapper) {
                    return items;
                }
            }

            debug!(
                "No '{}' array in response, flattening {} top-level values",
                wrapper,
                map.len()
            );
            let mut flattened = Vec::new();
            for (_, value) in map {
                match value {
                    Value::Array(items) => flattened.extend(items),
                    other => flattened.push(other),
                }
            }
            flattened.retain(is_truthy);
            flattened
        }
        _ => Vec::new(),
    }
}

/// Falsy in the JSON sense: null, false, zero and the empty string
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
