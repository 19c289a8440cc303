use serde_json::Value;

use super::fallback::{first_present, render_text};
use crate::pipeline::extract::extract_list;
use crate::types::{RawRecord, ResourceKind, Tag};

/// Keys tried, in order, when a tag arrives as an object
const TAG_TEXT_KEYS: &[&str] = &["name", "text", "tag"];

/// Reduce one tag item to its display text. Empty results are dropped.
pub fn normalize_tag(raw: &Value) -> Option<Tag> {
    let text = match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(map) => first_present(raw, TAG_TEXT_KEYS)
            .map(render_text)
            .or_else(|| {
                // `value` only counts when it is a non-empty string
                map.get("value")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| raw.to_string()),
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Normalize a tags listing response, keeping source order
pub fn normalize_tags(data: RawRecord) -> Vec<Tag> {
    extract_list(data, ResourceKind::Tags)
        .iter()
        .filter_map(normalize_tag)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_unchanged() {
        assert_eq!(normalize_tag(&json!("Live Music")), Some("Live Music".to_string()));
        assert_eq!(normalize_tag(&json!("  spaced  ")), Some("  spaced  ".to_string()));
    }

    #[test]
    fn test_object_key_precedence() {
        assert_eq!(
            normalize_tag(&json!({"name": "Pop", "text": "x", "tag": "y"})),
            Some("Pop".to_string())
        );
        assert_eq!(
            normalize_tag(&json!({"text": "Jazz", "tag": "y"})),
            Some("Jazz".to_string())
        );
        assert_eq!(normalize_tag(&json!({"tag": "Folk"})), Some("Folk".to_string()));
        assert_eq!(normalize_tag(&json!({"value": "Soul"})), Some("Soul".to_string()));
    }

    #[test]
    fn test_object_without_known_keys_renders_json() {
        assert_eq!(
            normalize_tag(&json!({"id": 7, "label": "Blues"})),
            Some(r#"{"id":7,"label":"Blues"}"#.to_string())
        );
        // a non-string `value` is not used
        assert_eq!(
            normalize_tag(&json!({"value": 3})),
            Some(r#"{"value":3}"#.to_string())
        );
    }

    #[test]
    fn test_empty_results_dropped() {
        assert_eq!(normalize_tag(&Value::Null), None);
        assert_eq!(normalize_tag(&json!("")), None);
        assert_eq!(normalize_tag(&json!({"name": ""})), None);
    }

    #[test]
    fn test_other_scalars_rendered() {
        assert_eq!(normalize_tag(&json!(12)), Some("12".to_string()));
        assert_eq!(normalize_tag(&json!(false)), Some("false".to_string()));
    }

    #[test]
    fn test_normalize_tags_wrapper() {
        let data = json!({ "tags": ["Rock", {"name": "Pop"}, null, ""] });
        assert_eq!(normalize_tags(data), vec!["Rock", "Pop"]);
    }
}
