use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::fallback::{coerce_price, first_present, Fallback};
use super::tag::normalize_tag;
use crate::constants::{
    DEFAULT_EVENT_TIME, EVENT_IMAGE_PLACEHOLDER, UNKNOWN_ARTIST, UNKNOWN_LOCATION, UNTITLED_EVENT,
};
use crate::pipeline::extract::extract_list;
use crate::types::{Event, RawRecord, ResourceKind, Tag};

const ID: Fallback = Fallback::new(&["id", "_id"], "");
const NAME: Fallback = Fallback::new(&["name", "title"], UNTITLED_EVENT);
const IMAGE: Fallback = Fallback::new(&["image"], EVENT_IMAGE_PLACEHOLDER);
const DATE: Fallback = Fallback::new(&["date", "startDate"], "");
const TIME: Fallback = Fallback::new(&["time"], DEFAULT_EVENT_TIME);
const LOCATION: Fallback = Fallback::new(&["location"], UNKNOWN_LOCATION);
const ARTIST: Fallback = Fallback::new(&["artist", "performer"], UNKNOWN_ARTIST);
const DESCRIPTION: Fallback = Fallback::new(&["description", "details", "info"], "");

const TAGS_KEY: &str = "tags";
const PRICE_KEY: &str = "price";

pub fn normalize_event(raw: &RawRecord) -> Event {
    let name = NAME.resolve(raw);
    // Records without any id are keyed by their name
    let id = ID.resolve_opt(raw).unwrap_or_else(|| name.clone());
    let date = DATE.resolve_opt(raw).unwrap_or_else(now_iso8601);

    Event {
        id,
        name,
        image: IMAGE.resolve(raw),
        tags: event_tags(raw),
        date,
        time: TIME.resolve(raw),
        location: LOCATION.resolve(raw),
        artist: ARTIST.resolve(raw),
        price: coerce_price(first_present(raw, &[PRICE_KEY])),
        description: DESCRIPTION.resolve(raw),
    }
}

/// Normalize an events listing response, keeping source order
pub fn normalize_events(data: RawRecord) -> Vec<Event> {
    extract_list(data, ResourceKind::Events)
        .iter()
        .map(normalize_event)
        .collect()
}

/// A lone scalar tag becomes a one-element list
fn event_tags(raw: &RawRecord) -> Vec<Tag> {
    match first_present(raw, &[TAGS_KEY]) {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_tag).collect(),
        Some(single) => normalize_tag(single).into_iter().collect(),
        None => Vec::new(),
    }
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn test_full_record() {
        let raw = json!({
            "id": 101,
            "title": "Jazz Night",
            "image": "https://cdn.example/jazz.jpg",
            "tags": ["Jazz", "Live"],
            "startDate": "2025-09-01T19:30:00.000Z",
            "time": "7:30 PM",
            "location": "Blue Moon Tavern",
            "performer": "The Trio",
            "price": "25",
            "details": "Three sets"
        });

        let event = normalize_event(&raw);
        assert_eq!(event.id, "101");
        assert_eq!(event.name, "Jazz Night");
        assert_eq!(event.tags, vec!["Jazz", "Live"]);
        assert_eq!(event.date, "2025-09-01T19:30:00.000Z");
        assert_eq!(event.time, "7:30 PM");
        assert_eq!(event.location, "Blue Moon Tavern");
        assert_eq!(event.artist, "The Trio");
        assert_eq!(event.price, 25.0);
        assert_eq!(event.description, "Three sets");
    }

    #[test]
    fn test_id_fallbacks() {
        assert_eq!(normalize_event(&json!({"_id": "abc", "name": "n"})).id, "abc");
        assert_eq!(normalize_event(&json!({"name": "Open Mic"})).id, "Open Mic");
        assert_eq!(normalize_event(&json!({})).id, UNTITLED_EVENT);
    }

    #[test]
    fn test_defaults() {
        let event = normalize_event(&json!({"unrelated": true}));
        assert_eq!(event.name, UNTITLED_EVENT);
        assert_eq!(event.image, EVENT_IMAGE_PLACEHOLDER);
        assert!(event.tags.is_empty());
        assert_eq!(event.time, DEFAULT_EVENT_TIME);
        assert_eq!(event.location, UNKNOWN_LOCATION);
        assert_eq!(event.artist, UNKNOWN_ARTIST);
        assert_eq!(event.price, 0.0);
        assert!(event.description.is_empty());
        assert!(DateTime::parse_from_rfc3339(&event.date).is_ok());
        assert!(event.date.ends_with('Z'));
    }

    #[test]
    fn test_scalar_tag_wrapped() {
        let event = normalize_event(&json!({"tags": "Comedy"}));
        assert_eq!(event.tags, vec!["Comedy"]);

        let event = normalize_event(&json!({"tags": ""}));
        assert!(event.tags.is_empty());
    }

    #[test]
    fn test_object_tags_reduced_and_empties_dropped() {
        let event = normalize_event(&json!({"tags": [{"name": "Rock"}, null, "", "Indie"]}));
        assert_eq!(event.tags, vec!["Rock", "Indie"]);
    }

    #[test]
    fn test_listing_from_plain_array() {
        let events = normalize_events(json!([{"name": "a"}, {"name": "b"}]));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].name, "b");
    }
}
