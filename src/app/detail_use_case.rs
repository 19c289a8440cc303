use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::app::ports::ListingSource;
use crate::constants::{DEFAULT_PAGE_TITLE, NO_DESCRIPTION};
use crate::pipeline::normalize::{normalize_event, Fallback};
use crate::types::{Event, RawRecord};

const PAGE_TITLE: Fallback = Fallback::new(&["name", "title"], DEFAULT_PAGE_TITLE);
// The page shows what the record actually carries: no invented date, blank location
const PAGE_DATE: Fallback = Fallback::new(&["date", "startDate"], "");
const PAGE_LOCATION: Fallback = Fallback::new(&["location"], "");

const NOT_FOUND_TITLE: &str = "Event not found";

/// A found event plus the fields the detail page renders from the raw record
#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub event: Event,
    pub title: String,
    pub date: Option<String>,
    pub location: String,
}

impl EventPage {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            event: normalize_event(raw),
            title: page_title(raw),
            date: PAGE_DATE.resolve_opt(raw).filter(|d| !d.trim().is_empty()),
            location: PAGE_LOCATION.resolve(raw),
        }
    }
}

/// Outcome of looking up a single event
#[derive(Debug, Clone, PartialEq)]
pub enum EventDetail {
    Found(EventPage),
    NotFound { id: String },
}

impl EventDetail {
    pub fn title(&self) -> &str {
        match self {
            EventDetail::Found(page) => &page.title,
            EventDetail::NotFound { .. } => NOT_FOUND_TITLE,
        }
    }
}

pub struct EventDetailUseCase {
    source: Arc<dyn ListingSource>,
}

impl EventDetailUseCase {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// Any failure degrades to `NotFound`
    #[instrument(skip(self))]
    pub async fn load(&self, id: &str) -> EventDetail {
        match self.source.fetch_event(id).await {
            Ok(Some(raw)) => {
                let page = EventPage::from_raw(&raw);
                info!("Loaded event '{}'", page.title);
                EventDetail::Found(page)
            }
            Ok(None) => {
                warn!("Event {} not found", id);
                EventDetail::NotFound { id: id.to_string() }
            }
            Err(e) => {
                error!("Error loading event {}: {}", id, e);
                EventDetail::NotFound { id: id.to_string() }
            }
        }
    }
}

/// Document title for an event page, straight from the raw record
pub fn page_title(raw: &RawRecord) -> String {
    PAGE_TITLE.resolve(raw)
}

/// "$ 19.99", or "FREE" for events without a price
pub fn price_label(price: f64) -> String {
    if price > 0.0 {
        format!("$ {price}")
    } else {
        "FREE".to_string()
    }
}

pub fn description_text(event: &Event) -> &str {
    if event.description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        &event.description
    }
}

/// Location line, plus the date in local time when the record has one
pub fn when_and_where(page: &EventPage) -> String {
    let Some(date) = page.date.as_deref() else {
        return page.location.clone();
    };
    let date = match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => date.to_string(),
    };
    if page.location.is_empty() {
        date
    } else {
        format!("{} | {}", page.location, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::fake::FakeSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_found() {
        let source = FakeSource {
            item: Some(json!({"_id": "e1", "title": "Gala", "price": "40"})),
            ..Default::default()
        };
        let detail = EventDetailUseCase::new(Arc::new(source)).load("e1").await;
        assert_eq!(detail.title(), "Gala");

        match detail {
            EventDetail::Found(page) => {
                assert_eq!(page.event.id, "e1");
                assert_eq!(page.event.name, "Gala");
                assert_eq!(page.event.price, 40.0);
                assert_eq!(page.date, None);
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_untitled_record_gets_generic_title() {
        let source = FakeSource {
            item: Some(json!({"_id": "e2"})),
            ..Default::default()
        };
        let detail = EventDetailUseCase::new(Arc::new(source)).load("e2").await;
        assert_eq!(detail.title(), "Event");
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let detail = EventDetailUseCase::new(Arc::new(FakeSource::default()))
            .load("nope")
            .await;
        assert_eq!(detail, EventDetail::NotFound { id: "nope".into() });
        assert_eq!(detail.title(), "Event not found");
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title(&json!({"title": "Gala"})), "Gala");
        assert_eq!(page_title(&json!({"name": "N", "title": "T"})), "N");
        assert_eq!(page_title(&json!({})), "Event");
    }

    #[test]
    fn test_dateless_event_shows_location_only() {
        let page = EventPage::from_raw(&json!({"name": "Gala", "location": "Hall"}));
        assert_eq!(page.date, None);
        assert_eq!(when_and_where(&page), "Hall");

        let page = EventPage::from_raw(&json!({"name": "Gala", "location": "Hall", "date": ""}));
        assert_eq!(when_and_where(&page), "Hall");
    }

    #[test]
    fn test_missing_location_stays_blank() {
        let page = EventPage::from_raw(&json!({"name": "Gala"}));
        assert_eq!(page.location, "");
        assert_eq!(when_and_where(&page), "");

        let page = EventPage::from_raw(&json!({"date": "next week"}));
        assert_eq!(when_and_where(&page), "next week");
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(price_label(19.99), "$ 19.99");
        assert_eq!(price_label(25.0), "$ 25");
        assert_eq!(price_label(0.0), "FREE");

        let page = EventPage::from_raw(&json!({"location": "Hall", "startDate": "next week"}));
        assert_eq!(description_text(&page.event), NO_DESCRIPTION);
        assert_eq!(when_and_where(&page), "Hall | next week");

        let page = EventPage::from_raw(&json!({
            "location": "Hall",
            "date": "2025-06-01T18:00:00Z",
            "description": "Bring snacks"
        }));
        assert_eq!(description_text(&page.event), "Bring snacks");
        assert!(when_and_where(&page).starts_with("Hall | "));
        assert!(when_and_where(&page).ends_with(" PM") || when_and_where(&page).ends_with(" AM"));
    }
}
