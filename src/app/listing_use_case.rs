use std::sync::Arc;
use tracing::{info, instrument};

use crate::app::ports::ListingSource;
use crate::app::view::ListView;
use crate::error::Result;
use crate::pipeline::{normalize_artists, normalize_events, normalize_tags, EventFilter};
use crate::types::{Artist, Event, ResourceKind, Tag};

/// Use case behind the artists, events and tags listings
pub struct ListingUseCase {
    source: Arc<dyn ListingSource>,
}

impl ListingUseCase {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self))]
    pub async fn artists(&self) -> Result<Vec<Artist>> {
        let data = self.source.fetch_listing(ResourceKind::Artists).await?;
        let artists = normalize_artists(data);
        info!("Loaded {} artists", artists.len());
        Ok(artists)
    }

    #[instrument(skip(self))]
    pub async fn events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let data = self.source.fetch_listing(ResourceKind::Events).await?;
        let events = normalize_events(data);
        let total = events.len();
        let events = filter.apply(events);
        info!("Loaded {} events ({} after filtering)", total, events.len());
        Ok(events)
    }

    #[instrument(skip(self))]
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        let data = self.source.fetch_listing(ResourceKind::Tags).await?;
        let tags = normalize_tags(data);
        info!("Loaded {} tags", tags.len());
        Ok(tags)
    }

    /// Load artists into `view`; false when the result arrived for an abandoned request
    pub async fn refresh_artists(&self, view: &mut ListView<Artist>) -> bool {
        let ticket = view.begin();
        let outcome = self.artists().await;
        view.apply(ticket, outcome)
    }

    pub async fn refresh_events(&self, view: &mut ListView<Event>, filter: &EventFilter) -> bool {
        let ticket = view.begin();
        let outcome = self.events(filter).await;
        view.apply(ticket, outcome)
    }

    pub async fn refresh_tags(&self, view: &mut ListView<Tag>) -> bool {
        let ticket = view.begin();
        let outcome = self.tags().await;
        view.apply(ticket, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::fake::FakeSource;
    use crate::constants::{ARTISTS_LOAD_FAILED, EVENTS_LOAD_FAILED, TAGS_LOAD_FAILED};
    use serde_json::json;

    fn use_case(source: FakeSource) -> ListingUseCase {
        ListingUseCase::new(Arc::new(source))
    }

    #[tokio::test]
    async fn test_events_filtered_by_tag() {
        let source = FakeSource::with_listing(json!([
            {"id": "1", "name": "Gig", "tags": ["music", "live"], "artist": "Alice Johnson"},
            {"id": "2", "name": "Talk", "tags": ["tech"], "artist": "Bob"}
        ]));
        let filter = EventFilter::new(Some("Music".into()), None);

        let events = use_case(source).events(&filter).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
    }

    #[tokio::test]
    async fn test_refresh_events_failure_surfaces_message() {
        let mut view = ListView::new(EVENTS_LOAD_FAILED);
        let applied = use_case(FakeSource::default())
            .refresh_events(&mut view, &EventFilter::default())
            .await;

        assert!(applied);
        assert!(view.items().is_empty());
        assert_eq!(view.error(), Some("Failed to fetch events: 503"));
    }

    #[tokio::test]
    async fn test_refresh_artists_and_tags() {
        let mut artists = ListView::new(ARTISTS_LOAD_FAILED);
        let source = FakeSource::with_listing(json!({"artists": [{"fullName": "Alice"}]}));
        assert!(use_case(source).refresh_artists(&mut artists).await);
        assert_eq!(artists.items()[0].name, "Alice");

        let mut tags = ListView::new(TAGS_LOAD_FAILED);
        let source = FakeSource::with_listing(json!({"tags": ["Rock", {"name": "Pop"}, null, ""]}));
        assert!(use_case(source).refresh_tags(&mut tags).await);
        assert_eq!(tags.items(), &["Rock".to_string(), "Pop".to_string()]);
    }

    #[tokio::test]
    async fn test_teardown_mid_flight_discards_result() {
        let mut view = ListView::new(TAGS_LOAD_FAILED);
        let source = FakeSource {
            listing: Some(json!(["Rock"])),
            teardown_during_fetch: Some(view.guard()),
            ..Default::default()
        };

        let applied = use_case(source).refresh_tags(&mut view).await;
        assert!(!applied);
        assert!(view.items().is_empty());
    }
}
