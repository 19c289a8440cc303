use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::EVENTS_ROUTE;
use crate::types::Event;

/// Origin used only to let `Url` parse and encode route-relative links
const LINK_ORIGIN: &str = "http://localhost";

/// Query-parameter driven narrowing of an events listing.
///
/// Both predicates are combined with AND: an event must carry the tag and be
/// performed by the artist when both are given. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub tag: Option<String>,
    pub artist: Option<String>,
}

impl EventFilter {
    pub fn new(tag: Option<String>, artist: Option<String>) -> Self {
        Self {
            tag: non_blank(tag),
            artist: non_blank(artist),
        }
    }

    /// Parse `tag=...&artist=...` (leading `?` optional). The first occurrence
    /// of each parameter wins; unknown parameters are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let url = match Url::parse(&format!("{LINK_ORIGIN}{EVENTS_ROUTE}?{query}")) {
            Ok(url) => url,
            Err(e) => {
                warn!("Ignoring unparseable query '{}': {}", query, e);
                return Self::default();
            }
        };

        let first = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        Self::new(first("tag"), first("artist"))
    }

    /// Replace missing parameters with the ones from `other`
    pub fn or(self, other: EventFilter) -> Self {
        Self {
            tag: self.tag.or(other.tag),
            artist: self.artist.or(other.artist),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.artist.is_none()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(tag) = &self.tag {
            let wanted = tag.to_lowercase();
            if !event.tags.iter().any(|t| t.to_lowercase() == wanted) {
                return false;
            }
        }
        if let Some(artist) = &self.artist {
            if event.artist.to_lowercase() != artist.to_lowercase() {
                return false;
            }
        }
        true
    }

    /// Keep matching events in their original order
    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        if self.is_empty() {
            return events;
        }
        events.into_iter().filter(|e| self.matches(e)).collect()
    }

    /// Banner lines describing the active filters
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(tag) = &self.tag {
            lines.push(format!("Showing events tagged: {tag}"));
        }
        if let Some(artist) = &self.artist {
            lines.push(format!("Showing events by: {artist}"));
        }
        lines
    }
}

/// Link to the events listing filtered by one tag, e.g. `/events?tag=Live+Music`
pub fn tag_link(tag: &str) -> String {
    match Url::parse(&format!("{LINK_ORIGIN}{EVENTS_ROUTE}")) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("tag", tag);
            match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            }
        }
        Err(_) => EVENTS_ROUTE.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
