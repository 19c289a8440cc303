use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw record as returned from the backend, shape varies per provider
pub type RawRecord = serde_json::Value;

/// Tags are plain strings once normalized
pub type Tag = String;

/// Backend resource collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Artists,
    Events,
    Tags,
}

impl ResourceKind {
    /// Path segment of the listing endpoint, also the conventional wrapper field
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Artists => "artists",
            ResourceKind::Events => "events",
            ResourceKind::Tags => "tags",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub image: String,
    pub description: String,
    pub location: String,
    /// Stage name or handle, empty when the provider has none
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub image: String,
    pub tags: Vec<Tag>,
    /// ISO-8601 string, kept as provided
    pub date: String,
    pub time: String,
    pub location: String,
    pub artist: String,
    pub price: f64,
    pub description: String,
}

/// Body of the creation POST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub tags: Vec<Tag>,
    pub artist: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}
