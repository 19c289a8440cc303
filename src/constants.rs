/// Backend and fallback constants shared by the client, the pipeline and the CLI

// Backend
pub const DEFAULT_API_BASE: &str = "https://qevent-backend.labs.crio.do";
pub const DEFAULT_CONFIG_FILE: &str = "qevent.toml";

// Environment overrides
pub const ENV_API_BASE: &str = "QEVENT_API_BASE";
pub const ENV_SESSION_TOKEN: &str = "QEVENT_SESSION_TOKEN";
pub const ENV_LOG_DIR: &str = "QEVENT_LOG_DIR";

// Logging
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "qevent.log";

// Routes used for navigation targets
pub const EVENTS_ROUTE: &str = "/events";

// Artist defaults
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const ARTIST_IMAGE_PLACEHOLDER: &str = "/images/artist-default.jpg";

// Event defaults
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const EVENT_IMAGE_PLACEHOLDER: &str = "/images/default.jpg";
pub const DEFAULT_EVENT_TIME: &str = "7:00 PM";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_PAGE_TITLE: &str = "Event";

// Generic failure messages when an error carries no text of its own
pub const ARTISTS_LOAD_FAILED: &str = "Failed to load artists";
pub const EVENTS_LOAD_FAILED: &str = "Failed to load events";
pub const TAGS_LOAD_FAILED: &str = "Failed to load tags";
pub const EVENT_CREATE_FAILED: &str = "Event creation failed";

/// Portrait used when a new event is submitted without an image
pub fn placeholder_portrait(n: u8) -> String {
    format!("https://randomuser.me/api/portraits/men/{n}.jpg")
}
