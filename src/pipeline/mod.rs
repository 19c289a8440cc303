// Normalization & filter pipeline: raw backend JSON in, canonical records out.
//
// Every stage is pure. Transport failures never reach this module; callers hand
// it whatever document they managed to decode.

pub mod extract;
pub mod filter;
pub mod normalize;

// Re-export the entry points used by the views
pub use extract::extract_list;
pub use filter::{tag_link, EventFilter};
pub use normalize::{
    normalize_artist, normalize_artists, normalize_event, normalize_events, normalize_tag,
    normalize_tags,
};
