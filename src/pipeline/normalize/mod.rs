//! Coercion of heterogeneous backend records into canonical shapes.
//!
//! Each canonical field is described by a [`Fallback`]: an ordered list of
//! candidate source keys plus the literal used when none of them is present.
//! Normalization is total: any JSON value produces a record (or, for tags, at
//! most one non-empty string) and nothing here can fail.

pub mod artist;
pub mod event;
pub mod fallback;
pub mod tag;

pub use artist::{normalize_artist, normalize_artists};
pub use event::{normalize_event, normalize_events};
pub use fallback::{coerce_price, first_present, render_text, Fallback};
pub use tag::{normalize_tag, normalize_tags};
