use super::fallback::Fallback;
use crate::constants::{ARTIST_IMAGE_PLACEHOLDER, UNKNOWN_ARTIST};
use crate::pipeline::extract::extract_list;
use crate::types::{Artist, RawRecord, ResourceKind};

const ID: Fallback = Fallback::new(&["_id", "id"], "");
const NAME: Fallback = Fallback::new(&["name", "fullName", "title"], UNKNOWN_ARTIST);
const IMAGE: Fallback = Fallback::new(&["image", "avatar", "photo"], ARTIST_IMAGE_PLACEHOLDER);
const DESCRIPTION: Fallback = Fallback::new(&["bio", "description", "about"], "");
const LOCATION: Fallback = Fallback::new(&["location", "city", "place"], "");
// `artist` last so an already-normalized record keeps its stage name
const STAGE_NAME: Fallback = Fallback::new(&["stageName", "artistName", "handle", "artist"], "");

pub fn normalize_artist(raw: &RawRecord) -> Artist {
    Artist {
        id: ID.resolve_opt(raw),
        name: NAME.resolve(raw),
        image: IMAGE.resolve(raw),
        description: DESCRIPTION.resolve(raw),
        location: LOCATION.resolve(raw),
        artist: STAGE_NAME.resolve(raw),
    }
}

/// Normalize an artists listing response, keeping source order
pub fn normalize_artists(data: RawRecord) -> Vec<Artist> {
    extract_list(data, ResourceKind::Artists)
        .iter()
        .map(normalize_artist)
        .collect()
}
