use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::app::ports::ListingSource;
use crate::app::session::{CreateGate, SessionStatus};
use crate::constants::{placeholder_portrait, UNKNOWN_ARTIST};
use crate::error::{QeventError, Result};
use crate::pipeline::normalize::coerce_price;
use crate::types::{NewEvent, Tag};

/// Create-event form contents, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub price: String,
    pub image: String,
    pub tags: String,
    pub artist: String,
    pub description: String,
}

impl EventForm {
    /// Name, date, time and location must be filled in
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(QeventError::Validation { missing })
        }
    }

    /// Build the POST body. Validates first; nothing is produced for an incomplete form.
    pub fn to_payload<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<NewEvent> {
        self.validate()?;

        let price = if self.price.trim().is_empty() {
            0.0
        } else {
            coerce_price(Some(&Value::String(self.price.clone())))
        };

        let artist = if self.artist.is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            self.artist.clone()
        };

        let image = match self.image.trim() {
            "" => placeholder_portrait(rng.gen_range(1..=99)),
            url => url.to_string(),
        };

        Ok(NewEvent {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            tags: split_tags(&self.tags),
            artist,
            price,
            description: self.description.clone(),
            image,
        })
    }
}

/// "Music, Live ,Festival" -> ["Music", "Live", "Festival"]
pub fn split_tags(input: &str) -> Vec<Tag> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gate on the session, then validate and build the payload
pub fn prepare_submission<R: Rng + ?Sized>(
    session: SessionStatus,
    form: &EventForm,
    rng: &mut R,
) -> Result<NewEvent> {
    match CreateGate::for_status(session) {
        CreateGate::Render => form.to_payload(rng),
        CreateGate::Wait => Err(QeventError::Session(
            "Checking authentication, try again shortly".to_string(),
        )),
        CreateGate::Redirect(to) => Err(QeventError::Session(format!(
            "Sign in to create events (redirecting to {to})"
        ))),
    }
}

pub struct CreateEventUseCase {
    source: Arc<dyn ListingSource>,
}

impl CreateEventUseCase {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// Submit the form once. Returns the payload that was accepted.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn submit(&self, session: SessionStatus, form: &EventForm) -> Result<NewEvent> {
        let payload = match prepare_submission(session, form, &mut rand::thread_rng()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Event submission rejected: {}", e);
                return Err(e);
            }
        };

        match self.source.create_event(&payload).await {
            Ok(()) => {
                info!("Created event {}", payload.id);
                Ok(payload)
            }
            Err(e) => {
                error!("Create event failed: {}", e);
                Err(e)
            }
        }
    }
}
