use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewEvent, RawRecord, ResourceKind};

/// Transport boundary between the views and the backend.
///
/// Implementations return undecorated JSON; all shaping happens in the pipeline.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// GET a resource collection. Non-success statuses are errors.
    async fn fetch_listing(&self, kind: ResourceKind) -> Result<RawRecord>;

    /// GET one event by id. A non-success status is `Ok(None)`.
    async fn fetch_event(&self, id: &str) -> Result<Option<RawRecord>>;

    /// POST a new event
    async fn create_event(&self, payload: &NewEvent) -> Result<()>;
}
