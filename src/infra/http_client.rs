use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::ListingSource;
use crate::config::ApiConfig;
use crate::error::{QeventError, Result};
use crate::pipeline::extract::is_truthy;
use crate::pipeline::normalize::render_text;
use crate::types::{NewEvent, RawRecord, ResourceKind};

/// reqwest-backed client for the QEvent REST backend
pub struct QeventClient {
    http: reqwest::Client,
    base_url: Url,
}

impl QeventClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL plus path segments, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                QeventError::Config(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Validates that the configured base is an absolute http(s) URL
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| QeventError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(QeventError::Config(format!(
            "API base URL '{base_url}' must be an http(s) URL"
        )));
    }
    Ok(url)
}

/// Text for a rejected POST: the body's `message`, else the whole body, else the status
pub fn api_error_detail(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => match json.get("message").filter(|m| is_truthy(m)) {
            Some(message) => render_text(message),
            None => json.to_string(),
        },
        Err(_) => format!("status {status}"),
    }
}

#[async_trait]
impl ListingSource for QeventClient {
    #[instrument(skip(self))]
    async fn fetch_listing(&self, kind: ResourceKind) -> Result<RawRecord> {
        let url = self.endpoint(&[kind.as_str()])?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("Listing request for {} returned {}", kind, status);
            return Err(QeventError::Status {
                status: status.as_u16(),
                message: format!("Failed to fetch {}: {}", kind, status.as_u16()),
            });
        }

        let bytes = resp.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;
        debug!("Decoded {} response ({} bytes)", kind, bytes.len());
        Ok(data)
    }

    #[instrument(skip(self))]
    async fn fetch_event(&self, id: &str) -> Result<Option<RawRecord>> {
        let url = self.endpoint(&["events", id])?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("Event {} request returned {}", id, status);
            return Ok(None);
        }

        let bytes = resp.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;
        Ok(Some(data))
    }

    #[instrument(skip(self, payload), fields(id = %payload.id))]
    async fn create_event(&self, payload: &NewEvent) -> Result<()> {
        let url = self.endpoint(&["events"])?;
        debug!("POST {}", url);

        let resp = self.http.post(url).json(payload).send().await?;
        let status = resp.status();
        if status.is_success() {
            info!("Backend accepted event {}", payload.id);
            return Ok(());
        }

        let body = resp.bytes().await.unwrap_or_default();
        let detail = api_error_detail(status.as_u16(), &body);
        Err(QeventError::Api {
            message: format!("API error: {detail}"),
        })
    }
}
