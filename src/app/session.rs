use serde::{Deserialize, Serialize};

use crate::constants::EVENTS_ROUTE;

/// Session state as reported by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Unauthenticated,
    Loading,
    Authenticated,
}

impl SessionStatus {
    /// A configured, non-blank session token counts as signed in
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => SessionStatus::Authenticated,
            _ => SessionStatus::Unauthenticated,
        }
    }
}

/// What the create-event view does for a given session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateGate {
    /// Send the visitor elsewhere
    Redirect(&'static str),
    /// Show nothing until the session is known
    Wait,
    Render,
}

impl CreateGate {
    pub fn for_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Unauthenticated => CreateGate::Redirect(EVENTS_ROUTE),
            SessionStatus::Loading => CreateGate::Wait,
            SessionStatus::Authenticated => CreateGate::Render,
        }
    }
}
