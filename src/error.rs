use thiserror::Error;

#[derive(Error, Debug)]
pub enum QeventError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-success status from a listing endpoint
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Non-success response from the creation endpoint
    #[error("{message}")]
    Api { message: String },

    /// Required form fields were left blank; nothing was sent
    #[error("Please fill required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// The create view is not available for the current session
    #[error("{0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, QeventError>;
