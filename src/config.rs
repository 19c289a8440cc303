use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_CONFIG_FILE, DEFAULT_LOG_DIR, DEFAULT_LOG_FILE, ENV_API_BASE,
    ENV_LOG_DIR, ENV_SESSION_TOKEN,
};
use crate::error::{QeventError, Result};
use crate::infra::http_client::parse_base_url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Identity provider session; a token means the user is signed in
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from `qevent.toml` when it exists, then apply
    /// environment overrides. An explicit path that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QeventError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Override file values from `lookup` (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE) {
            self.api.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_SESSION_TOKEN) {
            self.session.token = Some(token);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.logging.dir = dir;
        }
    }

    pub fn validate(&self) -> Result<()> {
        parse_base_url(&self.api.base_url)?;
        if self.logging.file_name.trim().is_empty() {
            return Err(QeventError::Config("logging.file_name must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.session.token, None);
        assert_eq!(config.logging.dir, "logs");
        assert_eq!(config.logging.file_name, "qevent.log");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
            [api]
            base_url = "http://localhost:8081"

            [session]
            token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8081");
        assert_eq!(config.session.token.as_deref(), Some("secret"));
        assert_eq!(config.logging.file_name, "qevent.log");
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\ndir = \"/tmp/qevent-logs\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.dir, "/tmp/qevent-logs");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here/qevent.toml")));
        assert!(matches!(result, Err(QeventError::Config(_))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Config::from_toml_str("[api\nbase_url = 1"),
            Err(QeventError::Toml(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE, "http://127.0.0.1:9000"),
            (ENV_SESSION_TOKEN, "tok"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.session.token.as_deref(), Some("tok"));
        assert_eq!(config.logging.dir, "logs");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "nowhere".into();
        assert!(matches!(config.validate(), Err(QeventError::Config(_))));
    }
}
