use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable that overrides the stored TMDB key.
pub const TMDB_API_KEY_ENV: &str = "SWIPEFLIX_TMDB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tmdb_api_key: Option<String>,
}

/// Where a resolved API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    CredentialsFile,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Environment => write!(f, "environment"),
            KeySource::CredentialsFile => write!(f, "credentials file"),
        }
    }
}

/// Secrets kept apart from `config.toml` in `credentials.toml`.
pub struct CredentialStore {
    path: PathBuf,
    credentials: Credentials,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: Credentials::default(),
        }
    }

    /// A missing file leaves the store empty.
    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read {}", self.path.display()))?;
            self.credentials = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.credentials)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn tmdb_api_key(&self) -> Option<&str> {
        self.credentials
            .tmdb_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.credentials.tmdb_api_key = Some(key);
    }

    pub fn clear_tmdb_api_key(&mut self) {
        self.credentials.tmdb_api_key = None;
    }

    /// Environment first, then the credentials file.
    pub fn resolve_tmdb_api_key(&self) -> Option<(String, KeySource)> {
        let from_env = std::env::var(TMDB_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty());
        match from_env {
            Some(key) => Some((key, KeySource::Environment)),
            None => self
                .tmdb_api_key()
                .map(|k| (k.to_string(), KeySource::CredentialsFile)),
        }
    }
}
