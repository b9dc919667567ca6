//! Application configuration
//!
//! The remote store endpoint and its access key are required. Without them
//! nothing else is constructed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::CoreError;
use crate::Result;

pub const REMOTE_URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const DATA_DIR_VAR: &str = "UNIEVENT_DATA_DIR";
pub const CATALOG_VAR: &str = "UNIEVENT_CATALOG";

const REMOTE_URL_PLACEHOLDER: &str = "your_supabase_url_here";
const ANON_KEY_PLACEHOLDER: &str = "your_supabase_anon_key_here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote store
    pub remote_url: Url,
    /// Public access key sent with every remote request
    pub anon_key: String,
    /// Path to the local mirror database
    pub database_path: PathBuf,
    /// Event catalog JSON; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn new(data_dir: PathBuf, remote_url: Url, anon_key: impl Into<String>) -> Self {
        Self {
            remote_url,
            anon_key: anon_key.into(),
            database_path: data_dir.join("unievent.db"),
            catalog_path: None,
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let remote_url = required(&lookup, REMOTE_URL_VAR, REMOTE_URL_PLACEHOLDER)?;
        let anon_key = required(&lookup, ANON_KEY_VAR, ANON_KEY_PLACEHOLDER)?;

        let remote_url = Url::parse(&remote_url)
            .map_err(|e| CoreError::Config(format!("{REMOTE_URL_VAR} is not a valid URL: {e}")))?;

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);

        let mut config = Self::new(data_dir, remote_url, anon_key);
        config.catalog_path = lookup(CATALOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.remote_url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "{REMOTE_URL_VAR} must be an http(s) URL, got {}",
                self.remote_url
            )));
        }

        let key = self.anon_key.trim();
        if key.is_empty() || key == ANON_KEY_PLACEHOLDER {
            return Err(CoreError::Config(format!("{ANON_KEY_VAR} is not configured")));
        }

        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("UniEvent"))
            .unwrap_or_else(|| PathBuf::from(".unievent"))
    }
}

fn required<F>(lookup: &F, name: &str, placeholder: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() && value.trim() != placeholder => {
            Ok(value.trim().to_string())
        }
        _ => Err(CoreError::Config(format!("{name} is not configured"))),
    }
}
