//! Page configuration, read from TOML. Every key is optional.
//!
//! ```toml
//! message_duration_ms = 1500
//!
//! [routes]
//! login = "/login"
//! products = "/productos"
//! ```

use form_framework::FormTiming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub login: String,
    pub products: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            products: "/productos".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// How long inline banners stay visible, in milliseconds.
    pub message_duration_ms: u64,
    pub routes: Routes,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            message_duration_ms: 1500,
            routes: Routes::default(),
        }
    }
}

impl PagesConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn timing(&self) -> FormTiming {
        FormTiming {
            message_duration: Duration::from_millis(self.message_duration_ms),
        }
    }
}
