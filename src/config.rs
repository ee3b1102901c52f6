//! Configuration handling for the quote form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default photo upload backend
pub const DEFAULT_BACKEND_URL: &str = "https://lnh8imcwv80g.manus.space";

/// Where customers send their photos and quote PDF
pub const DEFAULT_CONTACT_EMAIL: &str = "gtamtc@outlook.com";

/// Simulated submission delay
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "QUOTE_BACKEND_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuoteConfig {
    /// Base address of the photo upload service
    pub backend_url: Option<String>,
    /// Contact address shown after a quote is submitted
    pub contact_email: Option<String>,
    /// Delay of the simulated submission, in milliseconds
    pub submit_delay_ms: Option<u64>,
}

impl QuoteConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "motherstouch", "quote-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = Some(url);
            }
        }

        Ok(config)
    }

    /// Backend URL without a trailing slash
    pub fn backend_url(&self) -> String {
        self.backend_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn contact_email(&self) -> &str {
        self.contact_email.as_deref().unwrap_or(DEFAULT_CONTACT_EMAIL)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }
}
