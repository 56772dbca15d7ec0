//! Client configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which covers the backend base URL and the last email used to log in
//! (prefilled on the login form).
//!
//! Configuration is stored at `~/.config/sdt-client/config.json`;
//! `SDT_API_BASE_URL` (environment or `.env` via dotenvy) overrides the
//! stored base URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "sdt-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Base URL used when neither the config nor the environment sets one
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend base URL
const BASE_URL_ENV: &str = "SDT_API_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Pick up a .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the backend base URL: environment wins over the config
    /// file, which wins over the localhost default
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
