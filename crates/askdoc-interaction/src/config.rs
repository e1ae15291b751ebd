//! Configuration file management for askdoc.
//!
//! Supports reading secrets from `~/.config/askdoc/secret.json`, with a
//! `GEMINI_API_KEY` environment variable override.

use askdoc_core::error::{AskdocError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the secret file's API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the secret configuration file from ~/.config/askdoc/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    let config_path = get_config_path()?;
    load_secret_config_from(&config_path)
}

/// Loads the secret configuration from an explicit path.
pub fn load_secret_config_from(config_path: &std::path::Path) -> Result<SecretConfig> {
    if !config_path.exists() {
        return Err(AskdocError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        AskdocError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AskdocError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })
}

/// Resolves the Gemini API key: environment variable first, then the
/// secret file.
///
/// # Errors
///
/// Returns a `Config` error when neither source yields a key. The
/// message never contains the key itself.
pub fn resolve_api_key(config: Option<&SecretConfig>) -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    config
        .and_then(|c| c.gemini.as_ref())
        .map(|g| g.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            AskdocError::config(format!(
                "No Gemini API key configured: set {API_KEY_ENV_VAR} or add a \"gemini\" entry to secret.json"
            ))
        })
}

/// Returns the path to the configuration file: ~/.config/askdoc/secret.json
fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AskdocError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("askdoc").join("secret.json"))
}
