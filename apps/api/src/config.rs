use anyhow::{Context, Result};

use crate::models::ExportOptions;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request bodies, in bytes.
    pub max_body_bytes: usize,
    /// Options applied when a request carries none. `DEFAULT_TEMPLATE` and
    /// `DEFAULT_FONT_FAMILY` override the built-in defaults.
    pub default_options: ExportOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| (1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_BODY_BYTES must be a positive integer")?,
            default_options: default_options(
                optional_env("DEFAULT_TEMPLATE"),
                optional_env("DEFAULT_FONT_FAMILY"),
            )?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Resolves the configured template and font names through the same serde
/// aliases requests use, so "compact" or "Times New Roman" work in both places.
fn default_options(template: Option<String>, font_family: Option<String>) -> Result<ExportOptions> {
    let mut overrides = serde_json::Map::new();
    if let Some(template) = template {
        overrides.insert("template".to_string(), template.into());
    }
    if let Some(font_family) = font_family {
        overrides.insert("fontFamily".to_string(), font_family.into());
    }

    ExportOptions::default()
        .with_overrides(overrides)
        .context("DEFAULT_TEMPLATE or DEFAULT_FONT_FAMILY is not a recognized value")
}
