use anyhow::{Context, Result};

use crate::document::DEFAULT_MAX_UPLOAD_BYTES;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Largest resume file accepted, in bytes.
    pub max_upload_bytes: usize,
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
            max_upload_bytes: parse_max_upload(std::env::var("MAX_UPLOAD_BYTES").ok())?,
        })
    }
}

fn parse_max_upload(raw: Option<String>) -> Result<usize> {
    match raw {
        None => Ok(DEFAULT_MAX_UPLOAD_BYTES),
        Some(value) => {
            let bytes = value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{value}'"))?;
            anyhow::ensure!(bytes > 0, "MAX_UPLOAD_BYTES must be greater than zero");
            Ok(bytes)
        }
    }
}
