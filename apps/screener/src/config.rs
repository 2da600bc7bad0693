use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Model targeted by the generation capability when `GENERATION_MODEL` is unset.
pub const DEFAULT_GENERATION_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 20;
const DEFAULT_RECORDS_PATH: &str = "data/candidates.jsonl";

/// Application configuration loaded from environment variables.
/// Everything is optional; a missing provider key just disables tailored questions.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub generation_model: String,
    pub generation_timeout: Duration,
    pub records_path: PathBuf,
    pub database_url: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generation_timeout_secs = match optional_env("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_GENERATION_TIMEOUT_SECS,
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            generation_model: optional_env("GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            records_path: optional_env("RECORDS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_PATH)),
            database_url: optional_env("DATABASE_URL"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating blank values the same as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
