// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : finsync — personal-finance client sync layer in Rust
Module  : config.rs
Version : 0.1.0
Author  : finsync contributors
License : MIT (see LICENSE)

Summary : Keeps balance, credits, spendings, categories, goals,
          recommendations and reminders consistent on the client side:
          per-store loading/error state, translated backend errors,
          dependent refreshes after every mutation, reset on logout.

(c) 2025 finsync contributors.
=============================================================================
*/
use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} ({reason})")]
    Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: Url,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub metrics_port: Option<u16>,
    pub log_filter: String,
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid { key, value: raw.to_string(), reason: e.to_string() })
}

fn parse_num<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid { key, value: raw.to_string(), reason: e.to_string() })
}

impl Config {
    /// Reads `.env` (kalau ada) lalu environment, dengan default yang aman untuk dev lokal.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = match get("FINSYNC_API_URL") {
            Some(raw) => parse_url("FINSYNC_API_URL", &raw)?,
            None => parse_url("FINSYNC_API_URL", DEFAULT_API_URL)?,
        };

        let api_token = get("FINSYNC_API_TOKEN").filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = match get("FINSYNC_TIMEOUT_SECS") {
            Some(raw) => parse_num("FINSYNC_TIMEOUT_SECS", &raw)?,
            None => 15,
        };

        // Exporter mati kalau METRICS_PORT tidak di-set
        let metrics_port = get("METRICS_PORT")
            .map(|raw| parse_num::<u16>("METRICS_PORT", &raw))
            .transpose()?;

        let log_filter = get("LOG_FILTER").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            metrics_port,
            log_filter,
        })
    }
}
