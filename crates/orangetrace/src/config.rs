//! # Service Configuration
//!
//! Read from the process environment, after loading a `.env` file if one is present.
//! Every setting has a default, so an empty environment starts a local server.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_HOST` | `127.0.0.1` |
//! | `SERVER_PORT` | `8080` |
//! | `ACTOR_BUFFER_SIZE` | `32` |
//! | `IDEMPOTENCY_WINDOW` | `1024` |
//! | `TRACKING_UTC_OFFSET_MINUTES` | `330` (IST) |
//! | `LOG_FILTER` | `orangetrace=info,actor_store=info,tower_http=info` |
//! | `SEED_DEMO_DATA` | `false` |

use crate::batch_actor::DEFAULT_BUFFER_SIZE;
use actor_store::DEFAULT_IDEMPOTENCY_WINDOW;
use chrono::FixedOffset;
use dotenvy::dotenv;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "orangetrace=info,actor_store=info,tower_http=info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid {name} value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Request channel capacity of every actor.
    pub actor_buffer_size: usize,
    /// How many committed idempotency keys each store remembers.
    pub idempotency_window: usize,
    /// Offset tracking timelines are shown in.
    pub tracking_offset: FixedOffset,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Registers demo batches on start.
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = parse_or(&lookup, "SERVER_PORT", 8080)?;
        let actor_buffer_size = positive(
            "ACTOR_BUFFER_SIZE",
            parse_or(&lookup, "ACTOR_BUFFER_SIZE", DEFAULT_BUFFER_SIZE)?,
        )?;
        let idempotency_window = positive(
            "IDEMPOTENCY_WINDOW",
            parse_or(&lookup, "IDEMPOTENCY_WINDOW", DEFAULT_IDEMPOTENCY_WINDOW)?,
        )?;

        let offset_minutes: i32 = parse_or(&lookup, "TRACKING_UTC_OFFSET_MINUTES", 330)?;
        let tracking_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                name: "TRACKING_UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
                reason: "offset must be within ±24 hours".to_string(),
            })?;

        let log_filter = lookup("LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let seed_demo_data = parse_or(&lookup, "SEED_DEMO_DATA", false)?;

        tracing::debug!("Configuration loaded");

        Ok(Self {
            server_host,
            server_port,
            actor_buffer_size,
            idempotency_window,
            tracking_offset,
            log_filter,
            seed_demo_data,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, V>(lookup: &F, name: &'static str, default: V) -> Result<V, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    V: FromStr,
    V::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: V::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn positive(name: &'static str, value: usize) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}
