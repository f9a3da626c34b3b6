//! Environment configuration for the service binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use storyscroll_reader::domain::config::{
    BACKGROUND_FADE_MS, PAGE_SETTLE_MS, ReaderConfig, SESSION_IDLE_MS,
};

use crate::error::AppError;

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Episode content file (`.json`, `.yaml` or `.yml`).
    pub episode_path: PathBuf,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Transition timing and idle timeout for every session.
    pub reader: ReaderConfig,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `EPISODE_PATH` is unset or a numeric
    /// variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let episode_path = lookup("EPISODE_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| AppError::Config("EPISODE_PATH environment variable must be set".into()))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let page_settle = millis(&lookup, "PAGE_SETTLE_MS", PAGE_SETTLE_MS)?;
        let background_fade = millis(&lookup, "BACKGROUND_FADE_MS", BACKGROUND_FADE_MS)?;
        let session_idle = millis(&lookup, "SESSION_IDLE_MS", SESSION_IDLE_MS)?;

        Ok(Self {
            episode_path,
            host,
            port,
            reader: ReaderConfig::from_millis(page_settle, background_fade)
                .with_session_idle_ms(session_idle),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn millis<F>(lookup: &F, key: &str, default: i64) -> Result<i64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: u32 = raw
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a non-negative integer: {e}")))?;
    Ok(i64::from(value))
}
