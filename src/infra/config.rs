//! Centralized configuration (environment variables + defaults).

use crate::storage::FallbackCatalog;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_DATA_FILE: &str = "books.json";

#[derive(Debug, Error)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub fallback: FallbackCatalog,
    pub swagger_ui: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            fallback: FallbackCatalog::default(),
            swagger_ui: false,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment (after loading `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable lookup; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        Ok(Self {
            host: parse_var(&lookup, "BOOKSHELF_HOST", |v| {
                v.parse::<IpAddr>().map_err(|e| e.to_string())
            })?
                .unwrap_or(defaults.host),
            port: parse_var(&lookup, "BOOKSHELF_PORT", |v| {
                v.parse::<u16>().map_err(|e| e.to_string())
            })?
                .unwrap_or(defaults.port),
            data_file: lookup("BOOKSHELF_DATA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            fallback: parse_var(&lookup, "BOOKSHELF_FALLBACK", |v| v.parse::<FallbackCatalog>())?
                .unwrap_or(defaults.fallback),
            swagger_ui: parse_var(&lookup, "BOOKSHELF_SWAGGER_UI", parse_bool)?
                .unwrap_or(defaults.swagger_ui),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => parse(raw.trim())
            .map(Some)
            .map_err(|reason| ConfigError { var, reason }),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got `{}`", other)),
    }
}
