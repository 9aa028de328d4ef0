//! Client configuration, read from the environment.
//!
//! The binary loads `.env` first (dotenvy), so the same variables work from
//! a file or the shell.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::storage::FileBackend;

/// Production API base, relative to the origin.
pub const DEFAULT_API_PATH: &str = "/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";
/// Where the login page lives.
pub const DEFAULT_BASE_PATH: &str = "/frontend";

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number of seconds, got '{value}'")]
    InvalidDuration { name: &'static str, value: String },

    #[error("SECRETARY_STORAGE must be one of file, keychain, memory; got '{0}'")]
    InvalidStorage(String),
}

/// Where the persistence adapter keeps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Keychain,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute API base, e.g. `http://localhost:5000/api`.
    pub api_url: String,
    /// Offline mode: every call is answered from canned data.
    pub demo_mode: bool,
    /// Path prefix of the web pages; the login page is `<base_path>/login.html`.
    pub base_path: String,
    pub storage: StorageKind,
    pub storage_path: PathBuf,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: resolve_api_url(DEFAULT_ORIGIN, DEFAULT_API_PATH),
            demo_mode: false,
            base_path: DEFAULT_BASE_PATH.to_string(),
            storage: StorageKind::File,
            storage_path: FileBackend::default_path(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset and empty variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let origin = var("SECRETARY_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let api_url = var("SECRETARY_API_URL")
            .map(|url| resolve_api_url(&origin, &url))
            .unwrap_or_else(|| resolve_api_url(&origin, DEFAULT_API_PATH));

        let storage = match var("SECRETARY_STORAGE") {
            Some(kind) => parse_storage(&kind)?,
            None => defaults.storage,
        };

        Ok(Self {
            api_url,
            demo_mode: var("SECRETARY_DEMO_MODE").map_or(false, |v| parse_flag(&v)),
            base_path: var("SECRETARY_BASE_PATH").unwrap_or(defaults.base_path),
            storage,
            storage_path: var("SECRETARY_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            timeout: parse_secs("SECRETARY_TIMEOUT_SECS", var("SECRETARY_TIMEOUT_SECS"))?
                .unwrap_or(defaults.timeout),
            connect_timeout: parse_secs(
                "SECRETARY_CONNECT_TIMEOUT_SECS",
                var("SECRETARY_CONNECT_TIMEOUT_SECS"),
            )?
            .unwrap_or(defaults.connect_timeout),
        })
    }

    /// Base the gateway joins paths onto. Empty in demo mode: nothing is fetched.
    pub fn effective_base_url(&self) -> &str {
        if self.demo_mode {
            ""
        } else {
            &self.api_url
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login.html", self.base_path.trim_end_matches('/'))
    }
}

fn resolve_api_url(origin: &str, api_url: &str) -> String {
    if api_url.starts_with("http://") || api_url.starts_with("https://") {
        return api_url.trim_end_matches('/').to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        api_url.trim_matches('/')
    )
    .trim_end_matches('/')
    .to_string()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_storage(value: &str) -> Result<StorageKind, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => Ok(StorageKind::File),
        "keychain" => Ok(StorageKind::Keychain),
        "memory" => Ok(StorageKind::Memory),
        _ => Err(ConfigError::InvalidStorage(value.to_string())),
    }
}

fn parse_secs(name: &'static str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidDuration { name, value: v })
        })
        .transpose()
}
