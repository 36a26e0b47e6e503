use serde::Deserialize;
use std::path::PathBuf;

use crate::types::{Board, Channel, SourceKind};

// =============================================================================
// Request-related constants
// =============================================================================

/// Default timeout for a single fetch in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Image used by manifest and registry lookups when none is configured
pub const DEFAULT_IMAGE: &str = "default";

pub const USER_AGENT: &str = concat!("haversion/", env!("CARGO_PKG_VERSION"));

/// Request configuration shared by the facade and every source handler
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionRequestConfig {
    pub source: SourceKind,
    pub channel: Channel,
    pub board: Option<Board>,
    pub image: Option<String>,
    /// Timeout for the fetch step in seconds
    pub timeout: u64,
    /// Overrides the source endpoint (mirrors, tests)
    pub base_url: Option<String>,
    /// Home Assistant configuration directory for the local source
    pub config_dir: Option<PathBuf>,
    /// Caller-owned client; required by every network source
    #[serde(skip)]
    pub http_client: Option<reqwest::Client>,
}

impl Default for VersionRequestConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            channel: Channel::default(),
            board: Some(Board::default()),
            image: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            base_url: None,
            config_dir: None,
            http_client: None,
        }
    }
}

impl VersionRequestConfig {
    pub fn new(source: SourceKind) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Returns the Home Assistant configuration directory.
/// Uses $HASS_CONFIG if set, otherwise falls back to ~/.homeassistant,
/// or ./.homeassistant if no home directory is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("HASS_CONFIG").ok(), dirs::home_dir())
}

fn config_dir_with_env(hass_config: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    hass_config
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".homeassistant")))
        .unwrap_or_else(|| PathBuf::from("./.homeassistant"))
}
