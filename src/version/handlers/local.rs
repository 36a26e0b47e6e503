//! Version of the local installation, read from its configuration directory

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::config::{VersionRequestConfig, config_dir};
use crate::types::SourceKind;
use crate::version::data::VersionData;
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::handler::{HandlerState, SourceHandler};
use crate::version::value::Version;

/// File Home Assistant writes its running version to
pub const VERSION_FILE: &str = ".HA_VERSION";

/// Handler for `{config_dir}/.HA_VERSION`
pub struct LocalHandler {
    config_dir: PathBuf,
    state: HandlerState,
}

impl LocalHandler {
    pub fn new(config: &VersionRequestConfig) -> Self {
        Self {
            config_dir: config.config_dir.clone().unwrap_or_else(config_dir),
            state: HandlerState::default(),
        }
    }

    fn version_file(&self) -> PathBuf {
        self.config_dir.join(VERSION_FILE)
    }
}

#[async_trait::async_trait]
impl SourceHandler for LocalHandler {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn validate_input(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    async fn fetch(&mut self) -> Result<(), TransportError> {
        let path = self.version_file();
        debug!("Reading local version file: {:?}", path);

        let content = tokio::fs::read_to_string(&path).await?;
        self.state.raw = Some(Value::String(content));
        Ok(())
    }

    /// Surrounding whitespace is ignored; an empty file yields no version
    fn parse(&mut self) -> Result<(), ExtractError> {
        let version = match self.state.raw()? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(Version::new(s.trim())),
            _ => {
                return Err(ExtractError::WrongType {
                    key: VERSION_FILE.to_string(),
                    expected: "a string",
                });
            }
        };

        self.state.commit(version, VersionData::new());
        Ok(())
    }

    fn version(&self) -> Option<&Version> {
        self.state.version.as_ref()
    }

    fn version_data(&self) -> &VersionData {
        &self.state.version_data
    }
}
