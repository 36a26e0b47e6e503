//! Static version manifest served by the project website

use serde::Deserialize;

use crate::config::VersionRequestConfig;
use crate::types::SourceKind;
use crate::version::data::VersionData;
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::handler::{HandlerState, SourceHandler, decode, get_json};
use crate::version::value::Version;

/// Default base URL for the static manifest
const DEFAULT_BASE_URL: &str = "https://www.home-assistant.io";

/// Response from the static manifest
#[derive(Debug, Deserialize)]
struct VersionManifest {
    current_version: Version,
}

/// Handler for `{base}/version.json`
pub struct HaioHandler {
    client: Option<reqwest::Client>,
    base_url: String,
    state: HandlerState,
}

impl HaioHandler {
    pub fn new(config: &VersionRequestConfig) -> Self {
        Self {
            client: config.http_client.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            state: HandlerState::default(),
        }
    }
}

#[async_trait::async_trait]
impl SourceHandler for HaioHandler {
    fn source_kind(&self) -> SourceKind {
        SourceKind::StaticManifest
    }

    fn validate_input(&mut self) -> Result<(), InputError> {
        if self.client.is_none() {
            return Err(InputError::MissingHttpClient(self.source_kind()));
        }
        Ok(())
    }

    async fn fetch(&mut self) -> Result<(), TransportError> {
        let client = self.client.as_ref().ok_or(TransportError::NoClient)?;
        let url = format!("{}/version.json", self.base_url);
        self.state.raw = Some(get_json(client, &url).await?);
        Ok(())
    }

    fn parse(&mut self) -> Result<(), ExtractError> {
        let manifest: VersionManifest = decode(self.state.raw()?)?;

        self.state.commit(Some(manifest.current_version), VersionData::new());
        Ok(())
    }

    fn version(&self) -> Option<&Version> {
        self.state.version.as_ref()
    }

    fn version_data(&self) -> &VersionData {
        &self.state.version_data
    }
}
