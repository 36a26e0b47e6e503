//! Docker Hub tag listing for the Home Assistant container images

use serde::Deserialize;

use crate::config::{DEFAULT_IMAGE, VersionRequestConfig};
use crate::types::{Channel, SourceKind};
use crate::version::data::{DATA_IMAGE, VersionData};
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::handler::{HandlerState, SourceHandler, decode, get_json};
use crate::version::value::Version;

/// Default base URL for Docker Hub
const DEFAULT_BASE_URL: &str = "https://registry.hub.docker.com";

const PAGE_SIZE: u32 = 25;

/// Response from the Docker Hub tags API
#[derive(Debug, Deserialize)]
struct TagsResponse {
    results: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Handler for `{base}/v2/repositories/homeassistant/{repository}/tags`
pub struct DockerHandler {
    client: Option<reqwest::Client>,
    base_url: String,
    channel: Channel,
    image: Option<String>,
    state: HandlerState,
}

impl DockerHandler {
    pub fn new(config: &VersionRequestConfig) -> Self {
        Self {
            client: config.http_client.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            channel: config.channel,
            image: config.image.clone(),
            state: HandlerState::default(),
        }
    }

    /// Maps an image name to its Docker Hub repository
    ///
    /// `default` -> `home-assistant`, `qemux86-64` -> `qemux86-64-homeassistant`
    fn repository(&self) -> String {
        match self.image.as_deref() {
            None | Some(DEFAULT_IMAGE) => "home-assistant".to_string(),
            Some(image) => format!("{image}-homeassistant"),
        }
    }

    fn admits(&self, version: &Version) -> bool {
        match self.channel {
            Channel::Stable => version.is_stable(),
            Channel::Beta => version.is_stable() || version.is_beta(),
            Channel::Dev => true,
        }
    }
}

#[async_trait::async_trait]
impl SourceHandler for DockerHandler {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Docker
    }

    fn validate_input(&mut self) -> Result<(), InputError> {
        if self.client.is_none() {
            return Err(InputError::MissingHttpClient(self.source_kind()));
        }
        if self.image.is_none() {
            self.image = Some(DEFAULT_IMAGE.to_string());
        }
        Ok(())
    }

    async fn fetch(&mut self) -> Result<(), TransportError> {
        let client = self.client.as_ref().ok_or(TransportError::NoClient)?;
        let url = format!(
            "{}/v2/repositories/homeassistant/{}/tags?page_size={}",
            self.base_url,
            self.repository(),
            PAGE_SIZE
        );
        self.state.raw = Some(get_json(client, &url).await?);
        Ok(())
    }

    /// Picks the highest tag the channel admits; tags that do not start with
    /// a digit (`latest`, `stable`, `beta`, ...) are skipped.
    fn parse(&mut self) -> Result<(), ExtractError> {
        let response: TagsResponse = decode(self.state.raw()?)?;

        let version = response
            .results
            .into_iter()
            .map(|tag| tag.name)
            .filter(|name| name.starts_with(|c: char| c.is_ascii_digit()))
            .map(Version::new)
            .filter(|v| v.is_valid() && self.admits(v))
            .max();

        let version_data: VersionData = [(DATA_IMAGE, self.image.clone())].into_iter().collect();
        self.state.commit(version, version_data);
        Ok(())
    }

    fn version(&self) -> Option<&Version> {
        self.state.version.as_ref()
    }

    fn version_data(&self) -> &VersionData {
        &self.state.version_data
    }
}
