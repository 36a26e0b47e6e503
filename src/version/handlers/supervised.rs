//! Channel manifest published for supervised installations

use crate::config::{DEFAULT_IMAGE, VersionRequestConfig};
use crate::types::{Board, Channel, SourceKind};
use crate::version::data::{
    DATA_AUDIO, DATA_BOARD, DATA_CLI, DATA_DNS, DATA_IMAGE, DATA_MULTICAST, DATA_OBSERVER,
    DATA_OS, DATA_SUPERVISOR, VersionData,
};
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::handler::{
    HandlerState, SourceHandler, as_object, get_json, nested_string, optional_string,
};
use crate::version::value::Version;

/// Default base URL for the channel manifests
const DEFAULT_BASE_URL: &str = "https://version.home-assistant.io";

const DATA_HOMEASSISTANT: &str = "homeassistant";
const DATA_HASSOS: &str = "hassos";

/// Handler for `{base}/{channel}.json`
pub struct SupervisedHandler {
    client: Option<reqwest::Client>,
    base_url: String,
    channel: Channel,
    board: Option<Board>,
    image: Option<String>,
    state: HandlerState,
}

impl SupervisedHandler {
    pub fn new(config: &VersionRequestConfig) -> Self {
        Self {
            client: config.http_client.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            channel: config.channel,
            board: config.board,
            image: config.image.clone(),
            state: HandlerState::default(),
        }
    }

    fn url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.channel)
    }
}

#[async_trait::async_trait]
impl SourceHandler for SupervisedHandler {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Supervised
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
        let raw = get_json(client, &self.url()).await?;
        self.state.raw = Some(raw);
        Ok(())
    }

    fn parse(&mut self) -> Result<(), ExtractError> {
        let raw = as_object(self.state.raw()?, "$")?;
        let image = self.image.as_deref().unwrap_or(DEFAULT_IMAGE);
        let board = self.board.map(|b| b.as_str());

        let version = nested_string(raw, DATA_HOMEASSISTANT, Some(image))?.map(Version::new);
        let version_data: VersionData = [
            (DATA_AUDIO, optional_string(raw, DATA_AUDIO)?),
            (DATA_BOARD, board.map(str::to_string)),
            (DATA_CLI, optional_string(raw, DATA_CLI)?),
            (DATA_DNS, optional_string(raw, DATA_DNS)?),
            (DATA_OS, nested_string(raw, DATA_HASSOS, board)?),
            (DATA_IMAGE, Some(image.to_string())),
            (DATA_MULTICAST, optional_string(raw, DATA_MULTICAST)?),
            (DATA_OBSERVER, optional_string(raw, DATA_OBSERVER)?),
            (DATA_SUPERVISOR, optional_string(raw, DATA_SUPERVISOR)?),
        ]
        .into_iter()
        .collect();

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
