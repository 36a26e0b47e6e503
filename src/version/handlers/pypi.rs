//! PyPI package metadata for the `homeassistant` distribution

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::debug;

use crate::config::VersionRequestConfig;
use crate::types::{Channel, SourceKind};
use crate::version::data::VersionData;
use crate::version::error::{ExtractError, InputError, TransportError};
use crate::version::handler::{HandlerState, SourceHandler, decode, get_json};
use crate::version::value::Version;

const DEFAULT_PYPI_REGISTRY: &str = "https://pypi.org";

const PACKAGE_NAME: &str = "homeassistant";

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
    /// Release files are not needed, only the version keys
    #[serde(default)]
    releases: HashMap<String, IgnoredAny>,
}

/// Package information from PyPI
#[derive(Debug, Deserialize)]
struct PypiInfo {
    /// Latest stable version (according to PyPI)
    version: Version,
}

/// Handler for `{base}/pypi/homeassistant/json`
pub struct PypiHandler {
    client: Option<reqwest::Client>,
    base_url: String,
    channel: Channel,
    state: HandlerState,
}

impl PypiHandler {
    pub fn new(config: &VersionRequestConfig) -> Self {
        Self {
            client: config.http_client.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_PYPI_REGISTRY.to_string()),
            channel: config.channel,
            state: HandlerState::default(),
        }
    }
}

#[async_trait::async_trait]
impl SourceHandler for PypiHandler {
    fn source_kind(&self) -> SourceKind {
        SourceKind::Pypi
    }

    fn validate_input(&mut self) -> Result<(), InputError> {
        if self.client.is_none() {
            return Err(InputError::MissingHttpClient(self.source_kind()));
        }
        Ok(())
    }

    async fn fetch(&mut self) -> Result<(), TransportError> {
        let client = self.client.as_ref().ok_or(TransportError::NoClient)?;
        let url = format!("{}/pypi/{}/json", self.base_url, PACKAGE_NAME);
        self.state.raw = Some(get_json(client, &url).await?);
        Ok(())
    }

    /// Stable reads `info.version`; beta and dev pick the highest release
    /// the channel admits.
    fn parse(&mut self) -> Result<(), ExtractError> {
        let response: PypiResponse = decode(self.state.raw()?)?;

        let version = match self.channel {
            Channel::Stable => Some(response.info.version),
            channel => {
                debug!("Found {} PyPI releases", response.releases.len());
                response
                    .releases
                    .into_keys()
                    .map(Version::new)
                    .filter(|v| v.is_valid())
                    .filter(|v| channel == Channel::Dev || !v.is_dev())
                    .max()
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

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use rstest::rstest;

    const RELEASES_BODY: &str = r#"{
        "info": {"version": "2024.1.5"},
        "releases": {
            "2024.1.4": [],
            "2024.1.5": [],
            "2024.2.0b0": [],
            "2024.2.0b2": [],
            "2024.3.0.dev20240130": []
        }
    }"#;

    #[rstest]
    #[case(Channel::Stable, "2024.1.5")]
    #[case(Channel::Beta, "2024.2.0b2")]
    #[case(Channel::Dev, "2024.3.0.dev20240130")]
    #[tokio::test]
    async fn fetch_and_parse_selects_version_for_channel(
        #[case] channel: Channel,
        #[case] expected: &str,
    ) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/homeassistant/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RELEASES_BODY)
            .create_async()
            .await;

        let mut config = VersionRequestConfig::new(SourceKind::Pypi)
            .with_http_client(reqwest::Client::new())
            .with_base_url(server.url());
        config.channel = channel;
        let mut handler = PypiHandler::new(&config);
        handler.validate_input().unwrap();

        handler.fetch().await.unwrap();
        handler.parse().unwrap();

        mock.assert_async().await;
        assert_eq!(handler.version().unwrap().as_str(), expected);
    }

    #[test]
    fn parse_missing_info_fails_with_decode_error() {
        let config = VersionRequestConfig::new(SourceKind::Pypi);
        let mut handler = PypiHandler::new(&config);
        handler.state.raw = Some(serde_json::json!({"releases": {}}));

        let err = handler.parse().unwrap_err();

        assert!(matches!(err, ExtractError::Decode(_)));
        assert!(err.to_string().contains("missing field `info`"));
        assert!(handler.version().is_none());
    }

    #[tokio::test]
    async fn fetch_handles_network_error() {
        let config = VersionRequestConfig::new(SourceKind::Pypi)
            .with_http_client(reqwest::Client::new())
            .with_base_url("http://invalid.localhost.test:99999");
        let mut handler = PypiHandler::new(&config);

        let result = handler.fetch().await;

        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
