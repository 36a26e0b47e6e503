//! Single entry point that binds one source handler and runs fetch then parse

use std::sync::Arc;
use std::time::Duration;

use crate::config::VersionRequestConfig;
use crate::types::SourceKind;
use crate::version::data::VersionData;
use crate::version::error::{FetchError, InputError, ParseError, VersionError};
use crate::version::handler::SourceHandler;
use crate::version::handlers::{
    DockerHandler, HaioHandler, LocalHandler, PypiHandler, SupervisedHandler,
};
use crate::version::sink::{TracingSink, VersionSink};
use crate::version::value::Version;

/// The handler a facade is bound to, fixed at construction
pub enum Handler {
    Docker(DockerHandler),
    Haio(HaioHandler),
    Local(LocalHandler),
    Pypi(PypiHandler),
    Supervised(SupervisedHandler),
}

impl Handler {
    /// Selects the handler for `config.source`; the unset source reads the local install
    pub fn new(config: &VersionRequestConfig) -> Self {
        match config.source {
            SourceKind::Docker => Handler::Docker(DockerHandler::new(config)),
            SourceKind::StaticManifest => Handler::Haio(HaioHandler::new(config)),
            SourceKind::Pypi => Handler::Pypi(PypiHandler::new(config)),
            SourceKind::Supervised => Handler::Supervised(SupervisedHandler::new(config)),
            SourceKind::Local | SourceKind::Default => Handler::Local(LocalHandler::new(config)),
        }
    }

    fn get(&self) -> &dyn SourceHandler {
        match self {
            Handler::Docker(h) => h,
            Handler::Haio(h) => h,
            Handler::Local(h) => h,
            Handler::Pypi(h) => h,
            Handler::Supervised(h) => h,
        }
    }

    fn get_mut(&mut self) -> &mut dyn SourceHandler {
        match self {
            Handler::Docker(h) => h,
            Handler::Haio(h) => h,
            Handler::Local(h) => h,
            Handler::Pypi(h) => h,
            Handler::Supervised(h) => h,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        self.get().source_kind()
    }
}

/// Resolves the current version from one configured source.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use haversion::config::VersionRequestConfig;
/// use haversion::types::SourceKind;
/// use haversion::version::facade::HaVersion;
///
/// let config = VersionRequestConfig::new(SourceKind::Supervised)
///     .with_http_client(reqwest::Client::new());
/// let mut ha_version = HaVersion::new(config)?;
/// let (version, data) = ha_version.get_version().await?;
/// # Ok(())
/// # }
/// ```
pub struct HaVersion {
    source: SourceKind,
    timeout: u64,
    handler: Handler,
    sink: Arc<dyn VersionSink>,
}

impl HaVersion {
    /// Binds the handler for `config.source` and validates its input
    pub fn new(config: VersionRequestConfig) -> Result<Self, InputError> {
        let mut handler = Handler::new(&config);
        handler.get_mut().validate_input()?;

        Ok(Self {
            source: config.source,
            timeout: config.timeout,
            handler,
            sink: Arc::new(TracingSink),
        })
    }

    /// Replaces the sink that receives the post-lookup debug records
    pub fn with_sink(mut self, sink: Arc<dyn VersionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Source as configured (may be [`SourceKind::Default`])
    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Last successfully parsed version, `None` before the first success
    pub fn version(&self) -> Option<&Version> {
        self.handler.get().version()
    }

    pub fn version_data(&self) -> &VersionData {
        self.handler.get().version_data()
    }

    /// Fetches and parses once, bounded by the configured timeout
    pub async fn get_version(&mut self) -> Result<(Option<Version>, VersionData), VersionError> {
        let kind = self.source;
        let timeout = self.timeout;
        let handler = self.handler.get_mut();

        match tokio::time::timeout(Duration::from_secs(timeout), handler.fetch()).await {
            Err(_) => return Err(FetchError::Timeout { kind, timeout }.into()),
            Ok(Err(cause)) => return Err(FetchError::Transport { kind, cause }.into()),
            Ok(Ok(())) => {}
        }

        handler
            .parse()
            .map_err(|cause| ParseError { kind, cause })?;

        let version = self.version().cloned();
        let version_data = self.version_data().clone();

        let shown = version
            .as_ref()
            .map_or_else(|| "None".to_string(), Version::to_string);
        self.sink.debug(&format!("Version: {shown}"));
        self.sink.debug(&format!("Version data: {version_data}"));

        Ok((version, version_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::sink::MockVersionSink;
    use mockito::Server;
    use rstest::rstest;

    fn supervised_config(base_url: &str) -> VersionRequestConfig {
        VersionRequestConfig::new(SourceKind::Supervised)
            .with_http_client(reqwest::Client::new())
            .with_base_url(base_url)
    }

    #[rstest]
    #[case(SourceKind::Docker)]
    #[case(SourceKind::StaticManifest)]
    #[case(SourceKind::Pypi)]
    #[case(SourceKind::Supervised)]
    fn new_without_http_client_fails_for_network_sources(#[case] source: SourceKind) {
        let result = HaVersion::new(VersionRequestConfig::new(source));

        assert!(matches!(result, Err(InputError::MissingHttpClient(s)) if s == source));
    }

    #[test]
    fn default_source_binds_local_handler() {
        let ha_version = HaVersion::new(VersionRequestConfig::default()).unwrap();

        assert_eq!(ha_version.source(), SourceKind::Default);
        assert!(matches!(ha_version.handler(), Handler::Local(_)));
        assert_eq!(ha_version.handler().source_kind(), SourceKind::Local);
        assert!(ha_version.version().is_none());
        assert!(ha_version.version_data().is_empty());
    }

    #[tokio::test]
    async fn get_version_emits_two_debug_records() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/stable.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"homeassistant": {"default": "2024.1.0"}, "hassos": {}, "supervisor": "2024.01.1"}"#,
            )
            .create_async()
            .await;

        let mut sink = MockVersionSink::new();
        sink.expect_debug()
            .withf(|message: &str| message == "Version: 2024.1.0")
            .times(1)
            .return_const(());
        sink.expect_debug()
            .withf(|message: &str| {
                message.starts_with("Version data: ") && message.contains("supervisor: 2024.01.1")
            })
            .times(1)
            .return_const(());

        let mut ha_version = HaVersion::new(supervised_config(&server.url()))
            .unwrap()
            .with_sink(Arc::new(sink));

        let (version, data) = ha_version.get_version().await.unwrap();

        assert_eq!(version.unwrap().as_str(), "2024.1.0");
        assert_eq!(data.get("supervisor"), Some("2024.01.1"));
        assert_eq!(data.get("os"), None);
    }

    #[tokio::test]
    async fn get_version_failure_emits_no_records() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/stable.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"homeassistant": "2024.1.0"}"#)
            .create_async()
            .await;

        let mut sink = MockVersionSink::new();
        sink.expect_debug().times(0);

        let mut ha_version = HaVersion::new(supervised_config(&server.url()))
            .unwrap()
            .with_sink(Arc::new(sink));

        let result = ha_version.get_version().await;

        assert!(matches!(result, Err(VersionError::Parse(_))));
        assert!(ha_version.version().is_none());
    }
}
