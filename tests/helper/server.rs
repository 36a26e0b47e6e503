//! HTTP test utilities

use haversion::{SourceKind, VersionRequestConfig};
use mockito::{Mock, ServerGuard};
use tokio::net::TcpListener;

/// Channel manifest in the shape version.home-assistant.io serves
pub const STABLE_MANIFEST: &str = r#"{
    "channel": "stable",
    "homeassistant": {"default": "2024.1.0", "qemux86-64": "2024.1.0"},
    "hassos": {},
    "supervisor": "2024.01.1"
}"#;

/// Serve `body` as the `{channel}.json` manifest
pub async fn mock_manifest(server: &mut ServerGuard, channel: &str, body: &str) -> Mock {
    server
        .mock("GET", format!("/{channel}.json").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Config for `source` pointing at `base_url` with a fresh client
pub fn manifest_config(source: SourceKind, base_url: &str, timeout: u64) -> VersionRequestConfig {
    let mut config = VersionRequestConfig::new(source)
        .with_http_client(reqwest::Client::new())
        .with_base_url(base_url);
    config.timeout = timeout;
    config
}

/// A listener that accepts connections but never answers.
///
/// Keep the listener alive for as long as requests should hang.
pub async fn stalled_server() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Base URL of a port nothing listens on
pub async fn connection_refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
