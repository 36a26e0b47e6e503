use thiserror::Error;

use crate::types::SourceKind;

/// Invalid or missing configuration, detected before any I/O
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Missing HTTP client for source {0}")]
    MissingHttpClient(SourceKind),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Unknown board: {0}")]
    UnknownBoard(String),
}

/// Low-level failure while talking to a source
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {}", error_chain(.0))]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No HTTP client configured")]
    NoClient,
}

/// Low-level failure while extracting fields from a fetched response
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("nothing has been fetched yet")]
    NotFetched,

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected {expected} at '{key}'")]
    WrongType {
        key: String,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Timeout of {timeout} seconds was reached while fetching version for {kind}")]
    Timeout { kind: SourceKind, timeout: u64 },

    #[error("Error fetching version information from {kind} {cause}")]
    Transport {
        kind: SourceKind,
        #[source]
        cause: TransportError,
    },
}

#[derive(Debug, Error)]
#[error("Error parsing version information for {kind} - {cause}")]
pub struct ParseError {
    pub kind: SourceKind,
    #[source]
    pub cause: ExtractError,
}

/// Failure of a full fetch-then-parse round
#[derive(Debug, Error)]
pub enum VersionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Joins an error's message with every message down its source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
