//! Observability sink for resolved versions

#[cfg(test)]
use mockall::automock;

/// Receives the debug records the facade emits after a successful lookup
#[cfg_attr(test, automock)]
pub trait VersionSink: Send + Sync {
    fn debug(&self, message: &str);
}

/// Forwards records to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl VersionSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}
