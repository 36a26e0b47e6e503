pub mod server;

pub use server::{
    STABLE_MANIFEST, connection_refused_url, manifest_config, mock_manifest, stalled_server,
};
