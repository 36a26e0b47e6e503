pub mod config;
pub mod types;
pub mod version;

pub use config::VersionRequestConfig;
pub use types::{Board, Channel, SourceKind};
pub use version::data::VersionData;
pub use version::error::{FetchError, InputError, ParseError, VersionError};
pub use version::facade::HaVersion;
pub use version::value::Version;
