//! Auxiliary fields returned next to the resolved version

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

pub const DATA_AUDIO: &str = "audio";
pub const DATA_BOARD: &str = "board";
pub const DATA_CLI: &str = "cli";
pub const DATA_DNS: &str = "dns";
pub const DATA_IMAGE: &str = "image";
pub const DATA_MULTICAST: &str = "multicast";
pub const DATA_OBSERVER: &str = "observer";
pub const DATA_OS: &str = "os";
pub const DATA_SUPERVISOR: &str = "supervisor";

/// Ordered mapping of source-specific keys to optional values.
///
/// Keys a source knows about are always present; a field the source did not
/// report is stored as `None` instead of being left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionData(IndexMap<String, Option<String>>);

impl VersionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    /// Value for `key`, `None` when the key is absent or its value is null
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for VersionData {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for VersionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(value) => write!(f, "{key}: {value}")?,
                None => write!(f, "{key}: null")?,
            }
        }
        f.write_str("}")
    }
}
