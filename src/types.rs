//! Common types describing where and how a version is looked up

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::error::InputError;

/// Origin system a version is retrieved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Unset; resolved the same way as [`SourceKind::Local`]
    #[default]
    Default,
    /// Docker Hub tags (homeassistant/home-assistant)
    Docker,
    /// Static manifest at www.home-assistant.io/version.json
    #[serde(alias = "haio")]
    StaticManifest,
    /// Local installation (.HA_VERSION in the config directory)
    Local,
    /// PyPI package metadata (homeassistant)
    Pypi,
    /// version.home-assistant.io/{channel}.json
    Supervised,
}

impl SourceKind {
    /// Returns the string representation of the source
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Default => "default",
            SourceKind::Docker => "docker",
            SourceKind::StaticManifest => "static-manifest",
            SourceKind::Local => "local",
            SourceKind::Pypi => "pypi",
            SourceKind::Supervised => "supervised",
        }
    }

    /// Whether handlers for this source need an HTTP client
    pub fn requires_http_client(&self) -> bool {
        !matches!(self, SourceKind::Default | SourceKind::Local)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SourceKind::Default),
            "docker" => Ok(SourceKind::Docker),
            "static-manifest" | "haio" => Ok(SourceKind::StaticManifest),
            "local" => Ok(SourceKind::Local),
            "pypi" => Ok(SourceKind::Pypi),
            "supervised" => Ok(SourceKind::Supervised),
            _ => Err(InputError::UnknownSource(s.to_string())),
        }
    }
}

/// Release track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Stable,
    Beta,
    Dev,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
            Channel::Dev => "dev",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Channel::Stable),
            "beta" => Ok(Channel::Beta),
            "dev" => Ok(Channel::Dev),
            _ => Err(InputError::UnknownChannel(s.to_string())),
        }
    }
}

macro_rules! boards {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Hardware platform an OS build targets
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum Board {
            #[default]
            $(#[serde(rename = $name)] $variant,)+
        }

        impl Board {
            /// Returns the board identifier used in the version manifest
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Board::$variant => $name,)+
                }
            }
        }

        impl FromStr for Board {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Board::$variant),)+
                    _ => Err(InputError::UnknownBoard(s.to_string())),
                }
            }
        }
    };
}

boards! {
    Ova => "ova",
    Rpi => "rpi",
    Rpi2 => "rpi2",
    Rpi3 => "rpi3",
    Rpi3_64 => "rpi3-64",
    Rpi4 => "rpi4",
    Rpi4_64 => "rpi4-64",
    Rpi5_64 => "rpi5-64",
    Tinker => "tinker",
    OdroidC2 => "odroid-c2",
    OdroidC4 => "odroid-c4",
    OdroidM1 => "odroid-m1",
    OdroidN2 => "odroid-n2",
    OdroidXu4 => "odroid-xu4",
    GenericX86_64 => "generic-x86-64",
    GenericAarch64 => "generic-aarch64",
    IntelNuc => "intel-nuc",
    KhadasVim3 => "khadas-vim3",
    Qemuarm => "qemuarm",
    Qemuarm64 => "qemuarm-64",
    Qemux86 => "qemux86",
    Qemux86_64 => "qemux86-64",
    Yellow => "yellow",
    Green => "green",
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
