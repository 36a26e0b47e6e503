//! Comparable version identifier

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[vV]?(?P<release>\d+(?:\.\d+)*)(?:[.\-]?(?P<modifier>dev|alpha|a|beta|b|rc)(?P<number>\d+)?)?$",
    )
    .expect("version pattern is valid")
});

/// Pre-release marker, ordered from least to most mature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Modifier {
    Dev(u64),
    Alpha(u64),
    Beta(u64),
    Rc(u64),
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parsed {
    release: Vec<u64>,
    modifier: Modifier,
}

impl Parsed {
    fn parse(raw: &str) -> Option<Self> {
        let captures = VERSION_PATTERN.captures(raw.trim())?;

        let release = captures["release"]
            .split('.')
            .map(|segment| segment.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;

        let number = match captures.name("number") {
            Some(n) => n.as_str().parse::<u64>().ok()?,
            None => 0,
        };
        let modifier = match captures.name("modifier").map(|m| m.as_str()) {
            None => Modifier::Final,
            Some("dev") => Modifier::Dev(number),
            Some("a" | "alpha") => Modifier::Alpha(number),
            Some("b" | "beta") => Modifier::Beta(number),
            Some(_) => Modifier::Rc(number),
        };

        Some(Self { release, modifier })
    }

    fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| {
                let a = self.release.get(i).copied().unwrap_or(0);
                let b = other.release.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A version string as published by a source.
///
/// The raw text is kept verbatim for display. Ordering follows the release
/// segments numerically, then the pre-release marker
/// (`dev` < `a` < `b` < `rc` < final). Strings that do not look like a
/// version are kept as well and sort below every valid version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    parsed: Option<Parsed>,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = Parsed::parse(&raw);
        Self { raw, parsed }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the raw string could be parsed into release segments
    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }

    pub fn is_dev(&self) -> bool {
        matches!(
            self.parsed,
            Some(Parsed {
                modifier: Modifier::Dev(_),
                ..
            })
        )
    }

    /// Alpha, beta and release candidates all count as beta
    pub fn is_beta(&self) -> bool {
        matches!(
            self.parsed,
            Some(Parsed {
                modifier: Modifier::Alpha(_) | Modifier::Beta(_) | Modifier::Rc(_),
                ..
            })
        )
    }

    pub fn is_stable(&self) -> bool {
        matches!(
            self.parsed,
            Some(Parsed {
                modifier: Modifier::Final,
                ..
            })
        )
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Version {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a
                .cmp_release(b)
                .then_with(|| a.modifier.cmp(&b.modifier)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Version::new)
    }
}
