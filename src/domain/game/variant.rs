use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two independently tracked game feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Plain feed; the round id comes from a sibling session-marker event.
    #[serde(rename = "taixiu")]
    Plain,
    /// Verified feed; every result event carries its own id and an md5 digest.
    #[serde(rename = "taixiumd5")]
    Digest,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Plain, Variant::Digest];

    /// Path segment used by the HTTP API.
    pub fn slug(self) -> &'static str {
        match self {
            Variant::Plain => "taixiu",
            Variant::Digest => "taixiumd5",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "taixiu" | "plain" => Ok(Variant::Plain),
            "taixiumd5" | "digest" | "md5" => Ok(Variant::Digest),
            _ => anyhow::bail!("Unknown variant: {}. Must be 'taixiu' or 'taixiumd5'", s),
        }
    }
}
