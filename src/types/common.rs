//! Common enums shared by the raw client contract and the resilient handles.

use serde::{Deserialize, Serialize};

/// Bucket visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketType {
    /// Files can only be downloaded with an authorization token (default).
    #[default]
    AllPrivate,
    /// Anyone may download files from the bucket.
    AllPublic,
    /// Files are encrypted and only downloadable by the owner.
    Snapshot,
}

impl BucketType {
    /// Returns the B2 API string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketType::AllPrivate => "allPrivate",
            BucketType::AllPublic => "allPublic",
            BucketType::Snapshot => "snapshot",
        }
    }
}

impl std::str::FromStr for BucketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allPrivate" => Ok(BucketType::AllPrivate),
            "allPublic" => Ok(BucketType::AllPublic),
            "snapshot" => Ok(BucketType::Snapshot),
            _ => Err(format!("Unknown bucket type: {}", s)),
        }
    }
}

impl std::fmt::Display for BucketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
