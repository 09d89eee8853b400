//! Upload buckets. Each feature writes into its own top-level prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Books,
    Resources,
    LostFound,
    Posts,
    Avatars,
    Attachments,
}

impl Bucket {
    pub const ALL: &'static [Self] = &[
        Self::Books,
        Self::Resources,
        Self::LostFound,
        Self::Posts,
        Self::Avatars,
        Self::Attachments,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Resources => "resources",
            Self::LostFound => "lost-found",
            Self::Posts => "posts",
            Self::Avatars => "avatars",
            Self::Attachments => "attachments",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| StorageError::UnknownBucket(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for bucket in Bucket::ALL {
            assert_eq!(bucket.as_str().parse::<Bucket>().unwrap(), *bucket);
        }
        assert!("lost_found".parse::<Bucket>().is_err());
    }

    #[test]
    fn display_is_url_segment() {
        assert_eq!(Bucket::LostFound.to_string(), "lost-found");
        assert_eq!(Bucket::Attachments.to_string(), "attachments");
    }
}
