use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown skip placement '{0}', expected 'private' or 'public'")]
pub struct UnknownPlacement(pub String);

/// Where the skip will stand once delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipPlacement {
    /// Driveway or private land.
    #[default]
    Private,
    /// Street or public highway.
    Public,
}

impl SkipPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Private => "Private Property",
            Self::Public => "Public Road",
        }
    }

    pub fn info(&self) -> &'static str {
        match self {
            Self::Private => "No permit required when placed on your private property",
            Self::Public => "Permit required for placement on public roads",
        }
    }

    /// A council permit is needed only on public land.
    pub fn requires_permit(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for SkipPlacement {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkipPlacement {
    type Err = UnknownPlacement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            _ => Err(UnknownPlacement(s.to_string())),
        }
    }
}
