// ABOUTME: Object kinds accepted by `podman inspect --type`.
// ABOUTME: Lowercase names with Display and FromStr.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of object to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectKind {
    Container,
    Image,
}

impl InspectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectKind::Container => "container",
            InspectKind::Image => "image",
        }
    }
}

impl fmt::Display for InspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown inspect type '{0}' (expected container or image)")]
pub struct ParseInspectKindError(String);

impl FromStr for InspectKind {
    type Err = ParseInspectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container" => Ok(InspectKind::Container),
            "image" => Ok(InspectKind::Image),
            _ => Err(ParseInspectKindError(s.to_string())),
        }
    }
}
