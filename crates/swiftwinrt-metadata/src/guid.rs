//! 128-bit interface identifiers

use crate::error::MetadataError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A GUID read from metadata
///
/// Stored as a [`Uuid`]; the canonical field layout (one 32-bit, two 16-bit
/// and eight 8-bit fields) is available through [`Guid::as_fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Guid(Uuid);

impl Guid {
    /// The all-zero GUID
    pub const ZERO: Self = Self(Uuid::nil());

    /// Build a GUID from its three leading fields and the trailing eight bytes
    pub const fn from_fields(a: u32, b: u16, c: u16, rest: [u8; 8]) -> Self {
        Self(Uuid::from_fields(a, b, c, &rest))
    }

    /// The `(a, b, c, d..k)` fields
    pub fn as_fields(&self) -> (u32, u16, u16, &[u8; 8]) {
        self.0.as_fields()
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for Guid {
    type Err = MetadataError;

    /// Parse `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`, optionally wrapped in braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MetadataError::InvalidGuid(s.to_string()))
    }
}

impl TryFrom<String> for Guid {
    type Error = MetadataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
