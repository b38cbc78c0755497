//! Opaque location names.

use std::fmt;

/// Name of a place or resource (a track section, a platform, a junction).
///
/// Several graph nodes share one `Location`: one per safe interval.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(String);

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
