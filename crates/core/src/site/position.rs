//! Item slots.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Slot an item renders in. The renderer filters items by slot, and each
/// section only renders some of them (see [`SectionItem::SLOTS`]).
///
/// [`SectionItem::SLOTS`]: super::SectionItem::SLOTS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Center,
    Right,
    /// The navbar's link strip.
    Nav,
}

/// Returned when a string is not one of the position slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position '{0}', expected left, center, right or nav")]
pub struct InvalidPosition(pub String);

impl Position {
    pub const ALL: [Self; 4] = [Self::Left, Self::Center, Self::Right, Self::Nav];

    /// Slots of sections without a link strip.
    pub const ALIGNMENTS: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Nav => "nav",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = InvalidPosition;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "nav" => Ok(Self::Nav),
            _ => Err(InvalidPosition(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Center".parse::<Position>().unwrap(), Position::Center);
        assert_eq!(" NAV ".parse::<Position>().unwrap(), Position::Nav);
    }

    #[test]
    fn test_parse_rejects_unknown_slot() {
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Position::Right).unwrap(), "\"right\"");
        assert!(serde_json::from_str::<Position>("\"Right\"").is_err());
    }
}
