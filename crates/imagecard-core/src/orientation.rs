use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Aspect-ratio preset, serialized as the dimension string sent upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1792")]
    Portrait,
    #[serde(rename = "1792x1024")]
    Landscape,
}

impl Orientation {
    /// Every preset, in display order
    pub const ALL: [Self; 3] = [Self::Square, Self::Portrait, Self::Landscape];

    /// Dimension string (e.g. "1024x1024")
    pub const fn size(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Portrait => "1024x1792",
            Self::Landscape => "1792x1024",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.size())
    }
}

/// Returned when a string names no known orientation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation '{0}' (expected one of 1024x1024, 1024x1792, 1792x1024, square, portrait, landscape)")]
pub struct UnknownOrientation(pub String);

impl FromStr for Orientation {
    type Err = UnknownOrientation;

    /// Accepts either the dimension string or the label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Self::ALL
            .into_iter()
            .find(|o| o.size() == needle || o.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownOrientation(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_square() {
        assert_eq!(Orientation::default(), Orientation::Square);
    }

    #[test]
    fn serializes_as_dimension_string() {
        let json = serde_json::to_string(&Orientation::Portrait).unwrap();
        assert_eq!(json, "\"1024x1792\"");

        let parsed: Orientation = serde_json::from_str("\"1792x1024\"").unwrap();
        assert_eq!(parsed, Orientation::Landscape);
    }

    #[test]
    fn rejects_unknown_dimension() {
        assert!(serde_json::from_str::<Orientation>("\"512x512\"").is_err());
    }

    #[test]
    fn parses_labels_and_sizes() {
        assert_eq!("landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!("Portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert_eq!("1024x1024".parse::<Orientation>().unwrap(), Orientation::Square);

        let err = "wide".parse::<Orientation>().unwrap_err();
        assert_eq!(err, UnknownOrientation("wide".to_owned()));
    }
}
