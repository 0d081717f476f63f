//! Rotation modes.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// How a rotator treats the visitor's previously shown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RotationMode {
    /// Show the same content the visitor saw last time.
    AlwaysSame,
    /// Show anything except what the visitor saw last time.
    AlwaysDifferent,
    /// Weighted random draw on every visit.
    #[default]
    Random,
}

impl RotationMode {
    pub const ALL: [RotationMode; 3] = [
        RotationMode::AlwaysSame,
        RotationMode::AlwaysDifferent,
        RotationMode::Random,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RotationMode::AlwaysSame => "always-same",
            RotationMode::AlwaysDifferent => "always-different",
            RotationMode::Random => "random",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationMode {
    type Err = Error;

    /// Accepts `always-same`, `always_same` and `AlwaysSame` spellings, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match norm.as_str() {
            "alwayssame" => Ok(RotationMode::AlwaysSame),
            "alwaysdifferent" => Ok(RotationMode::AlwaysDifferent),
            "random" => Ok(RotationMode::Random),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_random() {
        assert_eq!(RotationMode::default(), RotationMode::Random);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for m in RotationMode::ALL {
            assert_eq!(m.to_string().parse::<RotationMode>().unwrap(), m);
        }
    }

    #[test]
    fn from_str_accepts_legacy_spellings() {
        assert_eq!("AlwaysSame".parse::<RotationMode>(), Ok(RotationMode::AlwaysSame));
        assert_eq!(
            "always_different".parse::<RotationMode>(),
            Ok(RotationMode::AlwaysDifferent)
        );
        assert_eq!(" RANDOM ".parse::<RotationMode>(), Ok(RotationMode::Random));
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert_eq!(
            "sometimes".parse::<RotationMode>(),
            Err(Error::UnknownMode("sometimes".to_string()))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&RotationMode::AlwaysDifferent).unwrap();
        assert_eq!(json, "\"always-different\"");
        let back: RotationMode = serde_json::from_str("\"always-same\"").unwrap();
        assert_eq!(back, RotationMode::AlwaysSame);
    }
}
