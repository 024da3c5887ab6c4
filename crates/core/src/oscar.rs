//! Oscar award categories and year bounds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// First year an award can be recorded for.
pub const MIN_YEAR: i32 = 1929;
/// Last year an award can be recorded for.
pub const MAX_YEAR: i32 = 2016;

/// The closed set of award categories.
///
/// Transmitted and stored as its identifier (`Best_Film`), displayed with
/// its label (`Best Film`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OscarCategory {
    #[serde(rename = "Best_Film")]
    BestFilm,
    #[serde(rename = "Best_Film_Editing")]
    BestFilmEditing,
    #[serde(rename = "Best_Scenario")]
    BestScenario,
    #[serde(rename = "Best_Adapter_Screenplay")]
    BestAdapterScreenplay,
    #[serde(rename = "Best_Original_Song")]
    BestOriginalSong,
}

impl OscarCategory {
    pub const ALL: [OscarCategory; 5] = [
        OscarCategory::BestFilm,
        OscarCategory::BestFilmEditing,
        OscarCategory::BestScenario,
        OscarCategory::BestAdapterScreenplay,
        OscarCategory::BestOriginalSong,
    ];

    /// Wire and storage identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            OscarCategory::BestFilm => "Best_Film",
            OscarCategory::BestFilmEditing => "Best_Film_Editing",
            OscarCategory::BestScenario => "Best_Scenario",
            OscarCategory::BestAdapterScreenplay => "Best_Adapter_Screenplay",
            OscarCategory::BestOriginalSong => "Best_Original_Song",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            OscarCategory::BestFilm => "Best Film",
            OscarCategory::BestFilmEditing => "Best Film Editing",
            OscarCategory::BestScenario => "Best Scenario",
            OscarCategory::BestAdapterScreenplay => "Best Adapter Screenplay",
            OscarCategory::BestOriginalSong => "Best Original Song",
        }
    }
}

impl fmt::Display for OscarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct UnknownCategory(pub String);

impl FromStr for OscarCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OscarCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for OscarCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn identifiers_are_labels_with_underscores() {
        for category in OscarCategory::ALL {
            assert_eq!(category.as_str(), category.label().replace(' ', "_"));
        }
    }

    #[test]
    fn parses_identifier() {
        assert_eq!(
            "Best_Original_Song".parse::<OscarCategory>(),
            Ok(OscarCategory::BestOriginalSong)
        );
    }

    #[test]
    fn rejects_label_and_unknown_strings() {
        assert_matches!("Best Film".parse::<OscarCategory>(), Err(UnknownCategory(_)));
        assert_matches!("AA".parse::<OscarCategory>(), Err(UnknownCategory(s)) if s == "AA");
    }

    #[test]
    fn serde_uses_identifier() {
        let json = serde_json::to_string(&OscarCategory::BestFilmEditing).unwrap();
        assert_eq!(json, "\"Best_Film_Editing\"");
    }
}
