#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Road class taxonomy and issue severity definitions.
//!
//! This crate defines the canonical road classification used across the
//! road-risk-map system. Raw OSM `highway` tags are normalized into this
//! shared taxonomy at ingestion time, and each class carries a fixed
//! baseline risk that seeds the blended risk score.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Normalized road class derived from the raw OSM `highway` tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RoadClass {
    /// High-importance through roads.
    Trunk,
    /// Major arterial roads.
    Primary,
    /// Connecting roads between arterials and local networks.
    Secondary,
    /// Local connector roads.
    Tertiary,
    /// Neighborhood streets.
    Residential,
    /// Minor ways: unclassified roads, tracks, and footways.
    #[serde(rename = "Unclassified/Track/Footway")]
    #[strum(serialize = "Unclassified/Track/Footway")]
    UnclassifiedTrackFootway,
    /// Anything that doesn't match a known tag, including absent tags.
    Other,
}

impl RoadClass {
    /// Returns the static baseline risk assigned to this class.
    ///
    /// Fixed at classification time and immutable thereafter; the dynamic
    /// current risk blends this value with reported issue severity.
    #[must_use]
    pub const fn baseline_risk(self) -> f64 {
        match self {
            Self::Trunk => 80.0,
            Self::Primary => 70.0,
            Self::Secondary => 55.0,
            Self::Tertiary => 40.0,
            Self::Residential => 25.0,
            Self::UnclassifiedTrackFootway => 15.0,
            Self::Other => 0.0,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Trunk,
            Self::Primary,
            Self::Secondary,
            Self::Tertiary,
            Self::Residential,
            Self::UnclassifiedTrackFootway,
            Self::Other,
        ]
    }
}

/// Classifies a raw `highway` tag into a [`RoadClass`].
///
/// The input is trimmed and lower-cased before matching. Matching is exact
/// (no substring rules); absent or empty input maps to [`RoadClass::Other`].
/// Total over all inputs; there is no failure path.
#[must_use]
pub fn classify(raw: Option<&str>) -> RoadClass {
    let Some(raw) = raw else {
        return RoadClass::Other;
    };

    match raw.trim().to_lowercase().as_str() {
        "trunk" => RoadClass::Trunk,
        "primary" => RoadClass::Primary,
        "secondary" => RoadClass::Secondary,
        "tertiary" => RoadClass::Tertiary,
        "residential" => RoadClass::Residential,
        "unclassified" | "track" | "footway" => RoadClass::UnclassifiedTrackFootway,
        _ => RoadClass::Other,
    }
}

/// Severity of a reported road issue, from 0 (informational) to 5 (worst).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IssueSeverity(u8);

impl IssueSeverity {
    /// Highest reportable severity.
    pub const MAX: u8 = 5;

    /// Creates a severity from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 0-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(InvalidSeverityError { value })
        }
    }

    /// Returns the numeric value of this severity.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Error returned when attempting to create an [`IssueSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 0-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_tags() {
        assert_eq!(classify(Some("trunk")), RoadClass::Trunk);
        assert_eq!(classify(Some("primary")), RoadClass::Primary);
        assert_eq!(classify(Some("secondary")), RoadClass::Secondary);
        assert_eq!(classify(Some("tertiary")), RoadClass::Tertiary);
        assert_eq!(classify(Some("residential")), RoadClass::Residential);
        assert_eq!(
            classify(Some("unclassified")),
            RoadClass::UnclassifiedTrackFootway
        );
        assert_eq!(classify(Some("track")), RoadClass::UnclassifiedTrackFootway);
        assert_eq!(
            classify(Some("footway")),
            RoadClass::UnclassifiedTrackFootway
        );
    }

    #[test]
    fn classification_ignores_case_and_whitespace() {
        assert_eq!(classify(Some("Trunk")), RoadClass::Trunk);
        assert_eq!(classify(Some("TRUNK")), RoadClass::Trunk);
        assert_eq!(classify(Some("  primary \t")), RoadClass::Primary);
    }

    #[test]
    fn unknown_and_absent_tags_map_to_other() {
        assert_eq!(classify(Some("motorway")), RoadClass::Other);
        assert_eq!(classify(Some("")), RoadClass::Other);
        assert_eq!(classify(None), RoadClass::Other);
    }

    #[test]
    fn no_substring_matching() {
        assert_eq!(classify(Some("primary_link")), RoadClass::Other);
        assert_eq!(classify(Some("trunkish")), RoadClass::Other);
    }

    #[test]
    fn baseline_risks_match_table() {
        assert!((RoadClass::Trunk.baseline_risk() - 80.0).abs() < f64::EPSILON);
        assert!((RoadClass::Primary.baseline_risk() - 70.0).abs() < f64::EPSILON);
        assert!((RoadClass::Secondary.baseline_risk() - 55.0).abs() < f64::EPSILON);
        assert!((RoadClass::Tertiary.baseline_risk() - 40.0).abs() < f64::EPSILON);
        assert!((RoadClass::Residential.baseline_risk() - 25.0).abs() < f64::EPSILON);
        assert!(
            (RoadClass::UnclassifiedTrackFootway.baseline_risk() - 15.0).abs() < f64::EPSILON
        );
        assert!(RoadClass::Other.baseline_risk().abs() < f64::EPSILON);
    }

    #[test]
    fn baseline_risks_stay_in_bounds() {
        for class in RoadClass::all() {
            let risk = class.baseline_risk();
            assert!((0.0..=100.0).contains(&risk), "{class:?} risk {risk} out of range");
        }
    }

    #[test]
    fn class_labels_round_trip() {
        for class in RoadClass::all() {
            let label = class.to_string();
            assert_eq!(label.parse::<RoadClass>().unwrap(), *class);
        }
        assert_eq!(
            RoadClass::UnclassifiedTrackFootway.to_string(),
            "Unclassified/Track/Footway"
        );
    }

    #[test]
    fn severity_from_value_accepts_full_domain() {
        for v in 0..=5u8 {
            let severity = IssueSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(IssueSeverity::from_value(6).is_err());
        assert!(IssueSeverity::from_value(255).is_err());
    }
}
