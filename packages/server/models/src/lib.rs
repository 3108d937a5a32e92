#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the road risk map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the database row types to allow independent evolution of the API
//! contract. Road and issue properties become the `properties` member of
//! `GeoJSON` features, with display defaults applied here rather than in
//! storage.

use road_risk_database_models::{IssueRow, RoadRow};
use serde::{Deserialize, Serialize};

/// Name shown for roads the source export left unnamed.
pub const UNNAMED_ROAD: &str = "Unnamed Road";

/// An issue report submitted through the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportForm {
    /// The road the issue is reported against.
    pub road_id: i64,
    /// Free-form issue type (pothole, flooding, ...).
    pub issue_type: String,
    /// Severity 0-5; validated before reaching the core.
    pub severity: u8,
    /// Report latitude (WGS84).
    pub lat: f64,
    /// Report longitude (WGS84).
    pub lon: f64,
    /// Optional media reference (a path/handle, stored opaquely).
    pub photo_path: Option<String>,
}

/// Acknowledgement returned after a report is recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAck {
    /// Human-readable status message.
    pub status: String,
    /// The road's recomputed current risk.
    pub current_risk: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Feature properties for a road, with display defaults applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadProperties {
    /// Road ID.
    pub id: i64,
    /// Display name ("Unnamed Road" when absent).
    pub name: String,
    /// Raw `highway` tag ("Unknown" when absent).
    pub highway: String,
    /// Normalized class label ("Other" when absent).
    pub road_class: String,
    /// Static baseline risk.
    pub baseline_risk: f64,
    /// Blended current risk.
    pub current_risk: f64,
    /// Worst reported severity, if any issues exist.
    pub max_severity: Option<i64>,
}

impl From<&RoadRow> for RoadProperties {
    fn from(row: &RoadRow) -> Self {
        Self {
            id: row.id,
            name: row
                .name
                .clone()
                .unwrap_or_else(|| UNNAMED_ROAD.to_string()),
            highway: row.highway.clone().unwrap_or_else(|| "Unknown".to_string()),
            road_class: if row.road_class.is_empty() {
                "Other".to_string()
            } else {
                row.road_class.clone()
            },
            baseline_risk: row.baseline_risk,
            current_risk: row.current_risk,
            max_severity: row.max_severity,
        }
    }
}

/// Feature properties for an issue report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueProperties {
    /// Issue ID.
    pub id: i64,
    /// Owning road ID.
    pub road_id: i64,
    /// Free-form issue type.
    pub issue_type: String,
    /// Reported severity (0-5).
    pub severity: i64,
    /// Attached media reference, if any.
    pub photo_path: Option<String>,
}

impl From<&IssueRow> for IssueProperties {
    fn from(row: &IssueRow) -> Self {
        Self {
            id: row.id,
            road_id: row.road_id,
            issue_type: row.issue_type.clone(),
            severity: row.severity,
            photo_path: row.photo_path.clone(),
        }
    }
}

/// Serializes a property type into the `JSON` object used as a feature's
/// `properties` member.
#[must_use]
pub fn to_json_object<T: Serialize>(
    properties: &T,
) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::to_value(properties) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road_row() -> RoadRow {
        RoadRow {
            id: 12,
            name: None,
            highway: None,
            road_class: String::new(),
            baseline_risk: 0.0,
            current_risk: 0.0,
            geom: "LINESTRING(0 0, 1 1)".to_string(),
            max_severity: None,
        }
    }

    #[test]
    fn road_properties_apply_display_defaults() {
        let props = RoadProperties::from(&road_row());
        assert_eq!(props.name, "Unnamed Road");
        assert_eq!(props.highway, "Unknown");
        assert_eq!(props.road_class, "Other");
    }

    #[test]
    fn road_properties_keep_present_values() {
        let mut row = road_row();
        row.name = Some("Lakeside Road".to_string());
        row.highway = Some("residential".to_string());
        row.road_class = "Residential".to_string();
        row.max_severity = Some(3);

        let props = RoadProperties::from(&row);
        assert_eq!(props.name, "Lakeside Road");
        assert_eq!(props.highway, "residential");
        assert_eq!(props.road_class, "Residential");
        assert_eq!(props.max_severity, Some(3));
    }

    #[test]
    fn properties_serialize_camel_case() {
        let props = RoadProperties::from(&road_row());
        let object = to_json_object(&props);
        assert!(object.contains_key("roadClass"));
        assert!(object.contains_key("baselineRisk"));
        assert!(object.contains_key("currentRisk"));
    }
}
