#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types for the road-risk-map.
//!
//! These types represent the shapes of data as stored in and retrieved
//! from the `roads` and `road_issues` tables. They are distinct from the
//! API response types in `road_risk_server_models`.

use chrono::{DateTime, Utc};
use road_risk_road_models::{IssueSeverity, RoadClass};
use serde::{Deserialize, Serialize};

/// A road segment row as retrieved from the database.
///
/// `geom` holds the persisted WKT text; decoding it back into coordinate
/// data is the caller's concern so a bad row degrades per-item instead of
/// failing the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRow {
    /// Primary key.
    pub id: i64,
    /// Display name, if the source carried one.
    pub name: Option<String>,
    /// Raw `highway` tag as ingested (lowercase).
    pub highway: Option<String>,
    /// Normalized road class label.
    pub road_class: String,
    /// Static risk assigned at classification time.
    pub baseline_risk: f64,
    /// Derived blended risk, recomputed on issue change.
    pub current_risk: f64,
    /// Persisted geometry as WKT text.
    pub geom: String,
    /// Worst severity across this road's issues, if any were reported.
    pub max_severity: Option<i64>,
}

/// A road issue row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRow {
    /// Primary key.
    pub id: i64,
    /// The road this issue was reported against.
    pub road_id: i64,
    /// Free-form issue type (pothole, flooding, ...).
    pub issue_type: String,
    /// Reported severity (0-5).
    pub severity: i64,
    /// Persisted point geometry as WKT text.
    pub geom: String,
    /// Attached media reference, if any.
    pub photo_path: Option<String>,
    /// When the issue was recorded. Display ordering only.
    pub created_at: DateTime<Utc>,
}

/// A road ready for insertion during batch ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRoad {
    /// Display name from the source feature.
    pub name: Option<String>,
    /// Raw `highway` tag, lowercase-normalized.
    pub highway: Option<String>,
    /// Normalized class from the taxonomy.
    pub road_class: RoadClass,
    /// Baseline risk fixed at classification time.
    pub baseline_risk: f64,
    /// Geometry encoded to its persisted WKT form.
    pub geom: String,
}

/// An issue report ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    /// The road this issue belongs to.
    pub road_id: i64,
    /// Free-form issue type.
    pub issue_type: String,
    /// Validated severity.
    pub severity: IssueSeverity,
    /// Report location encoded to its persisted WKT form.
    pub geom: String,
    /// Attached media reference, if any.
    pub photo_path: Option<String>,
}
