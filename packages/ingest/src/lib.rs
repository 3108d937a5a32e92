#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for ingesting road geometry from a `GeoJSON` export into the
//! road-risk database.
//!
//! Each source feature is classified from its raw `highway` tag, its
//! geometry decoded and re-encoded to the persisted WKT form, and the
//! resulting roads batch-inserted. Features with unsupported or
//! malformed geometry are skipped and counted; a bad record never
//! aborts the batch. After insertion every road's current risk is
//! recomputed from the full issue set, grouped by road.

use std::path::Path;

use geojson::GeoJson;
use road_risk_database_models::NewRoad;
use road_risk_geometry::Geometry;
use road_risk_road_models::classify;
use switchy_database::Database;

/// Errors that can occur during ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Failed to read the export file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The export file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The export file is valid `GeoJSON` but not a feature collection.
    #[error("Export is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    /// A database operation failed.
    #[error("Database error: {0}")]
    Db(#[from] road_risk_database::DbError),
}

/// Outcome of a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Roads inserted into the store (duplicates skipped by the store are
    /// not counted).
    pub inserted: u64,
    /// Source features skipped for missing, unsupported, or malformed
    /// geometry.
    pub skipped: usize,
    /// Total features in the export.
    pub total: usize,
}

/// Builds an insertable road from a source feature.
///
/// Returns `None` when the feature has no geometry, the geometry kind is
/// outside the supported set (roads are line geometries, so Points and
/// Polygons are skipped), or the coordinates are malformed.
#[must_use]
pub fn road_from_feature(feature: &geojson::Feature) -> Option<NewRoad> {
    let raw_geometry = feature.geometry.as_ref()?;

    let geometry = match Geometry::from_geojson(raw_geometry) {
        Ok(Geometry::Point(_)) => {
            log::debug!("Skipping feature: Point geometry is not a road");
            return None;
        }
        Ok(geometry) => geometry,
        Err(e) => {
            log::debug!("Skipping feature: {e}");
            return None;
        }
    };

    let name = feature
        .property("name")
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string);
    let highway = feature
        .property("highway")
        .and_then(serde_json::Value::as_str)
        .map(|h| h.trim().to_lowercase());

    let road_class = classify(highway.as_deref());

    Some(NewRoad {
        name,
        highway,
        road_class,
        baseline_risk: road_class.baseline_risk(),
        geom: geometry.to_wkt(),
    })
}

/// Imports roads from a `GeoJSON` export file, then recomputes all
/// current risks grouped by road.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed, or a
/// database operation fails. Per-feature geometry problems are skipped,
/// not propagated.
pub async fn import_geojson(
    db: &dyn Database,
    path: &Path,
) -> Result<ImportSummary, IngestError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: GeoJson = raw.parse()?;

    let GeoJson::FeatureCollection(collection) = parsed else {
        return Err(IngestError::NotAFeatureCollection);
    };

    let total = collection.features.len();
    let roads: Vec<NewRoad> = collection
        .features
        .iter()
        .filter_map(road_from_feature)
        .collect();
    let skipped = total - roads.len();

    log::info!(
        "Parsed {} roads from {total} features ({skipped} skipped)",
        roads.len()
    );

    let inserted = road_risk_database::queries::insert_roads(db, &roads).await?;

    let recomputed = road_risk_database::queries::recompute_all_road_risks(db).await?;
    log::info!("Recomputed current risk for {recomputed} roads");

    Ok(ImportSummary {
        inserted,
        skipped,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_risk_road_models::RoadClass;

    fn feature_from_json(raw: &str) -> geojson::Feature {
        let parsed: GeoJson = raw.parse().unwrap();
        geojson::Feature::try_from(parsed).unwrap()
    }

    #[test]
    fn builds_road_from_line_string_feature() {
        let feature = feature_from_json(
            r#"{"type":"Feature","properties":{"name":"Prithvi Highway","highway":"Trunk"},
                "geometry":{"type":"LineString","coordinates":[[83.98,28.20],[83.99,28.21]]}}"#,
        );

        let road = road_from_feature(&feature).unwrap();
        assert_eq!(road.name.as_deref(), Some("Prithvi Highway"));
        assert_eq!(road.highway.as_deref(), Some("trunk"));
        assert_eq!(road.road_class, RoadClass::Trunk);
        assert!((road.baseline_risk - 80.0).abs() < f64::EPSILON);
        assert_eq!(road.geom, "LINESTRING(83.98 28.2, 83.99 28.21)");
    }

    #[test]
    fn skips_polygon_features() {
        let feature = feature_from_json(
            r#"{"type":"Feature","properties":{"highway":"primary"},
                "geometry":{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}}"#,
        );
        assert!(road_from_feature(&feature).is_none());
    }

    #[test]
    fn skips_point_features() {
        let feature = feature_from_json(
            r#"{"type":"Feature","properties":{"highway":"primary"},
                "geometry":{"type":"Point","coordinates":[83.98,28.20]}}"#,
        );
        assert!(road_from_feature(&feature).is_none());
    }

    #[test]
    fn skips_features_without_geometry() {
        let feature =
            feature_from_json(r#"{"type":"Feature","properties":{"highway":"primary"},"geometry":null}"#);
        assert!(road_from_feature(&feature).is_none());
    }

    #[test]
    fn unknown_highway_classifies_as_other() {
        let feature = feature_from_json(
            r#"{"type":"Feature","properties":{"highway":"motorway"},
                "geometry":{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}}"#,
        );

        let road = road_from_feature(&feature).unwrap();
        assert_eq!(road.road_class, RoadClass::Other);
        assert!(road.baseline_risk.abs() < f64::EPSILON);
    }

    #[test]
    fn multi_line_string_features_are_supported() {
        let feature = feature_from_json(
            r#"{"type":"Feature","properties":{"highway":"residential"},
                "geometry":{"type":"MultiLineString","coordinates":[[[0.0,1.0],[2.0,3.0]],[[4.0,5.0],[6.0,7.0]]]}}"#,
        );

        let road = road_from_feature(&feature).unwrap();
        assert_eq!(road.road_class, RoadClass::Residential);
        assert_eq!(road.geom, "MULTILINESTRING((0 1, 2 3), (4 5, 6 7))");
    }
}
