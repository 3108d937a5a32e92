#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geometry model and codecs for the road-risk-map system.
//!
//! Road and issue locations are modeled as an owned tagged enum over the
//! three supported kinds (Point, `LineString`, `MultiLineString`) and
//! converted losslessly between two textual encodings: `GeoJSON` geometry
//! objects (the ingest and API format) and WKT strings (the persisted
//! format). All conversions are pure; decode failures surface as
//! [`GeometryError`] and are degraded per-item by batch callers.

pub mod features;
mod wkt;

use geojson::{GeoJson, Value};
use thiserror::Error;

/// Errors that can occur while decoding or encoding geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The input could not be interpreted as geometry of a supported kind.
    #[error("Malformed geometry: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },

    /// The geometry kind is outside {Point, `LineString`, `MultiLineString`}.
    #[error("Unsupported geometry kind: {kind}")]
    UnsupportedKind {
        /// The kind that was encountered.
        kind: String,
    },
}

/// A single WGS84 coordinate, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude (x).
    pub lon: f64,
    /// Latitude (y).
    pub lat: f64,
}

impl Position {
    /// Creates a position from a longitude/latitude pair.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A geometry of one of the three supported kinds.
///
/// Coordinate order within a line is preserved exactly; a multi-line is an
/// ordered sequence of lines, each independently ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single location (issue reports).
    Point(Position),
    /// An ordered run of coordinates (road segments).
    LineString(Vec<Position>),
    /// An ordered sequence of line strings (multi-part road segments).
    MultiLineString(Vec<Vec<Position>>),
}

impl Geometry {
    /// Decodes a `GeoJSON` geometry object.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedKind`] for kinds outside the
    /// supported set (e.g. Polygon) and [`GeometryError::Malformed`] when
    /// coordinates are not pairs of finite numbers.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Self, GeometryError> {
        match &geometry.value {
            Value::Point(raw) => Ok(Self::Point(position(raw)?)),
            Value::LineString(raw) => Ok(Self::LineString(line(raw)?)),
            Value::MultiLineString(raw) => Ok(Self::MultiLineString(
                raw.iter().map(|l| line(l)).collect::<Result<_, _>>()?,
            )),
            other => Err(GeometryError::UnsupportedKind {
                kind: kind_name(other).to_string(),
            }),
        }
    }

    /// Decodes a `GeoJSON` geometry from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Malformed`] if the text is not a bare
    /// `GeoJSON` geometry object, or any error from [`Self::from_geojson`].
    pub fn from_geojson_str(text: &str) -> Result<Self, GeometryError> {
        let parsed: GeoJson = text.parse().map_err(|e| GeometryError::Malformed {
            message: format!("invalid GeoJSON: {e}"),
        })?;

        match parsed {
            GeoJson::Geometry(geometry) => Self::from_geojson(&geometry),
            GeoJson::Feature(_) | GeoJson::FeatureCollection(_) => {
                Err(GeometryError::Malformed {
                    message: "expected a bare geometry object".to_string(),
                })
            }
        }
    }

    /// Encodes this geometry as a `GeoJSON` geometry object.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Geometry {
        let value = match self {
            Self::Point(p) => Value::Point(vec![p.lon, p.lat]),
            Self::LineString(l) => Value::LineString(encode_line(l)),
            Self::MultiLineString(lines) => {
                Value::MultiLineString(lines.iter().map(|l| encode_line(l)).collect())
            }
        };
        geojson::Geometry::new(value)
    }

    /// Encodes this geometry as a WKT string, the persisted form.
    #[must_use]
    pub fn to_wkt(&self) -> String {
        wkt::encode(self)
    }

    /// Decodes a WKT string.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedKind`] for tags outside the
    /// supported set and [`GeometryError::Malformed`] for syntax errors or
    /// coordinates that are not pairs of finite numbers.
    pub fn from_wkt(text: &str) -> Result<Self, GeometryError> {
        wkt::decode(text)
    }
}

/// Validates a raw `GeoJSON` position into a [`Position`].
///
/// Positions may carry a trailing altitude, which is dropped; fewer than
/// two elements or non-finite values are malformed.
fn position(raw: &[f64]) -> Result<Position, GeometryError> {
    if raw.len() < 2 || !raw[0].is_finite() || !raw[1].is_finite() {
        return Err(GeometryError::Malformed {
            message: format!("coordinate {raw:?} is not a pair of finite numbers"),
        });
    }
    Ok(Position::new(raw[0], raw[1]))
}

fn line(raw: &[Vec<f64>]) -> Result<Vec<Position>, GeometryError> {
    raw.iter().map(|p| position(p)).collect()
}

fn encode_line(line: &[Position]) -> Vec<Vec<f64>> {
    line.iter().map(|p| vec![p.lon, p.lat]).collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_positions_close(actual: &[Position], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, (lon, lat)) in actual.iter().zip(expected) {
            assert!((a.lon - lon).abs() < 1e-9);
            assert!((a.lat - lat).abs() < 1e-9);
        }
    }

    #[test]
    fn decodes_line_string_preserving_order() {
        let geometry = Geometry::from_geojson_str(
            r#"{"type":"LineString","coordinates":[[83.9856,28.2096],[83.9871,28.2103],[83.9889,28.2110]]}"#,
        )
        .unwrap();

        let Geometry::LineString(points) = geometry else {
            panic!("expected a LineString");
        };
        assert_positions_close(
            &points,
            &[(83.9856, 28.2096), (83.9871, 28.2103), (83.9889, 28.2110)],
        );
    }

    #[test]
    fn decodes_multi_line_string() {
        let geometry = Geometry::from_geojson_str(
            r#"{"type":"MultiLineString","coordinates":[[[0.0,1.0],[2.0,3.0]],[[4.0,5.0],[6.0,7.0]]]}"#,
        )
        .unwrap();

        let Geometry::MultiLineString(lines) = geometry else {
            panic!("expected a MultiLineString");
        };
        assert_eq!(lines.len(), 2);
        assert_positions_close(&lines[0], &[(0.0, 1.0), (2.0, 3.0)]);
        assert_positions_close(&lines[1], &[(4.0, 5.0), (6.0, 7.0)]);
    }

    #[test]
    fn rejects_polygon_as_unsupported() {
        let err = Geometry::from_geojson_str(
            r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GeometryError::UnsupportedKind { ref kind } if kind == "Polygon"
        ));
    }

    #[test]
    fn rejects_non_pair_coordinates() {
        let err =
            Geometry::from_geojson_str(r#"{"type":"LineString","coordinates":[[83.9856]]}"#)
                .unwrap_err();
        assert!(matches!(err, GeometryError::Malformed { .. }));
    }

    #[test]
    fn rejects_feature_collections() {
        let err = Geometry::from_geojson_str(r#"{"type":"FeatureCollection","features":[]}"#)
            .unwrap_err();
        assert!(matches!(err, GeometryError::Malformed { .. }));
    }

    #[test]
    fn drops_altitude_element() {
        let geometry =
            Geometry::from_geojson_str(r#"{"type":"Point","coordinates":[83.98,28.21,812.0]}"#)
                .unwrap();
        assert_eq!(geometry, Geometry::Point(Position::new(83.98, 28.21)));
    }

    #[test]
    fn geojson_round_trip() {
        let original = Geometry::MultiLineString(vec![
            vec![Position::new(83.9856, 28.2096), Position::new(83.9871, 28.2103)],
            vec![Position::new(84.0001, 28.2200), Position::new(84.0015, 28.2207)],
        ]);

        let decoded = Geometry::from_geojson(&original.to_geojson()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn wkt_round_trip_through_inherent_methods() {
        let original = Geometry::LineString(vec![
            Position::new(83.9856, 28.2096),
            Position::new(83.9871, 28.2103),
            Position::new(83.9889, 28.2110),
        ]);

        let decoded = Geometry::from_wkt(&original.to_wkt()).unwrap();
        assert_eq!(decoded, original);
    }
}
