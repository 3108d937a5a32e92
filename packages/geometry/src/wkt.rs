//! Minimal WKT encoder and parser for the supported geometry kinds.
//!
//! The persisted form of every geometry is WKT text (`POINT(x y)`,
//! `LINESTRING(...)`, `MULTILINESTRING((...), (...))`), so only those
//! three tags are implemented. Coordinates are written with Rust's
//! shortest round-trippable float formatting, which keeps
//! decode(encode(g)) exact.

use crate::{Geometry, GeometryError, Position};

/// Encodes a geometry as a WKT string.
pub(crate) fn encode(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point(p) => format!("POINT({} {})", p.lon, p.lat),
        Geometry::LineString(line) => format!("LINESTRING({})", encode_line(line)),
        Geometry::MultiLineString(lines) => {
            let parts: Vec<String> = lines
                .iter()
                .map(|line| format!("({})", encode_line(line)))
                .collect();
            format!("MULTILINESTRING({})", parts.join(", "))
        }
    }
}

fn encode_line(line: &[Position]) -> String {
    line.iter()
        .map(|p| format!("{} {}", p.lon, p.lat))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a WKT string into a [`Geometry`].
pub(crate) fn decode(text: &str) -> Result<Geometry, GeometryError> {
    let trimmed = text.trim();

    let open = trimmed.find('(').ok_or_else(|| malformed(text))?;
    if !trimmed.ends_with(')') {
        return Err(malformed(text));
    }

    let tag = trimmed[..open].trim().to_ascii_uppercase();
    let body = &trimmed[open + 1..trimmed.len() - 1];

    match tag.as_str() {
        "POINT" => Ok(Geometry::Point(parse_position(body)?)),
        "LINESTRING" => Ok(Geometry::LineString(parse_line(body)?)),
        "MULTILINESTRING" => {
            let groups = split_groups(body)?;
            let lines = groups
                .into_iter()
                .map(parse_line)
                .collect::<Result<Vec<_>, _>>()?;
            if lines.is_empty() {
                return Err(malformed(text));
            }
            Ok(Geometry::MultiLineString(lines))
        }
        other => Err(GeometryError::UnsupportedKind {
            kind: other.to_string(),
        }),
    }
}

fn malformed(text: &str) -> GeometryError {
    GeometryError::Malformed {
        message: format!("invalid WKT: {text:?}"),
    }
}

/// Parses a single `x y` coordinate pair.
fn parse_position(raw: &str) -> Result<Position, GeometryError> {
    let mut numbers = raw.split_whitespace().map(str::parse::<f64>);

    let lon = numbers.next().and_then(Result::ok);
    let lat = numbers.next().and_then(Result::ok);

    match (lon, lat, numbers.next()) {
        (Some(lon), Some(lat), None) if lon.is_finite() && lat.is_finite() => {
            Ok(Position::new(lon, lat))
        }
        _ => Err(GeometryError::Malformed {
            message: format!("coordinate {raw:?} is not a pair of finite numbers"),
        }),
    }
}

/// Parses a comma-separated run of `x y` pairs.
fn parse_line(raw: &str) -> Result<Vec<Position>, GeometryError> {
    raw.split(',').map(parse_position).collect()
}

/// Splits a `MULTILINESTRING` body into its parenthesized line bodies.
fn split_groups(body: &str) -> Result<Vec<&str>, GeometryError> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, ch) in body.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = idx + 1;
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(GeometryError::Malformed {
                        message: format!("unbalanced parentheses in WKT body {body:?}"),
                    });
                }
                depth -= 1;
                if depth == 0 {
                    groups.push(&body[start..idx]);
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(GeometryError::Malformed {
            message: format!("unbalanced parentheses in WKT body {body:?}"),
        });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_point() {
        let wkt = encode(&Geometry::Point(Position::new(83.9856, 28.2096)));
        assert_eq!(wkt, "POINT(83.9856 28.2096)");
    }

    #[test]
    fn encodes_line_string() {
        let wkt = encode(&Geometry::LineString(vec![
            Position::new(83.9856, 28.2096),
            Position::new(83.9871, 28.2103),
        ]));
        assert_eq!(wkt, "LINESTRING(83.9856 28.2096, 83.9871 28.2103)");
    }

    #[test]
    fn encodes_multi_line_string() {
        let wkt = encode(&Geometry::MultiLineString(vec![
            vec![Position::new(0.0, 1.0), Position::new(2.0, 3.0)],
            vec![Position::new(4.0, 5.0)],
        ]));
        assert_eq!(wkt, "MULTILINESTRING((0 1, 2 3), (4 5))");
    }

    #[test]
    fn decodes_point() {
        let geometry = decode("POINT(83.9856 28.2096)").unwrap();
        assert_eq!(geometry, Geometry::Point(Position::new(83.9856, 28.2096)));
    }

    #[test]
    fn decode_is_case_insensitive_on_tag() {
        let geometry = decode("point(1 2)").unwrap();
        assert_eq!(geometry, Geometry::Point(Position::new(1.0, 2.0)));
    }

    #[test]
    fn decodes_multi_line_string_groups_in_order() {
        let geometry = decode("MULTILINESTRING((0 1, 2 3), (4 5, 6 7))").unwrap();
        let Geometry::MultiLineString(lines) = geometry else {
            panic!("expected a MultiLineString");
        };
        assert_eq!(
            lines,
            vec![
                vec![Position::new(0.0, 1.0), Position::new(2.0, 3.0)],
                vec![Position::new(4.0, 5.0), Position::new(6.0, 7.0)],
            ]
        );
    }

    #[test]
    fn rejects_unsupported_tag() {
        let err = decode("POLYGON((0 0, 1 0, 1 1, 0 0))").unwrap_err();
        assert!(matches!(
            err,
            GeometryError::UnsupportedKind { ref kind } if kind == "POLYGON"
        ));
    }

    #[test]
    fn rejects_syntax_errors() {
        assert!(decode("LINESTRING 0 1, 2 3").is_err());
        assert!(decode("LINESTRING(0 1, 2 3").is_err());
        assert!(decode("LINESTRING(0, 2)").is_err());
        assert!(decode("LINESTRING(a b)").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(decode("POINT(NaN 2)").is_err());
        assert!(decode("POINT(inf 2)").is_err());
    }

    #[test]
    fn round_trips_three_point_line() {
        let original = Geometry::LineString(vec![
            Position::new(83.9856, 28.2096),
            Position::new(83.9871, 28.2103),
            Position::new(83.9889, 28.2110),
        ]);
        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }

    #[test]
    fn round_trips_multi_line() {
        let original = Geometry::MultiLineString(vec![
            vec![Position::new(83.9856, 28.2096), Position::new(83.9871, 28.2103)],
            vec![Position::new(84.0001, 28.2200), Position::new(84.0015, 28.2207)],
        ]);
        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }
}
