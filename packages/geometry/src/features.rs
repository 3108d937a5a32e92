//! Assembly of (geometry, properties) pairs into a `GeoJSON` feature
//! collection for the map client.
//!
//! The builder never fails and never drops an entity: an absent or
//! undecodable geometry becomes a `null` geometry member while the
//! entity's properties are still surfaced. Input order is preserved.

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};

use crate::Geometry;

/// One entity headed for the map client: an optional decoded geometry and
/// its property object.
pub type Entity = (Option<Geometry>, JsonObject);

/// Builds a feature collection from entities, in the order supplied.
///
/// Fractional numeric properties are rounded to two decimal places for
/// presentation; the stored values retain full precision. Integers pass
/// through untouched.
#[must_use]
pub fn build_feature_collection(entities: Vec<Entity>) -> FeatureCollection {
    let features = entities
        .into_iter()
        .map(|(geometry, properties)| Feature {
            bbox: None,
            geometry: geometry.map(|g| g.to_geojson()),
            id: None,
            properties: Some(round_numeric_properties(properties)),
            foreign_members: None,
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn round_numeric_properties(properties: JsonObject) -> JsonObject {
    properties
        .into_iter()
        .map(|(key, value)| (key, round_value(value)))
        .collect()
}

fn round_value(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Number(n) if n.is_f64() => {
            let rounded = n.as_f64().map_or(0.0, |v| (v * 100.0).round() / 100.0);
            serde_json::Number::from_f64(rounded).map_or(JsonValue::Null, JsonValue::Number)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;
    use serde_json::json;

    fn properties(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn preserves_entity_order() {
        let collection = build_feature_collection(vec![
            (None, properties(json!({"id": 3}))),
            (None, properties(json!({"id": 1}))),
            (None, properties(json!({"id": 2}))),
        ]);

        let ids: Vec<i64> = collection
            .features
            .iter()
            .map(|f| {
                f.properties
                    .as_ref()
                    .and_then(|p| p.get("id"))
                    .and_then(JsonValue::as_i64)
                    .unwrap()
            })
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn absent_geometry_degrades_to_null_without_dropping_entity() {
        let collection = build_feature_collection(vec![(
            None,
            properties(json!({"id": 7, "name": "Lakeside Road"})),
        )]);

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert!(feature.geometry.is_none());
        assert_eq!(
            feature.properties.as_ref().unwrap().get("name"),
            Some(&json!("Lakeside Road"))
        );
    }

    #[test]
    fn attaches_encoded_geometry() {
        let collection = build_feature_collection(vec![(
            Some(Geometry::Point(Position::new(83.98, 28.21))),
            properties(json!({"id": 1})),
        )]);

        let geometry = collection.features[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.value, geojson::Value::Point(vec![83.98, 28.21]));
    }

    #[test]
    fn rounds_fractional_properties_to_two_decimals() {
        let collection = build_feature_collection(vec![(
            None,
            properties(json!({"currentRisk": 41.504_999, "baselineRisk": 25.0})),
        )]);

        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props.get("currentRisk"), Some(&json!(41.5)));
        assert_eq!(props.get("baselineRisk"), Some(&json!(25.0)));
    }

    #[test]
    fn leaves_integers_and_strings_untouched() {
        let collection = build_feature_collection(vec![(
            None,
            properties(json!({"severity": 4, "roadClass": "Primary"})),
        )]);

        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props.get("severity"), Some(&json!(4)));
        assert_eq!(props.get("roadClass"), Some(&json!("Primary")));
    }
}
