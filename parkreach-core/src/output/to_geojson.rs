use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Map, Value, json};

use crate::{AccessibilityResult, AnnotatedBuilding, Error, GridSample, GridSummary, Park};

/// Converts annotated buildings to a `GeoJSON` `FeatureCollection` of points.
///
/// Every feature carries `id`, `nearest_node`, `dist_to_park_m` (null when no
/// park is in reach), the boolean `park_access_<cutoff>m` and `distance_band`.
pub fn buildings_to_geojson(result: &AccessibilityResult) -> Result<FeatureCollection, Error> {
    let access_attribute = result.access_attribute();
    let features = result
        .buildings
        .iter()
        .map(|building| building_feature(building, &access_attribute))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn buildings_to_geojson_string(result: &AccessibilityResult) -> Result<String, Error> {
    serde_json::to_string(&buildings_to_geojson(result)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Converts the snapped parks of a run to a `FeatureCollection` of points with
/// `id`, `name` and `nearest_node`
pub fn parks_to_geojson(result: &AccessibilityResult) -> Result<FeatureCollection, Error> {
    let features = result
        .parks
        .iter()
        .map(park_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn parks_to_geojson_string(result: &AccessibilityResult) -> Result<String, Error> {
    serde_json::to_string(&parks_to_geojson(result)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Converts grid samples to a `GeoJSON` `FeatureCollection` of points
pub fn samples_to_geojson(summary: &GridSummary) -> Result<FeatureCollection, Error> {
    let features = summary
        .samples
        .iter()
        .map(sample_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn samples_to_geojson_string(summary: &GridSummary) -> Result<String, Error> {
    serde_json::to_string(&samples_to_geojson(summary)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn park_feature(park: &Park) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&park.geometry));

    Feature::from_json_value(json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "id": park.id,
            "name": park.name,
            "nearest_node": park.nearest_node,
        },
    }))
    .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn building_feature(building: &AnnotatedBuilding, access_attribute: &str) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&building.geometry));

    let mut properties = Map::new();
    properties.insert("id".to_string(), json!(building.id));
    properties.insert("nearest_node".to_string(), json!(building.nearest_node));
    properties.insert("dist_to_park_m".to_string(), json!(building.dist_to_park_m));
    properties.insert(access_attribute.to_string(), json!(building.park_access));
    properties.insert(
        "distance_band".to_string(),
        json!(building.distance_band().as_str()),
    );

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": Value::Object(properties),
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn sample_feature(sample: &GridSample) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&Point::new(sample.lon, sample.lat)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "nearest_park": sample.nearest_park,
            "distance_m": sample.distance_m,
            "accessible": sample.accessible,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
