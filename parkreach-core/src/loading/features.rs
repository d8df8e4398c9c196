//! Building and park layers (GeoJSON or CSV with WKT geometries)

use std::fs::{self, File};
use std::path::Path;

use geo::{Centroid, Geometry};
use geojson::{Feature, FeatureCollection, GeoJson, feature::Id};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use wkt::TryFromWkt;

use super::boundary::Boundary;
use crate::{Building, Error, Park, ParkLocation};

#[derive(Debug, Deserialize)]
struct WktRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    wkt: String,
}

/// One feature of a building or park layer before it is reduced to a point
#[derive(Debug, Clone)]
struct LayerRecord {
    id: String,
    name: Option<String>,
    geometry: Option<Geometry<f64>>,
}

/// Loads buildings, reducing each footprint to its centroid
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_buildings(path: &Path, id_property: &str) -> Result<Vec<Building>, Error> {
    load_buildings_within(path, id_property, None)
}

/// Loads parks, reducing each polygon to its centroid. The park name is taken
/// from the `name` property (or CSV column) when present.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_parks(path: &Path, id_property: &str) -> Result<Vec<Park>, Error> {
    load_parks_within(path, id_property, None)
}

/// [`load_buildings`], keeping only footprints that intersect `boundary`
pub(super) fn load_buildings_within(
    path: &Path,
    id_property: &str,
    boundary: Option<&Boundary>,
) -> Result<Vec<Building>, Error> {
    let records = clip(read_layer(path, id_property)?, boundary, "building");
    let buildings = reduce_to_points(records, "building", |record, geometry| {
        Building::from_geometry(record.id, geometry)
    });
    info!("Loaded {} buildings from {}", buildings.len(), path.display());
    Ok(buildings)
}

/// [`load_parks`], keeping only parks that intersect `boundary`
pub(super) fn load_parks_within(
    path: &Path,
    id_property: &str,
    boundary: Option<&Boundary>,
) -> Result<Vec<Park>, Error> {
    let records = clip(read_layer(path, id_property)?, boundary, "park");
    let parks = reduce_to_points(records, "park", |record, geometry| {
        let park = Park::from_geometry(record.id, geometry)?;
        Ok(match record.name {
            Some(name) => park.with_name(name),
            None => park,
        })
    });
    info!("Loaded {} parks from {}", parks.len(), path.display());
    Ok(parks)
}

/// Loads park centroids in geographic coordinates for the straight-line
/// index. Only `Polygon` features are used; the centroid is taken over the
/// outer ring.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a `FeatureCollection`
pub fn load_park_locations(path: &Path) -> Result<Vec<ParkLocation>, Error> {
    let collection = read_feature_collection(path)?;

    let parks: Vec<ParkLocation> = collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let name = string_property(&feature, "name").unwrap_or_else(|| "Unnamed park".to_string());
            match feature_geometry(feature)? {
                Geometry::Polygon(polygon) if !polygon.exterior().0.is_empty() => {
                    let outer = geo::Polygon::new(polygon.exterior().clone(), vec![]);
                    outer
                        .centroid()
                        .map(|centroid| ParkLocation::new(name, centroid.y(), centroid.x()))
                }
                _ => None,
            }
        })
        .collect();

    info!("Loaded {} park centroids from {}", parks.len(), path.display());
    Ok(parks)
}

fn clip(records: Vec<LayerRecord>, boundary: Option<&Boundary>, kind: &str) -> Vec<LayerRecord> {
    let Some(boundary) = boundary else {
        return records;
    };

    let total = records.len();
    let kept: Vec<LayerRecord> = records
        .into_iter()
        .filter(|record| {
            record
                .geometry
                .as_ref()
                .is_none_or(|geometry| boundary.intersects(geometry))
        })
        .collect();

    let dropped = total - kept.len();
    if dropped > 0 {
        info!("Dropped {dropped} of {total} {kind} features outside the study area boundary");
    }
    kept
}

fn reduce_to_points<T>(
    records: Vec<LayerRecord>,
    kind: &str,
    to_point: impl Fn(LayerRecord, &Geometry<f64>) -> Result<T, Error>,
) -> Vec<T> {
    let total = records.len();
    let points: Vec<T> = records
        .into_iter()
        .filter_map(|mut record| {
            let geometry = record.geometry.take()?;
            to_point(record, &geometry).ok()
        })
        .collect();

    let skipped = total - points.len();
    if skipped > 0 {
        warn!("Skipped {skipped} {kind} features without a usable geometry");
    }
    points
}

fn read_layer(path: &Path, id_property: &str) -> Result<Vec<LayerRecord>, Error> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_wkt_csv(path)
    } else {
        let collection = read_feature_collection(path)?;
        Ok(collection
            .features
            .into_iter()
            .enumerate()
            .map(|(position, feature)| LayerRecord {
                id: feature_id(&feature, id_property).unwrap_or_else(|| position.to_string()),
                name: string_property(&feature, "name"),
                geometry: feature_geometry(feature),
            })
            .collect())
    }
}

/// Reads a CSV layer with `id` and `wkt` columns and an optional `name`
/// column. Rows with an empty `wkt` cell have no geometry.
fn read_wkt_csv(path: &Path) -> Result<Vec<LayerRecord>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    csv::Reader::from_reader(file)
        .deserialize::<WktRecord>()
        .map(|record| {
            let record = record?;
            let text = record.wkt.trim();
            let geometry = if text.is_empty() {
                None
            } else {
                let geometry = Geometry::<f64>::try_from_wkt_str(text).map_err(|e| {
                    Error::InvalidData(format!("Invalid WKT for feature {}: {e}", record.id))
                })?;
                Some(geometry)
            };
            Ok(LayerRecord {
                id: record.id,
                name: record.name.filter(|name| !name.trim().is_empty()),
                geometry,
            })
        })
        .collect()
}

pub(super) fn read_feature_collection(path: &Path) -> Result<FeatureCollection, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;

    let geojson = text
        .parse::<GeoJson>()
        .map_err(|e| Error::GeoJsonError(format!("{}: {e}", path.display())))?;

    FeatureCollection::try_from(geojson)
        .map_err(|e| Error::GeoJsonError(format!("{}: {e}", path.display())))
}

pub(super) fn feature_geometry(feature: Feature) -> Option<Geometry<f64>> {
    feature
        .geometry
        .and_then(|geometry| Geometry::<f64>::try_from(geometry).ok())
}

/// Feature identifier from a property, falling back to the feature `id`
pub(super) fn feature_id(feature: &Feature, property: &str) -> Option<String> {
    let from_property = feature.property(property).and_then(|value| match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    });

    from_property.or_else(|| match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

fn string_property(feature: &Feature, property: &str) -> Option<String> {
    feature
        .property(property)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// Integer property given either as a number or a numeric string
pub(super) fn u64_property(feature: &Feature, property: &str) -> Option<u64> {
    match feature.property(property)? {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u64::MAX as f64)
                .map(|v| v as u64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Float property given either as a number or a numeric string
pub(super) fn f64_property(feature: &Feature, property: &str) -> Option<f64> {
    match feature.property(property)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn feature(value: serde_json::Value) -> Feature {
        Feature::from_json_value(value).unwrap()
    }

    #[test]
    fn id_prefers_property_then_feature_id() {
        let with_property = feature(json!({
            "type": "Feature",
            "id": "way/1",
            "geometry": null,
            "properties": { "osm_id": 1234 }
        }));
        assert_eq!(feature_id(&with_property, "osm_id").as_deref(), Some("1234"));

        let without_property = feature(json!({
            "type": "Feature",
            "id": "way/1",
            "geometry": null,
            "properties": {}
        }));
        assert_eq!(feature_id(&without_property, "osm_id").as_deref(), Some("way/1"));
    }

    #[test]
    fn numeric_properties_accept_strings() {
        let edge = feature(json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "u": "17", "v": 18.0, "length": "12.5", "bad": true }
        }));

        assert_eq!(u64_property(&edge, "u"), Some(17));
        assert_eq!(u64_property(&edge, "v"), Some(18));
        assert_eq!(f64_property(&edge, "length"), Some(12.5));
        assert_eq!(u64_property(&edge, "bad"), None);
        assert_eq!(f64_property(&edge, "missing"), None);
    }

    #[test]
    fn polygon_geometry_is_converted() {
        let park = feature(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
            },
            "properties": { "name": "Square" }
        }));

        assert_eq!(string_property(&park, "name").as_deref(), Some("Square"));
        let geometry = feature_geometry(park).unwrap();
        assert_eq!(geometry.centroid(), Some(geo::Point::new(1.0, 1.0)));
    }
}
