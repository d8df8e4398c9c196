//! Study area boundary used to clip the building and park layers

use std::path::Path;

use geo::{Geometry, Intersects, MultiPolygon};
use log::info;

use super::features::{feature_geometry, read_feature_collection};
use crate::Error;

/// Union of the polygons of a boundary layer, in the CRS of the layers it
/// clips
#[derive(Debug, Clone)]
pub struct Boundary {
    area: Geometry<f64>,
}

impl Boundary {
    pub fn new(area: MultiPolygon<f64>) -> Self {
        Self {
            area: Geometry::MultiPolygon(area),
        }
    }

    /// Reads every `Polygon` and `MultiPolygon` feature of a GeoJSON layer
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the layer has no polygon, or an I/O or
    /// GeoJSON error if it cannot be read
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let collection = read_feature_collection(path)?;

        let polygons: Vec<_> = collection
            .features
            .into_iter()
            .filter_map(feature_geometry)
            .flat_map(|geometry| match geometry {
                Geometry::Polygon(polygon) => vec![polygon],
                Geometry::MultiPolygon(multi) => multi.0,
                _ => Vec::new(),
            })
            .collect();

        if polygons.is_empty() {
            return Err(Error::ConfigurationError(format!(
                "Boundary layer {} contains no polygons",
                path.display()
            )));
        }
        info!("Study area boundary: {} polygons", polygons.len());
        Ok(Self::new(MultiPolygon::new(polygons)))
    }

    pub fn intersects(&self, geometry: &Geometry<f64>) -> bool {
        self.area.intersects(geometry)
    }
}
