//! Export of analysis results for the rendering layer

mod to_geojson;

pub use to_geojson::{
    buildings_to_geojson, buildings_to_geojson_string, parks_to_geojson, parks_to_geojson_string,
    samples_to_geojson, samples_to_geojson_string,
};
