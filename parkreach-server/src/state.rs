use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;
use parkreach_core::ParkIndex;
use parkreach_core::loading::load_park_locations;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared server state: configuration plus the per-city park indexes, built
/// on first use and kept for the lifetime of the process
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    indexes: Arc<Mutex<HashMap<String, Arc<ParkIndex>>>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            indexes: Arc::default(),
        }
    }

    /// State with prebuilt indexes, no files involved
    pub fn with_indexes(config: ServerConfig, indexes: HashMap<String, ParkIndex>) -> Self {
        let indexes = indexes
            .into_iter()
            .map(|(city, index)| (city, Arc::new(index)))
            .collect();
        Self {
            config: Arc::new(config),
            indexes: Arc::new(Mutex::new(indexes)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    fn cached(&self, city: &str) -> Option<Arc<ParkIndex>> {
        self.indexes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(city)
            .cloned()
    }

    /// Park index of `city`, or `None` if the city is unknown. Loading runs on
    /// the blocking pool; two requests racing on a cold city may both load it.
    pub async fn park_index(&self, city: &str) -> Result<Option<Arc<ParkIndex>>, AppError> {
        if let Some(index) = self.cached(city) {
            return Ok(Some(index));
        }
        let Some(path) = self.config.cities.get(city).cloned() else {
            return Ok(None);
        };

        let index = tokio::task::spawn_blocking(move || build_index(path))
            .await
            .map_err(|err| AppError::Internal(format!("Park loading task failed: {err}")))??;
        info!("Loaded {} parks for {city}", index.len());

        let index = Arc::new(index);
        let mut indexes = self.indexes.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Some(indexes.entry(city.to_string()).or_insert(index).clone()))
    }
}

fn build_index(path: PathBuf) -> Result<ParkIndex, AppError> {
    let parks = load_park_locations(&path).map_err(|err| {
        AppError::Internal(format!("Failed to load parks from {}: {err}", path.display()))
    })?;
    Ok(ParkIndex::new(parks))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write_parks(dir: &TempDir) -> PathBuf {
        let (lon, lat, half) = (5.1280, 52.0860, 0.002);
        let ring = json!([
            [lon - half, lat - half],
            [lon + half, lat - half],
            [lon + half, lat + half],
            [lon - half, lat + half],
            [lon - half, lat - half]
        ]);
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature",
                  "geometry": { "type": "Polygon", "coordinates": [ring] },
                  "properties": { "name": "Wilhelminapark" } },
                { "type": "Feature",
                  "geometry": { "type": "Point", "coordinates": [5.0, 52.0] },
                  "properties": { "name": "Bench" } }
            ]
        });
        let path = dir.path().join("utrecht_parks.geojson");
        fs::write(&path, collection.to_string()).unwrap();
        path
    }

    fn state_with(cities: &[(&str, PathBuf)]) -> AppState {
        AppState::new(ServerConfig {
            cities: cities
                .iter()
                .map(|(city, path)| (city.to_string(), path.clone()))
                .collect(),
            ..ServerConfig::default()
        })
    }

    #[tokio::test]
    async fn index_is_loaded_from_file_once() {
        let dir = TempDir::new().unwrap();
        let path = write_parks(&dir);
        let state = state_with(&[("Utrecht", path.clone())]);

        let index = state.park_index("Utrecht").await.unwrap().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.parks()[0].name, "Wilhelminapark");

        // later lookups come from the cache, not the file
        fs::remove_file(&path).unwrap();
        let cached = state.park_index("Utrecht").await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&index, &cached));
    }

    #[tokio::test]
    async fn unknown_city_has_no_index() {
        let state = state_with(&[]);
        assert!(state.park_index("Atlantis").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_parks_file_is_an_internal_error() {
        let dir = TempDir::new().unwrap();
        let state = state_with(&[("Utrecht", dir.path().join("absent.geojson"))]);

        let err = state.park_index("Utrecht").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("absent.geojson")));
    }
}
