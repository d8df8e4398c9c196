//! Classification of snapped buildings against the distance map

use serde::Serialize;

use crate::{AnnotatedBuilding, Building, DistanceMap, Error, Meters};

/// Walking distance band used to colour buildings on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DistanceBand {
    #[serde(rename = "0-500")]
    Within500,
    #[serde(rename = "500-1000")]
    Within1000,
    #[serde(rename = "1000-1500")]
    Within1500,
    /// Reachable, but only because the cutoff is above 1500 m
    #[serde(rename = "over-1500")]
    Over1500,
    #[serde(rename = "not-accessible")]
    NotAccessible,
}

impl DistanceBand {
    pub const ALL: [DistanceBand; 5] = [
        DistanceBand::Within500,
        DistanceBand::Within1000,
        DistanceBand::Within1500,
        DistanceBand::Over1500,
        DistanceBand::NotAccessible,
    ];

    pub fn from_distance(distance: Option<Meters>) -> Self {
        match distance {
            None => DistanceBand::NotAccessible,
            Some(d) if d <= 500.0 => DistanceBand::Within500,
            Some(d) if d <= 1000.0 => DistanceBand::Within1000,
            Some(d) if d <= 1500.0 => DistanceBand::Within1500,
            Some(_) => DistanceBand::Over1500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceBand::Within500 => "0-500",
            DistanceBand::Within1000 => "500-1000",
            DistanceBand::Within1500 => "1000-1500",
            DistanceBand::Over1500 => "over-1500",
            DistanceBand::NotAccessible => "not-accessible",
        }
    }
}

/// Number of buildings per distance band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub within_500: usize,
    pub within_1000: usize,
    pub within_1500: usize,
    pub over_1500: usize,
    pub not_accessible: usize,
}

impl BandCounts {
    pub fn get(&self, band: DistanceBand) -> usize {
        match band {
            DistanceBand::Within500 => self.within_500,
            DistanceBand::Within1000 => self.within_1000,
            DistanceBand::Within1500 => self.within_1500,
            DistanceBand::Over1500 => self.over_1500,
            DistanceBand::NotAccessible => self.not_accessible,
        }
    }

    pub(crate) fn add(&mut self, band: DistanceBand) {
        let slot = match band {
            DistanceBand::Within500 => &mut self.within_500,
            DistanceBand::Within1000 => &mut self.within_1000,
            DistanceBand::Within1500 => &mut self.within_1500,
            DistanceBand::Over1500 => &mut self.over_1500,
            DistanceBand::NotAccessible => &mut self.not_accessible,
        };
        *slot += 1;
    }
}

impl AnnotatedBuilding {
    pub fn distance_band(&self) -> DistanceBand {
        DistanceBand::from_distance(self.dist_to_park_m)
    }
}

/// Joins every building's snapped node to the distance map.
///
/// A building whose node is missing from the map, or present beyond `cutoff`,
/// gets no distance and `park_access = false`. The input slice is not
/// modified; a new annotated vector is returned in the same order.
///
/// # Errors
///
/// Returns `InvalidArgument` if `cutoff` is negative or NaN, or if a building
/// was never snapped (`nearest_node` is `None`)
pub fn classify(
    buildings: &[Building],
    distances: &DistanceMap,
    cutoff: Meters,
) -> Result<Vec<AnnotatedBuilding>, Error> {
    if cutoff.is_nan() || cutoff < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Cutoff must be non-negative, got {cutoff}"
        )));
    }

    buildings
        .iter()
        .map(|building| {
            let node = building.nearest_node.ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "Building {} has not been snapped to the walking graph",
                    building.id
                ))
            })?;

            let dist_to_park_m = distances.get(node).filter(|&d| d <= cutoff);

            Ok(AnnotatedBuilding {
                id: building.id.clone(),
                geometry: building.geometry,
                nearest_node: node,
                dist_to_park_m,
                park_access: dist_to_park_m.is_some(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn snapped(id: &str, node: u64) -> Building {
        Building::new(id, Point::new(0.0, 0.0)).with_nearest_node(node)
    }

    #[test]
    fn present_nodes_are_accessible() {
        let distances: DistanceMap = [(1, 0.0), (2, 200.0)].into_iter().collect();
        let buildings = vec![snapped("a", 1), snapped("b", 2), snapped("c", 3)];

        let annotated = classify(&buildings, &distances, 250.0).unwrap();

        assert_eq!(annotated[0].dist_to_park_m, Some(0.0));
        assert!(annotated[0].park_access);
        assert_eq!(annotated[1].dist_to_park_m, Some(200.0));
        assert!(annotated[1].park_access);
        assert_eq!(annotated[2].dist_to_park_m, None);
        assert!(!annotated[2].park_access);
    }

    #[test]
    fn distances_beyond_cutoff_count_as_unreachable() {
        let distances: DistanceMap = [(1, 900.0)].into_iter().collect();
        let annotated = classify(&[snapped("a", 1)], &distances, 500.0).unwrap();

        assert_eq!(annotated[0].dist_to_park_m, None);
        assert!(!annotated[0].park_access);
    }

    #[test]
    fn unsnapped_building_is_rejected() {
        let buildings = vec![Building::new("loose", Point::new(1.0, 1.0))];
        let result = classify(&buildings, &DistanceMap::default(), 100.0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn negative_cutoff_is_rejected() {
        let result = classify(&[snapped("a", 1)], &DistanceMap::default(), -5.0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(DistanceBand::from_distance(Some(0.0)), DistanceBand::Within500);
        assert_eq!(DistanceBand::from_distance(Some(500.0)), DistanceBand::Within500);
        assert_eq!(DistanceBand::from_distance(Some(500.1)), DistanceBand::Within1000);
        assert_eq!(DistanceBand::from_distance(Some(1500.0)), DistanceBand::Within1500);
        assert_eq!(DistanceBand::from_distance(Some(1800.0)), DistanceBand::Over1500);
        assert_eq!(DistanceBand::from_distance(None), DistanceBand::NotAccessible);
    }

    #[test]
    fn band_counts_track_each_band() {
        let mut counts = BandCounts::default();
        counts.add(DistanceBand::Within500);
        counts.add(DistanceBand::Within500);
        counts.add(DistanceBand::NotAccessible);

        assert_eq!(counts.get(DistanceBand::Within500), 2);
        assert_eq!(counts.get(DistanceBand::NotAccessible), 1);
        assert_eq!(counts.get(DistanceBand::Over1500), 0);
        assert_eq!(
            serde_json::to_value(DistanceBand::Within1000).unwrap(),
            serde_json::json!("500-1000")
        );
    }
}
