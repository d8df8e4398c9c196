//! Buildings and parks reduced to representative points

use geo::{Centroid, Geometry, Point};

use crate::{Error, Meters, NodeId};

/// A building reduced to a representative point (usually the centroid of its
/// footprint). `nearest_node` is filled in by snapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    pub geometry: Point<f64>,
    pub nearest_node: Option<NodeId>,
}

impl Building {
    pub fn new(id: impl Into<String>, geometry: Point<f64>) -> Self {
        Self {
            id: id.into(),
            geometry,
            nearest_node: None,
        }
    }

    /// Builds a record from any geometry by taking its centroid
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the geometry is empty
    pub fn from_geometry(id: impl Into<String>, geometry: &Geometry<f64>) -> Result<Self, Error> {
        let id = id.into();
        let centroid = representative_point(geometry)
            .ok_or_else(|| Error::InvalidArgument(format!("Building {id} has an empty geometry")))?;
        Ok(Self::new(id, centroid))
    }

    pub fn with_nearest_node(mut self, node: NodeId) -> Self {
        self.nearest_node = Some(node);
        self
    }
}

/// A park reduced to a representative point
#[derive(Debug, Clone, PartialEq)]
pub struct Park {
    pub id: String,
    pub name: Option<String>,
    pub geometry: Point<f64>,
    pub nearest_node: Option<NodeId>,
}

impl Park {
    pub fn new(id: impl Into<String>, geometry: Point<f64>) -> Self {
        Self {
            id: id.into(),
            name: None,
            geometry,
            nearest_node: None,
        }
    }

    /// Builds a record from any geometry by taking its centroid
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the geometry is empty
    pub fn from_geometry(id: impl Into<String>, geometry: &Geometry<f64>) -> Result<Self, Error> {
        let id = id.into();
        let centroid = representative_point(geometry)
            .ok_or_else(|| Error::InvalidArgument(format!("Park {id} has an empty geometry")))?;
        Ok(Self::new(id, centroid))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_nearest_node(mut self, node: NodeId) -> Self {
        self.nearest_node = Some(node);
        self
    }
}

/// Building annotated with its network distance to the closest park
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedBuilding {
    pub id: String,
    pub geometry: Point<f64>,
    pub nearest_node: NodeId,
    /// `None` when no park is reachable within the cutoff
    pub dist_to_park_m: Option<Meters>,
    pub park_access: bool,
}

pub(crate) fn representative_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry
        .centroid()
        .filter(|point| point.x().is_finite() && point.y().is_finite())
}
