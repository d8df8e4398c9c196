//! Accessibility algorithms built on top of the walking network model

pub mod accessibility;
pub mod classify;
pub mod nearest_park;
pub mod sampling;
pub mod snapping;
