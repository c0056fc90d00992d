//! Road collaborator: the small query surface the tray needs from the road model.
//!
//! Tokens never hold a road directly. A mounted token stores a [`RoadId`] and
//! the renderer resolves it through a [`RoadRegistry`] each frame, so a road
//! that disappears turns into a reported error instead of a dangling reference.

#[cfg(test)]
#[path = "road_test.rs"]
mod road_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::view::Point;

/// Identifier of a road in the host's road set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadId(pub u32);

/// Geometry queries along a road centerline, keyed by longitudinal position `u` in metres.
pub trait Road {
    /// World position (metres, y up) of the centerline at `u`.
    fn position_at(&self, u: f64) -> Point;

    /// Heading of the centerline at `u`, radians counter-clockwise from +x.
    fn heading_at(&self, u: f64) -> f64;

    fn lane_count(&self) -> usize;

    /// Lane width in metres.
    fn lane_width(&self) -> f64;

    /// Full paved width across all lanes, in metres.
    fn crossing_length(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let lanes = self.lane_count() as f64;
        lanes * self.lane_width()
    }
}

/// Lookup from [`RoadId`] to the live road object.
pub trait RoadRegistry {
    type Road: Road;

    fn road(&self, id: RoadId) -> Option<&Self::Road>;
}

/// A straight road segment starting at `origin` and running along `heading`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StraightRoad {
    pub origin: Point,
    /// Radians counter-clockwise from +x.
    pub heading: f64,
    pub length: f64,
    pub lanes: usize,
    pub lane_width: f64,
}

impl StraightRoad {
    /// Clamp `u` onto the segment.
    #[must_use]
    pub fn clamp_u(&self, u: f64) -> f64 {
        u.clamp(0.0, self.length.max(0.0))
    }

    /// Longitudinal position of the centerline point closest to `world`.
    #[must_use]
    pub fn nearest_u(&self, world: Point) -> f64 {
        let (s, c) = self.heading.sin_cos();
        let along = (world.x - self.origin.x) * c + (world.y - self.origin.y) * s;
        self.clamp_u(along)
    }
}

impl Road for StraightRoad {
    fn position_at(&self, u: f64) -> Point {
        let (s, c) = self.heading.sin_cos();
        Point::new(self.origin.x + u * c, self.origin.y + u * s)
    }

    fn heading_at(&self, _u: f64) -> f64 {
        self.heading
    }

    fn lane_count(&self) -> usize {
        self.lanes
    }

    fn lane_width(&self) -> f64 {
        self.lane_width
    }
}

/// In-memory road set.
#[derive(Debug, Clone)]
pub struct RoadMap<R> {
    roads: HashMap<RoadId, R>,
}

impl<R> RoadMap<R> {
    #[must_use]
    pub fn new() -> Self {
        Self { roads: HashMap::new() }
    }

    /// Insert or replace a road.
    pub fn insert(&mut self, id: RoadId, road: R) {
        self.roads.insert(id, road);
    }

    /// Remove a road, returning it if it was present.
    pub fn remove(&mut self, id: RoadId) -> Option<R> {
        self.roads.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}

impl<R> Default for RoadMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Road> RoadRegistry for RoadMap<R> {
    type Road = R;

    fn road(&self, id: RoadId) -> Option<&R> {
        self.roads.get(&id)
    }
}
