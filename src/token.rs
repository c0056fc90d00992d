//! Sign tokens: one draggable speed-limit sign and its placement state.
//!
//! A token is always in exactly one [`TokenState`]. The boolean view the road
//! simulation expects (`is_active`, `in_depot`, `is_picked`, sentinel
//! longitudinal position) is derived from the state rather than stored.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use serde::Serialize;

use crate::limit::{AssetKey, SpeedCategory};
use crate::road::RoadId;
use crate::view::Point;

/// Longitudinal position reported for tokens that are not on a road.
pub const OFF_ROAD_U: f64 = -1.0;

/// Where a token currently is in its depot → road → depot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TokenState {
    /// Resting in its tray slot.
    #[default]
    InDepot,
    /// Mounted on a road, imposing its limit from `u` metres onward.
    OnRoad { road: RoadId, u: f64 },
    /// Held by the pointer.
    Picked,
    /// Dropped away from any road and zooming back to its slot.
    Returning,
}

/// One placeable speed-limit sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignToken {
    pub(crate) category: SpeedCategory,
    pub(crate) asset: AssetKey,
    pub(crate) state: TokenState,
    /// Live render position in pixels.
    pub(crate) position: Point,
    /// Assigned tray slot centre in pixels.
    pub(crate) depot: Point,
}

impl SignToken {
    pub(crate) fn new(category: SpeedCategory) -> Self {
        Self {
            category,
            asset: category.asset_key(),
            state: TokenState::InDepot,
            position: Point::default(),
            depot: Point::default(),
        }
    }

    #[must_use]
    pub fn category(&self) -> SpeedCategory {
        self.category
    }

    /// Speed limit in m/s implied by the category.
    #[must_use]
    pub fn value_mps(&self) -> f64 {
        self.category.value_mps()
    }

    #[must_use]
    pub fn asset(&self) -> AssetKey {
        self.asset
    }

    #[must_use]
    pub fn state(&self) -> TokenState {
        self.state
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn depot(&self) -> Point {
        self.depot
    }

    /// Mounted on a road.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, TokenState::OnRoad { .. })
    }

    #[must_use]
    pub fn in_depot(&self) -> bool {
        self.state == TokenState::InDepot
    }

    #[must_use]
    pub fn is_picked(&self) -> bool {
        self.state == TokenState::Picked
    }

    #[must_use]
    pub fn is_returning(&self) -> bool {
        self.state == TokenState::Returning
    }

    /// The road this token is mounted on, if any.
    #[must_use]
    pub fn road(&self) -> Option<RoadId> {
        match self.state {
            TokenState::OnRoad { road, .. } => Some(road),
            _ => None,
        }
    }

    /// Position along the road in metres, or [`OFF_ROAD_U`] when not mounted.
    #[must_use]
    pub fn longitudinal_position(&self) -> f64 {
        match self.state {
            TokenState::OnRoad { u, .. } => u,
            _ => OFF_ROAD_U,
        }
    }

    pub(crate) fn set_category(&mut self, category: SpeedCategory) {
        self.category = category;
        self.asset = category.asset_key();
    }

    /// Assign a new slot; a resting token follows it.
    pub(crate) fn set_depot(&mut self, slot: Point) {
        self.depot = slot;
        if self.in_depot() {
            self.position = slot;
        }
    }

    /// Move one zoom-back step of at most `step` pixels toward the slot.
    ///
    /// Arrives (and goes back into the depot) once the remaining distance is
    /// within one step. Only returning tokens move.
    pub(crate) fn step_home(&mut self, step: f64) {
        if !self.is_returning() {
            return;
        }
        let dx = self.depot.x - self.position.x;
        let dy = self.depot.y - self.position.y;
        let dist = dx.hypot(dy);
        // A position that went non-finite can never converge; put it home.
        if dist <= step || !dist.is_finite() {
            self.position = self.depot;
            self.state = TokenState::InDepot;
        } else {
            self.position.x += step * dx / dist;
            self.position.y += step * dy / dist;
        }
    }
}
