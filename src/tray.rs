use serde::Serialize;

use crate::config::TrayConfig;
use crate::error::{RenderError, TrayError};
use crate::limit::{AssetRepo, SpeedCategory};
use crate::render::{self, Surface};
use crate::road::{RoadId, RoadRegistry};
use crate::token::{SignToken, TokenState};
use crate::view::{Point, Viewport, WorldView};

#[cfg(test)]
#[path = "tray_test.rs"]
mod tray_test;

/// Pixel sizes derived from the viewport, refreshed on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrayMetrics {
    /// Smaller viewport dimension; every ratio is relative to it.
    pub canvas_size: f64,
    /// Tray sign width in pixels.
    pub width: f64,
    /// Tray sign height in pixels.
    pub height: f64,
    /// Slot spacing in pixels.
    pub gap: f64,
    /// Zoom-back distance per tick in pixels.
    pub return_step: f64,
}

impl TrayMetrics {
    fn compute(viewport: Viewport, config: &TrayConfig) -> Self {
        let canvas_size = viewport.min_side();
        let height = config.size_rel * canvas_size;
        Self {
            canvas_size,
            width: config.aspect_ratio * height,
            height,
            gap: config.gap_rel * canvas_size,
            return_step: config.return_step_rel * canvas_size,
        }
    }
}

/// The speed-limit funnel: a fixed set of sign tokens, their tray layout and
/// the pick / drag / drop / zoom-back protocol.
///
/// Input wiring calls [`pick_nearest`](Self::pick_nearest) on pointer-down,
/// [`drag`](Self::drag) on pointer-move, and either
/// [`drop_on_road`](Self::drop_on_road) or [`release`](Self::release) on
/// pointer-up depending on whether the host accepted a road position. The
/// frame loop calls [`advance_return`](Self::advance_return) once per tick and
/// [`draw`](Self::draw) once per frame.
#[derive(Debug, Clone)]
pub struct SignTray {
    config: TrayConfig,
    viewport: Viewport,
    metrics: TrayMetrics,
    tokens: Vec<SignToken>,
    picked: Option<usize>,
}

impl SignTray {
    /// Build a `rows × columns` tray anchored at `(anchor_x, anchor_y)`
    /// viewport fractions (y measured from the bottom), default ratios.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] for an empty grid, an
    /// anchor outside the viewport, or a non-positive viewport.
    pub fn new(viewport: Viewport, rows: usize, columns: usize, anchor_x: f64, anchor_y: f64) -> Result<Self, TrayError> {
        Self::with_config(viewport, TrayConfig::grid(rows, columns, anchor_x, anchor_y))
    }

    /// Build a tray from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] if the config fails
    /// validation or the viewport is non-positive.
    pub fn with_config(viewport: Viewport, config: TrayConfig) -> Result<Self, TrayError> {
        config.validate()?;
        check_viewport(viewport)?;

        let tokens = (0..config.capacity())
            .map(|i| SignToken::new(SpeedCategory::initial_for(i)))
            .collect();
        let mut tray = Self {
            config,
            viewport,
            metrics: TrayMetrics::compute(viewport, &config),
            tokens,
            picked: None,
        };
        tray.apply_layout(viewport);

        for (index, token) in tray.tokens.iter().enumerate() {
            tracing::debug!(
                index,
                category = token.category().index(),
                kmh = token.category().kmh(),
                x = token.position().x,
                y = token.position().y,
                "sign token created"
            );
        }
        tracing::info!(
            rows = config.rows,
            columns = config.columns,
            width = viewport.width,
            height = viewport.height,
            "sign tray ready"
        );
        Ok(tray)
    }

    // --- Layout ---

    /// Recompute pixel sizes and tray slots for a (possibly resized) viewport.
    ///
    /// Resting tokens snap to their new slots. Mounted, held and returning
    /// tokens keep their live positions.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] for a non-positive
    /// viewport; the tray is left unchanged.
    pub fn recompute_layout(&mut self, viewport: Viewport) -> Result<(), TrayError> {
        check_viewport(viewport)?;
        self.apply_layout(viewport);
        tracing::debug!(width = viewport.width, height = viewport.height, "tray layout recomputed");
        Ok(())
    }

    fn apply_layout(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.metrics = TrayMetrics::compute(viewport, &self.config);
        for index in 0..self.tokens.len() {
            let slot = self.slot_position(index);
            self.tokens[index].set_depot(slot);
        }
    }

    /// Centre of the tray slot for token `index` (row-major).
    #[allow(clippy::cast_precision_loss)]
    fn slot_position(&self, index: usize) -> Point {
        let columns = self.config.columns;
        let col = (index % columns) as f64;
        let row = (index / columns) as f64;
        let center_col = 0.5 * (columns as f64 - 1.0);
        let center_row = 0.5 * (self.config.rows as f64 - 1.0);
        let anchor = self.anchor();
        let m = self.metrics;
        Point {
            x: anchor.x + (m.width + m.gap) * (col - center_col),
            y: anchor.y + (m.height + m.gap) * (row - center_row),
        }
    }

    /// Pixel position of the tray centre.
    #[must_use]
    pub fn anchor(&self) -> Point {
        Point {
            x: self.viewport.width * self.config.anchor_x,
            y: self.viewport.height * (1.0 - self.config.anchor_y),
        }
    }

    // --- Interaction ---

    /// Pick the token closest to `pointer`, if one lies strictly within
    /// `threshold` pixels. Ties go to the lower index.
    ///
    /// The picked token leaves the road (if it was mounted) and becomes the
    /// held token. A token already held is released to zoom back. No token
    /// in range, a threshold that is not positive, or a non-finite pointer
    /// leaves everything untouched.
    pub fn pick_nearest(&mut self, pointer: Point, threshold: f64) -> Option<usize> {
        if !(threshold > 0.0 && pointer.x.is_finite() && pointer.y.is_finite()) {
            tracing::debug!(threshold, "pick ignored");
            return None;
        }
        let threshold2 = threshold * threshold;
        let mut best: Option<(usize, f64)> = None;
        for (index, token) in self.tokens.iter().enumerate() {
            let dist2 = pointer.dist2(token.position());
            if dist2 < threshold2 && best.is_none_or(|(_, min)| dist2 < min) {
                best = Some((index, dist2));
            }
        }

        let Some((index, _)) = best else {
            tracing::debug!(x = pointer.x, y = pointer.y, "no sign picked");
            return None;
        };

        if let Some(prev) = self.picked.filter(|&prev| prev != index) {
            self.tokens[prev].state = TokenState::Returning;
        }
        let token = &mut self.tokens[index];
        token.state = TokenState::Picked;
        self.picked = Some(index);
        tracing::debug!(index, kmh = token.category().kmh(), "picked speed limit sign");
        Some(index)
    }

    /// Move the held token to `pointer`. Returns `false` when nothing is held
    /// or the pointer is not finite; the token then stays where it was.
    pub fn drag(&mut self, pointer: Point) -> bool {
        let Some(index) = self.picked else {
            return false;
        };
        if !(pointer.x.is_finite() && pointer.y.is_finite()) {
            return false;
        }
        self.tokens[index].position = pointer;
        true
    }

    /// Mount the held token on `road` at `u` metres.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvariantViolation`] when nothing is held or `u`
    /// is negative or non-finite; the held token stays held.
    pub fn drop_on_road(&mut self, road: RoadId, u: f64) -> Result<usize, TrayError> {
        let Some(index) = self.picked else {
            return Err(TrayError::InvariantViolation("drop on road without a picked sign".into()));
        };
        if !(u.is_finite() && u >= 0.0) {
            return Err(TrayError::InvariantViolation(format!(
                "sign {index} dropped at invalid road position {u}"
            )));
        }
        self.tokens[index].state = TokenState::OnRoad { road, u };
        self.picked = None;
        tracing::debug!(index, road = road.0, u, "speed limit mounted");
        Ok(index)
    }

    /// Let go of the held token away from any road; it zooms back to its slot.
    pub fn release(&mut self) -> Option<usize> {
        let index = self.picked.take()?;
        self.tokens[index].state = TokenState::Returning;
        tracing::debug!(index, "sign released, returning to tray");
        Some(index)
    }

    /// Advance every returning token one fixed step toward its slot.
    ///
    /// The step is a fixed fraction of the viewport, not scaled by time, so
    /// drive it at a fixed cadence. Returns how many tokens are still on
    /// their way home.
    pub fn advance_return(&mut self) -> usize {
        let step = self.metrics.return_step;
        let mut still_returning = 0;
        for (index, token) in self.tokens.iter_mut().enumerate() {
            if !token.is_returning() {
                continue;
            }
            token.step_home(step);
            if token.in_depot() {
                tracing::debug!(index, "sign back in tray");
            } else {
                still_returning += 1;
            }
        }
        still_returning
    }

    /// Change the limit a token represents.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvariantViolation`] for an unknown token index.
    pub fn set_category(&mut self, index: usize, category: SpeedCategory) -> Result<(), TrayError> {
        let len = self.tokens.len();
        let token = self
            .tokens
            .get_mut(index)
            .ok_or_else(|| TrayError::InvariantViolation(format!("token index {index} out of range 0..{len}")))?;
        token.set_category(category);
        Ok(())
    }

    // --- Render ---

    /// Draw every token onto `surface`.
    ///
    /// # Errors
    ///
    /// See [`render::draw`].
    pub fn draw<S, R>(
        &self,
        surface: &mut S,
        assets: &AssetRepo<S::Image>,
        roads: &R,
        view: &WorldView,
    ) -> Result<(), RenderError<S::Error>>
    where
        S: Surface,
        R: RoadRegistry,
    {
        render::draw(surface, self, assets, roads, view)
    }

    // --- Queries ---

    /// Limits mounted on `road` as `(u, value_mps)`, ordered along the road.
    #[must_use]
    pub fn active_limits(&self, road: RoadId) -> Vec<(f64, f64)> {
        let mut limits: Vec<(f64, f64)> = self
            .tokens
            .iter()
            .filter(|t| t.road() == Some(road))
            .map(|t| (t.longitudinal_position(), t.value_mps()))
            .collect();
        limits.sort_by(|a, b| a.0.total_cmp(&b.0));
        limits
    }

    #[must_use]
    pub fn tokens(&self) -> &[SignToken] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&SignToken> {
        self.tokens.get(index)
    }

    /// Index of the token currently held by the pointer.
    #[must_use]
    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    #[must_use]
    pub fn metrics(&self) -> TrayMetrics {
        self.metrics
    }

    #[must_use]
    pub fn config(&self) -> &TrayConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn check_viewport(viewport: Viewport) -> Result<(), TrayError> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(TrayError::InvalidConfiguration(format!(
            "viewport must be positive, got {}x{}",
            viewport.width, viewport.height
        )))
    }
}
