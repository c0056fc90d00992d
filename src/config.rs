//! Tray layout configuration.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! overrides:
//!
//! ```json
//! { "rows": 2, "columns": 3, "anchor_x": 0.5, "anchor_y": 0.1 }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ACTIVE_SCALE, ASPECT_RATIO, CROSSING_LINE_WIDTH_M, GAP_REL, MAX_SIGNS, RETURN_STEP_REL, SIZE_REL};
use crate::error::TrayError;

pub const DEFAULT_ROWS: usize = 1;
pub const DEFAULT_COLUMNS: usize = 6;
pub const DEFAULT_ANCHOR_X: f64 = 0.5;
pub const DEFAULT_ANCHOR_Y: f64 = 0.1;

/// Grid shape, anchor and size ratios for a [`crate::tray::SignTray`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    pub rows: usize,
    pub columns: usize,
    /// Horizontal tray centre as a fraction of viewport width (0 = left).
    pub anchor_x: f64,
    /// Vertical tray centre as a fraction of viewport height (0 = bottom).
    pub anchor_y: f64,
    pub size_rel: f64,
    pub aspect_ratio: f64,
    pub gap_rel: f64,
    pub active_scale: f64,
    pub return_step_rel: f64,
    /// Draw a mounted sign on both sides of the road.
    pub draw_both_sides: bool,
    /// Width of the crossing marker, metres.
    pub crossing_line_width: f64,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            anchor_x: DEFAULT_ANCHOR_X,
            anchor_y: DEFAULT_ANCHOR_Y,
            size_rel: SIZE_REL,
            aspect_ratio: ASPECT_RATIO,
            gap_rel: GAP_REL,
            active_scale: ACTIVE_SCALE,
            return_step_rel: RETURN_STEP_REL,
            draw_both_sides: true,
            crossing_line_width: CROSSING_LINE_WIDTH_M,
        }
    }
}

impl TrayConfig {
    /// Grid of `rows × columns` anchored at the given viewport fractions.
    #[must_use]
    pub fn grid(rows: usize, columns: usize, anchor_x: f64, anchor_y: f64) -> Self {
        Self { rows, columns, anchor_x, anchor_y, ..Self::default() }
    }

    /// Parse a JSON document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] on malformed JSON or
    /// out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, TrayError> {
        let cfg: Self = serde_json::from_str(raw)
            .map_err(|e| TrayError::InvalidConfiguration(format!("config parse failed: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Number of tokens the grid holds; saturates for grids `validate` rejects.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Check grid shape and ratios.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<(), TrayError> {
        let Some(capacity) = self.rows.checked_mul(self.columns) else {
            return Err(invalid(format!("grid size overflows: {} rows x {} columns", self.rows, self.columns)));
        };
        if capacity == 0 {
            return Err(invalid(format!("empty grid: {} rows x {} columns", self.rows, self.columns)));
        }
        if capacity > MAX_SIGNS {
            return Err(invalid(format!("grid of {capacity} signs exceeds {MAX_SIGNS}")));
        }
        check_fraction("anchor_x", self.anchor_x)?;
        check_fraction("anchor_y", self.anchor_y)?;
        check_positive("size_rel", self.size_rel)?;
        check_positive("aspect_ratio", self.aspect_ratio)?;
        check_positive("return_step_rel", self.return_step_rel)?;
        check_positive("crossing_line_width", self.crossing_line_width)?;
        if !(self.gap_rel.is_finite() && self.gap_rel >= 0.0) {
            return Err(invalid(format!("gap_rel must be >= 0, got {}", self.gap_rel)));
        }
        if !(self.active_scale > 0.0 && self.active_scale <= 1.0) {
            return Err(invalid(format!("active_scale must be in (0, 1], got {}", self.active_scale)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> TrayError {
    TrayError::InvalidConfiguration(msg)
}

fn check_fraction(name: &str, value: f64) -> Result<(), TrayError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in [0, 1], got {value}")))
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), TrayError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be > 0, got {value}")))
    }
}
