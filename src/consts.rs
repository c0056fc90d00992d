//! Shared numeric constants for the sign tray.

// ── Layout ──────────────────────────────────────────────────────

/// Token height as a fraction of the smaller viewport dimension.
pub const SIZE_REL: f64 = 0.10;

/// Token width / height of the sign artwork.
pub const ASPECT_RATIO: f64 = 0.7;

/// Spacing between tray slots as a fraction of the smaller viewport dimension.
pub const GAP_REL: f64 = 0.01;

/// Size factor applied to signs mounted on a road (smaller than in the tray).
pub const ACTIVE_SCALE: f64 = 0.7;

/// Most signs a single tray may hold.
pub const MAX_SIGNS: usize = 4096;

// ── Road markers ────────────────────────────────────────────────

/// Width in world metres of the line marking where a limit begins.
pub const CROSSING_LINE_WIDTH_M: f64 = 1.0;

/// Extra lateral clearance of a mounted sign, in lane widths.
pub const SIGN_CLEARANCE_LANES: f64 = 0.6;

/// Fill colour of the crossing marker line.
pub const MARKER_COLOR: &str = "rgb(255,255,255)";

// ── Animation ───────────────────────────────────────────────────

/// Zoom-back distance per tick as a fraction of the smaller viewport dimension.
pub const RETURN_STEP_REL: f64 = 0.02;

// ── Speed categories ────────────────────────────────────────────

/// Highest category index; category `n` means `10 * n` km/h.
pub const MAX_CATEGORY: u8 = 12;

/// Speed in km/h standing in for "no limit".
pub const NO_LIMIT_KMH: f64 = 200.0;

/// Categories handed out at construction, cycled by token index.
pub const INITIAL_PATTERN: [u8; 6] = [6, 8, 10, 0, 12, 0];
