//! Error types for the sign tray.

/// Error returned by tray construction, layout and drop operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrayError {
    /// Grid dimensions, viewport or layout ratios are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A caller broke a token invariant (e.g. a mounted sign whose road is gone).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Error returned by [`crate::render::draw`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError<E: std::error::Error + 'static> {
    /// Tray state could not be rendered.
    #[error(transparent)]
    Tray(#[from] TrayError),
    /// The drawing surface rejected a call.
    #[error("drawing surface error: {0}")]
    Surface(#[source] E),
}
