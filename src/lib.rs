//! Speed-limit funnel: draggable speed-limit signs for a traffic-simulation view.
//!
//! A [`tray::SignTray`] owns a fixed grid of sign tokens. Users pick a sign
//! from the tray, drag it, and drop it onto a road, where it imposes a local
//! speed limit; a sign dropped away from any road zooms back to its tray slot.
//! The crate holds only placement state and presentation geometry. Drawing,
//! the road model and image loading are supplied by the host through the
//! [`render::Surface`] and [`road::RoadRegistry`] traits and an
//! [`limit::AssetRepo`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`tray`] | The tray: layout, pick / drag / drop, zoom-back |
//! | [`token`] | Sign tokens and their placement state |
//! | [`limit`] | Speed categories, limit values and shared sign images |
//! | [`road`] | Road query traits and a straight-road model |
//! | [`render`] | Drawing surface trait, draw pass, recording surface |
//! | [`view`] | Points, viewport and the world-to-pixel mapping |
//! | [`config`] | Tray configuration with defaults and validation |
//! | [`error`] | Error types |
//! | [`consts`] | Layout and animation ratios |

pub mod config;
pub mod consts;
pub mod error;
pub mod limit;
pub mod render;
pub mod road;
pub mod token;
pub mod tray;
pub mod view;

pub use config::TrayConfig;
pub use error::{RenderError, TrayError};
pub use tray::SignTray;
