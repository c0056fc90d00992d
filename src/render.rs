//! Rendering: draws every token of a tray onto a 2D drawing surface.
//!
//! This module is the only place that issues drawing calls. It reads tray
//! state, the shared sign images, the road set and the world-to-pixel view,
//! and produces drawing calls. It never mutates tray state.
//!
//! Fallible surface calls propagate as [`RenderError::Surface`]; broken token
//! invariants (a mounted sign whose road is gone, a missing image) propagate
//! as [`RenderError::Tray`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::convert::Infallible;

use serde::Serialize;

use crate::consts::{MARKER_COLOR, SIGN_CLEARANCE_LANES};
use crate::error::{RenderError, TrayError};
use crate::limit::AssetRepo;
use crate::road::{Road, RoadId, RoadRegistry};
use crate::token::{SignToken, TokenState};
use crate::tray::SignTray;
use crate::view::{Point, WorldView};

/// Affine transform in canvas order: `x' = a x + c y + e`, `y' = b x + d y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Pure translation to `origin`.
    #[must_use]
    pub fn translate(origin: Point) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: origin.x, f: origin.y }
    }

    /// Rotation by `heading` (world radians, y up) drawn at pixel `origin`.
    #[must_use]
    pub fn rotate_at(heading: f64, origin: Point) -> Self {
        let (s, c) = heading.sin_cos();
        Self { a: c, b: -s, c: s, d: c, e: origin.x, f: origin.y }
    }

    /// Map a local point through the transform.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// The drawing calls the tray needs from a 2D canvas.
pub trait Surface {
    /// Image handle as stored in the [`AssetRepo`].
    type Image;
    type Error: std::error::Error + 'static;

    /// Replace the current transform.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the transform is rejected.
    fn set_transform(&mut self, transform: Transform) -> Result<(), Self::Error>;

    /// Set the solid fill colour for subsequent `fill_rect` calls.
    fn set_fill_color(&mut self, color: &str);

    /// Fill a rectangle in the current transform's local space.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Blit an image into a rectangle in local space.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the image cannot be drawn.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64) -> Result<(), Self::Error>;
}

/// Draw the whole tray: mounted signs with their road markers, then resting
/// and returning signs at their live positions, in token order.
///
/// # Errors
///
/// Returns `Err` if a token's image or road cannot be resolved, or if any
/// surface call fails.
pub fn draw<S, R>(
    surface: &mut S,
    tray: &SignTray,
    assets: &AssetRepo<S::Image>,
    roads: &R,
    view: &WorldView,
) -> Result<(), RenderError<S::Error>>
where
    S: Surface,
    R: RoadRegistry,
{
    let metrics = tray.metrics();
    let config = tray.config();
    let passive = SignSize { w: metrics.width, h: metrics.height };
    let active = SignSize { w: passive.w * config.active_scale, h: passive.h * config.active_scale };

    for (index, token) in tray.tokens().iter().enumerate() {
        let image = assets.get(token.asset()).ok_or_else(|| {
            TrayError::InvariantViolation(format!("token {index}: no image for category {}", token.category()))
        })?;

        match token.state() {
            TokenState::OnRoad { road, u } => {
                let road = resolve_road(roads, road, index)?;
                let mount = Mount { road, u, view, line_width: config.crossing_line_width };
                draw_crossing_marker(surface, &mount)?;
                draw_mounted_signs(surface, image, &mount, active, config.draw_both_sides)?;
            }
            TokenState::InDepot | TokenState::Picked | TokenState::Returning => {
                draw_passive(surface, image, token, passive)?;
            }
        }
    }
    Ok(())
}

fn resolve_road<R: RoadRegistry>(roads: &R, id: RoadId, index: usize) -> Result<&R::Road, TrayError> {
    roads
        .road(id)
        .ok_or_else(|| TrayError::InvariantViolation(format!("token {index} is mounted on unknown road {}", id.0)))
}

#[derive(Debug, Clone, Copy)]
struct SignSize {
    w: f64,
    h: f64,
}

/// Where a mounted sign sits: road, longitudinal position and the view mapping.
struct Mount<'a, R> {
    road: &'a R,
    u: f64,
    view: &'a WorldView,
    line_width: f64,
}

impl<R: Road> Mount<'_, R> {
    fn center(&self) -> Point {
        self.view.world_to_pixel(self.road.position_at(self.u))
    }

    fn heading(&self) -> f64 {
        self.road.heading_at(self.u)
    }

    /// Lateral offset in metres of the first sign. Negative puts it on the
    /// left of travel when the road heads right, so it stays above the road.
    fn lateral_offset(&self) -> f64 {
        let dist = 0.5 * self.road.crossing_length() + SIGN_CLEARANCE_LANES * self.road.lane_width();
        if self.heading().cos() > 0.0 { -dist } else { dist }
    }

    /// Pixel anchor of a sign `v` metres across the road from the centre.
    fn sign_anchor(&self, v: f64) -> Point {
        let (s, c) = self.heading().sin_cos();
        let center = self.center();
        let px = self.view.len_to_pixels(v);
        Point::new(center.x + px * s, center.y + px * c)
    }
}

// =============================================================
// Mounted signs
// =============================================================

fn draw_crossing_marker<S: Surface, R: Road>(surface: &mut S, mount: &Mount<'_, R>) -> Result<(), RenderError<S::Error>> {
    let w = mount.view.len_to_pixels(mount.line_width);
    let l = mount.view.len_to_pixels(mount.road.crossing_length());

    surface
        .set_transform(Transform::rotate_at(mount.heading(), mount.center()))
        .map_err(RenderError::Surface)?;
    surface.set_fill_color(MARKER_COLOR);
    surface.fill_rect(-0.5 * w, -0.5 * l, w, l);
    Ok(())
}

fn draw_mounted_signs<S: Surface, R: Road>(
    surface: &mut S,
    image: &S::Image,
    mount: &Mount<'_, R>,
    size: SignSize,
    both_sides: bool,
) -> Result<(), RenderError<S::Error>> {
    let v = mount.lateral_offset();
    draw_sign_bottom_anchored(surface, image, mount.sign_anchor(v), size)?;

    // Drawn second so the copy nearer the viewer overlaps the far one.
    if both_sides {
        draw_sign_bottom_anchored(surface, image, mount.sign_anchor(-v), size)?;
    }
    Ok(())
}

fn draw_sign_bottom_anchored<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    anchor: Point,
    size: SignSize,
) -> Result<(), RenderError<S::Error>> {
    surface.set_transform(Transform::translate(anchor)).map_err(RenderError::Surface)?;
    surface
        .draw_image(image, -0.5 * size.w, -size.h, size.w, size.h)
        .map_err(RenderError::Surface)
}

// =============================================================
// Tray and returning signs
// =============================================================

fn draw_passive<S: Surface>(
    surface: &mut S,
    image: &S::Image,
    token: &SignToken,
    size: SignSize,
) -> Result<(), RenderError<S::Error>> {
    surface
        .set_transform(Transform::translate(token.position()))
        .map_err(RenderError::Surface)?;
    surface
        .draw_image(image, -0.5 * size.w, -0.5 * size.h, size.w, size.h)
        .map_err(RenderError::Surface)
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetTransform(Transform),
    SetFillColor { color: String },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    DrawImage { image: String, x: f64, y: f64, w: f64, h: f64 },
}

/// A surface that records calls instead of drawing. Images are named by string.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandList {
    type Image = String;
    type Error = Infallible;

    fn set_transform(&mut self, transform: Transform) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::SetTransform(transform));
        Ok(())
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFillColor { color: color.to_owned() });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn draw_image(&mut self, image: &String, x: f64, y: f64, w: f64, h: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::DrawImage { image: image.clone(), x, y, w, h });
        Ok(())
    }
}
