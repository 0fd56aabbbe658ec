//! View transform for pan/zoom.

use kurbo::{Affine, Point, Size, Vec2};

/// Minimum allowed zoom scale.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom scale.
pub const MAX_ZOOM: f64 = 5.0;

/// Camera manages the view transform for a space.
///
/// It tracks the pan translate (in screen pixels) and the zoom scale,
/// converting between screen and world coordinates. The translate starts
/// centered so the world origin sits in the middle of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    translate: Vec2,
    scale: f64,
    size: Size,
    view_size: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a camera for a zero-sized surface at scale 1.
    pub fn new() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            size: Size::ZERO,
            view_size: Size::ZERO,
        }
    }

    /// Current pan translate, in screen pixels.
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Current zoom scale, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Visible world-space size at the current scale.
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Center of the surface in screen pixels.
    pub fn center(&self) -> Point {
        (self.size.to_vec2() / 2.0).to_point()
    }

    /// Center of the visible world region.
    pub fn view_center(&self) -> Point {
        (self.translate + self.view_size.to_vec2() / 2.0).to_point()
    }

    /// The world-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Adopt a new surface size, re-centering the translate.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.translate = size.to_vec2() / 2.0;
        self.refresh_view();
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    /// Move the translate to an absolute position.
    pub fn set_translate(&mut self, translate: Vec2) {
        self.translate = translate;
    }

    /// Adjust the scale additively, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, amount: f64) {
        self.scale = (self.scale + amount).clamp(MIN_ZOOM, MAX_ZOOM);
        self.refresh_view();
    }

    /// Restore the centered translate and scale 1.
    pub fn reset(&mut self) {
        self.translate = self.size.to_vec2() / 2.0;
        self.scale = 1.0;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.view_size = self.size / self.scale;
    }
}
