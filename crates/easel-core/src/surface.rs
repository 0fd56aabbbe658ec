//! The drawing-surface port.
//!
//! The core never talks to a concrete backend; it describes paths with
//! kurbo and hands them to a [`Surface`] implementation supplied by the
//! host. `easel-render` ships a recording implementation for tests and
//! headless use.

use kurbo::{Affine, BezPath, Point, Rect, Size};
use peniko::Color;

use crate::style::{FontSpec, Pen, Shadow};

/// Text width measurement.
///
/// Separated from [`Surface`] so a [`Scene`](crate::scene::Scene) can lay
/// text out deterministically without a bound backend.
pub trait TextMeasurer {
    /// Width of `text` rendered with `font`, in surface units.
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64;
}

/// Fallback measurer estimating each glyph at a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphEstimate {
    /// Average glyph advance as a fraction of the font size.
    pub em_factor: f64,
}

impl Default for GlyphEstimate {
    fn default() -> Self {
        Self { em_factor: 0.6 }
    }
}

impl TextMeasurer for GlyphEstimate {
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        text.chars().count() as f64 * font.size * self.em_factor
    }
}

/// Opaque handle to an image the host has registered with its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// An image reference plus its natural pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSource {
    pub handle: ImageHandle,
    pub natural: Size,
}

impl ImageSource {
    pub fn new(handle: ImageHandle, natural: Size) -> Self {
        Self { handle, natural }
    }
}

/// A 2D drawing surface.
///
/// Semantics follow immediate-mode canvas backends: `save`/`restore` scope
/// the transform, clip, shadow, and opacity state; paths are supplied fully
/// built in the current coordinate space.
pub trait Surface: TextMeasurer {
    fn save(&mut self);
    fn restore(&mut self);

    /// Replace the current transform (screen-space pixels on the left).
    fn set_transform(&mut self, transform: Affine);
    /// Restore the identity transform.
    fn reset_transform(&mut self);

    /// Fill `region` with `color`, ignoring the current clip and transform.
    fn clear(&mut self, region: Rect, color: Color);

    /// Intersect the current clip with `path`.
    fn clip(&mut self, path: &BezPath);

    /// Apply a drop shadow to subsequent fills and strokes.
    fn set_shadow(&mut self, shadow: &Shadow);
    /// Apply a global opacity to subsequent fills and strokes.
    fn set_opacity(&mut self, opacity: f64);

    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, pen: &Pen<'_>);

    /// Fill a single line of text with its baseline at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, color: Color);
    /// Stroke a single line of text with its baseline at `origin`.
    fn stroke_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, pen: &Pen<'_>);

    /// Blit the `src` region of a registered image into `dest`.
    fn draw_image(&mut self, image: ImageHandle, src: Rect, dest: Rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_estimate_scales_with_font() {
        let measurer = GlyphEstimate::default();
        let small = FontSpec {
            size: 10.0,
            family: "Arial",
        };
        let large = FontSpec {
            size: 20.0,
            family: "Arial",
        };
        let text = "hello";
        assert!((measurer.text_width(text, &small) - 30.0).abs() < 1e-12);
        assert!((measurer.text_width(text, &large) - 60.0).abs() < 1e-12);
    }
}
