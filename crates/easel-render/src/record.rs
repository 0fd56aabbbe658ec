//! Command-recording surface.

use std::cell::RefCell;
use std::rc::Rc;

use easel_core::style::{FontSpec, Pen, Shadow};
use easel_core::surface::{ImageHandle, Surface, TextMeasurer};
use kurbo::{Affine, BezPath, Point, Rect, Shape as _};
use peniko::Color;

/// Glyph advance as a fraction of the font size, fixed so layouts are
/// reproducible across runs.
const GLYPH_EM_FACTOR: f64 = 0.5;

/// One recorded surface command.
///
/// Paths are captured as their element count and bounding box, which is
/// what assertions usually need; full outlines would make logs unwieldy.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    SetTransform(Affine),
    ResetTransform,
    Clear {
        region: Rect,
        color: Color,
    },
    Clip {
        bounds: Rect,
    },
    SetShadow(Shadow),
    SetOpacity(f64),
    FillPath {
        bounds: Rect,
        elements: usize,
        color: Color,
    },
    StrokePath {
        bounds: Rect,
        elements: usize,
        color: Color,
        width: f64,
    },
    FillText {
        text: String,
        origin: Point,
        font_size: f64,
        color: Color,
    },
    StrokeText {
        text: String,
        origin: Point,
        font_size: f64,
    },
    DrawImage {
        image: ImageHandle,
        src: Rect,
        dest: Rect,
    },
}

/// Shared handle onto a [`RecordSurface`]'s command log.
///
/// The surface itself is moved into the space at bind time; keep a log
/// handle around to inspect what was drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordLog(Rc<RefCell<Vec<DrawCmd>>>);

impl RecordLog {
    /// Snapshot of the recorded commands.
    pub fn commands(&self) -> Vec<DrawCmd> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Index of the first command matching the predicate.
    pub fn position(&self, predicate: impl Fn(&DrawCmd) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(predicate)
    }

    /// Number of commands matching the predicate.
    pub fn count(&self, predicate: impl Fn(&DrawCmd) -> bool) -> usize {
        self.0.borrow().iter().filter(|cmd| predicate(cmd)).count()
    }

    fn push(&self, cmd: DrawCmd) {
        self.0.borrow_mut().push(cmd);
    }
}

/// A surface that records every command instead of rasterizing.
///
/// Text metrics are a fixed fraction of the font size per glyph, so text
/// layout through this surface is deterministic.
#[derive(Debug, Clone, Default)]
pub struct RecordSurface {
    log: RecordLog,
}

impl RecordSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle onto this surface's command log.
    pub fn log(&self) -> RecordLog {
        self.log.clone()
    }
}

impl TextMeasurer for RecordSurface {
    fn text_width(&self, text: &str, font: &FontSpec<'_>) -> f64 {
        text.chars().count() as f64 * font.size * GLYPH_EM_FACTOR
    }
}

impl Surface for RecordSurface {
    fn save(&mut self) {
        self.log.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.log.push(DrawCmd::Restore);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.log.push(DrawCmd::SetTransform(transform));
    }

    fn reset_transform(&mut self) {
        self.log.push(DrawCmd::ResetTransform);
    }

    fn clear(&mut self, region: Rect, color: Color) {
        self.log.push(DrawCmd::Clear { region, color });
    }

    fn clip(&mut self, path: &BezPath) {
        self.log.push(DrawCmd::Clip {
            bounds: path.bounding_box(),
        });
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.log.push(DrawCmd::SetShadow(*shadow));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.log.push(DrawCmd::SetOpacity(opacity));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.log.push(DrawCmd::FillPath {
            bounds: path.bounding_box(),
            elements: path.elements().len(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, pen: &Pen<'_>) {
        self.log.push(DrawCmd::StrokePath {
            bounds: path.bounding_box(),
            elements: path.elements().len(),
            color: pen.color,
            width: pen.width,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, color: Color) {
        self.log.push(DrawCmd::FillText {
            text: text.to_string(),
            origin,
            font_size: font.size,
            color,
        });
    }

    fn stroke_text(&mut self, text: &str, origin: Point, font: &FontSpec<'_>, _pen: &Pen<'_>) {
        self.log.push(DrawCmd::StrokeText {
            text: text.to_string(),
            origin,
            font_size: font.size,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, src: Rect, dest: Rect) {
        self.log.push(DrawCmd::DrawImage { image, src, dest });
    }
}
