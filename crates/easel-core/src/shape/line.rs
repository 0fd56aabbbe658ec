//! Straight line shape.

use kurbo::{BezPath, Point, Rect, Size};

/// A line from the shape position to a fixed world-space end point.
///
/// Only the start follows the shape position; `end` stays absolute, so
/// moving the shape stretches the segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub end: Point,
}

impl Line {
    pub fn new(end: Point) -> Self {
        Self { end }
    }

    pub(crate) fn bounds(&self, start: Point) -> Rect {
        Rect::from_points(start, self.end)
    }

    pub(crate) fn size(&self, start: Point) -> Size {
        self.bounds(start).size()
    }

    pub(crate) fn build_path(&self, start: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(start);
        path.line_to(self.end);
        path
    }
}
