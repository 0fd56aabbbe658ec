//! Circle shape.

use kurbo::{BezPath, Point, Rect, Shape as _, Size, Vec2};

/// A circle whose position is the top-left of its bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Center, given the shape's absolute position.
    pub fn center(&self, origin: Point) -> Point {
        origin + Vec2::new(self.radius, self.radius)
    }

    pub(crate) fn size(&self) -> Size {
        Size::new(self.radius * 2.0, self.radius * 2.0)
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size())
    }

    pub(crate) fn build_path(&self, origin: Point) -> BezPath {
        kurbo::Circle::new(self.center(origin), self.radius).to_path(0.1)
    }
}
