//! Ellipse shape.

use kurbo::{BezPath, Point, Rect, Shape as _, Size, Vec2};

/// An ellipse whose position is the top-left of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Ellipse {
    pub fn new(radius_x: f64, radius_y: f64) -> Self {
        Self { radius_x, radius_y }
    }

    pub fn center(&self, origin: Point) -> Point {
        origin + Vec2::new(self.radius_x, self.radius_y)
    }

    pub(crate) fn size(&self) -> Size {
        Size::new(self.radius_x * 2.0, self.radius_y * 2.0)
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size())
    }

    pub(crate) fn build_path(&self, origin: Point) -> BezPath {
        kurbo::Ellipse::new(self.center(origin), (self.radius_x, self.radius_y), 0.0).to_path(0.1)
    }
}
