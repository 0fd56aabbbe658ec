//! Rectangle shape.

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as _, Size};

use crate::style::Style;

/// An axis-aligned rectangle anchored at the shape position, with optional
/// rounded corners taken from the style's `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub size: Size,
}

impl Rectangle {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        Rect::from_origin_size(origin, self.size)
    }

    pub(crate) fn build_path(&self, origin: Point, style: &Style) -> BezPath {
        rounded_rect_path(self.bounds(origin), style.radius)
    }
}

/// A rect path, rounded when `radius > 0` with the radius clamped to half
/// the shorter side.
pub(crate) fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    if radius > 0.0 {
        let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
        RoundedRect::from_rect(rect, radius).to_path(0.1)
    } else {
        rect.to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_origin() {
        let rect = Rectangle::new(Size::new(100.0, 50.0));
        let bounds = rect.bounds(Point::new(10.0, 20.0));
        assert_eq!(bounds, Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn test_path_contains_interior() {
        let rect = Rectangle::new(Size::new(100.0, 50.0));
        let path = rect.build_path(Point::ZERO, &Style::default());
        assert!(path.contains(Point::new(50.0, 25.0)));
        assert!(!path.contains(Point::new(150.0, 25.0)));
    }

    #[test]
    fn test_radius_is_clamped() {
        let rect = Rectangle::new(Size::new(20.0, 10.0));
        let mut style = Style::default();
        style.radius = 100.0;
        // Over-large radius must not produce an inverted outline.
        let path = rect.build_path(Point::ZERO, &style);
        assert!(path.contains(Point::new(10.0, 5.0)));
    }
}
