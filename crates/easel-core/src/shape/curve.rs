//! Bezier curve shape.

use kurbo::{BezPath, Point, Rect, Size};

use crate::geometry::bounds_of_points;

/// A quadratic or cubic bezier from the shape position.
///
/// Control and end points are absolute world coordinates; only the start
/// follows the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub control1: Point,
    pub control2: Option<Point>,
    pub end: Point,
    pub closed: bool,
}

impl Curve {
    /// A quadratic curve with one control point.
    pub fn quadratic(control: Point, end: Point) -> Self {
        Self {
            control1: control,
            control2: None,
            end,
            closed: false,
        }
    }

    /// A cubic curve with two control points.
    pub fn cubic(control1: Point, control2: Point, end: Point) -> Self {
        Self {
            control1,
            control2: Some(control2),
            end,
            closed: false,
        }
    }

    pub(crate) fn bounds(&self, start: Point) -> Rect {
        let mut points = vec![start, self.control1, self.end];
        if let Some(c2) = self.control2 {
            points.push(c2);
        }
        bounds_of_points(&points)
    }

    pub(crate) fn size(&self, start: Point) -> Size {
        self.bounds(start).size()
    }

    pub(crate) fn build_path(&self, start: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(start);
        match self.control2 {
            Some(c2) => path.curve_to(self.control1, c2, self.end),
            None => path.quad_to(self.control1, self.end),
        }
        if self.closed {
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_quadratic_emits_quad_segment() {
        let curve = Curve::quadratic(Point::new(50.0, 0.0), Point::new(100.0, 50.0));
        let path = curve.build_path(Point::ZERO);
        assert!(matches!(path.elements()[1], PathEl::QuadTo(..)));
    }

    #[test]
    fn test_cubic_emits_curve_segment() {
        let curve = Curve::cubic(
            Point::new(30.0, 0.0),
            Point::new(60.0, 100.0),
            Point::new(100.0, 50.0),
        );
        let path = curve.build_path(Point::ZERO);
        assert!(matches!(path.elements()[1], PathEl::CurveTo(..)));
    }

    #[test]
    fn test_bounds_cover_control_points() {
        let curve = Curve::quadratic(Point::new(50.0, -40.0), Point::new(100.0, 0.0));
        let bounds = curve.bounds(Point::ZERO);
        assert!((bounds.y0 + 40.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
    }
}
