//! Circular arc shape.

use kurbo::{BezPath, Point, Rect, Size};
use std::f64::consts::TAU;

use crate::geometry::{Angle, bounds_of_points};

/// A circular arc centered on the shape position.
///
/// The sweep runs from `start` to `end` clockwise (y-down screen space)
/// unless `ccw` is set, matching canvas arc semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub radius: f64,
    pub start: Angle,
    pub end: Angle,
    pub ccw: bool,
    pub closed: bool,
}

impl Arc {
    pub fn new(radius: f64, start: Angle, end: Angle) -> Self {
        Self {
            radius,
            start,
            end,
            ccw: false,
            closed: false,
        }
    }

    /// Signed sweep in radians, direction per `ccw`.
    fn sweep(&self) -> f64 {
        let mut sweep = self.end.as_radians() - self.start.as_radians();
        if self.ccw {
            if sweep > 0.0 {
                sweep -= TAU;
            }
        } else if sweep < 0.0 {
            sweep += TAU;
        }
        sweep
    }

    /// Start, midpoint, and end points on the circle.
    fn key_points(&self, center: Point) -> [Point; 3] {
        [
            self.start.point_on_circle(self.radius, center),
            self.start
                .midpoint(self.end)
                .point_on_circle(self.radius, center),
            self.end.point_on_circle(self.radius, center),
        ]
    }

    pub(crate) fn bounds(&self, center: Point) -> Rect {
        bounds_of_points(&self.key_points(center))
    }

    pub(crate) fn size(&self) -> Size {
        self.bounds(Point::ZERO).size()
    }

    pub(crate) fn build_path(&self, center: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start.point_on_circle(self.radius, center));
        let arc = kurbo::Arc::new(
            center,
            (self.radius, self.radius),
            self.start.as_radians(),
            self.sweep(),
            0.0,
        );
        arc.to_cubic_beziers(0.1, |p1, p2, p| path.curve_to(p1, p2, p));
        if self.closed {
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;
    use std::f64::consts::PI;

    #[test]
    fn test_sweep_direction() {
        let arc = Arc::new(10.0, Angle::degrees(270.0), Angle::degrees(90.0));
        assert!((arc.sweep() - PI).abs() < 1e-12);

        let mut ccw = Arc::new(10.0, Angle::degrees(90.0), Angle::degrees(270.0));
        ccw.ccw = true;
        assert!((ccw.sweep() + PI).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_span_key_points() {
        // Right half circle from -90° to 90°.
        let arc = Arc::new(10.0, Angle::degrees(-90.0), Angle::degrees(90.0));
        let bounds = arc.bounds(Point::ZERO);
        assert!((bounds.x1 - 10.0).abs() < 1e-9);
        assert!((bounds.y0 + 10.0).abs() < 1e-9);
        assert!((bounds.y1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_closed_arc_contains_chord_interior() {
        let mut arc = Arc::new(10.0, Angle::degrees(0.0), Angle::degrees(180.0));
        arc.closed = true;
        let path = arc.build_path(Point::ZERO);
        // Lower half disc (y-down clockwise sweep).
        assert!(path.contains(Point::new(0.0, 5.0)));
        assert!(!path.contains(Point::new(0.0, -5.0)));
    }
}
