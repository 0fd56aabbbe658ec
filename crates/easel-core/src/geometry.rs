//! Small geometry value types supplementing kurbo.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// An angle, stored in radians.
///
/// Construction from degrees is provided because most host-facing APIs
/// (arc sweeps, path blocks) are written in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    /// Create an angle from radians.
    pub fn radians(radians: f64) -> Self {
        Self(radians)
    }

    /// Create an angle from degrees.
    pub fn degrees(degrees: f64) -> Self {
        Self(degrees * PI / 180.0)
    }

    /// The angle in radians.
    pub fn as_radians(self) -> f64 {
        self.0
    }

    /// The angle in degrees.
    pub fn as_degrees(self) -> f64 {
        self.0 * 180.0 / PI
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn tan(self) -> f64 {
        self.0.tan()
    }

    /// The midpoint between two angles.
    pub fn midpoint(self, other: Self) -> Self {
        Self((self.0 + other.0) / 2.0)
    }

    /// The point at `radius` from `center` in this direction.
    pub fn point_on_circle(self, radius: f64, center: Point) -> Point {
        Point::new(
            center.x + radius * self.cos(),
            center.y + radius * self.sin(),
        )
    }
}

/// One dimension of a [`FlexSize`]: a fixed length or derived from content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FlexDim {
    #[default]
    Auto,
    Fixed(f64),
}

impl FlexDim {
    /// The fixed value, or `fallback` when auto.
    pub fn resolve(self, fallback: f64) -> f64 {
        match self {
            FlexDim::Auto => fallback,
            FlexDim::Fixed(v) => v.abs(),
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, FlexDim::Auto)
    }
}

/// A size where either dimension may be content-derived.
///
/// Used by text shapes (auto width measures the line, auto height counts
/// lines) and image shapes (auto dimensions follow the natural aspect).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlexSize {
    pub width: FlexDim,
    pub height: FlexDim,
}

impl FlexSize {
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: FlexDim::Fixed(width),
            height: FlexDim::Fixed(height),
        }
    }

    pub fn fixed_width(width: f64) -> Self {
        Self {
            width: FlexDim::Fixed(width),
            height: FlexDim::Auto,
        }
    }

    pub fn fixed_height(height: f64) -> Self {
        Self {
            width: FlexDim::Auto,
            height: FlexDim::Fixed(height),
        }
    }
}

/// The axis-aligned corner quad of a rectangle, clockwise from the origin.
pub fn corner_quad(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

/// The tightest rectangle containing every point. Empty input yields a
/// zero rect.
pub fn bounds_of_points(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    let mut rect = Rect::from_points(*first, *first);
    for p in &points[1..] {
        rect = rect.union_pt(*p);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_radians_roundtrip() {
        let a = Angle::degrees(90.0);
        assert!((a.as_radians() - PI / 2.0).abs() < 1e-12);
        assert!((a.as_degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_on_circle() {
        let p = Angle::degrees(0.0).point_on_circle(10.0, Point::new(5.0, 5.0));
        assert!((p.x - 15.0).abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);

        let p = Angle::degrees(90.0).point_on_circle(10.0, Point::ORIGIN);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_flex_dim_resolve() {
        assert!((FlexDim::Auto.resolve(7.0) - 7.0).abs() < f64::EPSILON);
        assert!((FlexDim::Fixed(-3.0).resolve(7.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_of_points() {
        let rect = bounds_of_points(&[
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(rect, Rect::new(-2.0, -1.0, 3.0, 4.0));
    }
}
