//! Closed polygon shape (triangles included).

use kurbo::{BezPath, Point, Rect, Size, Vec2};

use crate::geometry::bounds_of_points;

/// A closed polygon whose vertices are offsets from the shape position.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub offsets: Vec<Vec2>,
}

impl Polygon {
    pub fn new(offsets: Vec<Vec2>) -> Self {
        Self { offsets }
    }

    /// A triangle from three vertex offsets.
    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            offsets: vec![a, b, c],
        }
    }

    /// Build from absolute points, returning the polygon and the position
    /// (the bounding-box origin) to spawn it at.
    pub fn from_points(points: &[Point]) -> (Self, Point) {
        let origin = bounds_of_points(points).origin();
        let offsets = points.iter().map(|p| *p - origin).collect();
        (Self { offsets }, origin)
    }

    fn vertices(&self, origin: Point) -> Vec<Point> {
        self.offsets.iter().map(|off| origin + *off).collect()
    }

    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        bounds_of_points(&self.vertices(origin))
    }

    pub(crate) fn size(&self) -> Size {
        self.bounds(Point::ZERO).size()
    }

    pub(crate) fn build_path(&self, origin: Point) -> BezPath {
        let mut path = BezPath::new();
        let mut vertices = self.vertices(origin).into_iter();
        let Some(first) = vertices.next() else {
            return path;
        };
        path.move_to(first);
        for vertex in vertices {
            path.line_to(vertex);
        }
        path.close_path();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;

    #[test]
    fn test_from_points_normalizes_origin() {
        let (polygon, origin) = Polygon::from_points(&[
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            Point::new(20.0, 40.0),
        ]);
        assert_eq!(origin, Point::new(10.0, 20.0));
        assert_eq!(polygon.size(), Size::new(20.0, 20.0));
    }

    #[test]
    fn test_triangle_containment() {
        let polygon = Polygon::triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 0.0),
            Vec2::new(20.0, 30.0),
        );
        let path = polygon.build_path(Point::ZERO);
        assert!(path.contains(Point::new(20.0, 10.0)));
        assert!(!path.contains(Point::new(1.0, 29.0)));
    }

    #[test]
    fn test_empty_polygon_builds_empty_path() {
        let polygon = Polygon::new(Vec::new());
        assert!(polygon.build_path(Point::ZERO).elements().is_empty());
    }
}
