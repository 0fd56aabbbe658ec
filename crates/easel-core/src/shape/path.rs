//! Free-form path shape built from a block list.

use kurbo::{BezPath, Point, Rect, Size, Vec2};
use std::f64::consts::PI;

use crate::geometry::{Angle, bounds_of_points};

/// How a block's point is resolved into world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Relative to the previous point in the path.
    Relative,
    /// Relative to the shape's absolute start position.
    Start,
    /// A world coordinate used as-is.
    Absolute,
}

/// A point plus its resolution rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub anchor: Anchor,
    pub point: Point,
}

impl Waypoint {
    pub fn relative(x: f64, y: f64) -> Self {
        Self {
            anchor: Anchor::Relative,
            point: Point::new(x, y),
        }
    }

    pub fn from_start(x: f64, y: f64) -> Self {
        Self {
            anchor: Anchor::Start,
            point: Point::new(x, y),
        }
    }

    pub fn absolute(x: f64, y: f64) -> Self {
        Self {
            anchor: Anchor::Absolute,
            point: Point::new(x, y),
        }
    }

    fn resolve(&self, last: Point, start: Point) -> Point {
        match self.anchor {
            Anchor::Relative => last + self.point.to_vec2(),
            Anchor::Start => start + self.point.to_vec2(),
            Anchor::Absolute => self.point,
        }
    }
}

/// One drawing block of a [`PathShape`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathBlock {
    Line {
        to: Waypoint,
    },
    /// Circular arc around `center`; a connecting line is drawn to the arc
    /// start, as in canvas backends.
    Arc {
        center: Waypoint,
        radius: f64,
        start: Angle,
        end: Angle,
        ccw: bool,
    },
    /// Corner-rounding arc tangent to the lines current→control and
    /// control→to.
    ArcTo {
        control: Waypoint,
        to: Waypoint,
        radius: f64,
    },
    Quad {
        control: Waypoint,
        to: Waypoint,
    },
    Cubic {
        control1: Waypoint,
        control2: Waypoint,
        to: Waypoint,
    },
}

/// A shape tracing an arbitrary block list from its position.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub blocks: Vec<PathBlock>,
    pub closed: bool,
}

impl PathShape {
    pub fn new(blocks: Vec<PathBlock>) -> Self {
        Self {
            blocks,
            closed: false,
        }
    }

    pub(crate) fn build_path(&self, start: Point) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(start);
        let mut last = start;
        for block in &self.blocks {
            match block {
                PathBlock::Line { to } => {
                    let to = to.resolve(last, start);
                    path.line_to(to);
                    last = to;
                }
                PathBlock::Arc {
                    center,
                    radius,
                    start: a0,
                    end: a1,
                    ccw,
                } => {
                    let center = center.resolve(last, start);
                    let sweep = arc_sweep(*a0, *a1, *ccw);
                    path.line_to(a0.point_on_circle(*radius, center));
                    let arc = kurbo::Arc::new(
                        center,
                        (*radius, *radius),
                        a0.as_radians(),
                        sweep,
                        0.0,
                    );
                    arc.to_cubic_beziers(0.1, |p1, p2, p| path.curve_to(p1, p2, p));
                    last = a1.point_on_circle(*radius, center);
                }
                PathBlock::ArcTo {
                    control,
                    to,
                    radius,
                } => {
                    let control = control.resolve(last, start);
                    let to = to.resolve(last, start);
                    last = append_arc_to(&mut path, last, control, to, *radius);
                }
                PathBlock::Quad { control, to } => {
                    let control = control.resolve(last, start);
                    let to = to.resolve(last, start);
                    path.quad_to(control, to);
                    last = to;
                }
                PathBlock::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    let c1 = control1.resolve(last, start);
                    let c2 = control2.resolve(last, start);
                    let to = to.resolve(last, start);
                    path.curve_to(c1, c2, to);
                    last = to;
                }
            }
        }
        if self.closed {
            path.close_path();
        }
        path
    }

    pub(crate) fn bounds(&self, start: Point) -> Rect {
        let mut points = vec![start];
        let mut last = start;
        for block in &self.blocks {
            match block {
                PathBlock::Line { to } => {
                    last = to.resolve(last, start);
                    points.push(last);
                }
                PathBlock::Arc { center, radius, end, .. } => {
                    let center = center.resolve(last, start);
                    let r = Vec2::new(*radius, *radius);
                    points.push(center - r);
                    points.push(center + r);
                    last = end.point_on_circle(*radius, center);
                }
                PathBlock::ArcTo { control, to, .. } => {
                    points.push(control.resolve(last, start));
                    last = to.resolve(last, start);
                    points.push(last);
                }
                PathBlock::Quad { control, to } => {
                    points.push(control.resolve(last, start));
                    last = to.resolve(last, start);
                    points.push(last);
                }
                PathBlock::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    points.push(control1.resolve(last, start));
                    points.push(control2.resolve(last, start));
                    last = to.resolve(last, start);
                    points.push(last);
                }
            }
        }
        bounds_of_points(&points)
    }

    pub(crate) fn size(&self, start: Point) -> Size {
        self.bounds(start).size()
    }
}

fn arc_sweep(start: Angle, end: Angle, ccw: bool) -> f64 {
    let mut sweep = end.as_radians() - start.as_radians();
    if ccw {
        if sweep > 0.0 {
            sweep -= 2.0 * PI;
        }
    } else if sweep < 0.0 {
        sweep += 2.0 * PI;
    }
    sweep
}

/// Append a canvas-style `arcTo` segment: a connecting line to the first
/// tangent point, then an arc of `radius` to the second. Degenerate corners
/// (zero radius, zero-length legs, collinear points) fall back to a line to
/// the control point. Returns the new current point.
fn append_arc_to(
    path: &mut BezPath,
    from: Point,
    control: Point,
    to: Point,
    radius: f64,
) -> Point {
    let leg0 = from - control;
    let leg1 = to - control;
    let (len0, len1) = (leg0.hypot(), leg1.hypot());
    if radius <= 0.0 || len0 < 1e-9 || len1 < 1e-9 {
        path.line_to(control);
        return control;
    }
    let v0 = leg0 / len0;
    let v1 = leg1 / len1;
    if v0.cross(v1).abs() < 1e-9 {
        path.line_to(control);
        return control;
    }

    let half = v0.dot(v1).clamp(-1.0, 1.0).acos() / 2.0;
    let tangent_dist = radius / half.tan();
    let t0 = control + v0 * tangent_dist;
    let t1 = control + v1 * tangent_dist;
    let bisector = {
        let sum = v0 + v1;
        sum / sum.hypot()
    };
    let center = control + bisector * (radius / half.sin());

    let a0 = (t0 - center).atan2();
    let a1 = (t1 - center).atan2();
    let mut sweep = a1 - a0;
    if sweep > PI {
        sweep -= 2.0 * PI;
    } else if sweep < -PI {
        sweep += 2.0 * PI;
    }

    path.line_to(t0);
    let arc = kurbo::Arc::new(center, (radius, radius), a0, sweep, 0.0);
    arc.to_cubic_beziers(0.1, |p1, p2, p| path.curve_to(p1, p2, p));
    t1
}
