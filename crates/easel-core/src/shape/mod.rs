//! Shape definitions: the common node state and the closed set of
//! geometry kinds.

mod arc;
mod circle;
mod curve;
mod ellipse;
mod group;
mod image;
mod line;
mod path;
mod polygon;
mod rect;
mod text;

pub use arc::Arc;
pub use circle::Circle;
pub use curve::Curve;
pub use ellipse::Ellipse;
pub use group::Group;
pub use image::{Image, ScaleMode};
pub use line::Line;
pub use path::{Anchor, PathBlock, PathShape, Waypoint};
pub use polygon::Polygon;
pub use rect::Rectangle;
pub use text::Text;

use kurbo::{BezPath, Point, Rect, Size, Vec2};
use uuid::Uuid;

use crate::style::{Style, StyleKey};
use crate::surface::TextMeasurer;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A shape's spatial relationship to another shape.
///
/// At most one relationship is active at a time; establishing one tears the
/// other down. Targets are resolved through the scene registry, so a
/// destroyed target simply resolves to no relationship.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Relationship {
    #[default]
    None,
    /// The absolute position is the local position offset by the target's
    /// absolute position.
    Elastic { target: ShapeId },
    /// The absolute position keeps a fixed vector to the target; the local
    /// position is back-derived from it.
    Rigid { target: ShapeId, offset: Vec2 },
}

impl Relationship {
    pub fn target(&self) -> Option<ShapeId> {
        match self {
            Relationship::None => None,
            Relationship::Elastic { target } | Relationship::Rigid { target, .. } => Some(*target),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Relationship::None)
    }
}

/// The closed set of shape geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Arc(Arc),
    Line(Line),
    Curve(Curve),
    Path(PathShape),
    Polygon(Polygon),
    Image(Image),
    Text(Text),
    Group(Group),
}

impl ShapeKind {
    /// Recompute kind-internal caches (text layout, image crop).
    pub(crate) fn refresh(&mut self, style: &Style, measurer: &dyn TextMeasurer) {
        match self {
            ShapeKind::Text(text) => text.relayout(style, measurer),
            ShapeKind::Image(image) => image.resolve(),
            _ => {}
        }
    }

    /// React to changed style keys.
    pub(crate) fn style_changed(
        &mut self,
        keys: &[StyleKey],
        style: &Style,
        measurer: &dyn TextMeasurer,
    ) {
        if let ShapeKind::Text(text) = self {
            const REFLOW_KEYS: [StyleKey; 4] = [
                StyleKey::FontSize,
                StyleKey::FontFamily,
                StyleKey::LineGap,
                StyleKey::TextOverflow,
            ];
            if keys.iter().any(|key| REFLOW_KEYS.contains(key)) {
                text.relayout(style, measurer);
            }
        }
    }

    /// The derived size. Group extents are aggregated by the scene.
    pub(crate) fn natural_size(&self, origin: Point) -> Size {
        match self {
            ShapeKind::Rectangle(r) => r.size,
            ShapeKind::Circle(c) => c.size(),
            ShapeKind::Ellipse(e) => e.size(),
            ShapeKind::Arc(a) => a.size(),
            ShapeKind::Line(l) => l.size(origin),
            ShapeKind::Curve(c) => c.size(origin),
            ShapeKind::Path(p) => p.size(origin),
            ShapeKind::Polygon(p) => p.size(),
            ShapeKind::Image(i) => i.resolved_size(),
            ShapeKind::Text(t) => t.size(),
            ShapeKind::Group(_) => Size::ZERO,
        }
    }

    /// Axis-aligned bounds at the given absolute position. Group bounds are
    /// aggregated by the scene.
    pub(crate) fn bounds(&self, origin: Point) -> Rect {
        match self {
            ShapeKind::Rectangle(r) => r.bounds(origin),
            ShapeKind::Circle(c) => c.bounds(origin),
            ShapeKind::Ellipse(e) => e.bounds(origin),
            ShapeKind::Arc(a) => a.bounds(origin),
            ShapeKind::Line(l) => l.bounds(origin),
            ShapeKind::Curve(c) => c.bounds(origin),
            ShapeKind::Path(p) => p.bounds(origin),
            ShapeKind::Polygon(p) => p.bounds(origin),
            ShapeKind::Image(i) => i.bounds(origin),
            ShapeKind::Text(t) => t.bounds(origin),
            ShapeKind::Group(_) => Rect::from_origin_size(origin, Size::ZERO),
        }
    }

    /// Build the outline path at the given absolute position. Group frames
    /// are built by the scene, which knows the member extent.
    pub(crate) fn build_path(&self, origin: Point, style: &Style) -> BezPath {
        match self {
            ShapeKind::Rectangle(r) => r.build_path(origin, style),
            ShapeKind::Circle(c) => c.build_path(origin),
            ShapeKind::Ellipse(e) => e.build_path(origin),
            ShapeKind::Arc(a) => a.build_path(origin),
            ShapeKind::Line(l) => l.build_path(origin),
            ShapeKind::Curve(c) => c.build_path(origin),
            ShapeKind::Path(p) => p.build_path(origin),
            ShapeKind::Polygon(p) => p.build_path(origin),
            ShapeKind::Image(i) => i.build_path(origin, style),
            ShapeKind::Text(t) => t.build_path(origin),
            ShapeKind::Group(_) => BezPath::new(),
        }
    }

    /// Whether the kind can produce a clip outline.
    pub(crate) fn supports_clip(&self) -> bool {
        !matches!(self, ShapeKind::Text(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ShapeKind::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! kind_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for ShapeKind {
            fn from(value: $ty) -> Self {
                ShapeKind::$variant(value)
            }
        }
    };
}

kind_from!(Rectangle, Rectangle);
kind_from!(Circle, Circle);
kind_from!(Ellipse, Ellipse);
kind_from!(Arc, Arc);
kind_from!(Line, Line);
kind_from!(Curve, Curve);
kind_from!(PathShape, Path);
kind_from!(Polygon, Polygon);
kind_from!(Image, Image);
kind_from!(Text, Text);
kind_from!(Group, Group);

/// Registry entry for one shape: geometry kind plus the state every shape
/// shares (position, relationship, style, flags, gesture state, last-built
/// path).
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub(crate) id: ShapeId,
    pub(crate) position: Point,
    pub(crate) relationship: Relationship,
    pub(crate) kind: ShapeKind,
    pub(crate) style: Style,
    pub(crate) clip: Option<ShapeId>,
    pub(crate) visible: bool,
    pub(crate) actionable: bool,
    pub(crate) draggable: bool,
    pub(crate) fixed: bool,
    pub(crate) mouse_in: bool,
    pub(crate) drag_started: bool,
    pub(crate) dragging: bool,
    pub(crate) size: Size,
    pub(crate) path: BezPath,
}

impl ShapeNode {
    pub(crate) fn new(kind: ShapeKind, position: Point, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            relationship: Relationship::None,
            kind,
            style,
            clip: None,
            visible: true,
            actionable: true,
            draggable: false,
            fixed: false,
            mouse_in: false,
            drag_started: false,
            dragging: false,
            size: Size::ZERO,
            path: BezPath::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn relationship(&self) -> Relationship {
        self.relationship
    }

    pub fn clip_source(&self) -> Option<ShapeId> {
        self.clip
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn actionable(&self) -> bool {
        self.actionable
    }

    pub fn draggable(&self) -> bool {
        self.draggable
    }

    /// Whether the shape hit-tests and draws in screen space.
    pub fn fixed(&self) -> bool {
        self.fixed
    }

    pub fn mouse_in(&self) -> bool {
        self.mouse_in
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// The derived size as of the last update.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The last-built outline path, in absolute coordinates.
    pub fn path(&self) -> &BezPath {
        &self.path
    }
}
