//! Box/group shape: a drawable frame around member shapes.

use kurbo::{BezPath, Point, Rect, Size, Vec2};

use super::ShapeId;
use super::rect::rounded_rect_path;
use crate::style::Style;

/// A group of shapes drawn inside a shared frame.
///
/// Members are elastically related to the group when added (the scene wires
/// this up), so they follow the group's position. The frame rect is the
/// members' aggregate extent, grown by the padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    children: Vec<ShapeId>,
    /// Padding as `[top, right, bottom, left]`.
    pub padding: [f64; 4],
}

impl Group {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            padding: [0.0; 4],
        }
    }

    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn contains_child(&self, id: ShapeId) -> bool {
        self.children.contains(&id)
    }

    pub(crate) fn push_child(&mut self, id: ShapeId) {
        if !self.children.contains(&id) {
            self.children.push(id);
        }
    }

    pub(crate) fn remove_child(&mut self, id: ShapeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| *child != id);
        self.children.len() != before
    }

    pub(crate) fn take_children(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.children)
    }

    /// CSS-style padding shorthand: 1–4 values as top/right/bottom/left.
    pub fn set_padding(&mut self, values: &[f64]) {
        self.padding = match *values {
            [all] => [all; 4],
            [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
            [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
            [top, right, bottom, left, ..] => [top, right, bottom, left],
            [] => self.padding,
        };
    }

    /// The frame rect for a member extent of `extent`, grown by padding.
    pub(crate) fn frame(&self, origin: Point, extent: Size) -> Rect {
        let [top, right, bottom, left] = self.padding;
        Rect::from_origin_size(
            origin - Vec2::new(left, top),
            Size::new(extent.width + left + right, extent.height + top + bottom),
        )
    }

    pub(crate) fn build_path(&self, origin: Point, extent: Size, style: &Style) -> BezPath {
        rounded_rect_path(self.frame(origin, extent), style.radius)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_children_dedupe() {
        let mut group = Group::new();
        let id = Uuid::new_v4();
        group.push_child(id);
        group.push_child(id);
        assert_eq!(group.children().len(), 1);
        assert!(group.remove_child(id));
        assert!(!group.remove_child(id));
    }

    #[test]
    fn test_padding_shorthand() {
        let mut group = Group::new();
        group.set_padding(&[5.0]);
        assert_eq!(group.padding, [5.0; 4]);
        group.set_padding(&[5.0, 10.0]);
        assert_eq!(group.padding, [5.0, 10.0, 5.0, 10.0]);
        group.set_padding(&[1.0, 2.0, 3.0]);
        assert_eq!(group.padding, [1.0, 2.0, 3.0, 2.0]);
        group.set_padding(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(group.padding, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_frame_grows_by_padding() {
        let mut group = Group::new();
        group.set_padding(&[10.0, 20.0]);
        let frame = group.frame(Point::new(100.0, 100.0), Size::new(50.0, 30.0));
        assert_eq!(frame, Rect::new(80.0, 90.0, 170.0, 140.0));
    }
}
