//! Ordered groups of shapes sharing fixed/world-space placement.

use uuid::Uuid;

use crate::camera::Camera;
use crate::pointer::PointerEvent;
use crate::scene::Scene;
use crate::shape::ShapeId;
use crate::surface::Surface;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// An ordered, z-ranked group of shapes.
///
/// The sequence order is the paint order (first is bottommost); pointer
/// events walk it in reverse so visually topmost shapes intercept first.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    fixed: bool,
    pub visible: bool,
    order: Vec<ShapeId>,
}

impl Layer {
    /// A layer placed in world space, under the space's pan/zoom.
    pub fn world() -> Self {
        Self::new(false)
    }

    /// A layer fixed to screen space, unaffected by pan/zoom.
    pub fn screen_fixed() -> Self {
        Self::new(true)
    }

    pub fn new(fixed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            fixed,
            visible: true,
            order: Vec::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Whether this layer renders and hit-tests in screen space.
    pub fn fixed(&self) -> bool {
        self.fixed
    }

    /// Shape ids in paint order (bottom to top).
    pub fn shapes(&self) -> &[ShapeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a shape. Duplicates and ids unknown to the scene are
    /// ignored. The shape inherits this layer's fixed flag on insertion
    /// (not retroactively on later changes).
    pub fn add_shape(&mut self, scene: &mut Scene, shape: ShapeId) {
        if !scene.contains(shape) || self.order.contains(&shape) {
            return;
        }
        self.order.push(shape);
        scene.set_fixed(shape, self.fixed);
    }

    pub fn add_shapes(&mut self, scene: &mut Scene, shapes: &[ShapeId]) {
        for &shape in shapes {
            self.add_shape(scene, shape);
        }
    }

    /// Remove a shape, destroying it. No-op when absent.
    pub fn remove_shape(&mut self, scene: &mut Scene, shape: ShapeId) {
        let Some(index) = self.order.iter().position(|&id| id == shape) else {
            return;
        };
        self.order.remove(index);
        scene.remove(shape);
    }

    /// Destroy and remove every shape.
    pub fn clear(&mut self, scene: &mut Scene) {
        for shape in self.order.drain(..) {
            scene.remove(shape);
        }
    }

    // ----- z-order --------------------------------------------------------

    /// Swap the shape with the neighbor above it. No-op at the top or when
    /// absent.
    pub fn bring_up(&mut self, shape: ShapeId) {
        if let Some(index) = self.order.iter().position(|&id| id == shape) {
            if index + 1 < self.order.len() {
                self.order.swap(index, index + 1);
            }
        }
    }

    /// Swap the shape with the neighbor below it. No-op at the bottom or
    /// when absent.
    pub fn send_back(&mut self, shape: ShapeId) {
        if let Some(index) = self.order.iter().position(|&id| id == shape) {
            if index > 0 {
                self.order.swap(index, index - 1);
            }
        }
    }

    /// Move the shape to the top of the paint order.
    pub fn bring_to_top(&mut self, shape: ShapeId) {
        if let Some(index) = self.order.iter().position(|&id| id == shape) {
            if index + 1 < self.order.len() {
                self.order.remove(index);
                self.order.push(shape);
            }
        }
    }

    /// Move the shape to the bottom of the paint order.
    pub fn send_to_back(&mut self, shape: ShapeId) {
        if let Some(index) = self.order.iter().position(|&id| id == shape) {
            if index > 0 {
                self.order.remove(index);
                self.order.insert(0, shape);
            }
        }
    }

    // ----- routing and drawing --------------------------------------------

    /// Offer a pointer event to the shapes, topmost first. Shapes that are
    /// not actionable, or locked out by another active shape, are skipped.
    /// Stops at the first shape that reports the event handled.
    pub fn dispatch_event(&self, scene: &mut Scene, camera: &Camera, event: &PointerEvent) -> bool {
        for &shape in self.order.iter().rev() {
            let Some(node) = scene.node(shape) else {
                continue;
            };
            if !node.actionable() {
                continue;
            }
            if scene.active().is_some_and(|active| active != shape) {
                continue;
            }
            if scene.route_pointer(shape, camera, event) {
                return true;
            }
        }
        false
    }

    /// Draw every shape bottom to top. No-op when invisible.
    pub fn draw(&self, scene: &mut Scene, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }
        for &shape in &self.order {
            scene.draw_shape(shape, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Rectangle;
    use kurbo::{Point, Size, Vec2};
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    fn scene_with_stack() -> (Scene, Layer, [ShapeId; 3]) {
        let mut scene = Scene::new();
        let mut layer = Layer::world();
        let mut spawn = || {
            scene.spawn(
                Rectangle::new(Size::new(100.0, 100.0)),
                Point::new(0.0, 0.0),
            )
        };
        let ids = [spawn(), spawn(), spawn()];
        layer.add_shapes(&mut scene, &ids);
        (scene, layer, ids)
    }

    #[test]
    fn test_add_shape_dedupes_and_propagates_fixed() {
        let mut scene = Scene::new();
        let mut layer = Layer::screen_fixed();
        let id = scene.spawn(Rectangle::new(Size::new(10.0, 10.0)), Point::ZERO);
        layer.add_shape(&mut scene, id);
        layer.add_shape(&mut scene, id);
        assert_eq!(layer.len(), 1);
        assert!(scene.node(id).is_some_and(|n| n.fixed()));
    }

    #[test]
    fn test_remove_shape_destroys() {
        let (mut scene, mut layer, [a, _, _]) = scene_with_stack();
        layer.remove_shape(&mut scene, a);
        assert!(!scene.contains(a));
        assert_eq!(layer.len(), 2);
        // Absent id is a no-op.
        layer.remove_shape(&mut scene, a);
    }

    #[test]
    fn test_clear_destroys_all() {
        let (mut scene, mut layer, ids) = scene_with_stack();
        layer.clear(&mut scene);
        assert!(layer.is_empty());
        for id in ids {
            assert!(!scene.contains(id));
        }
    }

    #[test]
    fn test_z_order_noops_at_boundaries() {
        let (_, mut layer, [a, b, c]) = scene_with_stack();
        layer.bring_up(c);
        assert_eq!(layer.shapes(), &[a, b, c]);
        layer.send_back(a);
        assert_eq!(layer.shapes(), &[a, b, c]);
        layer.bring_up(Uuid::new_v4());
        assert_eq!(layer.shapes(), &[a, b, c]);
    }

    #[test]
    fn test_z_order_moves() {
        let (_, mut layer, [a, b, c]) = scene_with_stack();
        layer.bring_up(a);
        assert_eq!(layer.shapes(), &[b, a, c]);
        layer.send_back(c);
        assert_eq!(layer.shapes(), &[b, c, a]);
        layer.bring_to_top(b);
        assert_eq!(layer.shapes(), &[c, a, b]);
        layer.send_to_back(a);
        assert_eq!(layer.shapes(), &[a, c, b]);
    }

    #[test]
    fn test_dispatch_offers_topmost_first() {
        let (mut scene, layer, [a, b, c]) = scene_with_stack();
        let camera = Camera::new();
        let hits = Rc::new(RefCell::new(Vec::new()));
        for (tag, id) in [("a", a), ("b", b), ("c", c)] {
            let hits = hits.clone();
            scene.subscribe(id, crate::events::EventKind::DragStart, move |_, _| {
                hits.borrow_mut().push(tag);
            });
        }

        let inside = Point::new(50.0, 50.0);
        layer.dispatch_event(
            &mut scene,
            &camera,
            &PointerEvent::Move {
                position: inside,
                delta: Vec2::ZERO,
            },
        );
        // All overlap the point; the topmost claims the press.
        assert!(layer.dispatch_event(&mut scene, &camera, &PointerEvent::Down { position: inside }));
        assert_eq!(*hits.borrow(), vec!["c"]);

        // With C unable to act, the press falls through to B.
        layer.dispatch_event(&mut scene, &camera, &PointerEvent::Up { position: inside });
        scene.set_actionable(c, false);
        assert!(layer.dispatch_event(&mut scene, &camera, &PointerEvent::Down { position: inside }));
        assert_eq!(*hits.borrow(), vec!["c", "b"]);
    }

    #[test]
    fn test_active_shape_locks_out_others() {
        let (mut scene, layer, [a, _, c]) = scene_with_stack();
        let camera = Camera::new();
        let inside = Point::new(50.0, 50.0);
        layer.dispatch_event(
            &mut scene,
            &camera,
            &PointerEvent::Move {
                position: inside,
                delta: Vec2::ZERO,
            },
        );
        layer.dispatch_event(&mut scene, &camera, &PointerEvent::Down { position: inside });
        assert_eq!(scene.active(), Some(c));

        // While C holds the lock, moves keep routing to C alone and the
        // others never see the pointer leave.
        let a_events = Rc::new(RefCell::new(0));
        let count = a_events.clone();
        scene.subscribe(a, crate::events::EventKind::PointerLeave, move |_, _| {
            *count.borrow_mut() += 1;
        });
        layer.dispatch_event(
            &mut scene,
            &camera,
            &PointerEvent::Move {
                position: Point::new(500.0, 500.0),
                delta: Vec2::new(450.0, 450.0),
            },
        );
        assert_eq!(*a_events.borrow(), 0);
        assert_eq!(scene.active(), Some(c));

        layer.dispatch_event(
            &mut scene,
            &camera,
            &PointerEvent::Up {
                position: Point::new(500.0, 500.0),
            },
        );
        assert_eq!(scene.active(), None);
    }
}
