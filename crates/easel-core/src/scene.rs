//! The shape registry and lifecycle engine.
//!
//! A [`Scene`] owns every shape in a space, keyed by id, together with the
//! ambient state the original design kept in globals: the default style,
//! the exclusive active-shape lock, the text measurer, and the notification
//! subscribers. Layers hold ids into the scene; spatial relationships are
//! resolved through it, so destroying a shape needs no subscription
//! teardown — dependents simply resolve to no relationship afterwards.

use kurbo::{BezPath, Point, Rect, Shape as _, Size, Vec2};
use std::collections::HashMap;

use crate::camera::Camera;
use crate::events::{EventKind, ShapeEvent, Subscribers, Subscription};
use crate::geometry::corner_quad;
use crate::pointer::PointerEvent;
use crate::shape::{Relationship, ShapeId, ShapeKind, ShapeNode};
use crate::style::{Style, StylePatch};
use crate::surface::{GlyphEstimate, Surface, TextMeasurer};

/// Registry of shapes plus the ambient per-space state.
pub struct Scene {
    shapes: HashMap<ShapeId, ShapeNode>,
    default_style: Style,
    active: Option<ShapeId>,
    measurer: Box<dyn TextMeasurer>,
    subscribers: Subscribers,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_style(Style::default())
    }

    /// Create a scene with a custom ambient default style.
    pub fn with_style(default_style: Style) -> Self {
        Self {
            shapes: HashMap::new(),
            default_style,
            active: None,
            measurer: Box::new(GlyphEstimate::default()),
            subscribers: Subscribers::default(),
        }
    }

    /// The ambient style new shapes are seeded from.
    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    /// Replace the text measurer used for layout. Existing text shapes
    /// re-measure on their next update.
    pub fn set_text_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    /// The shape currently holding the exclusive pointer lock, if any.
    pub fn active(&self) -> Option<ShapeId> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Read access to a shape's registry entry.
    pub fn node(&self, id: ShapeId) -> Option<&ShapeNode> {
        self.shapes.get(&id)
    }

    /// Add a shape to the registry, seeding its style from the ambient
    /// default, and return its id.
    pub fn spawn(&mut self, kind: impl Into<ShapeKind>, position: Point) -> ShapeId {
        let node = ShapeNode::new(kind.into(), position, self.default_style.clone());
        let id = node.id;
        self.shapes.insert(id, node);
        self.update(id);
        id
    }

    // ----- position and relationships -------------------------------------

    /// The shape's absolute position: local position plus the resolved
    /// relationship offset. Relationship cycles degrade to the local
    /// position; unknown ids resolve to the origin.
    pub fn absolute_position(&self, id: ShapeId) -> Point {
        let mut visited = Vec::new();
        self.resolve_absolute(id, &mut visited)
    }

    fn resolve_absolute(&self, id: ShapeId, visited: &mut Vec<ShapeId>) -> Point {
        let Some(node) = self.shapes.get(&id) else {
            return Point::ZERO;
        };
        if visited.contains(&id) {
            return node.position;
        }
        visited.push(id);
        match node.relationship {
            Relationship::None => node.position,
            Relationship::Elastic { target } => {
                if self.shapes.contains_key(&target) {
                    node.position + self.resolve_absolute(target, visited).to_vec2()
                } else {
                    node.position
                }
            }
            Relationship::Rigid { target, offset } => {
                if self.shapes.contains_key(&target) {
                    self.resolve_absolute(target, visited) + offset
                } else {
                    node.position
                }
            }
        }
    }

    /// The shape's local position. For a rigid attachment this is
    /// back-derived from the target so external reads stay consistent.
    pub fn position(&self, id: ShapeId) -> Point {
        match self.shapes.get(&id) {
            Some(node) => match node.relationship {
                Relationship::Rigid { target, .. } if self.shapes.contains_key(&target) => {
                    self.absolute_position(id)
                }
                _ => node.position,
            },
            None => Point::ZERO,
        }
    }

    /// The vector from the local to the absolute position: the elastic
    /// target's absolute position, or zero otherwise.
    pub fn relationship_offset(&self, id: ShapeId) -> Vec2 {
        match self.shapes.get(&id).map(|node| node.relationship) {
            Some(Relationship::Elastic { target }) if self.shapes.contains_key(&target) => {
                self.absolute_position(target).to_vec2()
            }
            _ => Vec2::ZERO,
        }
    }

    /// Set the local position. A rigid attachment recaptures its offset so
    /// the new placement sticks. Emits `Moved` for the shape and, depth
    /// first, for every transitive dependent.
    pub fn set_position(&mut self, id: ShapeId, position: Point) {
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        node.position = position;
        if let Relationship::Rigid { target, .. } = node.relationship {
            if self.shapes.contains_key(&target) {
                let offset = position - self.absolute_position(target);
                if let Some(node) = self.shapes.get_mut(&id) {
                    node.relationship = Relationship::Rigid { target, offset };
                }
            }
        }
        self.update(id);
        let absolute = self.absolute_position(id);
        self.emit(id, &ShapeEvent::Moved { absolute });
        self.cascade_dependents(id, &mut vec![id], true);
    }

    /// Elastically relate this shape to `target`: its absolute position
    /// becomes its local position anchored at the target's absolute
    /// position, wherever the target moves. Replaces any rigid attachment.
    pub fn relate(&mut self, id: ShapeId, target: ShapeId) {
        if id == target || !self.shapes.contains_key(&target) {
            return;
        }
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        node.relationship = Relationship::Elastic { target };
        self.update(id);
        let absolute = self.absolute_position(id);
        self.emit(id, &ShapeEvent::Moved { absolute });
        self.cascade_dependents(id, &mut vec![id], true);
    }

    /// Clear an elastic relation; the shape reverts to its local position.
    /// No notification is emitted. No-op when unrelated.
    pub fn unrelate(&mut self, id: ShapeId) {
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        if !matches!(node.relationship, Relationship::Elastic { .. }) {
            return;
        }
        node.relationship = Relationship::None;
        self.update(id);
        self.cascade_dependents(id, &mut vec![id], false);
    }

    /// Rigidly attach this shape to `target`, keeping the current vector
    /// between them fixed. Replaces any elastic relation, preserving the
    /// pre-teardown placement.
    pub fn attach(&mut self, id: ShapeId, target: ShapeId) {
        if id == target || !self.shapes.contains_key(&target) || !self.shapes.contains_key(&id) {
            return;
        }
        let absolute = self.absolute_position(id);
        let offset = absolute - self.absolute_position(target);
        if let Some(node) = self.shapes.get_mut(&id) {
            node.position = absolute;
            node.relationship = Relationship::Rigid { target, offset };
        }
        self.update(id);
    }

    /// Clear a rigid attachment, materializing the back-derived local
    /// position so the shape stays put. No-op when unattached.
    pub fn detach(&mut self, id: ShapeId) {
        if !matches!(
            self.shapes.get(&id).map(|node| node.relationship),
            Some(Relationship::Rigid { .. })
        ) {
            return;
        }
        let absolute = self.absolute_position(id);
        if let Some(node) = self.shapes.get_mut(&id) {
            node.position = absolute;
            node.relationship = Relationship::None;
        }
        self.update(id);
    }

    /// Destroy a shape: dependents silently fall back to their local
    /// positions, references to it are dropped, `Destroyed` is emitted,
    /// and its subscriptions die with it. No-op for unknown ids.
    pub fn remove(&mut self, id: ShapeId) {
        if !self.shapes.contains_key(&id) {
            return;
        }
        let dependents: Vec<ShapeId> = self
            .shapes
            .values()
            .filter(|node| node.relationship.target() == Some(id))
            .map(|node| node.id)
            .collect();
        for dep in dependents {
            let rigid = matches!(
                self.shapes.get(&dep).map(|node| node.relationship),
                Some(Relationship::Rigid { .. })
            );
            if rigid {
                // Keep rigid dependents where they are.
                let absolute = self.absolute_position(dep);
                if let Some(node) = self.shapes.get_mut(&dep) {
                    node.position = absolute;
                }
            }
            if let Some(node) = self.shapes.get_mut(&dep) {
                node.relationship = Relationship::None;
            }
            self.update(dep);
            self.cascade_dependents(dep, &mut vec![dep], false);
        }
        for node in self.shapes.values_mut() {
            if node.clip == Some(id) {
                node.clip = None;
            }
            if let Some(group) = node.kind.as_group_mut() {
                group.remove_child(id);
            }
        }
        if self.active == Some(id) {
            self.active = None;
        }
        self.emit(id, &ShapeEvent::Destroyed);
        self.shapes.remove(&id);
        self.subscribers.drop_shape(id);
        log::debug!("destroyed shape {id}");
    }

    /// Walk shapes whose relationship targets `source`: their absolute
    /// positions changed, so refresh their geometry and optionally notify.
    fn cascade_dependents(&mut self, source: ShapeId, visited: &mut Vec<ShapeId>, notify: bool) {
        let dependents: Vec<ShapeId> = self
            .shapes
            .values()
            .filter(|node| node.relationship.target() == Some(source) && !visited.contains(&node.id))
            .map(|node| node.id)
            .collect();
        for dep in dependents {
            visited.push(dep);
            self.update(dep);
            if notify {
                let absolute = self.absolute_position(dep);
                self.emit(dep, &ShapeEvent::Moved { absolute });
            }
            self.cascade_dependents(dep, visited, notify);
        }
    }

    // ----- geometry -------------------------------------------------------

    /// The derived size. Group extents are aggregated live from members.
    pub fn size(&self, id: ShapeId) -> Size {
        match self.shapes.get(&id) {
            Some(node) => match node.kind.as_group() {
                Some(group) => self.members_extent(group),
                None => node.size,
            },
            None => Size::ZERO,
        }
    }

    /// Axis-aligned bounds at the absolute position.
    pub fn bounds(&self, id: ShapeId) -> Rect {
        let Some(node) = self.shapes.get(&id) else {
            return Rect::ZERO;
        };
        let absolute = self.absolute_position(id);
        match node.kind.as_group() {
            Some(group) => Rect::from_origin_size(absolute, self.members_extent(group)),
            None => node.kind.bounds(absolute),
        }
    }

    /// The bounding quad, clockwise from the top-left corner.
    pub fn corners(&self, id: ShapeId) -> [Point; 4] {
        corner_quad(self.bounds(id))
    }

    fn members_extent(&self, group: &crate::shape::Group) -> Size {
        let mut extent: Option<Rect> = None;
        for &child in group.children() {
            if !self.shapes.contains_key(&child) {
                continue;
            }
            let bounds = self.bounds(child);
            extent = Some(match extent {
                Some(rect) => rect.union(bounds),
                None => bounds,
            });
        }
        extent.map_or(Size::ZERO, |rect| rect.size())
    }

    /// Recompute the shape's derived state: kind caches, size, and the
    /// outline path. Emits `Resized` when the size changed.
    fn update(&mut self, id: ShapeId) {
        let absolute = self.absolute_position(id);
        let group_extent = match self.shapes.get(&id) {
            Some(node) => node.kind.as_group().map(|group| self.members_extent(group)),
            None => return,
        };
        let mut resized = None;
        if let Some(node) = self.shapes.get_mut(&id) {
            node.kind.refresh(&node.style, self.measurer.as_ref());
            let old = node.size;
            let (size, path) = match (&node.kind, group_extent) {
                (ShapeKind::Group(group), Some(extent)) => {
                    (extent, group.build_path(absolute, extent, &node.style))
                }
                (kind, _) => (
                    kind.natural_size(absolute),
                    kind.build_path(absolute, &node.style),
                ),
            };
            node.size = size;
            node.path = path;
            if (size.width - old.width).abs() > f64::EPSILON
                || (size.height - old.height).abs() > f64::EPSILON
            {
                resized = Some(size);
            }
        }
        if let Some(size) = resized {
            self.emit(id, &ShapeEvent::Resized { size });
        }
    }

    /// Edit the shape's geometry kind in place, then recompute derived
    /// state.
    pub fn modify(&mut self, id: ShapeId, edit: impl FnOnce(&mut ShapeKind)) {
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        edit(&mut node.kind);
        self.update(id);
    }

    // ----- style and flags ------------------------------------------------

    /// Merge a style patch, letting the kind react to the changed keys
    /// (text reflows on font changes).
    pub fn patch_style(&mut self, id: ShapeId, patch: &StylePatch) {
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        let changed = node.style.apply(patch);
        if changed.is_empty() {
            return;
        }
        node.kind
            .style_changed(&changed, &node.style, self.measurer.as_ref());
        self.update(id);
    }

    pub fn set_visible(&mut self, id: ShapeId, visible: bool) {
        if let Some(node) = self.shapes.get_mut(&id) {
            node.visible = visible;
        }
    }

    pub fn set_draggable(&mut self, id: ShapeId, draggable: bool) {
        if let Some(node) = self.shapes.get_mut(&id) {
            node.draggable = draggable;
        }
    }

    /// Exclude or include the shape in hit-testing. Excluding also clears
    /// draggability and releases the active lock if the shape holds it.
    pub fn set_actionable(&mut self, id: ShapeId, actionable: bool) {
        let Some(node) = self.shapes.get_mut(&id) else {
            return;
        };
        node.actionable = actionable;
        if !actionable {
            node.draggable = false;
            if self.active == Some(id) {
                self.active = None;
            }
        }
    }

    pub(crate) fn set_fixed(&mut self, id: ShapeId, fixed: bool) {
        if let Some(node) = self.shapes.get_mut(&id) {
            node.fixed = fixed;
        }
    }

    /// Use `source`'s outline as this shape's clip region.
    pub fn clip(&mut self, id: ShapeId, source: ShapeId) {
        if id == source || !self.shapes.contains_key(&source) {
            return;
        }
        if let Some(node) = self.shapes.get_mut(&id) {
            node.clip = Some(source);
        }
    }

    pub fn unclip(&mut self, id: ShapeId) {
        if let Some(node) = self.shapes.get_mut(&id) {
            node.clip = None;
        }
    }

    // ----- groups ---------------------------------------------------------

    /// Add a member to a group shape, elastically relating it to the group.
    /// Refuses self-membership and cycles through nested groups.
    pub fn group_add(&mut self, group: ShapeId, member: ShapeId) {
        if group == member
            || !self.shapes.contains_key(&member)
            || self.group_contains(member, group)
        {
            return;
        }
        match self
            .shapes
            .get_mut(&group)
            .and_then(|node| node.kind.as_group_mut())
        {
            Some(g) => g.push_child(member),
            None => return,
        }
        self.relate(member, group);
        self.update(group);
    }

    /// Remove a member, clearing its relation to the group.
    pub fn group_remove(&mut self, group: ShapeId, member: ShapeId) {
        let removed = self
            .shapes
            .get_mut(&group)
            .and_then(|node| node.kind.as_group_mut())
            .is_some_and(|g| g.remove_child(member));
        if removed {
            self.unrelate(member);
            self.update(group);
        }
    }

    /// Remove every member without destroying them.
    pub fn group_clear(&mut self, group: ShapeId) {
        let members = match self
            .shapes
            .get_mut(&group)
            .and_then(|node| node.kind.as_group_mut())
        {
            Some(g) => g.take_children(),
            None => return,
        };
        for member in members {
            self.unrelate(member);
        }
        self.update(group);
    }

    pub fn set_group_padding(&mut self, group: ShapeId, values: &[f64]) {
        let Some(g) = self
            .shapes
            .get_mut(&group)
            .and_then(|node| node.kind.as_group_mut())
        else {
            return;
        };
        g.set_padding(values);
        self.update(group);
    }

    /// Whether `root` is a group transitively containing `needle`.
    pub fn group_contains(&self, root: ShapeId, needle: ShapeId) -> bool {
        let Some(group) = self.shapes.get(&root).and_then(|node| node.kind.as_group()) else {
            return false;
        };
        for &child in group.children() {
            if child == needle || self.group_contains(child, needle) {
                return true;
            }
        }
        false
    }

    // ----- notifications --------------------------------------------------

    pub fn subscribe<F>(&mut self, id: ShapeId, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(ShapeId, &ShapeEvent) + 'static,
    {
        self.subscribers.subscribe(id, kind, handler)
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.subscribers.unsubscribe(subscription)
    }

    /// Number of handlers registered for a shape (all channels).
    pub fn subscriber_count(&self, id: ShapeId) -> usize {
        self.subscribers.count_for(id)
    }

    fn emit(&mut self, id: ShapeId, event: &ShapeEvent) {
        self.subscribers.emit(id, event);
    }

    // ----- gestures -------------------------------------------------------

    /// Advance the shape's gesture state machine for one pointer event.
    /// Returns true when the event was handled and propagation must stop.
    pub(crate) fn route_pointer(
        &mut self,
        id: ShapeId,
        camera: &Camera,
        event: &PointerEvent,
    ) -> bool {
        match *event {
            PointerEvent::Move { position, .. } => self.pointer_move(id, camera, position),
            PointerEvent::Down { position } => self.pointer_down(id, position),
            PointerEvent::Up { position } => self.pointer_up(id, position),
            PointerEvent::Wheel { .. } => false,
        }
    }

    fn gesture_blocked(&self, id: ShapeId) -> bool {
        match self.shapes.get(&id) {
            Some(node) => !node.actionable || self.active.is_some_and(|active| active != id),
            None => true,
        }
    }

    fn pointer_move(&mut self, id: ShapeId, camera: &Camera, position: Point) -> bool {
        if self.gesture_blocked(id) {
            return false;
        }
        let Some(node) = self.shapes.get(&id) else {
            return false;
        };
        let local = if node.fixed {
            position
        } else {
            camera.screen_to_world(position)
        };
        let hit = node.path.contains(local);
        let was_in = node.mouse_in;
        let drag_pending = node.drag_started;
        let draggable = node.draggable;

        if hit != was_in {
            if let Some(node) = self.shapes.get_mut(&id) {
                node.mouse_in = hit;
            }
            let event = if hit {
                ShapeEvent::PointerEnter { position }
            } else {
                ShapeEvent::PointerLeave { position }
            };
            self.emit(id, &event);
        }

        if drag_pending {
            if let Some(node) = self.shapes.get_mut(&id) {
                node.dragging = true;
            }
            if draggable {
                // Built-in drag: follow the pointer, keeping the elastic
                // offset.
                let target = local - self.relationship_offset(id);
                self.set_position(id, target);
            }
            self.emit(id, &ShapeEvent::Drag { position });
            return true;
        }
        false
    }

    fn pointer_down(&mut self, id: ShapeId, position: Point) -> bool {
        if self.gesture_blocked(id) {
            return false;
        }
        let Some(node) = self.shapes.get_mut(&id) else {
            return false;
        };
        if !node.mouse_in {
            return false;
        }
        node.drag_started = true;
        self.active = Some(id);
        self.emit(id, &ShapeEvent::DragStart { position });
        true
    }

    fn pointer_up(&mut self, id: ShapeId, position: Point) -> bool {
        if self.gesture_blocked(id) {
            return false;
        }
        let Some(node) = self.shapes.get_mut(&id) else {
            return false;
        };
        if !node.drag_started {
            return false;
        }
        let dragged = node.dragging;
        node.drag_started = false;
        node.dragging = false;
        self.active = None;
        let event = if dragged {
            ShapeEvent::DragEnd { position }
        } else {
            ShapeEvent::Click { position }
        };
        self.emit(id, &event);
        true
    }

    // ----- drawing --------------------------------------------------------

    /// Draw one shape through the surface port: apply the clip source if
    /// any, rebuild the outline, then fill/stroke per the style. Invisible
    /// and unknown shapes are skipped.
    pub fn draw_shape(&mut self, id: ShapeId, surface: &mut dyn Surface) {
        let Some(node) = self.shapes.get(&id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let clip_source = node.clip;

        surface.save();
        if let Some(source) = clip_source {
            if let Some(path) = self.clip_path(source) {
                surface.clip(&path);
            }
        }
        self.update(id);

        let Some(node) = self.shapes.get(&id) else {
            surface.restore();
            return;
        };
        if let Some(shadow) = &node.style.shadow {
            surface.set_shadow(shadow);
        }
        surface.set_opacity(node.style.opacity);

        match &node.kind {
            ShapeKind::Text(text) => {
                let origin = self.absolute_position(id);
                let font = node.style.font();
                let line_height = node.style.line_height();
                for (index, line) in text.lines().iter().enumerate() {
                    let baseline =
                        Point::new(origin.x, origin.y + line_height * (index + 1) as f64);
                    surface.fill_text(line, baseline, &font, node.style.font_color.color());
                    if let Some(pen) = node.style.pen() {
                        surface.stroke_text(line, baseline, &font, &pen);
                    }
                }
            }
            ShapeKind::Image(image) => {
                // Images clip to their own (possibly rounded) outline when
                // no explicit clip source is set.
                if clip_source.is_none() {
                    surface.clip(&node.path);
                }
                let origin = self.absolute_position(id);
                surface.draw_image(
                    image.source.handle,
                    image.crop(),
                    Rect::from_origin_size(origin, image.resolved_size()),
                );
                if let Some(pen) = node.style.pen() {
                    surface.stroke_path(&node.path, &pen);
                }
            }
            _ => {
                if let Some(fill) = node.style.fill {
                    surface.fill_path(&node.path, fill.color());
                }
                if let Some(pen) = node.style.pen() {
                    surface.stroke_path(&node.path, &pen);
                }
            }
        }
        surface.restore();
    }

    /// The clip outline for `source`, rebuilt at its current absolute
    /// position. Kinds without an outline degrade to a logged warning.
    fn clip_path(&mut self, source: ShapeId) -> Option<BezPath> {
        let node = self.shapes.get(&source)?;
        if !node.kind.supports_clip() {
            log::warn!("shape {source} cannot provide a clip path; drawing unclipped");
            return None;
        }
        self.update(source);
        self.shapes.get(&source).map(|node| node.path.clone())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("shapes", &self.shapes.len())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Group, Rectangle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect_at(scene: &mut Scene, x: f64, y: f64) -> ShapeId {
        scene.spawn(Rectangle::new(Size::new(100.0, 100.0)), Point::new(x, y))
    }

    #[test]
    fn test_absolute_equals_local_without_relationship() {
        let mut scene = Scene::new();
        let id = rect_at(&mut scene, 10.0, 20.0);
        assert_eq!(scene.absolute_position(id), Point::new(10.0, 20.0));
        scene.set_position(id, Point::new(-5.0, 3.0));
        assert_eq!(scene.absolute_position(id), Point::new(-5.0, 3.0));
        assert_eq!(scene.relationship_offset(id), Vec2::ZERO);
    }

    #[test]
    fn test_relate_anchors_to_target() {
        let mut scene = Scene::new();
        let rect = rect_at(&mut scene, 0.0, 0.0);
        let circle = scene.spawn(Circle::new(20.0), Point::new(50.0, 50.0));

        scene.relate(rect, circle);
        assert_eq!(scene.absolute_position(rect), Point::new(50.0, 50.0));
        assert_eq!(scene.position(rect), Point::new(0.0, 0.0));

        scene.set_position(circle, Point::new(70.0, 80.0));
        assert_eq!(scene.absolute_position(rect), Point::new(70.0, 80.0));
        assert_eq!(scene.position(rect), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_set_position_property_with_relationship_offset() {
        let mut scene = Scene::new();
        let rect = rect_at(&mut scene, 0.0, 0.0);
        let anchor = rect_at(&mut scene, 30.0, 40.0);
        scene.relate(rect, anchor);

        scene.set_position(rect, Point::new(5.0, 6.0));
        let expected = Point::new(5.0, 6.0) + scene.relationship_offset(rect);
        assert_eq!(scene.absolute_position(rect), expected);
    }

    #[test]
    fn test_attach_keeps_vector_and_back_derives_position() {
        let mut scene = Scene::new();
        let follower = rect_at(&mut scene, 10.0, 10.0);
        let anchor = rect_at(&mut scene, 50.0, 50.0);

        scene.attach(follower, anchor);
        assert_eq!(scene.absolute_position(follower), Point::new(10.0, 10.0));

        scene.set_position(anchor, Point::new(60.0, 55.0));
        assert_eq!(scene.absolute_position(follower), Point::new(20.0, 15.0));
        // Reported local position tracks the absolute one while attached.
        assert_eq!(scene.position(follower), Point::new(20.0, 15.0));
    }

    #[test]
    fn test_set_position_while_attached_recaptures_offset() {
        let mut scene = Scene::new();
        let follower = rect_at(&mut scene, 0.0, 0.0);
        let anchor = rect_at(&mut scene, 100.0, 0.0);
        scene.attach(follower, anchor);

        scene.set_position(follower, Point::new(90.0, 10.0));
        assert_eq!(scene.absolute_position(follower), Point::new(90.0, 10.0));

        scene.set_position(anchor, Point::new(110.0, 0.0));
        assert_eq!(scene.absolute_position(follower), Point::new(100.0, 10.0));
    }

    #[test]
    fn test_relate_and_attach_are_mutually_exclusive() {
        let mut scene = Scene::new();
        let shape = rect_at(&mut scene, 0.0, 0.0);
        let a = rect_at(&mut scene, 10.0, 0.0);
        let b = rect_at(&mut scene, 0.0, 10.0);

        scene.relate(shape, a);
        scene.attach(shape, b);
        assert!(matches!(
            scene.node(shape).map(|n| n.relationship()),
            Some(Relationship::Rigid { .. })
        ));

        scene.relate(shape, a);
        assert!(matches!(
            scene.node(shape).map(|n| n.relationship()),
            Some(Relationship::Elastic { .. })
        ));
    }

    #[test]
    fn test_destroy_target_reverts_dependents_silently() {
        let mut scene = Scene::new();
        let rect = rect_at(&mut scene, 1.0, 2.0);
        let anchor = rect_at(&mut scene, 50.0, 50.0);
        scene.relate(rect, anchor);

        let moved = Rc::new(RefCell::new(Vec::new()));
        let log = moved.clone();
        scene.subscribe(rect, EventKind::Moved, move |_, event| {
            log.borrow_mut().push(event.clone());
        });

        scene.remove(anchor);
        assert!(!scene.contains(anchor));
        assert_eq!(scene.absolute_position(rect), Point::new(1.0, 2.0));
        assert!(scene.node(rect).is_some_and(|n| n.relationship().is_none()));
        // Teardown is silent.
        assert!(moved.borrow().is_empty());
    }

    #[test]
    fn test_destroy_keeps_rigid_dependents_in_place() {
        let mut scene = Scene::new();
        let follower = rect_at(&mut scene, 10.0, 10.0);
        let anchor = rect_at(&mut scene, 50.0, 50.0);
        scene.attach(follower, anchor);
        scene.set_position(anchor, Point::new(80.0, 50.0));
        let before = scene.absolute_position(follower);

        scene.remove(anchor);
        assert_eq!(scene.absolute_position(follower), before);
    }

    #[test]
    fn test_destroy_drops_subscribers_and_lock() {
        let mut scene = Scene::new();
        let id = rect_at(&mut scene, 0.0, 0.0);
        scene.subscribe(id, EventKind::Destroyed, |_, _| {});
        assert_eq!(scene.subscriber_count(id), 1);

        scene.remove(id);
        assert_eq!(scene.subscriber_count(id), 0);
        assert_eq!(scene.active(), None);
        // Double destroy is a no-op.
        scene.remove(id);
    }

    #[test]
    fn test_relationship_cycle_degrades_to_local() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 1.0, 0.0);
        let b = rect_at(&mut scene, 2.0, 0.0);
        scene.relate(a, b);
        scene.relate(b, a);
        // Resolution terminates: the guard stops the second visit at that
        // shape's local position.
        assert_eq!(scene.absolute_position(a), Point::new(4.0, 0.0));
        assert_eq!(scene.absolute_position(b), Point::new(5.0, 0.0));
    }

    #[test]
    fn test_moved_cascades_to_transitive_dependents() {
        let mut scene = Scene::new();
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 10.0, 0.0);
        let c = rect_at(&mut scene, 20.0, 0.0);
        scene.relate(b, a);
        scene.relate(c, b);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        scene.subscribe(c, EventKind::Moved, move |_, event| {
            if let ShapeEvent::Moved { absolute } = event {
                log.borrow_mut().push(*absolute);
            }
        });

        scene.set_position(a, Point::new(5.0, 5.0));
        assert_eq!(*seen.borrow(), vec![Point::new(35.0, 5.0)]);
    }

    #[test]
    fn test_gesture_cycle_click_then_drag() {
        let mut scene = Scene::new();
        let camera = Camera::new();
        let id = rect_at(&mut scene, 0.0, 0.0);
        let inside = Point::new(50.0, 50.0);

        // Move in, press, release without movement: a click.
        assert!(!scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: inside,
                delta: Vec2::ZERO
            }
        ));
        assert!(scene.node(id).is_some_and(|n| n.mouse_in()));
        assert!(scene.route_pointer(id, &camera, &PointerEvent::Down { position: inside }));
        assert_eq!(scene.active(), Some(id));

        let clicked = Rc::new(RefCell::new(0));
        let count = clicked.clone();
        scene.subscribe(id, EventKind::Click, move |_, _| {
            *count.borrow_mut() += 1;
        });
        assert!(scene.route_pointer(id, &camera, &PointerEvent::Up { position: inside }));
        assert_eq!(*clicked.borrow(), 1);
        assert_eq!(scene.active(), None);

        // Press then move: a drag, ended by release.
        scene.route_pointer(id, &camera, &PointerEvent::Down { position: inside });
        assert!(scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: Point::new(60.0, 50.0),
                delta: Vec2::new(10.0, 0.0)
            }
        ));
        assert!(scene.node(id).is_some_and(|n| n.dragging()));
        assert!(scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Up {
                position: Point::new(60.0, 50.0)
            }
        ));
        assert!(scene.node(id).is_some_and(|n| !n.dragging()));
    }

    #[test]
    fn test_draggable_follows_pointer() {
        let mut scene = Scene::new();
        let camera = Camera::new();
        let id = rect_at(&mut scene, 0.0, 0.0);
        scene.set_draggable(id, true);

        let inside = Point::new(50.0, 50.0);
        scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: inside,
                delta: Vec2::ZERO,
            },
        );
        scene.route_pointer(id, &camera, &PointerEvent::Down { position: inside });
        scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: Point::new(80.0, 70.0),
                delta: Vec2::new(30.0, 20.0),
            },
        );
        assert_eq!(scene.position(id), Point::new(80.0, 70.0));
    }

    #[test]
    fn test_non_actionable_shape_ignores_pointer() {
        let mut scene = Scene::new();
        let camera = Camera::new();
        let id = rect_at(&mut scene, 0.0, 0.0);
        scene.set_draggable(id, true);
        scene.set_actionable(id, false);

        let inside = Point::new(50.0, 50.0);
        assert!(!scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: inside,
                delta: Vec2::ZERO
            }
        ));
        assert!(!scene.route_pointer(id, &camera, &PointerEvent::Down { position: inside }));
        assert!(scene.node(id).is_some_and(|n| !n.draggable()));
    }

    #[test]
    fn test_hit_test_respects_camera_transform() {
        let mut scene = Scene::new();
        let mut camera = Camera::new();
        camera.zoom_by(1.0); // scale 2
        camera.set_translate(Vec2::new(100.0, 0.0));
        let id = rect_at(&mut scene, 0.0, 0.0);

        // World (50, 50) appears at screen (200, 100).
        scene.route_pointer(
            id,
            &camera,
            &PointerEvent::Move {
                position: Point::new(200.0, 100.0),
                delta: Vec2::ZERO,
            },
        );
        assert!(scene.node(id).is_some_and(|n| n.mouse_in()));
    }

    #[test]
    fn test_group_aggregates_member_extent() {
        let mut scene = Scene::new();
        let group = scene.spawn(Group::new(), Point::new(0.0, 0.0));
        let a = rect_at(&mut scene, 0.0, 0.0);
        let b = rect_at(&mut scene, 150.0, 50.0);
        scene.group_add(group, a);
        scene.group_add(group, b);

        assert_eq!(scene.size(group), Size::new(250.0, 150.0));
        // Members follow the group elastically.
        scene.set_position(group, Point::new(10.0, 10.0));
        assert_eq!(scene.absolute_position(a), Point::new(10.0, 10.0));
        assert_eq!(scene.absolute_position(b), Point::new(160.0, 60.0));
    }

    #[test]
    fn test_group_refuses_cycles() {
        let mut scene = Scene::new();
        let outer = scene.spawn(Group::new(), Point::ZERO);
        let inner = scene.spawn(Group::new(), Point::ZERO);
        scene.group_add(outer, inner);
        scene.group_add(inner, outer);
        assert!(scene
            .node(inner)
            .and_then(|n| n.kind().as_group())
            .is_some_and(|g| g.children().is_empty()));
    }

    #[test]
    fn test_destroyed_member_leaves_group() {
        let mut scene = Scene::new();
        let group = scene.spawn(Group::new(), Point::ZERO);
        let member = rect_at(&mut scene, 10.0, 10.0);
        scene.group_add(group, member);

        scene.remove(member);
        assert!(scene
            .node(group)
            .and_then(|n| n.kind().as_group())
            .is_some_and(|g| g.children().is_empty()));
        assert_eq!(scene.size(group), Size::ZERO);
    }
}
