//! Typed shape notifications.
//!
//! Every shape exposes a set of notification channels. Delivery is
//! synchronous and in subscription order, on the thread that performed the
//! mutation; a handler runs to completion before the emitting call returns.
//! Handlers receive the shape id and the event, nothing else — mutating the
//! scene from inside a handler is not supported.

use kurbo::{Point, Size};
use std::collections::HashMap;
use uuid::Uuid;

use crate::shape::ShapeId;

/// A notification emitted by a shape.
///
/// Pointer-derived events carry the screen-space pointer position.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEvent {
    /// The absolute position changed, directly or through a relationship.
    Moved { absolute: Point },
    /// The derived size changed.
    Resized { size: Size },
    /// The pointer entered the shape.
    PointerEnter { position: Point },
    /// The pointer left the shape.
    PointerLeave { position: Point },
    /// A press-release pair completed without movement.
    Click { position: Point },
    DragStart { position: Point },
    Drag { position: Point },
    DragEnd { position: Point },
    /// The shape is being destroyed; delivered before its state is dropped.
    Destroyed,
}

/// The channel a [`ShapeEvent`] belongs to, used as a subscription filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Moved,
    Resized,
    PointerEnter,
    PointerLeave,
    Click,
    DragStart,
    Drag,
    DragEnd,
    Destroyed,
}

impl ShapeEvent {
    /// The channel this event is delivered on.
    pub fn kind(&self) -> EventKind {
        match self {
            ShapeEvent::Moved { .. } => EventKind::Moved,
            ShapeEvent::Resized { .. } => EventKind::Resized,
            ShapeEvent::PointerEnter { .. } => EventKind::PointerEnter,
            ShapeEvent::PointerLeave { .. } => EventKind::PointerLeave,
            ShapeEvent::Click { .. } => EventKind::Click,
            ShapeEvent::DragStart { .. } => EventKind::DragStart,
            ShapeEvent::Drag { .. } => EventKind::Drag,
            ShapeEvent::DragEnd { .. } => EventKind::DragEnd,
            ShapeEvent::Destroyed => EventKind::Destroyed,
        }
    }
}

/// Handle for unsubscribing a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(Uuid);

impl Subscription {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

type Handler = Box<dyn FnMut(ShapeId, &ShapeEvent)>;

struct Entry {
    id: Subscription,
    kind: EventKind,
    handler: Handler,
}

/// Per-shape subscriber table.
#[derive(Default)]
pub(crate) struct Subscribers {
    by_shape: HashMap<ShapeId, Vec<Entry>>,
}

impl Subscribers {
    pub(crate) fn subscribe<F>(&mut self, shape: ShapeId, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(ShapeId, &ShapeEvent) + 'static,
    {
        let id = Subscription::new();
        self.by_shape.entry(shape).or_default().push(Entry {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        for entries in self.by_shape.values_mut() {
            if let Some(index) = entries.iter().position(|e| e.id == subscription) {
                entries.remove(index);
                return true;
            }
        }
        false
    }

    pub(crate) fn emit(&mut self, shape: ShapeId, event: &ShapeEvent) {
        let Some(entries) = self.by_shape.get_mut(&shape) else {
            return;
        };
        let kind = event.kind();
        for entry in entries.iter_mut() {
            if entry.kind == kind {
                (entry.handler)(shape, event);
            }
        }
    }

    /// Drop every subscription attached to a destroyed shape.
    pub(crate) fn drop_shape(&mut self, shape: ShapeId) {
        self.by_shape.remove(&shape);
    }

    pub(crate) fn count_for(&self, shape: ShapeId) -> usize {
        self.by_shape.get(&shape).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("shapes", &self.by_shape.len())
            .finish()
    }
}
