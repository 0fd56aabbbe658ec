//! The top-level container: layer stacks, view transform, frame loop, and
//! pointer routing.

use kurbo::{BezPath, Point, Rect, Shape as _};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::frame::{FrameHandle, FrameScheduler, Throttle, Timestamp};
use crate::layer::{Layer, LayerId};
use crate::pointer::PointerEvent;
use crate::scene::Scene;
use crate::shape::ShapeId;
use crate::style::{LineCap, LineJoin, Pen, Rgba, Style};
use crate::surface::Surface;

/// Extent of the origin axis guide lines, in world units.
const AXIS_EXTENT: f64 = 100_000.0;
const AXIS_COLOR: Rgba = Rgba::new(0xEE, 0xEE, 0xEE, 0xFF);
const ORIGIN_DOT_COLOR: Rgba = Rgba::new(0xCC, 0xCC, 0xCC, 0xFF);

/// Construction options for a [`Space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceOptions {
    /// Draw the world-space origin/axis guide.
    pub axis: bool,
    /// Background fill color.
    pub background: Rgba,
    /// Paint-rate cap in frames per second; `None` paints on every host
    /// tick.
    pub frame_rate: Option<f64>,
}

impl Default for SpaceOptions {
    fn default() -> Self {
        Self {
            axis: true,
            background: Rgba::new(0xF6, 0xF6, 0xF6, 0xFF),
            frame_rate: Some(30.0),
        }
    }
}

/// A canvas-bound container owning the scene, the layer stacks, the view
/// transform, and the input/frame loops.
///
/// A space starts unbound and inert: dispatching, painting, and the render
/// loop do nothing until [`bind`](Self::bind) supplies a surface. Hosts
/// that resolve their backing canvas by name should check the lookup and
/// simply skip binding when it fails.
pub struct Space {
    scene: Scene,
    layers: Vec<Layer>,
    fixed_layers: Vec<Layer>,
    camera: Camera,
    surface: Option<Box<dyn Surface>>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    pending: Option<FrameHandle>,
    running: bool,
    throttle: Throttle,
    pointer_down: Option<Point>,
    panning: bool,
    options: SpaceOptions,
}

impl Space {
    pub fn new(options: SpaceOptions) -> Self {
        Self::with_style(options, Style::default())
    }

    /// Create a space whose scene seeds shapes from `default_style`.
    pub fn with_style(options: SpaceOptions, default_style: Style) -> Self {
        Self {
            scene: Scene::with_style(default_style),
            layers: Vec::new(),
            fixed_layers: Vec::new(),
            camera: Camera::new(),
            surface: None,
            scheduler: None,
            pending: None,
            running: false,
            throttle: Throttle::from_fps(options.frame_rate),
            pointer_down: None,
            panning: false,
            options,
        }
    }

    /// Bind the backing surface and adopt its pixel size.
    pub fn bind(&mut self, surface: Box<dyn Surface>, size: kurbo::Size) {
        self.surface = Some(surface);
        self.camera.resize(size);
        log::debug!("space bound to {size:?} surface");
    }

    /// Inject the host's frame-scheduling primitive.
    pub fn set_scheduler(&mut self, scheduler: Box<dyn FrameScheduler>) {
        self.scheduler = Some(scheduler);
    }

    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// Adopt a new backing-surface size, recomputing the view and
    /// re-centering the translate.
    pub fn resize(&mut self, size: kurbo::Size) {
        self.camera.resize(size);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn options(&self) -> &SpaceOptions {
        &self.options
    }

    // ----- layers ---------------------------------------------------------

    /// Add a layer to the stack matching its fixed flag, returning its id.
    /// A layer already present is not added twice.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        let stack = if layer.fixed() {
            &mut self.fixed_layers
        } else {
            &mut self.layers
        };
        if !stack.iter().any(|existing| existing.id() == id) {
            stack.push(layer);
        }
        id
    }

    /// Remove a layer, destroying its shapes. No-op for unknown ids.
    pub fn remove_layer(&mut self, id: LayerId) {
        let scene = &mut self.scene;
        for stack in [&mut self.fixed_layers, &mut self.layers] {
            if let Some(index) = stack.iter().position(|layer| layer.id() == id) {
                let mut layer = stack.remove(index);
                layer.clear(scene);
                return;
            }
        }
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers
            .iter()
            .chain(self.fixed_layers.iter())
            .find(|layer| layer.id() == id)
    }

    /// Mutable access for z-order and visibility changes. Shape membership
    /// changes go through [`add_shape`](Self::add_shape)/
    /// [`remove_shape`](Self::remove_shape), which also need the scene.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .chain(self.fixed_layers.iter_mut())
            .find(|layer| layer.id() == id)
    }

    /// Add a shape to a layer.
    pub fn add_shape(&mut self, layer: LayerId, shape: ShapeId) {
        let scene = &mut self.scene;
        if let Some(layer) = self
            .layers
            .iter_mut()
            .chain(self.fixed_layers.iter_mut())
            .find(|l| l.id() == layer)
        {
            layer.add_shape(scene, shape);
        }
    }

    /// Remove a shape from a layer, destroying it.
    pub fn remove_shape(&mut self, layer: LayerId, shape: ShapeId) {
        let scene = &mut self.scene;
        if let Some(layer) = self
            .layers
            .iter_mut()
            .chain(self.fixed_layers.iter_mut())
            .find(|l| l.id() == layer)
        {
            layer.remove_shape(scene, shape);
        }
    }

    /// Swap a layer with the one above it in its stack.
    pub fn layer_forward(&mut self, id: LayerId) {
        for stack in [&mut self.fixed_layers, &mut self.layers] {
            if let Some(index) = stack.iter().position(|layer| layer.id() == id) {
                if index + 1 < stack.len() {
                    stack.swap(index, index + 1);
                }
                return;
            }
        }
    }

    /// Swap a layer with the one below it in its stack.
    pub fn layer_backward(&mut self, id: LayerId) {
        for stack in [&mut self.fixed_layers, &mut self.layers] {
            if let Some(index) = stack.iter().position(|layer| layer.id() == id) {
                if index > 0 {
                    stack.swap(index, index - 1);
                }
                return;
            }
        }
    }

    /// Move a layer to the top of its stack.
    pub fn layer_to_front(&mut self, id: LayerId) {
        for stack in [&mut self.fixed_layers, &mut self.layers] {
            if let Some(index) = stack.iter().position(|layer| layer.id() == id) {
                if index + 1 < stack.len() {
                    let layer = stack.remove(index);
                    stack.push(layer);
                }
                return;
            }
        }
    }

    /// Move a layer to the bottom of its stack.
    pub fn layer_to_back(&mut self, id: LayerId) {
        for stack in [&mut self.fixed_layers, &mut self.layers] {
            if let Some(index) = stack.iter().position(|layer| layer.id() == id) {
                if index > 0 {
                    let layer = stack.remove(index);
                    stack.insert(0, layer);
                }
                return;
            }
        }
    }

    // ----- pointer routing ------------------------------------------------

    /// Route a pointer event: screen-fixed layers first (topmost stack
    /// first), then world layers; an unhandled press starts a background
    /// pan, moves while panning advance the translate by the movement
    /// delta, and wheel gestures zoom.
    pub fn dispatch(&mut self, event: &PointerEvent) {
        if self.surface.is_none() {
            return;
        }
        match *event {
            PointerEvent::Down { position } => {
                self.pointer_down = Some(position);
                if !self.route_to_layers(event) {
                    self.panning = true;
                }
            }
            PointerEvent::Up { .. } => {
                if self.panning {
                    self.panning = false;
                } else {
                    self.route_to_layers(event);
                }
                self.pointer_down = None;
            }
            PointerEvent::Move { delta, .. } => {
                if self.panning && self.pointer_down.is_some() {
                    // Delta is in screen pixels, so panning speed is
                    // independent of the zoom scale.
                    self.camera.pan(delta);
                } else {
                    self.route_to_layers(event);
                }
            }
            PointerEvent::Wheel { delta } => {
                let step = (delta / 10.0).ceil() * 0.01;
                self.camera.zoom_by(step);
            }
        }
    }

    fn route_to_layers(&mut self, event: &PointerEvent) -> bool {
        let scene = &mut self.scene;
        let camera = &self.camera;
        for layer in self.fixed_layers.iter().rev() {
            if layer.dispatch_event(scene, camera, event) {
                return true;
            }
        }
        for layer in self.layers.iter().rev() {
            if layer.dispatch_event(scene, camera, event) {
                return true;
            }
        }
        false
    }

    /// Whether a background-pan gesture is in progress.
    pub fn panning(&self) -> bool {
        self.panning
    }

    // ----- view transform -------------------------------------------------

    /// Current zoom scale.
    pub fn zoom(&self) -> f64 {
        self.camera.scale()
    }

    /// Adjust the zoom additively, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, amount: f64) {
        self.camera.zoom_by(amount);
    }

    /// Current pan origin (the translate).
    pub fn origin(&self) -> Point {
        self.camera.translate().to_point()
    }

    /// Reposition the translate directly.
    pub fn set_origin(&mut self, origin: Point) {
        self.camera.set_translate(origin.to_vec2());
    }

    /// Restore the centered translate and scale 1.
    pub fn reset_transform(&mut self) {
        self.camera.reset();
    }

    // ----- frame loop -----------------------------------------------------

    /// Start the frame loop. Idempotent: a running loop is left alone.
    /// Inert without a bound surface and an injected scheduler.
    pub fn render(&mut self) {
        if self.surface.is_none() || self.running {
            return;
        }
        let Some(scheduler) = self.scheduler.as_deref_mut() else {
            return;
        };
        self.running = true;
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Stop the frame loop, withdrawing any outstanding frame request.
    pub fn pause(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            if let Some(scheduler) = self.scheduler.as_deref_mut() {
                scheduler.cancel_frame(handle);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Host callback for a fired frame request. Reschedules while the loop
    /// runs and paints unless the rate gate drops the tick.
    pub fn on_frame(&mut self, now: Timestamp) {
        self.pending = None;
        if !self.running {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_deref_mut() {
            self.pending = Some(scheduler.request_frame());
        }
        if self.throttle.ready(now) {
            self.frame();
        }
    }

    /// Paint one frame: background, world layers under the view transform
    /// (with the optional axis guide), then fixed layers in screen space.
    pub fn frame(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        surface.reset_transform();
        surface.clear(
            Rect::from_origin_size(Point::ZERO, self.camera.size()),
            self.options.background.color(),
        );
        surface.set_transform(self.camera.transform());
        if self.options.axis {
            draw_axis(surface, self.camera.scale());
        }
        for layer in &self.layers {
            layer.draw(&mut self.scene, surface);
        }
        surface.reset_transform();
        for layer in &self.fixed_layers {
            layer.draw(&mut self.scene, surface);
        }
    }

    /// Destroy every layer in both stacks, optionally resetting the view
    /// transform and halting the frame loop.
    pub fn clear(&mut self, stop_render: bool, reset_transform: bool) {
        for layer in &mut self.layers {
            layer.clear(&mut self.scene);
        }
        for layer in &mut self.fixed_layers {
            layer.clear(&mut self.scene);
        }
        self.layers.clear();
        self.fixed_layers.clear();
        if reset_transform {
            self.camera.reset();
        }
        if stop_render {
            self.pause();
            self.throttle.reset();
        }
    }
}

impl std::fmt::Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("scene", &self.scene)
            .field("layers", &self.layers.len())
            .field("fixed_layers", &self.fixed_layers.len())
            .field("bound", &self.surface.is_some())
            .field("running", &self.running)
            .finish()
    }
}

/// Hairline axes through the world origin plus an origin dot, compensated
/// for the current scale so they stay one pixel wide.
fn draw_axis(surface: &mut dyn Surface, scale: f64) {
    surface.save();
    let mut axes = BezPath::new();
    axes.move_to((-AXIS_EXTENT, 0.0));
    axes.line_to((AXIS_EXTENT, 0.0));
    axes.move_to((0.0, -AXIS_EXTENT));
    axes.line_to((0.0, AXIS_EXTENT));
    let pen = Pen {
        color: AXIS_COLOR.color(),
        width: 1.0 / scale,
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        dash: &[],
    };
    surface.stroke_path(&axes, &pen);
    let dot = kurbo::Circle::new(Point::ZERO, 2.0 / scale).to_path(0.1);
    surface.fill_path(&dot, ORIGIN_DOT_COLOR.color());
    surface.restore();
}
