//! Easel Core Library
//!
//! Backend-agnostic canvas scene graph: shapes with spatial relationships,
//! ordered layers, and a space owning the view transform, frame loop, and
//! pointer routing. Rendering, pointer events, and frame scheduling are
//! supplied by the host through the ports in [`surface`], [`pointer`], and
//! [`frame`].

pub mod camera;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod layer;
pub mod pointer;
pub mod scene;
pub mod shape;
pub mod space;
pub mod style;
pub mod surface;

pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use events::{EventKind, ShapeEvent, Subscription};
pub use frame::{FrameHandle, FrameScheduler, Throttle, Timestamp};
pub use geometry::{Angle, FlexDim, FlexSize};
pub use layer::{Layer, LayerId};
pub use pointer::PointerEvent;
pub use scene::Scene;
pub use shape::{Relationship, ShapeId, ShapeKind, ShapeNode};
pub use space::{Space, SpaceOptions};
pub use style::{
    ColorParseError, FontSpec, LineCap, LineJoin, Pen, Rgba, Shadow, Style, StyleKey, StylePatch,
    TextOverflow, parse_hex,
};
pub use surface::{GlyphEstimate, ImageHandle, ImageSource, Surface, TextMeasurer};
