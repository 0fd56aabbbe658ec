//! Easel Render
//!
//! Reference backends for the easel surface and scheduler ports: a
//! command-recording surface and a manually driven frame scheduler. Both
//! are deterministic, making the full render and input pipeline testable
//! without a display.

mod record;
mod scheduler;

pub use record::{DrawCmd, RecordLog, RecordSurface};
pub use scheduler::ManualScheduler;
