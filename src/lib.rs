//! plotline: chart geometry and interaction engine.
//!
//! The crate turns abstract data series into pixel-space geometry and
//! keeps the interactive parts consistent around it: multi-axis layout
//! with dynamically registered decorations, stacked series transforms,
//! pointer/keyboard scrubbing, and path transitions that avoid visually
//! jarring tweens. Rendering itself stays on the host side; the engine
//! exchanges scales, rects, path strings and frame data across a narrow
//! in-process boundary.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;
pub mod transition;

pub use api::{ChartSession, ChartView};
pub use error::{ChartError, ChartResult};
