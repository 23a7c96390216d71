// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton visualization: styling, dash patterns, drawing targets and the renderer.

/// Color definitions.
pub mod color;

/// Drawing targets.
pub mod canvas;

/// Dash/gap decomposition.
pub mod dash;

/// Adaptive skeleton renderer.
pub mod renderer;

/// Side classification and segment styling.
pub mod style;

pub use canvas::{Canvas, DrawCall, DrawRecorder, Point};
pub use color::Color;
pub use dash::DashPattern;
pub use renderer::{AdaptiveRenderer, DetectionSizing, RenderSummary};
pub use style::{Side, StyleClassifier};
