// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pose Overlay
//!
//! Adaptive, style-aware skeleton rendering for body, face and hand keypoints.
//!
//! Keypoints are `ndarray` collections shaped `(num_detections, num_points, 3)`, one
//! `[x, y, confidence]` triple per point. The renderer sizes circles and lines per
//! detection from its bounding rectangle, colors segments by body side, and draws
//! onto any [`Canvas`].
//!
//! ## Features
//!
//! - **Adaptive sizing** - Stroke widths follow each detection's scale
//! - **Semantic styling** - Left/right/center segment colors, excluded points
//! - **Dashed lines** - Dash phase restarts at each segment's first endpoint
//! - **Keypoint metrics** - Bounding rectangles, areas, `IoU`, distances, best detection
//! - **Pluggable targets** - Record draw calls, or rasterize into `image::RgbImage`
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::Array3;
//! use pose_overlay::{DrawRecorder, SkeletonLayout, render_pose};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut keypoints = Array3::<f32>::zeros((1, 25, 3));
//! keypoints[[0, 1, 0]] = 320.0; // neck
//! keypoints[[0, 1, 1]] = 100.0;
//! keypoints[[0, 1, 2]] = 0.9;
//! keypoints[[0, 8, 0]] = 320.0; // mid hip
//! keypoints[[0, 8, 1]] = 260.0;
//! keypoints[[0, 8, 2]] = 0.8;
//! keypoints[[0, 2, 0]] = 280.0; // right shoulder
//! keypoints[[0, 2, 1]] = 110.0;
//! keypoints[[0, 2, 2]] = 0.7;
//!
//! let mut canvas = DrawRecorder::new(640, 480);
//! let summary = render_pose(&mut canvas, keypoints.view(), SkeletonLayout::Body25, 0.05, true)?;
//! assert_eq!(summary.circles, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Styling
//!
//! Use [`AdaptiveRenderer`] directly with any [`Topology`] and [`StyleConfig`]:
//!
//! ```rust
//! use pose_overlay::{AdaptiveRenderer, Color, LineColors, SkeletonLayout, StyleConfig, Topology};
//!
//! let topology = Topology::for_layout(SkeletonLayout::Coco18);
//! let style = StyleConfig::pose(&topology)
//!     .with_threshold(0.2)
//!     .with_line_colors(LineColors::Uniform(Color::GREEN))
//!     .solid();
//! let renderer = AdaptiveRenderer::new(&topology, &style);
//! # let _ = renderer;
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`keypoints`] | Collection validation, detection extraction, scaling, merging |
//! | [`metrics`] | Bounding rectangles, areas, confidence, distances, best detection |
//! | [`layout`] | [`SkeletonLayout`] and its side/exclusion tables |
//! | [`topology`] | [`Topology`]: render pairs and per-point scale hints |
//! | [`config`] | [`StyleConfig`] for customizing rendering |
//! | [`visualizer`] | [`StyleClassifier`], [`Canvas`], [`AdaptiveRenderer`] |
//! | [`annotate`] | [`render_pose`], [`render_face`], [`render_hands`] |
//! | [`error`] | Error types ([`OverlayError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | `image::RgbImage` canvas and image/buffer annotation (default) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod annotate;
pub mod config;
pub mod error;
pub mod keypoints;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod rectangle;
pub mod topology;
pub mod visualizer;

// Re-export main types for convenience
pub use annotate::{render_face, render_hands, render_pose};
pub use config::{LineColors, ScaleMode, StyleConfig};
pub use error::{OverlayError, Result};
pub use layout::{LayoutParseError, SkeletonLayout};
pub use rectangle::Rectangle;
pub use topology::Topology;
pub use visualizer::{
    AdaptiveRenderer, Canvas, Color, DrawCall, DrawRecorder, RenderSummary, Side, StyleClassifier,
};

#[cfg(feature = "annotate")]
pub use annotate::{Overlay, annotate_buffer, annotate_image};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // Version should be semver format like "0.1.0"
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose-overlay");
    }
}
