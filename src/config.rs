// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rendering style configuration.
//!
//! This module defines [`StyleConfig`], which controls how a keypoint collection is
//! drawn: adaptive size ratios, the confidence threshold, colors, circle fill and
//! dash pattern. Presets reproduce the standard body, face and hand styles.

use std::fmt;

use crate::error::{OverlayError, Result};
use crate::rectangle::Rectangle;
use crate::topology::Topology;
use crate::visualizer::color::Color;
use crate::visualizer::dash::DashPattern;
use crate::visualizer::style::{StyleClassifier, hand_pair_colors};

/// Default confidence threshold for rendering.
pub const DEFAULT_RENDER_THRESHOLD: f32 = 0.05;

/// How a detection's characteristic scale is derived from its bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    /// Larger of width and height.
    #[default]
    LargerSide,
    /// Length of the rectangle diagonal.
    Diagonal,
    /// Square root of the area.
    GeometricMean,
}

impl ScaleMode {
    /// Characteristic scale of `rect` in pixels.
    #[must_use]
    pub fn scale(&self, rect: &Rectangle) -> f32 {
        match self {
            Self::LargerSide => rect.larger_side(),
            Self::Diagonal => rect.width.hypot(rect.height),
            Self::GeometricMean => rect.area().max(0.0).sqrt(),
        }
    }

    /// Mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LargerSide => "larger-side",
            Self::Diagonal => "diagonal",
            Self::GeometricMean => "geometric-mean",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Segment coloring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineColors {
    /// One color for every segment.
    Uniform(Color),
    /// One color per topology pair, in pair order.
    PerPair(Vec<Color>),
}

impl Default for LineColors {
    fn default() -> Self {
        Self::Uniform(Color::WHITE)
    }
}

impl LineColors {
    /// Color of the pair at `pair_index`.
    ///
    /// # Panics
    ///
    /// Panics if a per-pair table has no entry for `pair_index`. Styles that passed
    /// [`StyleConfig::validate`] have one entry per pair of their topology.
    #[must_use]
    pub fn color_for(&self, pair_index: usize) -> Color {
        match self {
            Self::Uniform(color) => *color,
            Self::PerPair(colors) => colors[pair_index],
        }
    }
}

/// Style configuration for the adaptive renderer.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose_overlay::{ScaleMode, StyleConfig};
///
/// let style = StyleConfig::new()
///     .with_threshold(0.1)
///     .with_circle_scale(0.85)
///     .with_dash(6, 6)
///     .with_scale_mode(ScaleMode::Diagonal);
/// assert!(style.is_dashed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Circle radius as a fraction of the detection scale.
    pub thickness_circle_ratio: f32,
    /// Line thickness as a fraction of the endpoint circle radius.
    pub thickness_line_ratio_wrt_circle: f32,
    /// Points with confidence strictly above this value are drawn.
    pub render_threshold: f32,
    /// Circle color.
    pub point_color: Color,
    /// Segment colors.
    pub line_colors: LineColors,
    /// Extra multiplier on every circle radius.
    pub circle_scale: f32,
    /// Draw filled discs instead of circle outlines.
    pub force_filled_circles: bool,
    /// Dash length in pixels. `0` draws solid lines.
    pub dash_len_px: u32,
    /// Gap length in pixels. `0` draws solid lines.
    pub gap_len_px: u32,
    /// Minimum line and outline stroke width in pixels.
    pub thin_line_px: f32,
    /// Derivation of the detection scale.
    pub scale_mode: ScaleMode,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            thickness_circle_ratio: 1.0 / 75.0,
            thickness_line_ratio_wrt_circle: 0.75,
            render_threshold: DEFAULT_RENDER_THRESHOLD,
            point_color: Color::ORANGE,
            line_colors: LineColors::default(),
            circle_scale: 1.0,
            force_filled_circles: false,
            dash_len_px: 0,
            gap_len_px: 0,
            thin_line_px: 1.0,
            scale_mode: ScaleMode::default(),
        }
    }
}

impl StyleConfig {
    /// Create a new configuration with default values.
    ///
    /// # Returns
    ///
    /// * A new `StyleConfig` with solid white lines and orange circle outlines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Body style: side-colored segments, filled circles, dashed lines.
    ///
    /// Segment colors come from the [`StyleClassifier`] of the topology's layout.
    ///
    /// # Arguments
    ///
    /// * `topology` - The body topology the colors are resolved for.
    #[must_use]
    pub fn pose(topology: &Topology) -> Self {
        let classifier = StyleClassifier::for_layout(topology.layout());
        Self {
            line_colors: LineColors::PerPair(classifier.pair_colors(topology.pairs())),
            circle_scale: 0.85,
            force_filled_circles: true,
            dash_len_px: 6,
            gap_len_px: 6,
            ..Self::default()
        }
    }

    /// Face style: thin white dashed contours and small filled points.
    #[must_use]
    pub fn face() -> Self {
        Self {
            thickness_line_ratio_wrt_circle: 0.334,
            circle_scale: 0.75,
            force_filled_circles: true,
            dash_len_px: 6,
            gap_len_px: 6,
            ..Self::default()
        }
    }

    /// Hand style: green palm segments, white fingers, short dashes.
    ///
    /// # Arguments
    ///
    /// * `topology` - The hand topology the colors are resolved for.
    #[must_use]
    pub fn hand(topology: &Topology) -> Self {
        Self {
            thickness_circle_ratio: 1.0 / 50.0,
            line_colors: LineColors::PerPair(hand_pair_colors(topology.pairs())),
            force_filled_circles: true,
            dash_len_px: 3,
            gap_len_px: 3,
            thin_line_px: 2.0,
            ..Self::default()
        }
    }

    /// Set the render threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Points with confidence strictly above this value are drawn.
    ///
    /// # Returns
    ///
    /// * The modified `StyleConfig`.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.render_threshold = threshold;
        self
    }

    /// Set the circle ratio and the line-to-circle ratio.
    ///
    /// # Arguments
    ///
    /// * `circle` - Circle radius as a fraction of the detection scale.
    /// * `line_wrt_circle` - Line thickness as a fraction of the circle radius.
    ///
    /// # Returns
    ///
    /// * The modified `StyleConfig`.
    #[must_use]
    pub fn with_ratios(mut self, circle: f32, line_wrt_circle: f32) -> Self {
        self.thickness_circle_ratio = circle;
        self.thickness_line_ratio_wrt_circle = line_wrt_circle;
        self
    }

    /// Set the circle color.
    #[must_use]
    pub fn with_point_color(mut self, color: Color) -> Self {
        self.point_color = color;
        self
    }

    /// Set the segment colors.
    #[must_use]
    pub fn with_line_colors(mut self, colors: LineColors) -> Self {
        self.line_colors = colors;
        self
    }

    /// Set the circle radius multiplier.
    #[must_use]
    pub fn with_circle_scale(mut self, scale: f32) -> Self {
        self.circle_scale = scale;
        self
    }

    /// Draw filled discs (`true`) or outlines (`false`).
    #[must_use]
    pub fn with_filled_circles(mut self, filled: bool) -> Self {
        self.force_filled_circles = filled;
        self
    }

    /// Set the dash pattern. Either length `0` gives solid lines.
    ///
    /// # Arguments
    ///
    /// * `dash_len_px` - Drawn run length in pixels.
    /// * `gap_len_px` - Skipped run length in pixels.
    ///
    /// # Returns
    ///
    /// * The modified `StyleConfig`.
    #[must_use]
    pub fn with_dash(mut self, dash_len_px: u32, gap_len_px: u32) -> Self {
        self.dash_len_px = dash_len_px;
        self.gap_len_px = gap_len_px;
        self
    }

    /// Draw solid lines.
    #[must_use]
    pub fn solid(self) -> Self {
        self.with_dash(0, 0)
    }

    /// Set the minimum stroke width in pixels.
    #[must_use]
    pub fn with_thin_line(mut self, px: f32) -> Self {
        self.thin_line_px = px;
        self
    }

    /// Set how the detection scale is derived.
    #[must_use]
    pub fn with_scale_mode(mut self, mode: ScaleMode) -> Self {
        self.scale_mode = mode;
        self
    }

    /// Whether segments are decomposed into dashes.
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        self.dash_pattern().is_some()
    }

    /// Dash pattern, or `None` for solid lines.
    #[must_use]
    pub fn dash_pattern(&self) -> Option<DashPattern> {
        DashPattern::new(self.dash_len_px, self.gap_len_px)
    }

    /// Check the configuration against the topology it will draw.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::StyleError`] if a ratio, scale, width or threshold is
    /// non-finite or negative, or if a per-pair color table does not have one entry
    /// per topology pair.
    pub fn validate(&self, topology: &Topology) -> Result<()> {
        let non_negative = [
            ("thickness_circle_ratio", self.thickness_circle_ratio),
            ("thickness_line_ratio_wrt_circle", self.thickness_line_ratio_wrt_circle),
            ("circle_scale", self.circle_scale),
            ("thin_line_px", self.thin_line_px),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(OverlayError::StyleError(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.render_threshold.is_finite() {
            return Err(OverlayError::StyleError(format!(
                "render_threshold must be finite, got {}",
                self.render_threshold
            )));
        }

        if let LineColors::PerPair(colors) = &self.line_colors {
            if colors.len() != topology.num_pairs() {
                return Err(OverlayError::StyleError(format!(
                    "{} line colors for {} pairs of {}",
                    colors.len(),
                    topology.num_pairs(),
                    topology.layout()
                )));
            }
        }

        Ok(())
    }
}
