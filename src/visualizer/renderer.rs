// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Adaptive skeleton renderer.
//!
//! Circle radii and line widths are derived per detection from the size of its
//! bounding rectangle, so a person close to the camera gets proportionally thicker
//! strokes than one far away. All validation happens before the first pixel is
//! touched: a rejected call leaves the canvas unchanged.

use std::ops::AddAssign;

use ndarray::{ArrayView2, ArrayView3, Axis};

use super::canvas::{Canvas, Point};
use super::color::Color;
use super::dash::clip_segment;
use super::style::StyleClassifier;
use crate::config::StyleConfig;
use crate::error::Result;
use crate::keypoints::{self, SCORE, X, Y};
use crate::metrics;
use crate::rectangle::Rectangle;
use crate::topology::Topology;
use crate::verbose;

/// Stroke sizes derived for one detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionSizing {
    /// Characteristic scale `s` in pixels.
    pub scale: f32,
    /// Radius before the per-point scale hint is applied.
    pub base_radius: f32,
    line_ratio: f32,
    thin_line_px: f32,
}

impl DetectionSizing {
    /// Circle radius of a point with the given scale hint.
    #[must_use]
    pub fn point_radius(&self, scale_hint: f32) -> f32 {
        self.base_radius * scale_hint
    }

    /// Stroke width derived from a radius, floored at the thin-line width.
    #[must_use]
    pub fn stroke_width(&self, radius: f32) -> f32 {
        (radius * self.line_ratio).max(self.thin_line_px)
    }
}

/// Counts of what a render call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Detections that contributed at least their sizing.
    pub detections_drawn: usize,
    /// Detections skipped for having zero area.
    pub detections_skipped: usize,
    /// Circle primitives issued.
    pub circles: usize,
    /// Line primitives issued (each dash counts once).
    pub lines: usize,
}

impl RenderSummary {
    /// Total primitives issued.
    #[must_use]
    pub const fn primitives(&self) -> usize {
        self.circles + self.lines
    }
}

impl AddAssign for RenderSummary {
    fn add_assign(&mut self, other: Self) {
        self.detections_drawn += other.detections_drawn;
        self.detections_skipped += other.detections_skipped;
        self.circles += other.circles;
        self.lines += other.lines;
    }
}

/// Draws keypoint collections with one topology and one style.
///
/// # Example
///
/// ```rust
/// use ndarray::Array3;
/// use pose_overlay::{AdaptiveRenderer, DrawRecorder, SkeletonLayout, StyleConfig, Topology};
///
/// let topology = Topology::for_layout(SkeletonLayout::Hand21);
/// let style = StyleConfig::hand(&topology);
/// let renderer = AdaptiveRenderer::new(&topology, &style);
///
/// let mut canvas = DrawRecorder::new(640, 480);
/// let keypoints = Array3::<f32>::zeros((1, 21, 3));
/// let summary = renderer.render(&mut canvas, keypoints.view()).unwrap();
/// assert_eq!(summary.primitives(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveRenderer<'a> {
    topology: &'a Topology,
    style: &'a StyleConfig,
    classifier: StyleClassifier,
}

impl<'a> AdaptiveRenderer<'a> {
    /// Create a renderer using the side/exclusion table of the topology's layout.
    #[must_use]
    pub fn new(topology: &'a Topology, style: &'a StyleConfig) -> Self {
        Self {
            topology,
            style,
            classifier: StyleClassifier::for_layout(topology.layout()),
        }
    }

    /// Replace the classifier used for point exclusion and segment visibility.
    #[must_use]
    pub fn with_classifier(mut self, classifier: StyleClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The topology being drawn.
    #[must_use]
    pub const fn topology(&self) -> &Topology {
        self.topology
    }

    /// The style in use.
    #[must_use]
    pub const fn style(&self) -> &StyleConfig {
        self.style
    }

    /// Check a collection, the topology and the style without drawing.
    ///
    /// An empty collection is always valid.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::KeypointError`](crate::OverlayError::KeypointError) for a
    /// malformed collection, [`OverlayError::TopologyError`](crate::OverlayError::TopologyError)
    /// when a pair or scale hint does not fit the point count, and
    /// [`OverlayError::StyleError`](crate::OverlayError::StyleError) for a bad style.
    pub fn validate(&self, keypoints: &ArrayView3<'_, f32>) -> Result<()> {
        keypoints::validate(keypoints)?;
        if keypoints::num_detections(keypoints) == 0 {
            return Ok(());
        }
        self.topology.validate(keypoints::num_points(keypoints))?;
        self.style.validate(self.topology)
    }

    /// Sizing of one detection, or `None` if its bounding rectangle has zero area.
    #[must_use]
    pub fn detection_sizing(&self, detection: &ArrayView2<'_, f32>) -> Option<DetectionSizing> {
        let rect = metrics::bounding_rectangle(detection, self.style.render_threshold);
        if rect.is_empty() {
            return None;
        }
        let scale = self.style.scale_mode.scale(&rect);
        Some(DetectionSizing {
            scale,
            base_radius: scale * self.style.thickness_circle_ratio * self.style.circle_scale,
            line_ratio: self.style.thickness_line_ratio_wrt_circle,
            thin_line_px: self.style.thin_line_px,
        })
    }

    /// Draw every detection of `keypoints` onto `canvas`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate). Nothing is drawn on error.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        keypoints: ArrayView3<'_, f32>,
    ) -> Result<RenderSummary> {
        self.render_over(canvas, keypoints, None)
    }

    /// Like [`render`](Self::render), filling the canvas with `background` first.
    ///
    /// The fill happens after validation, so a rejected call leaves the canvas as it was.
    /// A canvas without pixels is left alone once the inputs are known to be valid.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn render_over<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        keypoints: ArrayView3<'_, f32>,
        background: Option<Color>,
    ) -> Result<RenderSummary> {
        self.validate(&keypoints)?;
        if canvas.is_empty_frame() {
            verbose!("{}: empty frame, nothing to draw", self.topology.layout());
            return Ok(RenderSummary::default());
        }
        if let Some(color) = background {
            canvas.clear(color);
        }
        Ok(self.draw(canvas, &keypoints))
    }

    /// Draw a collection that has already passed [`validate`](Self::validate).
    pub(crate) fn draw<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        keypoints: &ArrayView3<'_, f32>,
    ) -> RenderSummary {
        let mut summary = RenderSummary::default();

        for detection in keypoints.axis_iter(Axis(0)) {
            let Some(sizing) = self.detection_sizing(&detection) else {
                summary.detections_skipped += 1;
                continue;
            };
            summary.detections_drawn += 1;
            summary.lines += self.draw_segments(canvas, &detection, &sizing);
            summary.circles += self.draw_points(canvas, &detection, &sizing);
        }

        verbose!(
            "{}: {} detection(s) drawn, {} skipped, {} circles, {} lines",
            self.topology.layout(),
            summary.detections_drawn,
            summary.detections_skipped,
            summary.circles,
            summary.lines
        );
        summary
    }

    fn is_visible(&self, detection: &ArrayView2<'_, f32>, part: usize) -> bool {
        detection[[part, SCORE]] > self.style.render_threshold
    }

    fn draw_segments<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        detection: &ArrayView2<'_, f32>,
        sizing: &DetectionSizing,
    ) -> usize {
        let dash = self.style.dash_pattern();
        let (frame_w, frame_h) = canvas.dimensions();
        let mut count = 0;

        for (pair_index, &[a, b]) in self.topology.pairs().iter().enumerate() {
            if !self.classifier.segment_visible(a, b)
                || !self.is_visible(detection, a)
                || !self.is_visible(detection, b)
            {
                continue;
            }

            let radius = sizing.point_radius(self.topology.scale_hint(b));
            let width = sizing.stroke_width(radius);
            let color = self.style.line_colors.color_for(pair_index);
            let from: Point = (detection[[a, X]], detection[[a, Y]]);
            let to: Point = (detection[[b, X]], detection[[b, Y]]);
            // Frame grown by the stroke width so clipped ends stay off-screen
            let bounds = Rectangle::new(
                -width,
                -width,
                width.mul_add(2.0, frame_w as f32),
                width.mul_add(2.0, frame_h as f32),
            );

            match dash {
                Some(pattern) => {
                    for (start, end) in pattern.dashes_within(from, to, &bounds) {
                        canvas.draw_line_segment(start, end, color, width);
                        count += 1;
                    }
                }
                None => {
                    if let Some((start, end)) = clip_points(from, to, &bounds) {
                        canvas.draw_line_segment(start, end, color, width);
                        count += 1;
                    }
                }
            }
        }

        count
    }

    fn draw_points<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        detection: &ArrayView2<'_, f32>,
        sizing: &DetectionSizing,
    ) -> usize {
        let color = self.style.point_color;
        let mut count = 0;

        for part in 0..detection.nrows() {
            if self.classifier.is_excluded(part) || !self.is_visible(detection, part) {
                continue;
            }

            let center: Point = (detection[[part, X]], detection[[part, Y]]);
            let radius = sizing.point_radius(self.topology.scale_hint(part));
            if self.style.force_filled_circles {
                canvas.draw_filled_circle(center, radius, color);
            } else {
                canvas.draw_stroked_circle(center, radius, color, sizing.stroke_width(radius));
            }
            count += 1;
        }

        count
    }
}

/// The part of `from -> to` inside `bounds`, keeping endpoints that are already inside.
fn clip_points(from: Point, to: Point, bounds: &Rectangle) -> Option<(Point, Point)> {
    let (t0, t1) = clip_segment(from, to, bounds)?;
    let (x0, y0) = (f64::from(from.0), f64::from(from.1));
    let (dx, dy) = (f64::from(to.0) - x0, f64::from(to.1) - y0);
    let at = |t: f64| (dx.mul_add(t, x0) as f32, dy.mul_add(t, y0) as f32);
    let start = if t0 > 0.0 { at(t0) } else { from };
    let end = if t1 < 1.0 { at(t1) } else { to };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineColors;
    use crate::error::OverlayError;
    use crate::layout::SkeletonLayout;
    use crate::visualizer::canvas::{DrawCall, DrawRecorder};
    use ndarray::Array3;

    /// Three-point chain 0-1-2 with the given confidences. Spans 60 x 75 px.
    fn chain(scores: [f32; 3]) -> Array3<f32> {
        Array3::from_shape_vec(
            (1, 3, 3),
            vec![
                0.0, 0.0, scores[0], //
                60.0, 20.0, scores[1], //
                30.0, 75.0, scores[2],
            ],
        )
        .unwrap()
    }

    fn chain_topology() -> Topology {
        Topology::new(SkeletonLayout::Mpi15, vec![[0, 1], [1, 2]], vec![1.0])
    }

    #[test]
    fn test_sizing_from_larger_side() {
        let topology = chain_topology();
        let style = StyleConfig::new();
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let kpts = chain([0.9, 0.9, 0.9]);

        let sizing = renderer.detection_sizing(&kpts.index_axis(Axis(0), 0)).unwrap();
        assert!((sizing.scale - 75.0).abs() < 1e-5);
        assert!((sizing.base_radius - 1.0).abs() < 1e-5);
        assert!((sizing.stroke_width(1.0) - 1.0).abs() < 1e-5);
        assert!((sizing.stroke_width(4.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_render_solid_chain() {
        let topology = chain_topology();
        let style = StyleConfig::new().with_ratios(0.04, 0.5).with_filled_circles(true);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        let summary = renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap();
        assert_eq!(summary.circles, 3);
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.detections_drawn, 1);

        // s = 75, radius = 3, width = 1.5
        match &canvas.calls()[0] {
            DrawCall::Line { from, to, width, color } => {
                assert_eq!(*from, (0.0, 0.0));
                assert_eq!(*to, (60.0, 20.0));
                assert!((width - 1.5).abs() < 1e-5);
                assert_eq!(*color, Color::WHITE);
            }
            other => panic!("expected a line, got {other:?}"),
        }
        match canvas.circles().next().unwrap() {
            DrawCall::FilledCircle { radius, color, .. } => {
                assert!((radius - 3.0).abs() < 1e-5);
                assert_eq!(*color, Color::ORANGE);
            }
            other => panic!("expected a filled circle, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let topology = chain_topology();
        let style = StyleConfig::new().with_threshold(0.5);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        let summary = renderer.render(&mut canvas, chain([0.9, 0.9, 0.5]).view()).unwrap();
        assert_eq!(summary.circles, 2);
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_zero_area_detection_skipped() {
        let topology = chain_topology();
        let style = StyleConfig::new();
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        // A single visible point has a zero-area rectangle
        let summary = renderer.render(&mut canvas, chain([0.9, 0.0, 0.0]).view()).unwrap();
        assert_eq!(summary.detections_skipped, 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_stroked_circles_use_floor() {
        let topology = chain_topology();
        let style = StyleConfig::new().with_thin_line(2.0);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap();
        for call in canvas.circles() {
            match call {
                DrawCall::StrokedCircle { stroke_width, .. } => {
                    assert!((stroke_width - 2.0).abs() < 1e-5);
                }
                other => panic!("expected a stroked circle, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_dashed_segments() {
        let topology = chain_topology();
        let style = StyleConfig::new().with_dash(6, 6);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        let summary = renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap();
        // Both segments are a little over 60 px: 6 dashes each, the last one truncated
        assert_eq!(summary.lines, 12);
        let last = canvas.lines().last().unwrap();
        match last {
            DrawCall::Line { from, to, .. } => {
                assert!((to.0 - 30.0).abs() < 1e-3 && (to.1 - 75.0).abs() < 1e-3);
                let dash = (to.0 - from.0).hypot(to.1 - from.1);
                assert!((dash - (30.0_f32.hypot(55.0) - 60.0)).abs() < 1e-3);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_segments_clipped_to_frame() {
        let topology = chain_topology();
        let mut kpts = chain([0.9, 0.9, 0.9]);
        kpts[[0, 0, 0]] = 10.0;
        kpts[[0, 0, 1]] = 10.0;
        kpts[[0, 1, 0]] = -3.0e8;
        kpts[[0, 1, 1]] = 50.0;

        // Zero circle ratio keeps every stroke at the 1 px floor
        let dashed = StyleConfig::new().with_ratios(0.0, 0.75).with_dash(6, 6);
        let renderer = AdaptiveRenderer::new(&topology, &dashed);
        let mut canvas = DrawRecorder::new(100, 100);
        let summary = renderer.render(&mut canvas, kpts.view()).unwrap();
        assert!(summary.lines >= 2 && summary.lines <= 6);
        for call in canvas.lines() {
            match call {
                DrawCall::Line { from, to, .. } => {
                    assert!(from.0 >= -1.001 && to.0 >= -1.001);
                    assert!(from.0 <= 101.0 && to.0 <= 101.0);
                }
                other => panic!("expected a line, got {other:?}"),
            }
        }

        let solid = StyleConfig::new().with_ratios(0.0, 0.75);
        let renderer = AdaptiveRenderer::new(&topology, &solid);
        let mut canvas = DrawRecorder::new(100, 100);
        let summary = renderer.render(&mut canvas, kpts.view()).unwrap();
        assert_eq!(summary.lines, 2);
        match &canvas.calls()[0] {
            DrawCall::Line { from, to, .. } => {
                assert_eq!(*from, (10.0, 10.0));
                assert!((to.0 + 1.0).abs() < 1e-3);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_scale_hints_per_point() {
        let topology = chain_topology().with_scale_hints(vec![1.0, 2.0, 0.5]);
        let style = StyleConfig::new().with_filled_circles(true);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap();
        let radii: Vec<f32> = canvas
            .circles()
            .map(|c| match c {
                DrawCall::FilledCircle { radius, .. } => *radius,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(radii.len(), 3);
        assert!((radii[0] - 1.0).abs() < 1e-5);
        assert!((radii[1] - 2.0).abs() < 1e-5);
        assert!((radii[2] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_custom_classifier_excludes() {
        let topology = chain_topology();
        let style = StyleConfig::new();
        let renderer = AdaptiveRenderer::new(&topology, &style)
            .with_classifier(StyleClassifier::custom(Vec::new(), Vec::new(), vec![2]));
        let mut canvas = DrawRecorder::new(100, 100);

        let summary = renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap();
        assert_eq!(summary.circles, 2);
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_errors_leave_canvas_untouched() {
        let topology = Topology::for_layout(SkeletonLayout::Body25);
        let style = StyleConfig::pose(&topology);
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        let err = renderer
            .render_over(&mut canvas, chain([0.9, 0.9, 0.9]).view(), Some(Color::BLACK))
            .unwrap_err();
        assert!(matches!(err, OverlayError::TopologyError(_)));
        assert!(canvas.is_empty());

        let short = StyleConfig::new().with_line_colors(LineColors::PerPair(vec![Color::RED]));
        let topology = chain_topology();
        let renderer = AdaptiveRenderer::new(&topology, &short);
        let err = renderer.render(&mut canvas, chain([0.9, 0.9, 0.9]).view()).unwrap_err();
        assert!(matches!(err, OverlayError::StyleError(_)));
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_empty_collection_is_valid() {
        let topology = Topology::for_layout(SkeletonLayout::Body25);
        let style = StyleConfig::new();
        let renderer = AdaptiveRenderer::new(&topology, &style);
        let mut canvas = DrawRecorder::new(100, 100);

        let empty = Array3::<f32>::zeros((0, 3, 3));
        let summary = renderer.render(&mut canvas, empty.view()).unwrap();
        assert_eq!(summary, RenderSummary::default());
    }

    #[test]
    fn test_summary_add_assign() {
        let mut total = RenderSummary {
            detections_drawn: 1,
            circles: 3,
            lines: 2,
            ..RenderSummary::default()
        };
        total += RenderSummary {
            detections_skipped: 1,
            circles: 1,
            ..RenderSummary::default()
        };
        assert_eq!(total.detections_drawn, 1);
        assert_eq!(total.detections_skipped, 1);
        assert_eq!(total.primitives(), 6);
    }
}
