// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Body, face and hand overlay entry points.
//!
//! Each entry point builds the region's topology and preset style, validates every
//! input, and only then draws. The canvas is left untouched when a call is rejected
//! and when it has no pixels.

use ndarray::ArrayView3;

use crate::config::StyleConfig;
use crate::error::Result;
use crate::layout::SkeletonLayout;
use crate::topology::Topology;
use crate::visualizer::canvas::Canvas;
use crate::visualizer::color::Color;
use crate::visualizer::renderer::{AdaptiveRenderer, RenderSummary};
use crate::{verbose, warn};

/// Draw body keypoints with the pose style of `layout`.
///
/// When `blend_original_frame` is `false` the canvas is filled with black first, so
/// only the skeleton remains visible.
///
/// # Arguments
///
/// * `canvas` - Target surface.
/// * `keypoints` - Body keypoints shaped `(num_people, num_points, 3)`.
/// * `layout` - Point-index scheme of `keypoints`.
/// * `render_threshold` - Points with confidence strictly above this value are drawn.
/// * `blend_original_frame` - Keep the existing canvas content under the skeleton.
///
/// # Errors
///
/// Returns an error if the collection, the layout's topology or its style is
/// invalid. Nothing is drawn or cleared in that case.
pub fn render_pose<C: Canvas + ?Sized>(
    canvas: &mut C,
    keypoints: ArrayView3<'_, f32>,
    layout: SkeletonLayout,
    render_threshold: f32,
    blend_original_frame: bool,
) -> Result<RenderSummary> {
    if !layout.is_body() {
        warn!("render_pose called with non-body layout {layout}");
    }

    let topology = Topology::for_layout(layout);
    let style = StyleConfig::pose(&topology).with_threshold(render_threshold);
    let background = (!blend_original_frame).then_some(Color::BLACK);
    AdaptiveRenderer::new(&topology, &style).render_over(canvas, keypoints, background)
}

/// Draw 70-point face keypoints with the face style.
///
/// # Errors
///
/// Returns an error if `keypoints` is malformed or has fewer than 70 points per face.
pub fn render_face<C: Canvas + ?Sized>(
    canvas: &mut C,
    keypoints: ArrayView3<'_, f32>,
    render_threshold: f32,
) -> Result<RenderSummary> {
    let topology = Topology::for_layout(SkeletonLayout::Face70);
    let style = StyleConfig::face().with_threshold(render_threshold);
    AdaptiveRenderer::new(&topology, &style).render(canvas, keypoints)
}

/// Draw left and right hand keypoints with the hand style.
///
/// Both collections are validated before either is drawn, then the left hands are
/// drawn followed by the right hands.
///
/// # Errors
///
/// Returns an error if either collection is malformed or has fewer than 21 points
/// per hand.
pub fn render_hands<C: Canvas + ?Sized>(
    canvas: &mut C,
    hands: [ArrayView3<'_, f32>; 2],
    render_threshold: f32,
) -> Result<RenderSummary> {
    let topology = Topology::for_layout(SkeletonLayout::Hand21);
    let style = StyleConfig::hand(&topology).with_threshold(render_threshold);
    let renderer = AdaptiveRenderer::new(&topology, &style);
    for hand in &hands {
        renderer.validate(hand)?;
    }
    if canvas.is_empty_frame() {
        verbose!("{}: empty frame, nothing to draw", SkeletonLayout::Hand21);
        return Ok(RenderSummary::default());
    }

    let mut summary = RenderSummary::default();
    for hand in &hands {
        summary += renderer.draw(canvas, hand);
    }
    Ok(summary)
}

#[cfg(feature = "annotate")]
pub use self::image_overlay::{Overlay, annotate_buffer, annotate_image};

#[cfg(feature = "annotate")]
mod image_overlay {
    use image::{DynamicImage, RgbImage};
    use ndarray::ArrayView3;

    use super::{render_face, render_hands, render_pose};
    use crate::config::DEFAULT_RENDER_THRESHOLD;
    use crate::error::{OverlayError, Result};
    use crate::layout::SkeletonLayout;
    use crate::visualizer::renderer::RenderSummary;

    /// Keypoints to draw onto one frame.
    ///
    /// Regions are drawn in order body, face, hands.
    #[derive(Debug, Clone)]
    pub struct Overlay<'a> {
        /// Body keypoints and their layout.
        pub pose: Option<(ArrayView3<'a, f32>, SkeletonLayout)>,
        /// 70-point face keypoints.
        pub face: Option<ArrayView3<'a, f32>>,
        /// Left and right hand keypoints.
        pub hands: Option<[ArrayView3<'a, f32>; 2]>,
        /// Confidence threshold for every region.
        pub render_threshold: f32,
        /// Keep the original frame under the body skeleton.
        pub blend_original_frame: bool,
    }

    impl Default for Overlay<'_> {
        fn default() -> Self {
            Self {
                pose: None,
                face: None,
                hands: None,
                render_threshold: DEFAULT_RENDER_THRESHOLD,
                blend_original_frame: true,
            }
        }
    }

    impl<'a> Overlay<'a> {
        /// Create an empty overlay.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Set the body keypoints.
        #[must_use]
        pub fn with_pose(mut self, keypoints: ArrayView3<'a, f32>, layout: SkeletonLayout) -> Self {
            self.pose = Some((keypoints, layout));
            self
        }

        /// Set the face keypoints.
        #[must_use]
        pub fn with_face(mut self, keypoints: ArrayView3<'a, f32>) -> Self {
            self.face = Some(keypoints);
            self
        }

        /// Set the left and right hand keypoints.
        #[must_use]
        pub fn with_hands(mut self, left: ArrayView3<'a, f32>, right: ArrayView3<'a, f32>) -> Self {
            self.hands = Some([left, right]);
            self
        }

        /// Set the render threshold.
        #[must_use]
        pub fn with_threshold(mut self, threshold: f32) -> Self {
            self.render_threshold = threshold;
            self
        }

        /// Keep (`true`) or black out (`false`) the original frame.
        #[must_use]
        pub fn with_blend(mut self, blend: bool) -> Self {
            self.blend_original_frame = blend;
            self
        }

        fn draw(&self, img: &mut RgbImage) -> Result<RenderSummary> {
            let mut summary = RenderSummary::default();
            if let Some((keypoints, layout)) = &self.pose {
                summary += render_pose(
                    img,
                    keypoints.view(),
                    *layout,
                    self.render_threshold,
                    self.blend_original_frame,
                )?;
            }
            if let Some(keypoints) = &self.face {
                summary += render_face(img, keypoints.view(), self.render_threshold)?;
            }
            if let Some([left, right]) = &self.hands {
                summary += render_hands(img, [left.view(), right.view()], self.render_threshold)?;
            }
            Ok(summary)
        }
    }

    /// Annotate a copy of `image` with every region of `overlay`.
    ///
    /// # Errors
    ///
    /// Returns an error if any region fails validation. The input image is never
    /// modified.
    pub fn annotate_image(image: &DynamicImage, overlay: &Overlay<'_>) -> Result<DynamicImage> {
        let mut img = image.to_rgb8();
        overlay.draw(&mut img)?;
        Ok(DynamicImage::ImageRgb8(img))
    }

    /// Annotate a packed RGB8 frame in place.
    ///
    /// `buffer` must hold exactly `width * height * 3` bytes. It is only written back
    /// when every region succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ImageError`] if the buffer length does not match the
    /// dimensions, or the first region error otherwise.
    pub fn annotate_buffer(
        buffer: &mut [u8],
        width: u32,
        height: u32,
        overlay: &Overlay<'_>,
    ) -> Result<RenderSummary> {
        let mismatch = || {
            OverlayError::ImageError(format!(
                "buffer of {} bytes does not hold a {width}x{height} RGB frame",
                buffer.len()
            ))
        };
        if buffer.len() != width as usize * height as usize * 3 {
            return Err(mismatch());
        }
        let mut img = RgbImage::from_raw(width, height, buffer.to_vec()).ok_or_else(mismatch)?;
        let summary = overlay.draw(&mut img)?;
        buffer.copy_from_slice(img.as_raw());
        Ok(summary)
    }
}
