// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topologies: which points connect into drawn segments.

use std::borrow::Cow;

use crate::error::{OverlayError, Result};
use crate::layout::SkeletonLayout;

/// `BODY_25` render pairs (also used by the 25D/25E variants).
pub static BODY_25_PAIRS: [[usize; 2]; 24] = [
    [1, 8],   // neck to mid hip
    [1, 2],   // neck to right shoulder
    [1, 5],   // neck to left shoulder
    [2, 3],   // right shoulder to right elbow
    [3, 4],   // right elbow to right wrist
    [5, 6],   // left shoulder to left elbow
    [6, 7],   // left elbow to left wrist
    [8, 9],   // mid hip to right hip
    [9, 10],  // right hip to right knee
    [10, 11], // right knee to right ankle
    [8, 12],  // mid hip to left hip
    [12, 13], // left hip to left knee
    [13, 14], // left knee to left ankle
    [1, 0],   // neck to nose
    [0, 15],  // nose to right eye
    [15, 17], // right eye to right ear
    [0, 16],  // nose to left eye
    [16, 18], // left eye to left ear
    [14, 19], // left ankle to left big toe
    [19, 20], // left big toe to left small toe
    [14, 21], // left ankle to left heel
    [11, 22], // right ankle to right big toe
    [22, 23], // right big toe to right small toe
    [11, 24], // right ankle to right heel
];

/// `COCO_18` render pairs.
pub static COCO_18_PAIRS: [[usize; 2]; 17] = [
    [1, 2],   // neck to right shoulder
    [1, 5],   // neck to left shoulder
    [2, 3],   // right shoulder to right elbow
    [3, 4],   // right elbow to right wrist
    [5, 6],   // left shoulder to left elbow
    [6, 7],   // left elbow to left wrist
    [1, 8],   // neck to right hip
    [8, 9],   // right hip to right knee
    [9, 10],  // right knee to right ankle
    [1, 11],  // neck to left hip
    [11, 12], // left hip to left knee
    [12, 13], // left knee to left ankle
    [1, 0],   // neck to nose
    [0, 14],  // nose to right eye
    [14, 16], // right eye to right ear
    [0, 15],  // nose to left eye
    [15, 17], // left eye to left ear
];

/// `BODY_23` render pairs.
pub static BODY_23_PAIRS: [[usize; 2]; 24] = [
    [0, 1],   // nose to right shoulder
    [0, 4],   // nose to left shoulder
    [1, 4],   // right shoulder to left shoulder
    [1, 2],   // right shoulder to right elbow
    [2, 3],   // right elbow to right wrist
    [4, 5],   // left shoulder to left elbow
    [5, 6],   // left elbow to left wrist
    [1, 7],   // right shoulder to right hip
    [4, 10],  // left shoulder to left hip
    [7, 10],  // right hip to left hip
    [7, 8],   // right hip to right knee
    [8, 9],   // right knee to right ankle
    [10, 11], // left hip to left knee
    [11, 12], // left knee to left ankle
    [0, 13],  // nose to right eye
    [0, 14],  // nose to left eye
    [13, 15], // right eye to right ear
    [14, 16], // left eye to left ear
    [12, 17], // left ankle to left big toe
    [17, 18], // left big toe to left small toe
    [12, 19], // left ankle to left heel
    [9, 20],  // right ankle to right big toe
    [20, 21], // right big toe to right small toe
    [9, 22],  // right ankle to right heel
];

/// `MPI_15` render pairs.
pub static MPI_15_PAIRS: [[usize; 2]; 14] = [
    [0, 1],   // head to neck
    [1, 2],   // neck to right shoulder
    [2, 3],   // right shoulder to right elbow
    [3, 4],   // right elbow to right wrist
    [1, 5],   // neck to left shoulder
    [5, 6],   // left shoulder to left elbow
    [6, 7],   // left elbow to left wrist
    [1, 14],  // neck to chest
    [14, 8],  // chest to right hip
    [8, 9],   // right hip to right knee
    [9, 10],  // right knee to right ankle
    [14, 11], // chest to left hip
    [11, 12], // left hip to left knee
    [12, 13], // left knee to left ankle
];

/// 70-point face render pairs: jaw, brows, nose, closed eye and lip contours.
/// Pupils (68, 69) have no segments.
#[rustfmt::skip]
pub static FACE_70_PAIRS: [[usize; 2]; 63] = [
    [0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 6], [6, 7], [7, 8],
    [8, 9], [9, 10], [10, 11], [11, 12], [12, 13], [13, 14], [14, 15], [15, 16],
    [17, 18], [18, 19], [19, 20], [20, 21], [22, 23], [23, 24], [24, 25], [25, 26],
    [27, 28], [28, 29], [29, 30], [31, 32], [32, 33], [33, 34], [34, 35], [36, 37],
    [37, 38], [38, 39], [39, 40], [40, 41], [41, 36], [42, 43], [43, 44], [44, 45],
    [45, 46], [46, 47], [47, 42], [48, 49], [49, 50], [50, 51], [51, 52], [52, 53],
    [53, 54], [54, 55], [55, 56], [56, 57], [57, 58], [58, 59], [59, 48], [60, 61],
    [61, 62], [62, 63], [63, 64], [64, 65], [65, 66], [66, 67], [67, 60],
];

/// 21-point hand render pairs: wrist (0) to each knuckle, then along each finger.
#[rustfmt::skip]
pub static HAND_21_PAIRS: [[usize; 2]; 20] = [
    [0, 1], [1, 2], [2, 3], [3, 4],       // thumb
    [0, 5], [5, 6], [6, 7], [7, 8],       // index
    [0, 9], [9, 10], [10, 11], [11, 12],  // middle
    [0, 13], [13, 14], [14, 15], [15, 16], // ring
    [0, 17], [17, 18], [18, 19], [19, 20], // little
];

/// One hint shared by every point.
static UNIT_SCALE: [f32; 1] = [1.0];

/// Connected-point graph of a skeleton layout.
///
/// `scale_hints` normalizes circle size across point classes. It holds either one entry
/// per point or a single entry shared by every point.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    layout: SkeletonLayout,
    pairs: Cow<'static, [[usize; 2]]>,
    scale_hints: Cow<'static, [f32]>,
}

impl Topology {
    /// Create a topology from caller-supplied pairs and scale hints.
    #[must_use]
    pub fn new(layout: SkeletonLayout, pairs: Vec<[usize; 2]>, scale_hints: Vec<f32>) -> Self {
        Self {
            layout,
            pairs: Cow::Owned(pairs),
            scale_hints: Cow::Owned(scale_hints),
        }
    }

    /// Built-in topology for a layout, with unit scale hints.
    #[must_use]
    pub fn for_layout(layout: SkeletonLayout) -> Self {
        let pairs: &'static [[usize; 2]] = match layout {
            SkeletonLayout::Body25
            | SkeletonLayout::Body25D
            | SkeletonLayout::Body25E
            | SkeletonLayout::Body25NoFace => &BODY_25_PAIRS,
            SkeletonLayout::Coco18 => &COCO_18_PAIRS,
            SkeletonLayout::Body19
            | SkeletonLayout::Body19E
            | SkeletonLayout::Body19N
            | SkeletonLayout::Body19X2 => &BODY_25_PAIRS[..18],
            SkeletonLayout::Body23 => &BODY_23_PAIRS,
            SkeletonLayout::Mpi15 => &MPI_15_PAIRS,
            SkeletonLayout::Face70 => &FACE_70_PAIRS,
            SkeletonLayout::Hand21 => &HAND_21_PAIRS,
        };

        Self {
            layout,
            pairs: Cow::Borrowed(pairs),
            scale_hints: Cow::Borrowed(&UNIT_SCALE),
        }
    }

    /// Replace the per-point scale hints.
    #[must_use]
    pub fn with_scale_hints(mut self, scale_hints: Vec<f32>) -> Self {
        self.scale_hints = Cow::Owned(scale_hints);
        self
    }

    /// Layout whose semantic tables apply.
    #[must_use]
    pub const fn layout(&self) -> SkeletonLayout {
        self.layout
    }

    /// Connected point pairs.
    #[must_use]
    pub fn pairs(&self) -> &[[usize; 2]] {
        &self.pairs
    }

    /// Number of segments.
    #[must_use]
    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Per-point relative scale hints.
    #[must_use]
    pub fn scale_hints(&self) -> &[f32] {
        &self.scale_hints
    }

    /// Scale hint of a point.
    ///
    /// A single-entry table applies to every point. Points without a hint get 1.0.
    #[must_use]
    pub fn scale_hint(&self, point: usize) -> f32 {
        match &*self.scale_hints {
            [hint] => *hint,
            hints => hints.get(point).copied().unwrap_or(1.0),
        }
    }

    /// Check the topology against a collection with `num_points` points per detection.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::TopologyError`] if a pair references a point outside
    /// `0..num_points`, the scale hints are negative or non-finite, or there is neither
    /// one shared hint nor one hint per point.
    pub fn validate(&self, num_points: usize) -> Result<()> {
        let hints = self.scale_hints.len();
        if hints != 1 && hints != num_points {
            return Err(OverlayError::TopologyError(format!(
                "{hints} scale hints for {num_points} points of {}",
                self.layout
            )));
        }
        if let Some((i, hint)) = self
            .scale_hints
            .iter()
            .enumerate()
            .find(|(_, h)| !h.is_finite() || **h < 0.0)
        {
            return Err(OverlayError::TopologyError(format!(
                "scale hint {i} is {hint}, expected a finite non-negative value"
            )));
        }
        if let Some((i, pair)) = self
            .pairs
            .iter()
            .enumerate()
            .find(|(_, pair)| pair[0] >= num_points || pair[1] >= num_points)
        {
            return Err(OverlayError::TopologyError(format!(
                "pair {i} ({}, {}) references a point outside 0..{num_points}",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }
}
