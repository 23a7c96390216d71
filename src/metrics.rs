// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-detection geometry and confidence statistics.
//!
//! All functions are pure reads over `(num_points, 3)` detection views or
//! `(num_detections, num_points, 3)` collections. Degenerate inputs are not errors:
//! they produce sentinels that callers check explicitly.
//!
//! | Condition | Sentinel |
//! |-----------|----------|
//! | No visible point | [`Rectangle::default()`] (zero area at the origin) |
//! | Absent endpoint in [`distance`] | `0.0` |
//! | Nothing to compare in [`average_distance`] | `None` |
//! | No detection with positive area in [`best_detection`] | `None` |

use ndarray::{ArrayView2, ArrayView3, Axis};

use crate::keypoints::{self, SCORE, X, Y};
use crate::rectangle::Rectangle;

pub use crate::rectangle::overlap_ratio;

/// Euclidean distance between two points of one detection.
///
/// Returns `0.0` when either index is out of range or either point is absent
/// (confidence `<= 0`).
#[must_use]
pub fn distance(detection: &ArrayView2<'_, f32>, part_a: usize, part_b: usize) -> f32 {
    let n = detection.nrows();
    if part_a >= n || part_b >= n {
        return 0.0;
    }
    let (a, b) = (detection.row(part_a), detection.row(part_b));
    if a[SCORE] <= 0.0 || b[SCORE] <= 0.0 {
        return 0.0;
    }
    (a[X] - b[X]).hypot(a[Y] - b[Y])
}

/// Axis-aligned rectangle around every point with confidence above `threshold`.
#[must_use]
pub fn bounding_rectangle(detection: &ArrayView2<'_, f32>, threshold: f32) -> Rectangle {
    bounding_rectangle_range(detection, threshold, 0, None)
}

/// [`bounding_rectangle`] restricted to points `first..last` (`last = None` means all).
///
/// The range is clamped to the detection. An empty range, or one with no visible
/// point, yields [`Rectangle::default()`].
#[must_use]
pub fn bounding_rectangle_range(
    detection: &ArrayView2<'_, f32>,
    threshold: f32,
    first: usize,
    last: Option<usize>,
) -> Rectangle {
    let n = detection.nrows();
    let last = last.map_or(n, |l| l.min(n));
    if first >= last {
        return Rectangle::default();
    }

    let mut bounds: Option<[f32; 4]> = None;
    for point in detection.slice(ndarray::s![first..last, ..]).outer_iter() {
        if point[SCORE] > threshold {
            let (x, y) = (point[X], point[Y]);
            bounds = Some(match bounds {
                None => [x, y, x, y],
                Some([x1, y1, x2, y2]) => [x1.min(x), y1.min(y), x2.max(x), y2.max(y)],
            });
        }
    }

    bounds.map_or_else(Rectangle::default, Rectangle::from_xyxy)
}

/// Mean confidence over all points, absent points included.
///
/// A detection with no points has an average of `0.0`.
#[must_use]
pub fn average_confidence(detection: &ArrayView2<'_, f32>) -> f32 {
    detection.column(SCORE).mean().unwrap_or(0.0)
}

/// Number of points with confidence above `threshold`.
#[must_use]
pub fn non_zero_count(detection: &ArrayView2<'_, f32>, threshold: f32) -> usize {
    detection.column(SCORE).iter().filter(|&&s| s > threshold).count()
}

/// Area of the [`bounding_rectangle`].
#[must_use]
pub fn area(detection: &ArrayView2<'_, f32>, threshold: f32) -> f32 {
    bounding_rectangle(detection, threshold).area()
}

/// Index of the detection with the largest [`area`].
///
/// Ties go to the first index. Returns `None` if the collection is empty or every
/// area is zero.
#[must_use]
pub fn best_detection(keypoints: &ArrayView3<'_, f32>, threshold: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, detection) in keypoints.axis_iter(Axis(0)).enumerate() {
        let candidate = area(&detection, threshold);
        if candidate > best.map_or(0.0, |(_, a)| a) {
            best = Some((index, candidate));
        }
    }
    best.map(|(index, _)| index)
}

/// IoU of the bounding rectangles of detection `index_a` in `keypoints_a` and
/// detection `index_b` in `keypoints_b`.
///
/// Returns `0.0` if either index is out of range.
#[must_use]
pub fn overlap_ratio_between(
    keypoints_a: &ArrayView3<'_, f32>,
    index_a: usize,
    keypoints_b: &ArrayView3<'_, f32>,
    index_b: usize,
    threshold: f32,
) -> f32 {
    match (
        keypoints::detection(keypoints_a.view(), index_a),
        keypoints::detection(keypoints_b.view(), index_b),
    ) {
        (Some(a), Some(b)) => overlap_ratio(
            &bounding_rectangle(&a, threshold),
            &bounding_rectangle(&b, threshold),
        ),
        _ => 0.0,
    }
}

/// Mean distance between index-matched points of two detections in one collection.
///
/// Only points visible (confidence above `threshold`) in both detections count.
/// Returns `None` when there is nothing to compare.
#[must_use]
pub fn average_distance(
    keypoints: &ArrayView3<'_, f32>,
    index_a: usize,
    index_b: usize,
    threshold: f32,
) -> Option<f32> {
    average_distance_between(keypoints, index_a, keypoints, index_b, threshold)
}

/// [`average_distance`] across two collections.
///
/// Collections with different point counts are compared over their common prefix.
#[must_use]
pub fn average_distance_between(
    keypoints_a: &ArrayView3<'_, f32>,
    index_a: usize,
    keypoints_b: &ArrayView3<'_, f32>,
    index_b: usize,
    threshold: f32,
) -> Option<f32> {
    let a = keypoints::detection(keypoints_a.view(), index_a)?;
    let b = keypoints::detection(keypoints_b.view(), index_b)?;

    let (sum, count) = a
        .outer_iter()
        .zip(b.outer_iter())
        .filter(|(pa, pb)| pa[SCORE] > threshold && pb[SCORE] > threshold)
        .fold((0.0_f32, 0_usize), |(sum, count), (pa, pb)| {
            (sum + (pa[X] - pb[X]).hypot(pa[Y] - pb[Y]), count + 1)
        });

    (count > 0).then(|| sum / count as f32)
}
