// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint collections and per-detection access.
//!
//! A keypoint collection is an [`Array3<f32>`] indexed as
//! `(detection, point, channel)` with channels `[x, y, confidence]`, the same layout
//! pose post-processing produces. The collection is owned by the caller; rendering only
//! reads it.

use ndarray::{Array3, ArrayView2, ArrayView3, ArrayViewMut2, Axis, CowArray, Ix3, s};

use crate::error::{OverlayError, Result};

/// Channel holding the x coordinate.
pub const X: usize = 0;
/// Channel holding the y coordinate.
pub const Y: usize = 1;
/// Channel holding the confidence score.
pub const SCORE: usize = 2;
/// Number of channels per point.
pub const CHANNELS: usize = 3;

/// Minimum confidence gain for [`merge_detection`] to replace a point.
pub const MERGE_MARGIN: f32 = 0.05;

/// Number of detections in a collection.
#[must_use]
pub fn num_detections(keypoints: &ArrayView3<'_, f32>) -> usize {
    keypoints.shape()[0]
}

/// Number of points per detection in a collection.
#[must_use]
pub fn num_points(keypoints: &ArrayView3<'_, f32>) -> usize {
    keypoints.shape()[1]
}

/// Check that a collection has `[x, y, confidence]` channels and only finite values.
///
/// # Errors
///
/// Returns [`OverlayError::KeypointError`] on a wrong channel count or a NaN/infinite value.
pub fn validate(keypoints: &ArrayView3<'_, f32>) -> Result<()> {
    let channels = keypoints.shape()[2];
    if channels != CHANNELS {
        return Err(OverlayError::KeypointError(format!(
            "expected {CHANNELS} channels (x, y, confidence), got {channels}"
        )));
    }

    if let Some(((det, point, channel), value)) =
        keypoints.indexed_iter().find(|(_, v)| !v.is_finite())
    {
        return Err(OverlayError::KeypointError(format!(
            "non-finite value {value} at detection {det}, point {point}, channel {channel}"
        )));
    }

    Ok(())
}

/// Borrow a single detection as a `(points, channels)` view.
///
/// Returns `None` if `index` is out of range.
#[must_use]
pub fn detection<'a>(keypoints: ArrayView3<'a, f32>, index: usize) -> Option<ArrayView2<'a, f32>> {
    if index < keypoints.shape()[0] {
        Some(keypoints.index_axis_move(Axis(0), index))
    } else {
        None
    }
}

/// Extract one detection as a collection of shape `(1, points, channels)`.
///
/// With `share_storage == false` (the safe default) the result is an independent copy.
/// With `share_storage == true` the result borrows the source buffer without copying:
/// it cannot outlive `keypoints`, and the source cannot be resized or mutated while the
/// view is alive. Use [`detection_mut`] when edits should land in the source.
///
/// Returns `None` if `index` is out of range.
#[must_use]
pub fn extract_detection(
    keypoints: &Array3<f32>,
    index: usize,
    share_storage: bool,
) -> Option<CowArray<'_, f32, Ix3>> {
    if index >= keypoints.shape()[0] {
        return None;
    }

    let slice = keypoints.slice(s![index..=index, .., ..]);
    if share_storage {
        Some(CowArray::from(slice))
    } else {
        Some(CowArray::from(slice.to_owned()))
    }
}

/// Mutable view of one detection sharing the source storage.
///
/// Every write through the view changes `keypoints`. Returns `None` if `index` is out
/// of range.
#[must_use]
pub fn detection_mut(keypoints: &mut Array3<f32>, index: usize) -> Option<ArrayViewMut2<'_, f32>> {
    if index < keypoints.shape()[0] {
        Some(keypoints.index_axis_mut(Axis(0), index))
    } else {
        None
    }
}

/// Scale x and y of every point by `scale`. Confidences are untouched.
#[allow(clippy::float_cmp)]
pub fn scale_keypoints(keypoints: &mut Array3<f32>, scale: f32) {
    if scale != 1.0 {
        keypoints
            .slice_mut(s![.., .., X..=Y])
            .mapv_inplace(|v| v * scale);
    }
}

/// Map every point to `(x * scale_x + offset_x, y * scale_y + offset_y)`.
pub fn scale_keypoints_2d(
    keypoints: &mut Array3<f32>,
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
) {
    keypoints
        .slice_mut(s![.., .., X])
        .mapv_inplace(|v| v.mul_add(scale_x, offset_x));
    keypoints
        .slice_mut(s![.., .., Y])
        .mapv_inplace(|v| v.mul_add(scale_y, offset_y));
}

/// Merge a single detection into `keypoints[index]`, point by point.
///
/// A point of `source` replaces the target point when its confidence is higher by more
/// than [`MERGE_MARGIN`]; otherwise the target point is kept.
///
/// # Errors
///
/// Returns [`OverlayError::KeypointError`] if `index` is out of range or the point and
/// channel counts of `source` differ from the collection's.
pub fn merge_detection(
    keypoints: &mut Array3<f32>,
    index: usize,
    source: ArrayView2<'_, f32>,
) -> Result<()> {
    let (count, points, channels) = keypoints.dim();
    if source.dim() != (points, channels) {
        return Err(OverlayError::KeypointError(format!(
            "cannot merge detection of shape {:?} into collection of shape {:?}",
            source.shape(),
            keypoints.shape()
        )));
    }
    let mut target = detection_mut(keypoints, index).ok_or_else(|| {
        OverlayError::KeypointError(format!(
            "detection index {index} out of range for {count} detections"
        ))
    })?;

    for (mut point, candidate) in target.outer_iter_mut().zip(source.outer_iter()) {
        if candidate[SCORE] - point[SCORE] > MERGE_MARGIN {
            point.assign(&candidate);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Array3<f32> {
        array![
            [[10.0, 20.0, 0.9], [30.0, 40.0, 0.8]],
            [[50.0, 60.0, 0.7], [70.0, 80.0, 0.0]],
        ]
    }

    #[test]
    fn test_validate_channels() {
        let ok = sample();
        assert!(validate(&ok.view()).is_ok());

        let two_channels = Array3::<f32>::zeros((1, 4, 2));
        assert!(matches!(
            validate(&two_channels.view()),
            Err(OverlayError::KeypointError(_))
        ));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut kpts = sample();
        kpts[[1, 0, X]] = f32::NAN;
        let err = validate(&kpts.view()).unwrap_err();
        assert!(err.to_string().contains("detection 1, point 0, channel 0"));
    }

    #[test]
    fn test_detection_view() {
        let kpts = sample();
        let det = detection(kpts.view(), 1).unwrap();
        assert_eq!(det.shape(), &[2, 3]);
        assert!((det[[0, X]] - 50.0).abs() < f32::EPSILON);
        assert!(detection(kpts.view(), 2).is_none());
    }

    #[test]
    fn test_extract_detection_copy() {
        let kpts = sample();
        let copy = extract_detection(&kpts, 0, false).unwrap();
        assert_eq!(copy.shape(), &[1, 2, 3]);
        assert!(copy.is_owned());
        assert!((copy[[0, 1, Y]] - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_extract_detection_shared() {
        let kpts = sample();
        let shared = extract_detection(&kpts, 1, true).unwrap();
        assert!(shared.is_view());
        assert_eq!(shared.as_ptr(), std::ptr::addr_of!(kpts[[1, 0, 0]]));
        assert!(extract_detection(&kpts, 5, true).is_none());
    }

    #[test]
    fn test_detection_mut_aliases_source() {
        let mut kpts = sample();
        {
            let mut view = detection_mut(&mut kpts, 0).unwrap();
            view[[1, X]] = 99.0;
        }
        assert!((kpts[[0, 1, X]] - 99.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scale_keypoints() {
        let mut kpts = sample();
        scale_keypoints(&mut kpts, 2.0);
        assert!((kpts[[0, 0, X]] - 20.0).abs() < f32::EPSILON);
        assert!((kpts[[0, 0, Y]] - 40.0).abs() < f32::EPSILON);
        assert!((kpts[[0, 0, SCORE]] - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scale_keypoints_2d() {
        let mut kpts = sample();
        scale_keypoints_2d(&mut kpts, 0.5, 2.0, 1.0, -10.0);
        assert!((kpts[[1, 0, X]] - 26.0).abs() < 1e-5);
        assert!((kpts[[1, 0, Y]] - 110.0).abs() < 1e-5);
        assert!((kpts[[1, 0, SCORE]] - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_merge_detection() {
        let mut kpts = sample();
        let source = array![[1.0, 2.0, 0.92], [3.0, 4.0, 0.95]];
        merge_detection(&mut kpts, 0, source.view()).unwrap();

        // 0.92 - 0.9 is within the margin, point kept
        assert!((kpts[[0, 0, X]] - 10.0).abs() < f32::EPSILON);
        // 0.95 - 0.8 exceeds the margin, point replaced
        assert!((kpts[[0, 1, X]] - 3.0).abs() < f32::EPSILON);
        assert!((kpts[[0, 1, SCORE]] - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn test_merge_detection_shape_mismatch() {
        let mut kpts = sample();
        let source = array![[1.0, 2.0, 0.9]];
        assert!(merge_detection(&mut kpts, 0, source.view()).is_err());

        let source = array![[1.0, 2.0, 0.9], [3.0, 4.0, 0.9]];
        assert!(merge_detection(&mut kpts, 7, source.view()).is_err());
    }
}
