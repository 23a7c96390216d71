// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Dash/gap decomposition of line segments.
//!
//! Runs are measured along the segment, starting with a dash at the first endpoint.
//! Every segment restarts the pattern, so dash phase is not carried across segments.

use super::canvas::Point;
use crate::rectangle::Rectangle;

/// One stretch of a dashed segment, as distances from the first endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    /// Distance where the run starts.
    pub start: f32,
    /// Distance where the run ends (never past the segment length).
    pub end: f32,
    /// Whether the run is drawn (dash) or skipped (gap).
    pub draw: bool,
}

impl Run {
    /// Length of the run.
    #[must_use]
    pub fn len(&self) -> f32 {
        self.end - self.start
    }

    /// Whether the run has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

/// Alternating dash/gap pattern in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    dash_len: f32,
    gap_len: f32,
}

impl DashPattern {
    /// Create a pattern. Returns `None` (solid line) if either length is zero.
    #[must_use]
    pub fn new(dash_len_px: u32, gap_len_px: u32) -> Option<Self> {
        (dash_len_px > 0 && gap_len_px > 0).then(|| Self {
            dash_len: dash_len_px as f32,
            gap_len: gap_len_px as f32,
        })
    }

    /// Dash length in pixels.
    #[must_use]
    pub const fn dash_len(&self) -> f32 {
        self.dash_len
    }

    /// Gap length in pixels.
    #[must_use]
    pub const fn gap_len(&self) -> f32 {
        self.gap_len
    }

    /// Split a segment of `length` pixels into alternating draw/skip runs.
    ///
    /// The last run is truncated to the remaining length.
    pub fn runs(&self, length: f32) -> impl Iterator<Item = Run> {
        self.spans(0.0, f64::from(length)).map(|(start, end, draw)| Run {
            start: start as f32,
            end: end as f32,
            draw,
        })
    }

    /// Runs of the pattern anchored at 0, cut to the window `from..to`.
    ///
    /// Run `k` of the pattern is placed from its index, so positions do not drift on
    /// long segments and only the runs overlapping the window are produced.
    #[allow(clippy::cast_sign_loss)]
    fn spans(&self, from: f64, to: f64) -> impl Iterator<Item = (f64, f64, bool)> {
        let dash = f64::from(self.dash_len);
        let period = dash + f64::from(self.gap_len);
        let from = from.max(0.0);
        let (first, last) = if to > from {
            ((from / period).floor() as u64, (to / period).ceil() as u64)
        } else {
            (0, 0)
        };

        (first..last)
            .flat_map(move |k| {
                let start = k as f64 * period;
                [(start, start + dash, true), (start + dash, start + period, false)]
            })
            .filter_map(move |(start, end, draw)| {
                let (start, end) = (start.max(from), end.min(to));
                (start < end).then_some((start, end, draw))
            })
    }

    /// Sub-segments to stroke for the segment `p1 -> p2`.
    ///
    /// A zero-length segment yields nothing.
    #[must_use]
    pub fn dashes(&self, p1: Point, p2: Point) -> Vec<(Point, Point)> {
        self.dashes_in(p1, p2, None)
    }

    /// Like [`dashes`](Self::dashes), keeping only what lies inside `bounds`.
    ///
    /// The pattern stays anchored at `p1` even when `p1` itself is outside.
    #[must_use]
    pub fn dashes_within(&self, p1: Point, p2: Point, bounds: &Rectangle) -> Vec<(Point, Point)> {
        self.dashes_in(p1, p2, Some(bounds))
    }

    fn dashes_in(&self, p1: Point, p2: Point, bounds: Option<&Rectangle>) -> Vec<(Point, Point)> {
        let (x0, y0) = (f64::from(p1.0), f64::from(p1.1));
        let (dx, dy) = (f64::from(p2.0) - x0, f64::from(p2.1) - y0);
        let length = dx.hypot(dy);
        if length <= 0.0 {
            return Vec::new();
        }
        let (t0, t1) = match bounds {
            Some(bounds) => match clip_segment(p1, p2, bounds) {
                Some(range) => range,
                None => return Vec::new(),
            },
            None => (0.0, 1.0),
        };
        let at = |d: f64| {
            let t = d / length;
            (dx.mul_add(t, x0) as f32, dy.mul_add(t, y0) as f32)
        };

        self.spans(t0 * length, t1 * length)
            .filter(|&(_, _, draw)| draw)
            .map(|(start, end, _)| (at(start), at(end)))
            .collect()
    }
}

/// Parameter range `t0..=t1` of `p1 + t (p2 - p1)` lying inside `bounds`.
///
/// Returns `None` when the segment misses the rectangle.
#[must_use]
pub fn clip_segment(p1: Point, p2: Point, bounds: &Rectangle) -> Option<(f64, f64)> {
    let (x0, y0) = (f64::from(p1.0), f64::from(p1.1));
    let (dx, dy) = (f64::from(p2.0) - x0, f64::from(p2.1) - y0);
    let (left, top) = (f64::from(bounds.x), f64::from(bounds.y));
    let (right, bottom) = (f64::from(bounds.right()), f64::from(bounds.bottom()));

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - left), (dx, right - x0), (-dy, y0 - top), (dy, bottom - y0)] {
        if p.abs() < f64::EPSILON {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_when_either_length_zero() {
        assert!(DashPattern::new(0, 6).is_none());
        assert!(DashPattern::new(6, 0).is_none());
        assert!(DashPattern::new(0, 0).is_none());
        assert!(DashPattern::new(3, 3).is_some());
    }

    #[test]
    fn test_runs_20px_dash_6_gap_6() {
        let pattern = DashPattern::new(6, 6).unwrap();
        let runs: Vec<Run> = pattern.runs(20.0).collect();

        let lens: Vec<f32> = runs.iter().map(Run::len).collect();
        assert_eq!(lens, vec![6.0, 6.0, 6.0, 2.0]);
        assert_eq!(
            runs.iter().map(|r| r.draw).collect::<Vec<_>>(),
            vec![true, false, true, false]
        );

        let drawn: Vec<&Run> = runs.iter().filter(|r| r.draw).collect();
        assert_eq!(drawn.len(), 2);
        assert!(drawn.iter().all(|r| (r.len() - 6.0).abs() < f32::EPSILON));
        assert!((runs.last().unwrap().end - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_dash_truncated() {
        let pattern = DashPattern::new(6, 6).unwrap();
        let runs: Vec<Run> = pattern.runs(15.0).collect();
        let last = runs.last().unwrap();
        assert!(last.draw);
        assert!((last.len() - 3.0).abs() < f32::EPSILON);
        assert!((last.end - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dashes_follow_segment_direction() {
        let pattern = DashPattern::new(3, 3).unwrap();
        // 3-4-5 triangle, length 10
        let dashes = pattern.dashes((0.0, 0.0), (6.0, 8.0));
        assert_eq!(dashes.len(), 2);

        let ((x0, y0), (x1, y1)) = dashes[0];
        assert!(x0.abs() < 1e-5 && y0.abs() < 1e-5);
        assert!((x1 - 1.8).abs() < 1e-5 && (y1 - 2.4).abs() < 1e-5);

        let ((x2, y2), _) = dashes[1];
        assert!((x2 - 3.6).abs() < 1e-5 && (y2 - 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_dash_phase_starts_at_first_endpoint() {
        let pattern = DashPattern::new(6, 6).unwrap();
        let forward = pattern.dashes((0.0, 0.0), (20.0, 0.0));
        let backward = pattern.dashes((20.0, 0.0), (0.0, 0.0));
        assert!((forward[0].0 .0 - 0.0).abs() < f32::EPSILON);
        assert!((backward[0].0 .0 - 20.0).abs() < f32::EPSILON);
        assert!((backward[1].1 .0 - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_length_segment() {
        let pattern = DashPattern::new(6, 6).unwrap();
        assert_eq!(pattern.runs(0.0).count(), 0);
        assert!(pattern.dashes((5.0, 5.0), (5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_long_segment_run_count_is_exact() {
        let pattern = DashPattern::new(6, 6).unwrap();
        // 1e8 = 8_333_333 periods of 12 px plus a 4 px dash
        assert_eq!(pattern.runs(1.0e8).count(), 16_666_667);
        let last = pattern.runs(1.0e8).last().unwrap();
        assert!(last.draw);

        // Lazily produced, so only the first runs of a huge segment are ever built
        let head: Vec<Run> = pattern.runs(3.0e8).take(3).collect();
        assert_eq!(head.len(), 3);
        assert!((head[2].start - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clip_segment() {
        let frame = Rectangle::new(0.0, 0.0, 100.0, 50.0);

        let (t0, t1) = clip_segment((10.0, 10.0), (90.0, 40.0), &frame).unwrap();
        assert!(t0.abs() < 1e-12 && (t1 - 1.0).abs() < 1e-12);

        let (t0, t1) = clip_segment((-100.0, 25.0), (200.0, 25.0), &frame).unwrap();
        assert!((t0 - 1.0 / 3.0).abs() < 1e-9);
        assert!((t1 - 2.0 / 3.0).abs() < 1e-9);

        assert!(clip_segment((-10.0, -10.0), (-5.0, 60.0), &frame).is_none());
        assert!(clip_segment((0.0, 80.0), (100.0, 80.0), &frame).is_none());
    }

    #[test]
    fn test_dashes_within_keep_phase() {
        let pattern = DashPattern::new(6, 6).unwrap();
        let frame = Rectangle::new(0.0, 0.0, 100.0, 100.0);

        // Starts 20 px left of the frame: dashes at 0 and 12 px are hidden, the one
        // at 24..30 px lands on x = 4
        let dashes = pattern.dashes_within((-20.0, 50.0), (40.0, 50.0), &frame);
        let starts: Vec<f32> = dashes.iter().map(|(a, _)| a.0).collect();
        assert_eq!(dashes.len(), 3);
        assert!((starts[0] - 4.0).abs() < 1e-4);
        assert!((starts[1] - 16.0).abs() < 1e-4);
        assert!((dashes[2].1 .0 - 34.0).abs() < 1e-4);
    }

    #[test]
    fn test_dashes_far_outside_frame() {
        let pattern = DashPattern::new(6, 6).unwrap();
        let frame = Rectangle::new(0.0, 0.0, 640.0, 480.0);

        assert!(pattern.dashes_within((-3.0e8, -3.0e8), (-2.0e8, 3.0e8), &frame).is_empty());

        // Crosses the frame horizontally: only the visible stretch is dashed
        let dashes = pattern.dashes_within((-3.0e8, 240.0), (3.0e8, 240.0), &frame);
        assert!(!dashes.is_empty());
        assert!(dashes.len() <= 54);
        for (a, b) in &dashes {
            assert!(a.0 >= -1.0 && b.0 <= 641.0);
        }
    }
}
