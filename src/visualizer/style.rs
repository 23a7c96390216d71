// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Semantic styling of points and segments.
//!
//! [`StyleClassifier`] answers, per point index, which side of the body the point is
//! on and whether it is rendered at all, and resolves segment colors from that. It is
//! immutable lookup data and can be shared freely across threads.

use std::borrow::Cow;

use super::color::Color;
use crate::layout::SkeletonLayout;

/// Hand wrist index.
pub const HAND_WRIST: usize = 0;
/// Hand knuckle (MCP joint) indices: thumb, index, middle, ring, little.
pub const HAND_KNUCKLES: [usize; 5] = [1, 5, 9, 13, 17];

/// Body side of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Subject's left.
    Left,
    /// Subject's right.
    Right,
    /// Center line, or no side information.
    Center,
}

/// Side/exclusion lookup for one skeleton layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClassifier {
    left: Cow<'static, [usize]>,
    right: Cow<'static, [usize]>,
    excluded: Cow<'static, [usize]>,
    left_color: Color,
    right_color: Color,
    neutral_color: Color,
}

impl Default for StyleClassifier {
    fn default() -> Self {
        Self {
            left: Cow::Borrowed(&[]),
            right: Cow::Borrowed(&[]),
            excluded: Cow::Borrowed(&[]),
            left_color: Color::BLUE,
            right_color: Color::RED,
            neutral_color: Color::WHITE,
        }
    }
}

impl StyleClassifier {
    /// Classifier backed by the built-in table of `layout`.
    ///
    /// Layouts without a table classify every point as [`Side::Center`] and exclude none.
    #[must_use]
    pub fn for_layout(layout: SkeletonLayout) -> Self {
        match layout.table() {
            Some(table) => Self {
                left: Cow::Borrowed(table.left),
                right: Cow::Borrowed(table.right),
                excluded: Cow::Borrowed(table.excluded),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Classifier from index sets supplied by the topology owner.
    #[must_use]
    pub fn custom(left: Vec<usize>, right: Vec<usize>, excluded: Vec<usize>) -> Self {
        Self {
            left: Cow::Owned(left),
            right: Cow::Owned(right),
            excluded: Cow::Owned(excluded),
            ..Self::default()
        }
    }

    /// Replace the left, right and neutral segment colors.
    #[must_use]
    pub fn with_colors(mut self, left: Color, right: Color, neutral: Color) -> Self {
        self.left_color = left;
        self.right_color = right;
        self.neutral_color = neutral;
        self
    }

    /// Side of a point.
    #[must_use]
    pub fn side(&self, index: usize) -> Side {
        if self.left.contains(&index) {
            Side::Left
        } else if self.right.contains(&index) {
            Side::Right
        } else {
            Side::Center
        }
    }

    /// Whether a point is omitted from rendering.
    #[must_use]
    pub fn is_excluded(&self, index: usize) -> bool {
        self.excluded.contains(&index)
    }

    /// Color of the segment between two points.
    ///
    /// Both endpoints on the same side give that side's color; any other combination
    /// (mixed sides, or a center endpoint) gives the neutral color.
    #[must_use]
    pub fn segment_color(&self, part_a: usize, part_b: usize) -> Color {
        match (self.side(part_a), self.side(part_b)) {
            (Side::Left, Side::Left) => self.left_color,
            (Side::Right, Side::Right) => self.right_color,
            _ => self.neutral_color,
        }
    }

    /// Whether the segment between two points is rendered at all.
    ///
    /// Confidence is not considered here.
    #[must_use]
    pub fn segment_visible(&self, part_a: usize, part_b: usize) -> bool {
        !(self.is_excluded(part_a) || self.is_excluded(part_b))
    }

    /// One segment color per pair.
    #[must_use]
    pub fn pair_colors(&self, pairs: &[[usize; 2]]) -> Vec<Color> {
        pairs
            .iter()
            .map(|&[a, b]| self.segment_color(a, b))
            .collect()
    }
}

/// Whether a hand segment joins the wrist to a knuckle.
#[must_use]
pub fn is_palm_segment(part_a: usize, part_b: usize) -> bool {
    (part_a == HAND_WRIST && HAND_KNUCKLES.contains(&part_b))
        || (part_b == HAND_WRIST && HAND_KNUCKLES.contains(&part_a))
}

/// One color per hand pair: green from wrist to knuckle, white along the fingers.
#[must_use]
pub fn hand_pair_colors(pairs: &[[usize; 2]]) -> Vec<Color> {
    pairs
        .iter()
        .map(|&[a, b]| {
            if is_palm_segment(a, b) {
                Color::GREEN
            } else {
                Color::WHITE
            }
        })
        .collect()
}
