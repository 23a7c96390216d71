// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Axis-aligned rectangles in image coordinates.

/// Axis-aligned rectangle stored as top-left corner plus size.
///
/// `Rectangle::default()` (zero-sized, at the origin) is the sentinel returned when a
/// detection has no visible points. Check [`Rectangle::is_empty`] before using it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rectangle {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from corner coordinates [x1, y1, x2, y2].
    #[must_use]
    pub fn from_xyxy(xyxy: [f32; 4]) -> Self {
        Self::new(xyxy[0], xyxy[1], xyxy[2] - xyxy[0], xyxy[3] - xyxy[1])
    }

    /// Corner coordinates [x1, y1, x2, y2].
    #[must_use]
    pub fn xyxy(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point (x, y).
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (
            self.width.mul_add(0.5, self.x),
            self.height.mul_add(0.5, self.y),
        )
    }

    /// Width times height.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Larger of width and height.
    #[must_use]
    pub fn larger_side(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// Intersection over union of two rectangles.
///
/// Returns a value in [0, 1]: 1 for identical non-empty rectangles, 0 when they are
/// disjoint or either one has no area.
#[must_use]
pub fn overlap_ratio(a: &Rectangle, b: &Rectangle) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        (intersection / union).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
