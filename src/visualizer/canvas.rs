// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing targets.
//!
//! The renderer computes all geometry in floating point and hands it to a [`Canvas`].
//! Rounding, antialiasing and clipping are the canvas' business. [`DrawRecorder`]
//! keeps the primitives instead of rasterizing them, and `image::RgbImage`
//! rasterizes with `imageproc` when the `annotate` feature is enabled.

use super::color::Color;

/// A 2D point in pixel coordinates.
pub type Point = (f32, f32);

/// Raster surface the renderer draws on.
pub trait Canvas {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Whether the canvas has no pixels.
    fn is_empty_frame(&self) -> bool {
        let (w, h) = self.dimensions();
        w == 0 || h == 0
    }

    /// Fill every pixel with `color`.
    fn clear(&mut self, color: Color);

    /// Draw a filled disc.
    fn draw_filled_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a circle outline with the given stroke width.
    fn draw_stroked_circle(&mut self, center: Point, radius: f32, color: Color, stroke_width: f32);

    /// Draw a straight line segment with the given stroke width.
    fn draw_line_segment(&mut self, from: Point, to: Point, color: Color, width: f32);
}

/// A primitive captured by [`DrawRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Whole-canvas fill.
    Clear(Color),
    /// Filled disc.
    FilledCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Circle outline.
    StrokedCircle {
        center: Point,
        radius: f32,
        color: Color,
        stroke_width: f32,
    },
    /// Line segment.
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
}

impl DrawCall {
    /// Whether this call is a filled or stroked circle.
    #[must_use]
    pub const fn is_circle(&self) -> bool {
        matches!(self, Self::FilledCircle { .. } | Self::StrokedCircle { .. })
    }

    /// Whether this call is a line segment.
    #[must_use]
    pub const fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }
}

/// Canvas that records primitives in call order.
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl DrawRecorder {
    /// Create a recorder reporting the given dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Recorded circles.
    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| c.is_circle())
    }

    /// Recorded line segments.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| c.is_line())
    }

    /// Drop all recorded calls.
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for DrawRecorder {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_filled_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.calls.push(DrawCall::FilledCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_stroked_circle(&mut self, center: Point, radius: f32, color: Color, stroke_width: f32) {
        self.calls.push(DrawCall::StrokedCircle {
            center,
            radius,
            color,
            stroke_width,
        });
    }

    fn draw_line_segment(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }
}

#[cfg(feature = "annotate")]
mod raster {
    use image::{Rgb, RgbImage};
    use imageproc::drawing::{
        draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
    };
    use imageproc::point::Point as PixelPoint;

    use super::{Canvas, Color, Point};

    fn to_pixel(p: Point) -> (i32, i32) {
        (p.0.round() as i32, p.1.round() as i32)
    }

    fn radius_px(radius: f32) -> i32 {
        radius.round().max(1.0) as i32
    }

    impl Canvas for RgbImage {
        fn dimensions(&self) -> (u32, u32) {
            (self.width(), self.height())
        }

        fn clear(&mut self, color: Color) {
            let rgb: Rgb<u8> = color.into();
            for pixel in self.pixels_mut() {
                *pixel = rgb;
            }
        }

        fn draw_filled_circle(&mut self, center: Point, radius: f32, color: Color) {
            draw_filled_circle_mut(self, to_pixel(center), radius_px(radius), color.into());
        }

        fn draw_stroked_circle(&mut self, center: Point, radius: f32, color: Color, stroke_width: f32) {
            let center = to_pixel(center);
            let radius = radius_px(radius);
            let stroke = stroke_width.round().max(1.0) as i32;
            let inner = (radius - stroke / 2).max(0);
            let rgb: Rgb<u8> = color.into();
            for r in inner..inner + stroke {
                draw_hollow_circle_mut(self, center, r, rgb);
            }
        }

        fn draw_line_segment(&mut self, from: Point, to: Point, color: Color, width: f32) {
            let rgb: Rgb<u8> = color.into();
            let width = width.round().max(1.0);
            if width <= 1.0 {
                draw_line_segment_mut(self, from, to, rgb);
                return;
            }

            let half = width / 2.0;
            let cap = half.floor() as i32;
            let (dx, dy) = (to.0 - from.0, to.1 - from.1);
            let length = dx.hypot(dy);
            if length < 1.0 {
                draw_filled_circle_mut(self, to_pixel(from), cap, rgb);
                return;
            }

            // Quad body plus round caps
            let (nx, ny) = (-dy / length * half, dx / length * half);
            let corners = [
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ]
            .map(|p| {
                let (x, y) = to_pixel(p);
                PixelPoint::new(x, y)
            });
            if corners[0] != corners[3] {
                draw_polygon_mut(self, &corners, rgb);
            } else {
                draw_line_segment_mut(self, from, to, rgb);
            }
            draw_filled_circle_mut(self, to_pixel(from), cap, rgb);
            draw_filled_circle_mut(self, to_pixel(to), cap, rgb);
        }
    }
}
