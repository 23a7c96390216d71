// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// RGB color for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color. Segments on the subject's right side.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color. Hand segments from the wrist to a knuckle.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Blue color. Segments on the subject's left side.
    pub const BLUE: Color = Color(0, 0, 255);
    /// White color. Center and mixed-side segments, finger segments, face contours.
    pub const WHITE: Color = Color(255, 255, 255);
    /// Black color. Background when the original frame is not blended.
    pub const BLACK: Color = Color(0, 0, 0);
    /// Orange color (#ef6a11). Keypoint circles.
    pub const ORANGE: Color = Color(239, 106, 17);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Channels as an `[r, g, b]` array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb[0], rgb[1], rgb[2])
    }
}

#[cfg(feature = "annotate")]
impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversions() {
        assert_eq!(Color::from([239, 106, 17]), Color::ORANGE);
        assert_eq!(Color::new(1, 2, 3).to_array(), [1, 2, 3]);
    }

    #[cfg(feature = "annotate")]
    #[test]
    fn test_color_to_rgb() {
        let rgb: image::Rgb<u8> = Color::BLUE.into();
        assert_eq!(rgb, image::Rgb([0, 0, 255]));
    }
}
