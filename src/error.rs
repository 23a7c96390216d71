// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the overlay library.
//!
//! Only malformed inputs are errors. Degenerate keypoint data (no visible points,
//! nothing to compare) is reported through sentinel values by [`crate::metrics`].

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Main error type for the overlay library.
///
/// Every variant is raised at render-call entry, before any pixel is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Topology references a point outside the collection or carries unusable scale hints.
    TopologyError(String),
    /// Style configuration is inconsistent with the topology or holds invalid numbers.
    StyleError(String),
    /// Keypoint collection has the wrong shape or non-finite values.
    KeypointError(String),
    /// Raw frame buffer does not match the stated image dimensions.
    ImageError(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopologyError(msg) => write!(f, "Topology error: {msg}"),
            Self::StyleError(msg) => write!(f, "Style error: {msg}"),
            Self::KeypointError(msg) => write!(f, "Keypoint error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {}
