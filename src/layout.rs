// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton layouts and their semantic tables.
//!
//! A layout names a point-index scheme (which index is the left wrist, which is the
//! nose, ...). Side and exclusion semantics are plain data in a [`LayoutTable`], so
//! supporting another scheme means adding a table, not a branch.

use std::fmt;
use std::str::FromStr;

/// Left/right/excluded index sets for one layout.
///
/// Indices in neither `left` nor `right` are on the body's center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTable {
    /// Indices on the subject's left side.
    pub left: &'static [usize],
    /// Indices on the subject's right side.
    pub right: &'static [usize],
    /// Indices omitted from rendering.
    pub excluded: &'static [usize],
}

// Nose 0, Neck 1, MidHip 8 are center
const BODY_25_TABLE: LayoutTable = LayoutTable {
    left: &[5, 6, 7, 12, 13, 14, 16, 18, 19, 20, 21],
    right: &[2, 3, 4, 9, 10, 11, 15, 17, 22, 23, 24],
    excluded: &[],
};

// Eyes and ears (15-18) are too small to read at body scale
const BODY_25_NO_FACE_TABLE: LayoutTable = LayoutTable {
    excluded: &[15, 16, 17, 18],
    ..BODY_25_TABLE
};

const COCO_18_TABLE: LayoutTable = LayoutTable {
    left: &[5, 6, 7, 11, 12, 13, 15, 17],
    right: &[2, 3, 4, 8, 9, 10, 14, 16],
    excluded: &[],
};

const BODY_19_TABLE: LayoutTable = LayoutTable {
    left: &[5, 6, 7, 12, 13, 14, 16, 18],
    right: &[2, 3, 4, 9, 10, 11, 15, 17],
    excluded: &[],
};

// No neck or mid-hip; only the nose (0) is center
const BODY_23_TABLE: LayoutTable = LayoutTable {
    left: &[4, 5, 6, 10, 11, 12, 14, 16, 17, 18, 19],
    right: &[1, 2, 3, 7, 8, 9, 13, 15, 20, 21, 22],
    excluded: &[],
};

/// Point-index scheme of a keypoint collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkeletonLayout {
    /// 25-point body with feet.
    #[default]
    Body25,
    /// `BODY_25` numbering, depth variant.
    Body25D,
    /// `BODY_25` numbering, extended variant.
    Body25E,
    /// `BODY_25` numbering with eyes and ears excluded from rendering.
    Body25NoFace,
    /// 18-point COCO body.
    Coco18,
    /// 19-point body without feet.
    Body19,
    /// `BODY_19` numbering, extended variant.
    Body19E,
    /// `BODY_19` numbering, narrow variant.
    Body19N,
    /// `BODY_19` numbering, double-resolution variant.
    Body19X2,
    /// 23-point body without neck and mid-hip.
    Body23,
    /// 15-point MPI body. Has no side table.
    Mpi15,
    /// 68 facial landmarks plus two pupils.
    Face70,
    /// 21-point hand.
    Hand21,
}

impl SkeletonLayout {
    /// Every supported layout.
    pub const ALL: [Self; 13] = [
        Self::Body25,
        Self::Body25D,
        Self::Body25E,
        Self::Body25NoFace,
        Self::Coco18,
        Self::Body19,
        Self::Body19E,
        Self::Body19N,
        Self::Body19X2,
        Self::Body23,
        Self::Mpi15,
        Self::Face70,
        Self::Hand21,
    ];

    /// Canonical layout name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Body25 => "BODY_25",
            Self::Body25D => "BODY_25D",
            Self::Body25E => "BODY_25E",
            Self::Body25NoFace => "BODY_25_NO_FACE",
            Self::Coco18 => "COCO_18",
            Self::Body19 => "BODY_19",
            Self::Body19E => "BODY_19E",
            Self::Body19N => "BODY_19N",
            Self::Body19X2 => "BODY_19_X2",
            Self::Body23 => "BODY_23",
            Self::Mpi15 => "MPI_15",
            Self::Face70 => "FACE_70",
            Self::Hand21 => "HAND_21",
        }
    }

    /// Number of points per detection.
    #[must_use]
    pub const fn num_points(&self) -> usize {
        match self {
            Self::Body25 | Self::Body25D | Self::Body25E | Self::Body25NoFace => 25,
            Self::Coco18 => 18,
            Self::Body19 | Self::Body19E | Self::Body19N | Self::Body19X2 => 19,
            Self::Body23 => 23,
            Self::Mpi15 => 15,
            Self::Face70 => 70,
            Self::Hand21 => 21,
        }
    }

    /// Side and exclusion table, if the layout has one.
    ///
    /// Layouts without a table treat every index as center and exclude nothing.
    #[must_use]
    pub const fn table(&self) -> Option<&'static LayoutTable> {
        match self {
            Self::Body25 | Self::Body25D | Self::Body25E => Some(&BODY_25_TABLE),
            Self::Body25NoFace => Some(&BODY_25_NO_FACE_TABLE),
            Self::Coco18 => Some(&COCO_18_TABLE),
            Self::Body19 | Self::Body19E | Self::Body19N | Self::Body19X2 => Some(&BODY_19_TABLE),
            Self::Body23 => Some(&BODY_23_TABLE),
            Self::Mpi15 | Self::Face70 | Self::Hand21 => None,
        }
    }

    /// Whether this layout describes a full body.
    #[must_use]
    pub const fn is_body(&self) -> bool {
        !matches!(self, Self::Face70 | Self::Hand21)
    }
}

impl fmt::Display for SkeletonLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SkeletonLayout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_uppercase();
        match key.as_str() {
            "BODY25" => Ok(Self::Body25),
            "BODY25D" => Ok(Self::Body25D),
            "BODY25E" => Ok(Self::Body25E),
            "BODY25NOFACE" => Ok(Self::Body25NoFace),
            "COCO" | "COCO18" => Ok(Self::Coco18),
            "BODY19" => Ok(Self::Body19),
            "BODY19E" => Ok(Self::Body19E),
            "BODY19N" => Ok(Self::Body19N),
            "BODY19X2" => Ok(Self::Body19X2),
            "BODY23" => Ok(Self::Body23),
            "MPI" | "MPI15" => Ok(Self::Mpi15),
            "FACE" | "FACE70" => Ok(Self::Face70),
            "HAND" | "HAND21" => Ok(Self::Hand21),
            _ => Err(LayoutParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown layout name.
#[derive(Debug, Clone)]
pub struct LayoutParseError(String);

impl fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = SkeletonLayout::ALL.iter().map(SkeletonLayout::as_str).collect();
        write!(
            f,
            "invalid skeleton layout '{}', expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for LayoutParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_str() {
        assert_eq!("BODY_25".parse::<SkeletonLayout>().unwrap(), SkeletonLayout::Body25);
        assert_eq!("body25".parse::<SkeletonLayout>().unwrap(), SkeletonLayout::Body25);
        assert_eq!("coco".parse::<SkeletonLayout>().unwrap(), SkeletonLayout::Coco18);
        assert_eq!("body-19-x2".parse::<SkeletonLayout>().unwrap(), SkeletonLayout::Body19X2);
        assert_eq!("hand".parse::<SkeletonLayout>().unwrap(), SkeletonLayout::Hand21);
        assert!("body_42".parse::<SkeletonLayout>().is_err());
    }

    #[test]
    fn test_layout_display_round_trip() {
        for layout in SkeletonLayout::ALL {
            assert_eq!(layout.to_string().parse::<SkeletonLayout>().unwrap(), layout);
        }
    }

    #[test]
    fn test_tables_within_point_range() {
        for layout in SkeletonLayout::ALL {
            if let Some(table) = layout.table() {
                let n = layout.num_points();
                for &i in table.left.iter().chain(table.right).chain(table.excluded) {
                    assert!(i < n, "{layout}: index {i} out of range");
                }
                for i in table.left {
                    assert!(!table.right.contains(i), "{layout}: {i} on both sides");
                }
            }
        }
    }

    #[test]
    fn test_variants_share_tables() {
        assert_eq!(SkeletonLayout::Body25D.table(), SkeletonLayout::Body25.table());
        assert_eq!(SkeletonLayout::Body19X2.table(), SkeletonLayout::Body19.table());
        assert!(SkeletonLayout::Face70.table().is_none());
        assert!(SkeletonLayout::Mpi15.table().is_none());
    }

    #[test]
    fn test_parse_error_message() {
        let err = "nope".parse::<SkeletonLayout>().unwrap_err();
        assert!(err.to_string().starts_with("invalid skeleton layout 'nope'"));
        assert!(err.to_string().contains("BODY_25"));
    }
}
