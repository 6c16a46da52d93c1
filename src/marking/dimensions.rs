use crate::coverage::direction::longest_edge_angle;
use crate::geometry::FieldPolygon;

use super::pitch::regulation::{STANDARD_LENGTH, STANDARD_WIDTH};

/// Allowed deviation from the standard pitch size, in meters
pub const FIFA_TOLERANCE: f64 = 5.0;

/// Measured extents of a field boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDimensions {
    pub length: f64,
    pub width: f64,
}

impl FieldDimensions {
    /// Extents in the frame aligned with the longest edge; the larger is the length
    pub fn measure(field: &FieldPolygon) -> Self {
        let angle = longest_edge_angle(field);
        let bounds = field.rotated_copy(-angle, field.centroid()).bounds();
        let (a, b) = (bounds.width(), bounds.height());
        Self {
            length: a.max(b),
            width: a.min(b),
        }
    }

    /// Within `tolerance` meters of 105 x 68
    pub fn complies_with(&self, tolerance: f64) -> bool {
        (self.length - STANDARD_LENGTH).abs() <= tolerance
            && (self.width - STANDARD_WIDTH).abs() <= tolerance
    }

    pub fn is_fifa_standard(&self) -> bool {
        self.complies_with(FIFA_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_measure_axis_aligned() {
        let field =
            FieldPolygon::from_tuples(&[(0.0, 0.0), (105.0, 0.0), (105.0, 68.0), (0.0, 68.0)])
                .unwrap();
        let dims = FieldDimensions::measure(&field);
        assert!((dims.length - 105.0).abs() < 1e-9);
        assert!((dims.width - 68.0).abs() < 1e-9);
        assert!(dims.is_fifa_standard());
    }

    #[test]
    fn test_measure_rotated() {
        let field =
            FieldPolygon::from_tuples(&[(0.0, 0.0), (102.0, 0.0), (102.0, 70.0), (0.0, 70.0)])
                .unwrap()
                .rotated_copy(33.0, coord! { x: 0.0, y: 0.0 });
        let dims = FieldDimensions::measure(&field);
        assert!((dims.length - 102.0).abs() < 1e-6);
        assert!((dims.width - 70.0).abs() < 1e-6);
        assert!(dims.is_fifa_standard());
    }

    #[test]
    fn test_non_compliant() {
        let dims = FieldDimensions {
            length: 90.0,
            width: 60.0,
        };
        assert!(!dims.is_fifa_standard());
        assert!(dims.complies_with(20.0));

        let edge = FieldDimensions {
            length: 110.0,
            width: 63.0,
        };
        assert!(edge.is_fifa_standard());
    }
}
