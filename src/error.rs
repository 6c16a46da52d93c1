use thiserror::Error;

/// Failures of the coverage and marking geometry
///
/// Every variant is local to one call: the geometry functions are pure,
/// so there is no partial state to clean up after an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("polygon needs at least 3 distinct vertices, got {distinct}")]
    DegeneratePolygon { distinct: usize },

    #[error("spacing must be a positive finite number of meters, got {0}")]
    InvalidSpacing(f64),

    #[error("sweep angle must be a finite number of degrees, got {0}")]
    InvalidAngle(f64),

    #[error("invalid vertex pair ({a}, {b}) for a polygon with {count} vertices")]
    InvalidVertexIndex { a: usize, b: usize, count: usize },

    #[error("sweep would need {lines} candidate lines, limit is {limit}")]
    ResourceExhausted { lines: usize, limit: usize },

    /// Only surfaced from single-pass offsetting; headland generation
    /// treats it as the end of the rings.
    #[error("offset ring for headland pass {pass} self-intersects")]
    SelfIntersectingPolygon { pass: usize },
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

/// Reject zero, negative and non-finite widths/spacings
pub(crate) fn check_spacing(value: f64) -> PlanResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::InvalidSpacing(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_spacing() {
        assert_eq!(check_spacing(2.5), Ok(2.5));
        assert_eq!(check_spacing(0.0), Err(PlanError::InvalidSpacing(0.0)));
        assert!(check_spacing(-1.0).is_err());
        assert!(check_spacing(f64::NAN).is_err());
        assert!(check_spacing(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = PlanError::InvalidVertexIndex { a: 2, b: 2, count: 4 };
        assert_eq!(
            err.to_string(),
            "invalid vertex pair (2, 2) for a polygon with 4 vertices"
        );
    }
}
