//! Error taxonomy for mask-to-geometry extraction.
//!
//! All operations are deterministic and pure, so nothing is retried
//! internally; every failure is surfaced synchronously as a typed value.

use thiserror::Error;

/// Errors produced by the extraction pipeline.
///
/// `ShapeMismatch` and `InvalidScale` are caller contract violations and
/// fatal to the call. `NoContourFound` and `DegenerateGeometry` are
/// recoverable: callers are expected to substitute a documented fallback
/// shape (see [`crate::extract::fallback_square`] and
/// [`crate::extract::occupied_bounds_polygon`]) instead of failing the
/// user-facing operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// Declared mask dimensions do not match the supplied data.
    #[error("mask shape mismatch: declared {width}x{height} but got {actual} values")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// The mask has no set cells, or tracing produced no usable contour.
    #[error("no contour found in mask")]
    NoContourFound,

    /// Simplification or derivation would yield fewer than 2 points or
    /// zero area.
    #[error("geometry degenerated to fewer than 2 points or zero extent")]
    DegenerateGeometry,

    /// The display scale factor must be strictly positive.
    #[error("scale factor must be > 0, got {0}")]
    InvalidScale(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = ExtractError::ShapeMismatch {
            width: 4,
            height: 3,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("4x3"));
        assert!(msg.contains("10 values"));
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(ExtractError::NoContourFound, ExtractError::NoContourFound);
        assert_ne!(
            ExtractError::NoContourFound,
            ExtractError::DegenerateGeometry
        );
    }
}
