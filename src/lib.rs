//! Mask-to-geometry extraction for floor-plan annotation tools.
//!
//! A segmentation model answers a map click with a raw occupancy mask;
//! this crate turns that mask into a usable shape for rendering, storage
//! and export. The pipeline is pure, synchronous and deterministic:
//!
//! 1. [`mask::GridMask`] normalizes the occupancy data (flat buffer,
//!    nested rows or ndarray view) behind one accessor
//! 2. [`trace`] follows the foreground/background interface with
//!    Moore-neighbor tracing and picks the dominant contour
//! 3. [`simplify`] reduces the contour point count (distance threshold
//!    or Douglas-Peucker, caller's choice)
//! 4. [`geometry`] scales into display space and derives bounding box,
//!    centroid and area
//! 5. [`extract`] assembles everything into an immutable
//!    [`extract::GeometryRecord`]
//!
//! Only the single largest contour is retained; disjoint regions and
//! holes are out of scope. Network calls, persistence and rendering
//! belong to the calling annotation layer, as do fallback shapes on
//! recoverable errors (helpers in [`extract`] cover the documented
//! fallback policy).
//!
//! Python bindings (PyO3 + numpy) are available behind the `python`
//! feature for the segmentation-server side; wasm bindings behind the
//! `wasm` feature for the browser front-end.

pub mod error;
pub mod extract;
pub mod geometry;
pub mod mask;
pub mod simplify;
pub mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::ExtractError;
pub use extract::{
    extract_geometry, extract_geometry_batch, fallback_square, occupied_bounds_polygon,
    ExtractOptions, GeometryRecord,
};
pub use geometry::{BoundingBox, Point};
pub use mask::GridMask;
pub use simplify::Simplification;
pub use trace::Contour;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::extract::{extract_geometry as extract_impl, ExtractOptions};
    use crate::geometry::Point;
    use crate::mask::GridMask;
    use crate::simplify::Simplification;

    fn points_to_array<'py>(py: Python<'py>, points: &[Point]) -> Bound<'py, PyArray2<f32>> {
        let mut flat = Vec::with_capacity(points.len() * 2);
        for p in points {
            flat.push(p.x);
            flat.push(p.y);
        }
        ndarray::Array2::from_shape_vec((points.len(), 2), flat)
            .expect("points always flatten to an (n, 2) array")
            .into_pyarray(py)
    }

    /// Extract display-space geometry from an occupancy mask.
    ///
    /// # Arguments
    /// * `mask` - 2D array of shape (height, width); values > 0 are occupied
    /// * `scale` - Display/zoom factor (> 0)
    /// * `tolerance` - Simplification tolerance in grid units
    /// * `use_distance_threshold` - Select the distance-threshold
    ///   strategy instead of Douglas-Peucker
    ///
    /// # Returns
    /// Tuple of `(polygon, bounding_box, center_point, area, mask_sample)`
    /// where polygon and mask_sample are (n, 2) float arrays,
    /// bounding_box is `(x, y, width, height)` and center_point is
    /// `(x, y)`.
    #[pyfunction]
    #[pyo3(signature = (mask, scale=1.0, tolerance=2.0, use_distance_threshold=false))]
    pub fn extract_geometry<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, u8>,
        scale: f32,
        tolerance: f32,
        use_distance_threshold: bool,
    ) -> PyResult<(
        Bound<'py, PyArray2<f32>>,
        (f32, f32, f32, f32),
        (f32, f32),
        f32,
        Bound<'py, PyArray2<f32>>,
    )> {
        let grid = GridMask::from_array(mask.as_array());
        let options = ExtractOptions {
            scale,
            simplify: if use_distance_threshold {
                Simplification::DistanceThreshold(tolerance)
            } else {
                Simplification::DouglasPeucker(tolerance)
            },
            ..Default::default()
        };

        let record = extract_impl(&grid, &options)
            .map_err(|err| PyValueError::new_err(err.to_string()))?;

        let bbox = record.bounding_box;
        Ok((
            points_to_array(py, &record.polygon),
            (bbox.x, bbox.y, bbox.width, bbox.height),
            (record.center_point.x, record.center_point.y),
            record.area,
            points_to_array(py, &record.mask_sample),
        ))
    }

    /// Brute-force bounding rectangle of the occupied cells, for
    /// fallback shapes when extraction finds no usable contour.
    ///
    /// Returns `(min_x, min_y, max_x, max_y)` inclusive, or None for an
    /// empty mask.
    #[pyfunction]
    pub fn occupied_bounds(
        mask: PyReadonlyArray2<'_, u8>,
    ) -> Option<(usize, usize, usize, usize)> {
        GridMask::from_array(mask.as_array()).occupied_bounds()
    }

    /// maskgeom extension module
    #[pymodule]
    pub fn maskgeom(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(extract_geometry, m)?)?;
        m.add_function(wrap_pyfunction!(occupied_bounds, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::maskgeom;
