//! WebAssembly exports for the extraction pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Geometry
//! crosses the boundary as flat `f32` arrays to avoid per-point object
//! churn in the browser.

use wasm_bindgen::prelude::*;

use crate::error::ExtractError;
use crate::extract::{extract_geometry, ExtractOptions};
use crate::mask::GridMask;
use crate::simplify::Simplification;

/// Status codes in the first element of the returned array.
const STATUS_OK: f32 = 0.0;
const STATUS_SHAPE_MISMATCH: f32 = 1.0;
const STATUS_NO_CONTOUR: f32 = 2.0;
const STATUS_DEGENERATE: f32 = 3.0;
const STATUS_INVALID_SCALE: f32 = 4.0;

/// Extract display-space geometry from a flat occupancy mask.
///
/// # Arguments
/// * `mask` - Occupancy mask (0 = empty, >0 = occupied), row-major
/// * `width` - Mask width
/// * `height` - Mask height
/// * `scale` - Display/zoom factor (> 0)
/// * `tolerance` - Simplification tolerance in grid units
/// * `use_distance_threshold` - Select the distance-threshold strategy
///   instead of Douglas-Peucker
///
/// # Returns
/// Flat array:
/// `[status,
///   num_polygon_points, x1, y1, x2, y2, ...,
///   bbox_x, bbox_y, bbox_width, bbox_height,
///   center_x, center_y, area,
///   num_sample_points, x1, y1, ...]`
///
/// `status` 0 means success; 1 = shape mismatch, 2 = no contour found,
/// 3 = degenerate geometry, 4 = invalid scale. On failure only the
/// status element is present and the caller applies its fallback shape.
#[wasm_bindgen]
pub fn extract_geometry_wasm(
    mask: &[u8],
    width: usize,
    height: usize,
    scale: f32,
    tolerance: f32,
    use_distance_threshold: bool,
) -> Vec<f32> {
    let grid = match GridMask::from_flat(mask.to_vec(), width, height) {
        Ok(grid) => grid,
        Err(_) => return vec![STATUS_SHAPE_MISMATCH],
    };

    let options = ExtractOptions {
        scale,
        simplify: if use_distance_threshold {
            Simplification::DistanceThreshold(tolerance)
        } else {
            Simplification::DouglasPeucker(tolerance)
        },
        ..Default::default()
    };

    match extract_geometry(&grid, &options) {
        Ok(record) => {
            let mut out =
                Vec::with_capacity(2 + record.polygon.len() * 2 + 9 + record.mask_sample.len() * 2);
            out.push(STATUS_OK);

            out.push(record.polygon.len() as f32);
            for p in &record.polygon {
                out.push(p.x);
                out.push(p.y);
            }

            out.push(record.bounding_box.x);
            out.push(record.bounding_box.y);
            out.push(record.bounding_box.width);
            out.push(record.bounding_box.height);

            out.push(record.center_point.x);
            out.push(record.center_point.y);
            out.push(record.area);

            out.push(record.mask_sample.len() as f32);
            for p in &record.mask_sample {
                out.push(p.x);
                out.push(p.y);
            }

            out
        }
        Err(ExtractError::NoContourFound) => vec![STATUS_NO_CONTOUR],
        Err(ExtractError::DegenerateGeometry) => vec![STATUS_DEGENERATE],
        Err(ExtractError::InvalidScale(_)) => vec![STATUS_INVALID_SCALE],
        Err(ExtractError::ShapeMismatch { .. }) => vec![STATUS_SHAPE_MISMATCH],
    }
}
