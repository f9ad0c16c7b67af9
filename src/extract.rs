//! Mask-to-geometry extraction pipeline.
//!
//! Ties the stages together: trace boundary contours, select the
//! dominant one, simplify it in grid space, scale into display space
//! and derive bounding box / centroid / area. Each call is synchronous,
//! deterministic and owns all of its state, so independent masks can be
//! processed in parallel (see [`extract_geometry_batch`]).
//!
//! Recoverable failures ([`ExtractError::NoContourFound`],
//! [`ExtractError::DegenerateGeometry`]) are meant to be answered with a
//! fallback shape built via [`fallback_square`] or
//! [`occupied_bounds_polygon`]; that policy belongs to the caller, not
//! to this pipeline.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::ExtractError;
use crate::geometry::{bounding_box, centroid, polygon_area, scale_points, BoundingBox, Point};
use crate::mask::GridMask;
use crate::simplify::{simplify, Simplification};
use crate::trace::{dominant_contour, trace_contours};

/// Caller-supplied extraction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractOptions {
    /// Uniform display/zoom factor applied to all output coordinates.
    /// Must be > 0.
    pub scale: f32,
    /// Contour simplification strategy and tolerance (grid units).
    pub simplify: Simplification,
    /// Contours with at most this many points are discarded as noise.
    pub min_contour_points: usize,
    /// Sampling stride for the mask-sample overlay coordinates.
    pub sample_step: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            simplify: Simplification::DouglasPeucker(2.0),
            min_contour_points: 4,
            sample_step: 2,
        }
    }
}

/// Immutable result of one successful extraction, in display space.
///
/// Serializes with the field names of the downstream annotation schema
/// (`boundingBox`, `centerPoint`, `maskSample`). Identity, timestamps
/// and user fields are owned by the annotation layer, not by this
/// record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryRecord {
    /// Simplified boundary polygon, implicitly closed.
    pub polygon: Vec<Point>,
    /// Minimal axis-aligned box containing the polygon.
    pub bounding_box: BoundingBox,
    /// Vertex mean of the polygon.
    pub center_point: Point,
    /// Down-sampled occupied cells for debug/overlay rendering. Coarser
    /// than, and distinct from, the polygon.
    pub mask_sample: Vec<Point>,
    /// Shoelace area of the polygon.
    pub area: f32,
}

/// Run the full extraction pipeline on one mask.
///
/// # Errors
/// - [`ExtractError::InvalidScale`] if `options.scale <= 0`
/// - [`ExtractError::NoContourFound`] if no contour survives noise
///   filtering (including masks with zero set cells)
/// - [`ExtractError::DegenerateGeometry`] if simplification collapses
///   the contour below 2 points or to zero area
pub fn extract_geometry(
    mask: &GridMask,
    options: &ExtractOptions,
) -> Result<GeometryRecord, ExtractError> {
    if !(options.scale > 0.0) {
        return Err(ExtractError::InvalidScale(options.scale));
    }

    let contours = trace_contours(mask);
    let contour =
        dominant_contour(contours, options.min_contour_points).ok_or(ExtractError::NoContourFound)?;

    debug!("selected contour with {} points", contour.len());

    let grid_points: Vec<Point> = contour
        .points
        .iter()
        .map(|&(x, y)| Point::new(x as f32, y as f32))
        .collect();

    // Simplify before scaling so the tolerance is in grid units and the
    // result scales linearly with the zoom factor.
    let simplified = simplify(&grid_points, options.simplify);
    if simplified.len() < 2 {
        return Err(ExtractError::DegenerateGeometry);
    }

    let polygon = scale_points(&simplified, options.scale);
    let area = polygon_area(&polygon);
    if area == 0.0 {
        return Err(ExtractError::DegenerateGeometry);
    }

    Ok(GeometryRecord {
        bounding_box: bounding_box(&polygon),
        center_point: centroid(&polygon),
        mask_sample: mask.sample_coordinates(options.sample_step, options.scale),
        area,
        polygon,
    })
}

/// Extract geometry for a batch of independent masks in parallel.
///
/// Each mask is processed exactly as by [`extract_geometry`]; results
/// keep the input order. Pacing between calls (e.g. when the masks come
/// from a rate-limited segmentation service) is the caller's concern.
pub fn extract_geometry_batch(
    masks: &[GridMask],
    options: &ExtractOptions,
) -> Vec<Result<GeometryRecord, ExtractError>> {
    masks
        .par_iter()
        .map(|mask| extract_geometry(mask, options))
        .collect()
}

/// Fallback shape: an axis-aligned square centered on the original
/// query point, for when a mask yields no usable geometry.
pub fn fallback_square(center: Point, half_size: f32) -> Vec<Point> {
    vec![
        Point::new(center.x - half_size, center.y - half_size),
        Point::new(center.x + half_size, center.y - half_size),
        Point::new(center.x + half_size, center.y + half_size),
        Point::new(center.x - half_size, center.y + half_size),
    ]
}

/// Fallback shape: the raw bounding rectangle of whatever cells are set,
/// scaled into display space. `None` when the mask is fully empty.
pub fn occupied_bounds_polygon(mask: &GridMask, scale: f32) -> Option<Vec<Point>> {
    let (min_x, min_y, max_x, max_y) = mask.occupied_bounds()?;
    let (min_x, min_y) = (min_x as f32 * scale, min_y as f32 * scale);
    let (max_x, max_y) = (max_x as f32 * scale, max_y as f32 * scale);
    Some(vec![
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ])
}
