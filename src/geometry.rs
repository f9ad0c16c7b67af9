//! Geometric primitives and derivations.
//!
//! This module provides the display-space types shared by the whole
//! pipeline plus the pure O(n) derivations over them:
//! - **Point / BoundingBox**: the vocabulary types of the annotation schema
//! - **Scaling**: grid space -> display space via a uniform zoom factor
//! - **Derivations**: bounding box, vertex-mean centroid, shoelace area

use serde::Serialize;

/// A 2D point in grid or display space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Perpendicular distance from this point to a line segment.
    pub fn distance_to_segment(&self, seg_start: &Point, seg_end: &Point) -> f32 {
        let dx = seg_end.x - seg_start.x;
        let dy = seg_end.y - seg_start.y;
        let length_sq = dx * dx + dy * dy;

        if length_sq < 1e-10 {
            // Segment is essentially a point
            return self.distance_to(seg_start);
        }

        // Project onto the segment, clamping to its extent
        let t = ((self.x - seg_start.x) * dx + (self.y - seg_start.y) * dy) / length_sq;
        let t = t.clamp(0.0, 1.0);

        let proj_x = seg_start.x + t * dx;
        let proj_y = seg_start.y + t * dy;

        let px = self.x - proj_x;
        let py = self.y - proj_y;
        (px * px + py * py).sqrt()
    }
}

/// Minimal axis-aligned box containing a polygon, in the polygon's
/// coordinate space. `width`/`height` are always >= 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Map integer grid coordinates to display space.
///
/// Every coordinate is multiplied by the same caller-supplied zoom
/// factor. Validating `factor > 0` is the pipeline's job; this function
/// itself is a plain transform.
pub fn scale_contour(contour: &[(i32, i32)], factor: f32) -> Vec<Point> {
    contour
        .iter()
        .map(|&(x, y)| Point::new(x as f32 * factor, y as f32 * factor))
        .collect()
}

/// Scale an already-floating polygon by a uniform factor.
pub fn scale_points(points: &[Point], factor: f32) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * factor, p.y * factor))
        .collect()
}

/// Minimal axis-aligned bounding box of a polygon.
///
/// Callers must guard against empty input; an empty polygon has no
/// defined box and yields a zero box here.
pub fn bounding_box(points: &[Point]) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Arithmetic mean of the polygon vertices.
///
/// This is deliberately a vertex mean, not a pixel-weighted centroid:
/// downstream annotation data was produced with the vertex mean and the
/// two must stay consistent. Undefined for empty input (guard upstream).
pub fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f32;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for p in points {
        sx += p.x;
        sy += p.y;
    }
    Point::new(sx / n, sy / n)
}

/// Polygon area via the shoelace formula (absolute value).
///
/// The polygon is treated as implicitly closed: the last vertex connects
/// back to the first.
pub fn polygon_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}
