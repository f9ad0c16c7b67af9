//! Polygon simplification.
//!
//! Two composable strategies, selected by the caller:
//! - **Distance threshold**: single pass, keeps a point only when it has
//!   moved far enough from the last kept point. Cheap, used for dense
//!   cell-by-cell contours.
//! - **Douglas-Peucker**: classic max-deviation split, implemented with
//!   an explicit work stack so large noisy contours cannot exhaust the
//!   call stack.
//!
//! Both strategies preserve point order, never reorder or invent points,
//! and return at least 2 points for any input of 2 or more. Re-applying
//! a strategy with the same tolerance to its own output is a no-op.

use crate::geometry::Point;

/// Caller-selected simplification strategy with its tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Simplification {
    /// Keep a point only if it is farther than the tolerance from the
    /// last kept point.
    DistanceThreshold(f32),
    /// Keep points deviating more than epsilon from the straight line
    /// spanning their segment.
    DouglasPeucker(f32),
}

/// Simplify a polyline with the given strategy.
pub fn simplify(points: &[Point], method: Simplification) -> Vec<Point> {
    match method {
        Simplification::DistanceThreshold(tolerance) => distance_threshold(points, tolerance),
        Simplification::DouglasPeucker(epsilon) => douglas_peucker(points, epsilon),
    }
}

/// Single-pass distance-threshold simplification.
///
/// The first point is always kept. The original last point is
/// re-appended when the closing gap back to the first point exceeds the
/// tolerance, so implicitly-closed contours stay closed.
pub fn distance_threshold(points: &[Point], tolerance: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept = vec![points[0]];
    for point in &points[1..] {
        let last = kept.last().unwrap();
        if point.distance_to(last) > tolerance {
            kept.push(*point);
        }
    }

    let original_last = *points.last().unwrap();
    let closing_gap = kept.last().unwrap().distance_to(&points[0]);
    if closing_gap > tolerance && *kept.last().unwrap() != original_last {
        kept.push(original_last);
    }

    // A contour that collapsed entirely still yields a usable segment
    if kept.len() < 2 {
        kept.push(original_last);
    }

    kept
}

/// Douglas-Peucker simplification with an explicit work stack.
///
/// Endpoints are always kept; interior points survive only if their
/// distance to the segment spanning their range exceeds epsilon.
pub fn douglas_peucker(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0usize, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0f32;
        let mut max_idx = start;
        for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = point.distance_to_segment(&points[start], &points[end]);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Vec<Point> {
        // Dense unit-spaced ring around a 5x5 square
        let mut pts = Vec::new();
        for x in 0..5 {
            pts.push(Point::new(x as f32, 0.0));
        }
        for y in 1..5 {
            pts.push(Point::new(4.0, y as f32));
        }
        for x in (0..4).rev() {
            pts.push(Point::new(x as f32, 4.0));
        }
        for y in (1..4).rev() {
            pts.push(Point::new(0.0, y as f32));
        }
        pts
    }

    #[test]
    fn test_douglas_peucker_drops_collinear_point() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.1),
            Point::new(2.0, 0.0),
        ];
        let simplified = douglas_peucker(&points, 0.2);
        assert_eq!(simplified.len(), 2);
    }

    #[test]
    fn test_douglas_peucker_keeps_corner() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(4.0, 0.0),
        ];
        let simplified = douglas_peucker(&points, 1.0);
        assert_eq!(simplified.len(), 3);
    }

    #[test]
    fn test_douglas_peucker_square_keeps_corners() {
        let simplified = douglas_peucker(&square_ring(), 0.5);
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ] {
            assert!(simplified.contains(&corner), "missing corner {corner:?}");
        }
        // Straight runs collapse
        assert!(!simplified.contains(&Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_douglas_peucker_preserves_order() {
        let ring = square_ring();
        let simplified = douglas_peucker(&ring, 0.5);
        let positions: Vec<usize> = simplified
            .iter()
            .map(|p| ring.iter().position(|q| q == p).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_douglas_peucker_idempotent() {
        let once = douglas_peucker(&square_ring(), 0.5);
        let twice = douglas_peucker(&once, 0.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_distance_threshold_thins_dense_run() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f32 * 0.5, 0.0)).collect();
        let simplified = distance_threshold(&points, 1.0);
        // Keeps every third half-step point plus the closure point
        assert!(simplified.len() < points.len());
        assert_eq!(simplified[0], points[0]);
        for pair in simplified.windows(2).take(simplified.len() - 2) {
            assert!(pair[0].distance_to(&pair[1]) > 1.0);
        }
    }

    #[test]
    fn test_distance_threshold_reappends_closing_point() {
        let ring = square_ring();
        let simplified = distance_threshold(&ring, 1.5);
        // Last original point is far from the first kept point, so the
        // closure point must survive
        assert_eq!(*simplified.last().unwrap(), *ring.last().unwrap());
    }

    #[test]
    fn test_distance_threshold_idempotent() {
        for tolerance in [0.5, 1.0, 1.5, 3.0] {
            let once = distance_threshold(&square_ring(), tolerance);
            let twice = distance_threshold(&once, tolerance);
            assert_eq!(once, twice, "not a fixed point at t={tolerance}");
        }
    }

    #[test]
    fn test_minimum_output_length() {
        let cluster = vec![
            Point::new(0.0, 0.0),
            Point::new(0.1, 0.0),
            Point::new(0.0, 0.1),
        ];
        assert!(distance_threshold(&cluster, 5.0).len() >= 2);
        assert!(douglas_peucker(&cluster, 5.0).len() >= 2);
    }

    #[test]
    fn test_trivial_inputs_pass_through() {
        let two = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(distance_threshold(&two, 10.0), two);
        assert_eq!(douglas_peucker(&two, 10.0), two);
        assert!(simplify(&[], Simplification::DouglasPeucker(1.0)).is_empty());
    }

    #[test]
    fn test_simplify_dispatch() {
        let ring = square_ring();
        assert_eq!(
            simplify(&ring, Simplification::DouglasPeucker(0.5)),
            douglas_peucker(&ring, 0.5)
        );
        assert_eq!(
            simplify(&ring, Simplification::DistanceThreshold(1.0)),
            distance_threshold(&ring, 1.0)
        );
    }
}
