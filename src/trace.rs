//! Boundary contour tracing over occupancy masks.
//!
//! Scans the grid row-major and, for every untraced boundary cell,
//! follows the foreground/background interface with Moore-neighbor
//! tracing (8-connected, fixed clockwise search order). Each trace ends
//! in one of two terminal states:
//! - **closed**: the walk returned to its start cell after at least
//!   [`MIN_CLOSE_STEPS`] steps
//! - **open**: no unvisited boundary neighbor remained, or the step cap
//!   tripped (pathological masks); the partial contour is still returned
//!
//! The tracer never fails: a mask with no set cells yields an empty
//! list. Noise filtering and contour selection happen one layer up.

use log::debug;

use crate::mask::GridMask;

/// Minimum steps before a trace may close on its start cell. Guards
/// against trivial 1-2 cell false closures.
pub const MIN_CLOSE_STEPS: usize = 8;

/// Moore neighborhood directions (8-connected, clockwise from right).
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),   // 0: right
    (1, 1),   // 1: down-right
    (0, 1),   // 2: down
    (-1, 1),  // 3: down-left
    (-1, 0),  // 4: left
    (-1, -1), // 5: up-left
    (0, -1),  // 6: up
    (1, -1),  // 7: up-right
];

/// A traced boundary loop in integer grid coordinates.
///
/// Points are ordered along the walk and the loop is implicitly closed:
/// the last point connects back to the first. `closed` records whether
/// the trace actually returned to its start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
    pub closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trace all boundary contours of a mask.
///
/// Cells are marked visited as they are appended, so each boundary cell
/// belongs to at most one contour. Contours of any length >= 1 are
/// returned, including single isolated cells.
pub fn trace_contours(mask: &GridMask) -> Vec<Contour> {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; width * height];
    let mut contours = Vec::new();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if mask.is_boundary(x, y) && !visited[y as usize * width + x as usize] {
                contours.push(trace_from(mask, x, y, &mut visited));
            }
        }
    }

    debug!(
        "traced {} contour(s) over {}x{} mask",
        contours.len(),
        width,
        height
    );

    contours
}

/// Follow the boundary starting at a known boundary cell.
fn trace_from(mask: &GridMask, start_x: i32, start_y: i32, visited: &mut [bool]) -> Contour {
    let width = mask.width();
    let mut points = Vec::new();

    // Initial backtrack direction: first unset neighbor in search order
    let mut dir = 0usize;
    for (i, &(dx, dy)) in DIRECTIONS.iter().enumerate() {
        if !mask.is_set_clamped(start_x + dx, start_y + dy) {
            dir = i;
            break;
        }
    }

    let mut x = start_x;
    let mut y = start_y;

    // Hard cap against cyclic walks on pathological masks
    let max_steps = 4 * mask.width().max(mask.height());
    let mut steps = 0;

    loop {
        let idx = y as usize * width + x as usize;
        if !visited[idx] {
            visited[idx] = true;
            points.push((x, y));
        }

        // Resume the clockwise search just past the backtrack direction
        let search_start = (dir + 5) % 8;

        let mut advanced = false;
        for i in 0..8 {
            let check_dir = (search_start + i) % 8;
            let (dx, dy) = DIRECTIONS[check_dir];
            let nx = x + dx;
            let ny = y + dy;

            if !mask.is_set_clamped(nx, ny) {
                continue;
            }

            if nx == start_x && ny == start_y && steps >= MIN_CLOSE_STEPS {
                return Contour {
                    points,
                    closed: true,
                };
            }

            if mask.is_boundary(nx, ny) && !visited[ny as usize * width + nx as usize] {
                x = nx;
                y = ny;
                dir = check_dir;
                advanced = true;
                break;
            }
        }

        if !advanced {
            // Dangling boundary: no continuation, return what we have
            return Contour {
                points,
                closed: false,
            };
        }

        steps += 1;
        if steps >= max_steps {
            debug!("trace abandoned after {steps} steps");
            return Contour {
                points,
                closed: false,
            };
        }
    }
}

/// Pick the dominant contour: the one with the most points, ties broken
/// by scan order. Contours with `min_points` or fewer points are
/// discarded as noise. `None` when nothing qualifies.
pub fn dominant_contour(contours: Vec<Contour>, min_points: usize) -> Option<Contour> {
    let mut best: Option<Contour> = None;
    for contour in contours {
        if contour.len() <= min_points {
            continue;
        }
        match &best {
            Some(b) if contour.len() <= b.len() => {}
            _ => best = Some(contour),
        }
    }
    best
}
