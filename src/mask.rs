//! Occupancy masks and boundary-cell classification.
//!
//! A [`GridMask`] is a normalized, read-only view over the occupancy
//! data returned by a segmentation model. Two concrete layouts occur in
//! the wild and both are supported:
//! - a flat byte buffer with explicit width/height (canvas / wasm path)
//! - nested row arrays, `mask[y][x] > 0` meaning occupied (JSON path)
//!
//! Construction validates the declared shape against the supplied data;
//! everything downstream is written once against `is_set(x, y)`.

use ndarray::ArrayView2;

use crate::error::ExtractError;
use crate::geometry::Point;

#[derive(Debug)]
enum MaskData {
    Flat(Vec<u8>),
    Rows(Vec<Vec<u8>>),
}

/// Normalized view over 2D occupancy data.
#[derive(Debug)]
pub struct GridMask {
    width: usize,
    height: usize,
    data: MaskData,
}

impl GridMask {
    /// Wrap a flat buffer in row-major order.
    ///
    /// Fails with [`ExtractError::ShapeMismatch`] if `data.len()` does
    /// not equal `width * height`, or if either dimension is zero.
    pub fn from_flat(data: Vec<u8>, width: usize, height: usize) -> Result<Self, ExtractError> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(ExtractError::ShapeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data: MaskData::Flat(data),
        })
    }

    /// Wrap nested row arrays (`rows[y][x]`).
    ///
    /// The width is taken from the first row; every row must match it.
    /// An empty grid (no rows, or empty rows) is rejected.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ExtractError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        if width == 0 || height == 0 {
            return Err(ExtractError::ShapeMismatch {
                width,
                height,
                actual: 0,
            });
        }

        for row in &rows {
            if row.len() != width {
                return Err(ExtractError::ShapeMismatch {
                    width,
                    height,
                    actual: row.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            data: MaskData::Rows(rows),
        })
    }

    /// Wrap a 2D ndarray view of shape (height, width).
    ///
    /// The data is copied into a flat buffer; the view's own shape is
    /// authoritative so no validation can fail.
    pub fn from_array(view: ArrayView2<u8>) -> Self {
        let (height, width) = view.dim();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(view[[y, x]]);
            }
        }
        Self {
            width,
            height,
            data: MaskData::Flat(data),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (x, y) is occupied. Coordinates must be in
    /// range; out-of-range queries are a caller error.
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        match &self.data {
            MaskData::Flat(data) => data[y * self.width + x] > 0,
            MaskData::Rows(rows) => rows[y][x] > 0,
        }
    }

    /// Like `is_set`, but treats out-of-range coordinates as unset.
    #[inline]
    pub(crate) fn is_set_clamped(&self, x: i32, y: i32) -> bool {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.is_set(x as usize, y as usize)
        } else {
            false
        }
    }

    /// Whether (x, y) is a boundary cell: set, and either on the grid
    /// border or adjacent (8-connected) to an unset cell.
    pub fn is_boundary(&self, x: i32, y: i32) -> bool {
        if !self.is_set_clamped(x, y) {
            return false;
        }

        if x == 0 || y == 0 || x as usize == self.width - 1 || y as usize == self.height - 1 {
            return true;
        }

        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                if (dx != 0 || dy != 0) && !self.is_set_clamped(x + dx, y + dy) {
                    return true;
                }
            }
        }

        false
    }

    /// Brute-force bounding rectangle of all occupied cells, as
    /// `(min_x, min_y, max_x, max_y)` inclusive. `None` when no cell is
    /// set. Used for fallback shapes and as the ground truth in tests.
    pub fn occupied_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut min_x = self.width;
        let mut min_y = self.height;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut any = false;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_set(x, y) {
                    any = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        any.then_some((min_x, min_y, max_x, max_y))
    }

    /// Down-sampled list of occupied cells: every `step`-th row and
    /// column, scaled into display space.
    ///
    /// This is a coarse debug/overlay artifact, distinct from the
    /// simplified polygon boundary.
    pub fn sample_coordinates(&self, step: usize, scale: f32) -> Vec<Point> {
        let step = step.max(1);
        let mut coords = Vec::new();
        for y in (0..self.height).step_by(step) {
            for x in (0..self.width).step_by(step) {
                if self.is_set(x, y) {
                    coords.push(Point::new(x as f32 * scale, y as f32 * scale));
                }
            }
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn block_mask() -> GridMask {
        // 10x10 with a 4x4 block at (2..=5, 2..=5)
        let mut data = vec![0u8; 100];
        for y in 2..6 {
            for x in 2..6 {
                data[y * 10 + x] = 255;
            }
        }
        GridMask::from_flat(data, 10, 10).unwrap()
    }

    #[test]
    fn test_from_flat_shape_mismatch() {
        let err = GridMask::from_flat(vec![0u8; 99], 10, 10).unwrap_err();
        assert_eq!(
            err,
            ExtractError::ShapeMismatch {
                width: 10,
                height: 10,
                actual: 99
            }
        );
    }

    #[test]
    fn test_from_flat_zero_dimensions_rejected() {
        assert!(GridMask::from_flat(Vec::new(), 0, 0).is_err());
        assert!(GridMask::from_flat(Vec::new(), 0, 5).is_err());
        assert!(GridMask::from_flat(Vec::new(), 5, 0).is_err());
    }

    #[test]
    fn test_from_rows_ragged_rejected() {
        let rows = vec![vec![0u8; 4], vec![0u8; 3]];
        assert!(matches!(
            GridMask::from_rows(rows),
            Err(ExtractError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_rows_empty_rejected() {
        assert!(GridMask::from_rows(Vec::new()).is_err());
        assert!(GridMask::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_from_array_dimensions() {
        let arr = Array2::<u8>::zeros((3, 5));
        let mask = GridMask::from_array(arr.view());
        assert_eq!(mask.width(), 5);
        assert_eq!(mask.height(), 3);
    }

    #[test]
    fn test_is_set_rows_and_flat_agree() {
        let rows = vec![vec![0u8, 1], vec![2, 0]];
        let from_rows = GridMask::from_rows(rows).unwrap();
        let from_flat = GridMask::from_flat(vec![0, 1, 2, 0], 2, 2).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(from_rows.is_set(x, y), from_flat.is_set(x, y));
            }
        }
    }

    #[test]
    fn test_boundary_classification() {
        let mask = block_mask();
        // Ring of the block is boundary, interior is not
        assert!(mask.is_boundary(2, 2));
        assert!(mask.is_boundary(5, 3));
        assert!(!mask.is_boundary(3, 3));
        assert!(!mask.is_boundary(4, 4));
        // Unset cells are never boundary
        assert!(!mask.is_boundary(0, 0));
        assert!(!mask.is_boundary(-1, 2));
    }

    #[test]
    fn test_border_cells_are_boundary() {
        let mask = GridMask::from_flat(vec![255u8; 9], 3, 3).unwrap();
        // Fully occupied grid: every border cell is boundary, center is not
        assert!(mask.is_boundary(0, 0));
        assert!(mask.is_boundary(2, 1));
        assert!(!mask.is_boundary(1, 1));
    }

    #[test]
    fn test_occupied_bounds() {
        let mask = block_mask();
        assert_eq!(mask.occupied_bounds(), Some((2, 2, 5, 5)));

        let empty = GridMask::from_flat(vec![0u8; 100], 10, 10).unwrap();
        assert_eq!(empty.occupied_bounds(), None);
    }

    #[test]
    fn test_sample_coordinates_step_and_scale() {
        let mask = block_mask();
        let sample = mask.sample_coordinates(2, 2.0);
        // Rows/cols 2 and 4 of the block survive the step-2 sampling
        assert_eq!(sample.len(), 4);
        assert!(sample.contains(&Point::new(4.0, 4.0)));
        assert!(sample.contains(&Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_sample_step_zero_treated_as_one() {
        let mask = block_mask();
        assert_eq!(mask.sample_coordinates(0, 1.0).len(), 16);
    }
}
