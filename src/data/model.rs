use std::fmt;

use crate::error::{Result, RibbonError};

// ---------------------------------------------------------------------------
// Matrix – dense row-major 2D intensity grid
// ---------------------------------------------------------------------------

/// A dense, row-major matrix of intensity values.
///
/// Before rotation rows are channels and columns are bins; after
/// [`Matrix::rot90`] rows are bins (highest first) and columns are channels,
/// which is exactly the top-to-bottom order of the displayed image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Number of cells in a `rows × cols` matrix, if it fits in `usize`.
    pub fn cell_count(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols)
            .ok_or(RibbonError::TooLarge { rows, cols })
    }

    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self> {
        let len = Self::cell_count(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            values: vec![value; len],
        })
    }

    /// Build from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        let expected = Self::cell_count(rows, cols)?;
        if values.len() != expected {
            return Err(RibbonError::Shape {
                rows,
                cols,
                expected,
                actual: values.len(),
            });
        }
        Ok(Matrix { rows, cols, values })
    }

    /// Build from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(RibbonError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: n_cols,
                });
            }
            values.extend(row);
        }
        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            values,
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of all cells.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set a single cell. Out-of-range coordinates are ignored and reported
    /// through the return value.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        if row < self.rows && col < self.cols {
            self.values[row * self.cols + col] = value;
            true
        } else {
            false
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.values[start..start + self.cols])
        } else {
            None
        }
    }

    /// Rotate a quarter turn counter-clockwise.
    ///
    /// `out[i][j] = self[j][cols - 1 - i]`, output shape is `(cols, rows)`.
    pub fn rot90(&self) -> Matrix {
        let (rows, cols) = (self.cols, self.rows);
        let mut values = Vec::with_capacity(self.values.len());
        for i in 0..rows {
            for j in 0..cols {
                values.push(self.values[j * self.cols + (self.cols - 1 - i)]);
            }
        }
        Matrix { rows, cols, values }
    }

    /// Rotate `k` quarter turns counter-clockwise; negative `k` turns
    /// clockwise.
    pub fn rot90_k(&self, k: i32) -> Matrix {
        let turns = k.rem_euclid(4);
        let mut out = self.clone();
        for _ in 0..turns {
            out = out.rot90();
        }
        out
    }

    /// Finite minimum and maximum, or `None` if there are no finite cells.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Keep only the listed columns, in the given order. Indices past the
    /// last column are skipped.
    pub fn select_columns(&self, columns: &[usize]) -> Matrix {
        let keep: Vec<usize> = columns.iter().copied().filter(|&c| c < self.cols).collect();
        let mut values = Vec::with_capacity(self.rows * keep.len());
        for r in 0..self.rows {
            let row = &self.values[r * self.cols..(r + 1) * self.cols];
            values.extend(keep.iter().map(|&c| row[c]));
        }
        Matrix {
            rows: self.rows,
            cols: keep.len(),
            values,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} matrix", self.rows, self.cols)
    }
}
