//! Validated cost matrix backed by `nalgebra::DMatrix<f64>`.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::AssignmentError;

/// Immutable n×m table of finite costs (rows = agents, columns = tasks).
///
/// Every constructor validates its input, so a `CostMatrix` in hand is always
/// rectangular and finite.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    m: DMatrix<f64>,
}

impl CostMatrix {
    /// Build from row vectors. Fails on jagged rows or non-finite entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AssignmentError> {
        let n = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(AssignmentError::invalid(format!(
                    "jagged matrix: row {i} has {} entries, expected {width}",
                    row.len()
                )));
            }
        }
        let m = DMatrix::from_fn(n, width, |i, j| rows[i][j]);
        Self::from_dmatrix(m)
    }

    /// Wrap an existing matrix after checking that every entry is finite.
    pub fn from_dmatrix(m: DMatrix<f64>) -> Result<Self, AssignmentError> {
        for j in 0..m.ncols() {
            for i in 0..m.nrows() {
                let c = m[(i, j)];
                if !c.is_finite() {
                    return Err(AssignmentError::invalid(format!(
                        "non-finite cost {c} at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(Self { m })
    }

    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            m: DMatrix::zeros(rows, cols),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.m.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.m.ncols()
    }

    /// True when either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.m.nrows() == 0 || self.m.ncols() == 0
    }

    /// Side of the padded square working matrix.
    #[inline]
    pub fn square_dim(&self) -> usize {
        self.m.nrows().max(self.m.ncols())
    }

    /// Cost at `(row, col)`; `None` outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.m.get((row, col)).copied()
    }

    #[inline]
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.m
    }

    /// Largest absolute entry (0 for an empty matrix).
    pub fn max_abs(&self) -> f64 {
        self.m.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()))
    }

    /// Exact negation, used to turn maximization into minimization.
    pub fn negated(&self) -> Self {
        Self { m: -&self.m }
    }

    /// Square working copy with zero-cost dummy rows/columns appended.
    pub(crate) fn padded_square(&self) -> DMatrix<f64> {
        let n = self.square_dim();
        let (rows, cols) = self.m.shape();
        DMatrix::from_fn(n, n, |i, j| {
            if i < rows && j < cols {
                self.m[(i, j)]
            } else {
                0.0
            }
        })
    }
}

/// Right-aligned bracketed rows, e.g. `[1, 10]` / `[2,  3]`.
impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.m.iter().map(|c| c.to_string().len()).max().unwrap_or(0);
        for i in 0..self.m.nrows() {
            write!(f, "[")?;
            for j in 0..self.m.ncols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>width$}", self.m[(i, j)].to_string())?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
