//! Shortest augmenting path over a square cost matrix (O(n³)).
//!
//! Invariant kept between insertions: `c[i][j] - u[i] - v[j] >= 0` for all
//! cells and `= 0` on matched cells. Column index `n` is a virtual root that
//! holds the row currently being inserted.

use nalgebra::DMatrix;

use super::cfg::UNMATCHED;
use crate::error::AssignmentError;

/// Dual solution plus the perfect matching it certifies.
#[derive(Clone, Debug)]
pub(crate) struct Duals {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub col_of_row: Vec<usize>,
    pub row_of_col: Vec<usize>,
}

/// Potentials from real minima: `u[i] = min_j c[i][j]`, then
/// `v[j] = min_i (c[i][j] - u[i])`. Every reduced cost starts non-negative.
fn initial_potentials(c: &DMatrix<f64>) -> (Vec<f64>, Vec<f64>) {
    let n = c.nrows();
    let u: Vec<f64> = (0..n).map(|i| c.row(i).min()).collect();
    let v: Vec<f64> = (0..n)
        .map(|j| {
            (0..n)
                .map(|i| c[(i, j)] - u[i])
                .fold(f64::INFINITY, f64::min)
        })
        .collect();
    (u, v)
}

/// Minimum-cost perfect matching of a square matrix.
///
/// Rows are inserted in increasing order. Among columns with equal slack the
/// lowest index is taken, so identical input gives identical output.
pub(crate) fn shortest_augmenting(c: &DMatrix<f64>) -> Result<Duals, AssignmentError> {
    let n = c.nrows();
    if c.ncols() != n {
        return Err(AssignmentError::invariant(format!(
            "working matrix must be square, got {}x{}",
            n,
            c.ncols()
        )));
    }
    let root = n;
    let (mut u, mut v) = initial_potentials(c);
    v.push(0.0);
    let mut row_of_col = vec![UNMATCHED; n + 1];
    let mut way = vec![root; n + 1];
    let mut minv = vec![f64::INFINITY; n + 1];
    let mut used = vec![false; n + 1];

    for i in 0..n {
        row_of_col[root] = i;
        minv.fill(f64::INFINITY);
        used.fill(false);
        let mut j0 = root;
        loop {
            used[j0] = true;
            let i0 = row_of_col[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = root;
            for j in 0..n {
                if used[j] {
                    continue;
                }
                let cur = c[(i0, j)] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            if j1 == root {
                return Err(AssignmentError::invariant(format!(
                    "row {i}: no reachable column while {} columns remain unmatched",
                    row_of_col[..n].iter().filter(|&&r| r == UNMATCHED).count()
                )));
            }
            for j in 0..=n {
                if used[j] {
                    u[row_of_col[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if row_of_col[j0] == UNMATCHED {
                break;
            }
        }
        // Flip the alternating path back to the root.
        while j0 != root {
            let prev = way[j0];
            row_of_col[j0] = row_of_col[prev];
            j0 = prev;
        }
    }

    row_of_col.truncate(n);
    v.truncate(n);
    let mut col_of_row = vec![UNMATCHED; n];
    for (j, &r) in row_of_col.iter().enumerate() {
        if r == UNMATCHED || col_of_row[r] != UNMATCHED {
            return Err(AssignmentError::invariant(format!(
                "column {j} left with an invalid row after augmentation"
            )));
        }
        col_of_row[r] = j;
    }
    Ok(Duals {
        u,
        v,
        col_of_row,
        row_of_col,
    })
}
