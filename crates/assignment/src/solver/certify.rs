//! Optimality certificate for a finished solve.
//!
//! A perfect matching is optimal iff some potentials `u, v` satisfy
//! dual feasibility (`c - u - v >= 0` everywhere) and complementary slackness
//! (`c - u - v = 0` on matched cells). Checked within a tolerance scaled by
//! the magnitudes involved.

use nalgebra::DMatrix;

use super::cfg::UNMATCHED;
use super::kuhn::Duals;
use crate::error::AssignmentError;

fn max_abs(xs: &[f64]) -> f64 {
    xs.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// Fails with `InternalInvariant` when `d` does not certify an optimal matching of `c`.
pub(crate) fn check(c: &DMatrix<f64>, d: &Duals, eps: f64) -> Result<(), AssignmentError> {
    let n = c.nrows();
    if d.u.len() != n || d.v.len() != n || d.col_of_row.len() != n || d.row_of_col.len() != n {
        return Err(AssignmentError::invariant(format!(
            "dual vectors sized ({}, {}, {}, {}) for a {n}x{n} matrix",
            d.u.len(),
            d.v.len(),
            d.col_of_row.len(),
            d.row_of_col.len()
        )));
    }
    for (i, &j) in d.col_of_row.iter().enumerate() {
        if j == UNMATCHED || j >= n || d.row_of_col[j] != i {
            return Err(AssignmentError::invariant(format!(
                "row {i} is not part of a perfect matching"
            )));
        }
    }

    let c_max = c.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let tol = eps * (1.0 + c_max + max_abs(&d.u) + max_abs(&d.v));
    for i in 0..n {
        for j in 0..n {
            let reduced = c[(i, j)] - d.u[i] - d.v[j];
            if reduced < -tol {
                return Err(AssignmentError::invariant(format!(
                    "negative reduced cost {reduced:e} at ({i}, {j})"
                )));
            }
        }
        let j = d.col_of_row[i];
        let slack = c[(i, j)] - d.u[i] - d.v[j];
        if slack.abs() > tol {
            return Err(AssignmentError::invariant(format!(
                "matched cell ({i}, {j}) has reduced cost {slack:e}"
            )));
        }
    }

    let primal: f64 = (0..n).map(|i| c[(i, d.col_of_row[i])]).sum();
    let dual: f64 = d.u.iter().sum::<f64>() + d.v.iter().sum::<f64>();
    if (primal - dual).abs() > tol * (n.max(1) as f64) {
        return Err(AssignmentError::invariant(format!(
            "primal {primal} and dual {dual} objectives disagree"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check;
    use crate::error::AssignmentError;
    use crate::solver::kuhn::{shortest_augmenting, Duals};
    use nalgebra::dmatrix;

    #[test]
    fn accepts_solver_output() {
        let c = dmatrix![4.0, 1.0, 3.0; 2.0, 0.0, 5.0; 3.0, 2.0, 2.0];
        let d = shortest_augmenting(&c).unwrap();
        check(&c, &d, 1e-9).unwrap();
    }

    #[test]
    fn rejects_suboptimal_matching() {
        // Identity matching costs 2; the anti-diagonal costs 0.
        let c = dmatrix![1.0, 0.0; 0.0, 1.0];
        let d = Duals {
            u: vec![1.0, 1.0],
            v: vec![0.0, 0.0],
            col_of_row: vec![0, 1],
            row_of_col: vec![0, 1],
        };
        let err = check(&c, &d, 1e-9).unwrap_err();
        assert!(
            matches!(err, AssignmentError::InternalInvariant { ref reason } if reason.contains("negative reduced cost"))
        );
    }

    #[test]
    fn rejects_broken_matching() {
        let c = dmatrix![1.0, 2.0; 3.0, 4.0];
        let d = Duals {
            u: vec![0.0, 0.0],
            v: vec![0.0, 0.0],
            col_of_row: vec![0, 0],
            row_of_col: vec![0, 1],
        };
        assert!(check(&c, &d, 1e-9).is_err());
    }

    #[test]
    fn rejects_slack_on_matched_cell() {
        let c = dmatrix![5.0];
        let d = Duals {
            u: vec![1.0],
            v: vec![1.0],
            col_of_row: vec![0],
            row_of_col: vec![0],
        };
        let err = check(&c, &d, 1e-9).unwrap_err();
        assert!(err.to_string().contains("matched cell"));
    }
}
