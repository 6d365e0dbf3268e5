//! Minimum/maximum-cost assignment via a primal-dual shortest augmenting path.
//!
//! Purpose
//! - Pair every row of the smaller side of a cost matrix with a distinct
//!   column so that the total cost is optimal, deterministically.
//!
//! Model
//! - The matrix is padded to a square with zero-cost dummies, rows are
//!   inserted one at a time (Kuhn–Munkres with Jonker–Volgenant style
//!   Dijkstra scans), and pairs touching a dummy are stripped at the end.
//! - Row/column potentials start from real minima so that exact zero costs
//!   are handled like any other value.
//! - Each result is certified by checking the dual solution before return.
//!
//! Code cross-refs: `matrix::CostMatrix`, `error::AssignmentError`

mod certify;
mod cfg;
mod kuhn;
mod types;

pub use types::{Assignment, AssignmentSolver, Objective, Pair, SolverCfg};

use crate::error::AssignmentError;
use crate::matrix::CostMatrix;

/// Solve with `SolverCfg::default()`.
pub fn solve(matrix: &CostMatrix, objective: Objective) -> Result<Assignment, AssignmentError> {
    AssignmentSolver::default().solve(matrix, objective)
}

/// Validate raw rows (jagged / non-finite ⇒ `InvalidInput`) and solve.
pub fn solve_rows(rows: &[Vec<f64>], objective: Objective) -> Result<Assignment, AssignmentError> {
    let matrix = CostMatrix::from_rows(rows)?;
    solve(&matrix, objective)
}
