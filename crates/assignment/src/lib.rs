//! Minimum/maximum-cost bipartite assignment.
//!
//! - `matrix`: validated cost matrices and the sparse text codec.
//! - `solver`: Kuhn–Munkres style primal-dual shortest augmenting path, O(n³).
//! - `rand`: reproducible random matrices for fixtures and timing.
//!
//! Every solve is self-contained (potentials and labels live on the stack of
//! one call), so independent matrices can be solved from many threads.

pub mod api;
pub mod error;
pub mod matrix;
pub mod rand;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::AssignmentError;
pub use matrix::CostMatrix;
pub use solver::{solve, solve_rows, Assignment, AssignmentSolver, Objective, Pair, SolverCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::AssignmentError;
    pub use crate::matrix::{parse_sparse, to_sparse_string, CostMatrix, SparseLayout};
    pub use crate::solver::{solve, Assignment, AssignmentSolver, Objective, Pair, SolverCfg};
}
