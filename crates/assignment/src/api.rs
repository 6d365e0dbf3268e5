//! Curated surface for the CLI and benches.
//!
//! Groups the entry points callers outside the crate actually use; the
//! module tree stays free to move underneath.

// Matrices and the sparse codec
pub use crate::matrix::{
    parse_sparse, parse_sparse_with_limit, to_sparse_string, write_sparse, CostMatrix, SparseLayout,
};
// Solver
pub use crate::solver::{solve, solve_rows, Assignment, AssignmentSolver, Objective, Pair, SolverCfg};
// Random matrices
pub use crate::rand::{draw_costs, CostDist, RandomCostCfg, ReplayToken};
// Errors
pub use crate::error::AssignmentError;
