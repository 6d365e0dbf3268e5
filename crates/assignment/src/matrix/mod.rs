//! Cost matrices and their line-oriented sparse text form.
//!
//! - `CostMatrix`: validated, immutable n×m table of finite costs.
//! - `sparse`: `width height count` header followed by `x y value` lines.
//!
//! Code cross-refs: `solver::AssignmentSolver`, `rand::draw_costs`

pub mod sparse;
mod types;

pub use sparse::{parse_sparse, parse_sparse_with_limit, to_sparse_string, write_sparse, SparseLayout};
pub use types::CostMatrix;
