//! Public solver types: objective, configuration, result, and the solver handle.

use super::cfg::CERT_EPS;
use super::{certify, kuhn};
use crate::error::AssignmentError;
use crate::matrix::CostMatrix;

/// Optimization direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Objective {
    #[default]
    Minimize,
    Maximize,
}

/// Solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct SolverCfg {
    /// Ceiling on both the row and the column count. `None` means unbounded.
    pub max_dim: Option<usize>,
    /// Certify the dual solution before returning.
    pub verify: bool,
    /// Relative tolerance for the certificate.
    pub eps: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            max_dim: None,
            verify: true,
            eps: CERT_EPS,
        }
    }
}

/// One matched (row, column) cell with its original cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pair {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Optimal assignment: pairs in increasing row order plus their total.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub pairs: Vec<Pair>,
    pub total: f64,
    pub objective: Objective,
}

impl Assignment {
    fn empty(objective: Objective) -> Self {
        Self {
            pairs: Vec::new(),
            total: 0.0,
            objective,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Column matched to `row`, if the row is part of the assignment.
    pub fn col_of(&self, row: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&row, |p| p.row)
            .ok()
            .map(|k| self.pairs[k].col)
    }

    /// `(row, col)` index pairs, row-ordered.
    pub fn index_pairs(&self) -> Vec<(usize, usize)> {
        self.pairs.iter().map(|p| (p.row, p.col)).collect()
    }
}

/// Stateless solver handle; safe to share across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignmentSolver {
    cfg: SolverCfg,
}

impl AssignmentSolver {
    pub fn new(cfg: SolverCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &SolverCfg {
        &self.cfg
    }

    fn check_size(&self, matrix: &CostMatrix) -> Result<(), AssignmentError> {
        if let Some(limit) = self.cfg.max_dim {
            let (rows, cols) = (matrix.nrows(), matrix.ncols());
            if rows > limit || cols > limit {
                return Err(AssignmentError::TooLarge { rows, cols, limit });
            }
        }
        Ok(())
    }

    /// Optimal assignment of the smaller side of `matrix` into the larger.
    ///
    /// Values and `total` are read from `matrix` itself, also when maximizing.
    /// A total that overflows `f64` is reported as `InvalidInput`.
    pub fn solve(
        &self,
        matrix: &CostMatrix,
        objective: Objective,
    ) -> Result<Assignment, AssignmentError> {
        self.check_size(matrix)?;
        if matrix.is_empty() {
            return Ok(Assignment::empty(objective));
        }
        let work = match objective {
            Objective::Minimize => matrix.padded_square(),
            Objective::Maximize => matrix.negated().padded_square(),
        };
        let duals = kuhn::shortest_augmenting(&work)?;
        if self.cfg.verify {
            certify::check(&work, &duals, self.cfg.eps)?;
        }

        let (rows, cols) = (matrix.nrows(), matrix.ncols());
        let mut pairs = Vec::with_capacity(rows.min(cols));
        for (row, &col) in duals.col_of_row.iter().take(rows).enumerate() {
            if let Some(value) = matrix.get(row, col) {
                pairs.push(Pair { row, col, value });
            }
        }
        if pairs.len() != rows.min(cols) {
            return Err(AssignmentError::invariant(format!(
                "{} real pairs for a {rows}x{cols} matrix",
                pairs.len()
            )));
        }
        let total: f64 = pairs.iter().map(|p| p.value).sum();
        if !total.is_finite() {
            return Err(AssignmentError::invalid(format!(
                "total of the optimal assignment overflows f64 (sum is {total})"
            )));
        }
        Ok(Assignment {
            pairs,
            total,
            objective,
        })
    }
}
