//! Reproducible random cost matrices for fixtures, timing, and property checks.
//!
//! Model
//! - Each draw is addressed by a replay token `(seed, index)` mixed into one
//!   `StdRng`, so a stream of matrices can be regenerated entry by entry.
//! - `CostDist::Integer` mirrors the timing fixtures: uniform integers in
//!   `[0, max]`, with `max = rows * cols` for speed runs.
//!
//! Code cross-refs: `matrix::CostMatrix`, `solver::solve`

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AssignmentError;
use crate::matrix::CostMatrix;

/// Largest integer bound that still converts to `f64` exactly.
const MAX_EXACT_INT: u64 = 1 << 53;

/// Entry distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CostDist {
    /// Uniform integers in `[0, max]`.
    Integer { max: u64 },
    /// Uniform reals in `[lo, hi)`.
    Uniform { lo: f64, hi: f64 },
}

/// Shape plus entry distribution of a random matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomCostCfg {
    pub rows: usize,
    pub cols: usize,
    pub dist: CostDist,
}

impl RandomCostCfg {
    /// Square `size`×`size` integers in `[0, size²]`, as used by speed runs.
    pub fn speed(size: usize) -> Self {
        Self::speed_rect(size, size)
    }

    /// `rows`×`cols` integers in `[0, rows * cols]`.
    pub fn speed_rect(rows: usize, cols: usize) -> Self {
        let max = (rows as u64).saturating_mul(cols as u64);
        Self {
            rows,
            cols,
            dist: CostDist::Integer { max },
        }
    }

    fn validate(&self) -> Result<(), AssignmentError> {
        match self.dist {
            CostDist::Integer { max } if max > MAX_EXACT_INT => Err(AssignmentError::invalid(
                format!("integer bound {max} is not exactly representable as f64"),
            )),
            CostDist::Uniform { lo, hi } if !(lo.is_finite() && hi.is_finite()) => {
                Err(AssignmentError::invalid("uniform bounds must be finite"))
            }
            CostDist::Uniform { lo, hi } if lo >= hi => Err(AssignmentError::invalid(
                format!("uniform bounds need lo < hi, got [{lo}, {hi})"),
            )),
            _ => Ok(()),
        }
    }
}

/// Replay token; the same token always yields the same matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the following draw in the same stream.
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw one matrix. Entries are filled row by row.
pub fn draw_costs(cfg: RandomCostCfg, tok: ReplayToken) -> Result<CostMatrix, AssignmentError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let mut m = DMatrix::<f64>::zeros(cfg.rows, cfg.cols);
    for i in 0..cfg.rows {
        for j in 0..cfg.cols {
            m[(i, j)] = match cfg.dist {
                CostDist::Integer { max } => rng.gen_range(0..=max) as f64,
                CostDist::Uniform { lo, hi } => rng.gen_range(lo..hi),
            };
        }
    }
    CostMatrix::from_dmatrix(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_token_same_matrix() {
        let cfg = RandomCostCfg::speed(8);
        let tok = ReplayToken::new(7, 3);
        assert_eq!(draw_costs(cfg, tok).unwrap(), draw_costs(cfg, tok).unwrap());
        assert_ne!(
            draw_costs(cfg, tok).unwrap(),
            draw_costs(cfg, tok.next()).unwrap()
        );
    }

    #[test]
    fn integer_entries_stay_in_range() {
        let cfg = RandomCostCfg::speed(6);
        let m = draw_costs(cfg, ReplayToken::default()).unwrap();
        assert_eq!((m.nrows(), m.ncols()), (6, 6));
        for &c in m.as_dmatrix().iter() {
            assert!((0.0..=36.0).contains(&c));
            assert_eq!(c.fract(), 0.0);
        }
    }

    #[test]
    fn rectangular_speed_bound_is_cell_count() {
        let cfg = RandomCostCfg::speed_rect(3, 7);
        assert_eq!((cfg.rows, cfg.cols), (3, 7));
        assert_eq!(cfg.dist, CostDist::Integer { max: 21 });
        assert_eq!(RandomCostCfg::speed(5), RandomCostCfg::speed_rect(5, 5));
        let m = draw_costs(cfg, ReplayToken::new(2, 1)).unwrap();
        assert_eq!((m.nrows(), m.ncols()), (3, 7));
        assert!(m.as_dmatrix().iter().all(|&c| (0.0..=21.0).contains(&c)));
    }

    #[test]
    fn uniform_entries_stay_in_range() {
        let cfg = RandomCostCfg {
            rows: 3,
            cols: 9,
            dist: CostDist::Uniform { lo: -2.0, hi: 0.5 },
        };
        let m = draw_costs(cfg, ReplayToken::new(1, 0)).unwrap();
        assert!(m.as_dmatrix().iter().all(|&c| (-2.0..0.5).contains(&c)));
    }

    #[test]
    fn bad_bounds_are_invalid_input() {
        let bad = [
            CostDist::Uniform { lo: 1.0, hi: 1.0 },
            CostDist::Uniform {
                lo: 0.0,
                hi: f64::INFINITY,
            },
            CostDist::Integer { max: u64::MAX },
        ];
        for dist in bad {
            let cfg = RandomCostCfg {
                rows: 2,
                cols: 2,
                dist,
            };
            assert!(matches!(
                draw_costs(cfg, ReplayToken::default()),
                Err(AssignmentError::InvalidInput { .. })
            ));
        }
    }
}
