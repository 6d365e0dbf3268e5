//! Timing harness: solve a stream of random matrices and average.

use std::time::Instant;

use anyhow::{Context, Result};
use assignment::api::{draw_costs, AssignmentSolver, Objective, RandomCostCfg, ReplayToken};

const THOUSAND: u64 = 1_000;
const MILLION: u64 = THOUSAND * THOUSAND;
const BILLION: u64 = MILLION * THOUSAND;

/// Progress milestone for the `total`-th solve: every step up to 11, then
/// dozens, hundreds, thousands, millions, billions.
pub fn progress_label(total: u64) -> Option<String> {
    if total < 12 {
        Some(total.to_string())
    } else if total < 100 && total % 12 == 0 {
        Some(format!("{} Dozen", total / 12))
    } else if total < THOUSAND && total % 100 == 0 {
        Some(format!("{} Hundred", total / 100))
    } else if total < MILLION && total % THOUSAND == 0 {
        Some(format!("{} Thousand", total / THOUSAND))
    } else if total < BILLION && total % MILLION == 0 {
        Some(format!("{} Million", total / MILLION))
    } else if total % BILLION == 0 {
        Some(format!("{} Billion", total / BILLION))
    } else {
        None
    }
}

#[derive(Debug)]
pub struct SpeedSummary {
    pub todo: u64,
    pub rows: usize,
    pub cols: usize,
    pub avg_ms: f64,
}

/// Solve `todo` matrices of `rows`×`cols` integers in `[0, rows * cols]`.
/// Only the solve itself is timed; milestones go to `on_progress`.
pub fn run<F>(
    solver: &AssignmentSolver,
    todo: u64,
    (rows, cols): (usize, usize),
    seed: u64,
    mut on_progress: F,
) -> Result<SpeedSummary>
where
    F: FnMut(&str),
{
    let cfg = RandomCostCfg::speed_rect(rows, cols);
    let mut elapsed = 0.0;
    for total in 1..=todo {
        let m = draw_costs(cfg, ReplayToken::new(seed, total))?;
        if let Some(label) = progress_label(total) {
            on_progress(&label);
        }
        let start = Instant::now();
        solver
            .solve(&m, Objective::Minimize)
            .with_context(|| format!("speed run {total} ({rows}x{cols}, seed {seed})"))?;
        elapsed += start.elapsed().as_secs_f64() * 1e3;
    }
    let avg_ms = if todo == 0 { 0.0 } else { elapsed / todo as f64 };
    tracing::debug!(todo, rows, cols, seed, avg_ms, "speed_done");
    Ok(SpeedSummary {
        todo,
        rows,
        cols,
        avg_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones() {
        assert_eq!(progress_label(1).as_deref(), Some("1"));
        assert_eq!(progress_label(11).as_deref(), Some("11"));
        assert_eq!(progress_label(13), None);
        assert_eq!(progress_label(24).as_deref(), Some("2 Dozen"));
        assert_eq!(progress_label(96).as_deref(), Some("8 Dozen"));
        assert_eq!(progress_label(300).as_deref(), Some("3 Hundred"));
        assert_eq!(progress_label(350), None);
        assert_eq!(progress_label(5_000).as_deref(), Some("5 Thousand"));
        assert_eq!(progress_label(2 * MILLION).as_deref(), Some("2 Million"));
        assert_eq!(progress_label(3 * BILLION).as_deref(), Some("3 Billion"));
    }

    #[test]
    fn run_reports_every_early_step() {
        let mut seen = Vec::new();
        let summary = run(&AssignmentSolver::default(), 13, (8, 8), 1, |l| {
            seen.push(l.to_string())
        })
        .unwrap();
        assert_eq!(seen.len(), 12);
        assert_eq!(seen.last().map(String::as_str), Some("1 Dozen"));
        assert_eq!(summary.todo, 13);
        assert!(summary.avg_ms >= 0.0);
    }

    #[test]
    fn zero_runs_average_to_zero() {
        let s = run(&AssignmentSolver::default(), 0, (4, 4), 0, |_| {}).unwrap();
        assert_eq!(s.avg_ms, 0.0);
    }

    #[test]
    fn rectangular_runs_in_both_orientations() {
        for shape in [(3, 9), (9, 3)] {
            let s = run(&AssignmentSolver::default(), 5, shape, 2, |_| {}).unwrap();
            assert_eq!((s.rows, s.cols), shape);
            assert_eq!(s.todo, 5);
        }
    }
}
