//! Text and JSON renderings of a solved matrix.

use assignment::api::{Assignment, CostMatrix, Objective};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PairRow {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Machine-readable result of `solve`, also written by `--out`.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub input: String,
    pub rows: usize,
    pub cols: usize,
    pub objective: &'static str,
    pub pairs: Vec<PairRow>,
    pub total: f64,
    pub elapsed_ms: f64,
}

impl SolveReport {
    pub fn new(input: &str, matrix: &CostMatrix, a: &Assignment, elapsed_ms: f64) -> Self {
        Self {
            input: input.to_string(),
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            objective: objective_name(a.objective),
            pairs: a
                .pairs
                .iter()
                .map(|p| PairRow {
                    row: p.row,
                    col: p.col,
                    value: p.value,
                })
                .collect(),
            total: a.total,
            elapsed_ms,
        }
    }
}

pub fn objective_name(o: Objective) -> &'static str {
    match o {
        Objective::Minimize => "minimize",
        Objective::Maximize => "maximize",
    }
}

/// Banner, matrix, one `(row, col) -> value` line per pair, then the total.
pub fn render_text(matrix: &CostMatrix, a: &Assignment) -> String {
    let banner = match a.objective {
        Objective::Minimize => "Lowest cost through this matrix:",
        Objective::Maximize => "Highest profit through this matrix:",
    };
    let mut s = format!("{banner}\n{matrix}");
    for p in &a.pairs {
        s.push_str(&format!("({}, {}) -> {}\n", p.row, p.col, p.value));
    }
    s.push_str(&format!("total cost: {}\n", a.total));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignment::api::{solve, CostMatrix};

    fn corner() -> CostMatrix {
        CostMatrix::from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap()
    }

    #[test]
    fn text_lists_pairs_and_total() {
        let m = corner();
        let a = solve(&m, Objective::Minimize).unwrap();
        let text = render_text(&m, &a);
        assert!(text.starts_with("Lowest cost through this matrix:\n[1, 1]\n[1, 2]\n"));
        assert!(text.contains("(0, 1) -> 1\n(1, 0) -> 1\n"));
        assert!(text.ends_with("total cost: 2\n"));
    }

    #[test]
    fn maximize_banner_and_json_shape() {
        let m = corner();
        let a = solve(&m, Objective::Maximize).unwrap();
        assert!(render_text(&m, &a).starts_with("Highest profit"));
        let report = SolveReport::new("corner.txt", &m, &a, 0.5);
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["objective"], "maximize");
        assert_eq!(v["total"], 3.0);
        assert_eq!(v["pairs"].as_array().unwrap().len(), 2);
        assert_eq!(v["rows"], 2);
    }
}
