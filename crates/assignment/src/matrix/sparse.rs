//! Line-oriented sparse matrix text format.
//!
//! Layout
//! - Header: `width height count` (columns, rows, number of entry lines).
//! - Entries: `count` lines of `x y value`, 1-indexed, `x` = column, `y` = row.
//! - Cells not listed are 0. Blank lines are ignored anywhere.
//!
//! Duplicate coordinates are rejected rather than silently overwritten.

use std::collections::HashSet;
use std::io;

use nalgebra::DMatrix;

use super::CostMatrix;
use crate::error::AssignmentError;

/// Which cells `write_sparse` emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SparseLayout {
    /// Every cell in row-major order (what the fixture scripts produce).
    #[default]
    Dense,
    /// Only non-zero cells; zeros are implied by the format.
    NonZero,
}

fn bad_line(line: usize, what: impl std::fmt::Display) -> AssignmentError {
    AssignmentError::invalid(format!("sparse line {line}: {what}"))
}

fn parse_field<T: std::str::FromStr>(
    tok: &str,
    line: usize,
    name: &str,
) -> Result<T, AssignmentError> {
    tok.parse::<T>()
        .map_err(|_| bad_line(line, format!("cannot parse {name} from {tok:?}")))
}

/// Parse the sparse text form into a validated `CostMatrix`.
pub fn parse_sparse(text: &str) -> Result<CostMatrix, AssignmentError> {
    parse_sparse_with_limit(text, None)
}

/// `parse_sparse` with a ceiling on both dimensions.
///
/// The header is checked against `max_dim` before anything proportional to
/// `width * height` is allocated; an oversized header is `TooLarge`.
pub fn parse_sparse_with_limit(
    text: &str,
    max_dim: Option<usize>,
) -> Result<CostMatrix, AssignmentError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(k, l)| (k + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (hline, header) = lines
        .next()
        .ok_or_else(|| AssignmentError::invalid("sparse input is empty"))?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(bad_line(
            hline,
            format!("header needs `width height count`, got {} fields", fields.len()),
        ));
    }
    let width: usize = parse_field(fields[0], hline, "width")?;
    let height: usize = parse_field(fields[1], hline, "height")?;
    let count: usize = parse_field(fields[2], hline, "count")?;
    if let Some(limit) = max_dim {
        if height > limit || width > limit {
            return Err(AssignmentError::TooLarge {
                rows: height,
                cols: width,
                limit,
            });
        }
    }
    let cells = width
        .checked_mul(height)
        .ok_or_else(|| bad_line(hline, "width * height overflows"))?;
    if count > cells {
        return Err(bad_line(
            hline,
            format!("count {count} exceeds the {cells} cells of a {width}x{height} matrix"),
        ));
    }

    let mut data: Vec<f64> = Vec::new();
    data.try_reserve_exact(cells)
        .map_err(|_| bad_line(hline, format!("cannot allocate a {width}x{height} matrix")))?;
    data.resize(cells, 0.0);
    let mut m = DMatrix::from_vec(height, width, data);
    // An entry line is at least `x y v`, so the text bounds the real count.
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(count.min(text.len() / 5));
    let mut read = 0usize;
    for (ln, line) in lines {
        if read == count {
            return Err(bad_line(ln, format!("more than {count} entry lines")));
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(bad_line(
                ln,
                format!("entry needs `x y value`, got {} fields", fields.len()),
            ));
        }
        let x: usize = parse_field(fields[0], ln, "x")?;
        let y: usize = parse_field(fields[1], ln, "y")?;
        let value: f64 = parse_field(fields[2], ln, "value")?;
        if !(1..=width).contains(&x) || !(1..=height).contains(&y) {
            return Err(bad_line(
                ln,
                format!("coordinate ({x}, {y}) outside 1..={width} x 1..={height}"),
            ));
        }
        if !value.is_finite() {
            return Err(bad_line(ln, format!("non-finite value {value}")));
        }
        let (row, col) = (y - 1, x - 1);
        if !seen.insert((row, col)) {
            return Err(bad_line(ln, format!("duplicate coordinate ({x}, {y})")));
        }
        m[(row, col)] = value;
        read += 1;
    }
    if read < count {
        return Err(AssignmentError::invalid(format!(
            "sparse input declares {count} entries but has {read}"
        )));
    }
    CostMatrix::from_dmatrix(m)
}

/// Row-major `(row, col, value)` cells selected by `layout`.
fn selected_cells(m: &CostMatrix, layout: SparseLayout) -> Vec<(usize, usize, f64)> {
    (0..m.nrows())
        .flat_map(|i| (0..m.ncols()).map(move |j| (i, j)))
        .map(|(i, j)| (i, j, m.as_dmatrix()[(i, j)]))
        .filter(|&(_, _, c)| layout == SparseLayout::Dense || c != 0.0)
        .collect()
}

/// Write `m` in sparse form.
pub fn write_sparse<W: io::Write>(
    m: &CostMatrix,
    layout: SparseLayout,
    mut w: W,
) -> io::Result<()> {
    let entries = selected_cells(m, layout);
    writeln!(w, "{} {} {}", m.ncols(), m.nrows(), entries.len())?;
    for (i, j, c) in entries {
        writeln!(w, "{} {} {}", j + 1, i + 1, c)?;
    }
    Ok(())
}

/// Sparse form as a `String`; same text `write_sparse` emits.
pub fn to_sparse_string(m: &CostMatrix, layout: SparseLayout) -> String {
    let entries = selected_cells(m, layout);
    let mut out = format!("{} {} {}\n", m.ncols(), m.nrows(), entries.len());
    for (i, j, c) in entries {
        out.push_str(&format!("{} {} {}\n", j + 1, i + 1, c));
    }
    out
}
