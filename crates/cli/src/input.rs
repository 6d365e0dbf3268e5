//! Matrix loading: sparse text files and headerless dense CSV.

use std::path::Path;

use anyhow::{Context, Result};
use assignment::api::{parse_sparse_with_limit, CostMatrix};
use clap::ValueEnum;
use polars::prelude::{DataType, LazyCsvReader, LazyFileListReader};

/// Input file layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `.csv` means CSV, anything else sparse.
    Auto,
    Sparse,
    Csv,
}

impl Format {
    fn resolve(self, path: &Path) -> Format {
        match self {
            Format::Auto => {
                let is_csv = path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
                if is_csv {
                    Format::Csv
                } else {
                    Format::Sparse
                }
            }
            other => other,
        }
    }
}

/// Load a matrix. Sparse headers larger than `max_dim` are refused before the
/// matrix is allocated; CSV sizes are left to the solver's own check.
pub fn load_matrix(path: &Path, format: Format, max_dim: Option<usize>) -> Result<CostMatrix> {
    match format.resolve(path) {
        Format::Csv => read_csv(path),
        _ => read_sparse(path, max_dim),
    }
}

fn read_sparse(path: &Path, max_dim: Option<usize>) -> Result<CostMatrix> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading sparse matrix {}", path.display()))?;
    parse_sparse_with_limit(&text, max_dim)
        .with_context(|| format!("parsing sparse matrix {}", path.display()))
}

/// Dense CSV without a header; every cell must be numeric.
fn read_csv(path: &Path) -> Result<CostMatrix> {
    let df = LazyCsvReader::new(path)
        .with_has_header(false)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading CSV matrix {}", path.display()))?;
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for (j, series) in df.get_columns().iter().enumerate() {
        let floats = series.cast(&DataType::Float64)?;
        for (i, cell) in floats.f64()?.into_iter().enumerate() {
            let value = cell.with_context(|| {
                format!(
                    "{}: empty or non-numeric cell at row {}, column {}",
                    path.display(),
                    i + 1,
                    j + 1
                )
            })?;
            rows[i].push(value);
        }
    }
    tracing::debug!(rows = df.height(), cols = df.width(), "csv_loaded");
    CostMatrix::from_rows(&rows).with_context(|| format!("validating {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn auto_format_follows_extension() {
        assert_eq!(Format::Auto.resolve(Path::new("a/b.CSV")), Format::Csv);
        assert_eq!(Format::Auto.resolve(Path::new("test1.txt")), Format::Sparse);
        assert_eq!(Format::Sparse.resolve(Path::new("x.csv")), Format::Sparse);
    }

    #[test]
    fn loads_sparse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test2.txt");
        fs::write(&path, "2 2 4\n1 1 0\n2 1 0\n1 2 0\n2 2 1\n").unwrap();
        let m = load_matrix(&path, Format::Auto, None).unwrap();
        assert_eq!(m.get(1, 1), Some(1.0));
    }

    #[test]
    fn sparse_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "2 2 1\n9 9 1\n").unwrap();
        let err = load_matrix(&path, Format::Sparse, None).unwrap_err();
        assert!(format!("{err:#}").contains("bad.txt"));
        assert!(format!("{err:#}").contains("outside"));
    }

    #[test]
    fn loads_dense_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.csv");
        fs::write(&path, "1,2,3\n4,5.5,6\n").unwrap();
        let m = load_matrix(&path, Format::Auto, None).unwrap();
        assert_eq!((m.nrows(), m.ncols()), (2, 3));
        assert_eq!(m.get(1, 1), Some(5.5));
        assert_eq!(m.get(0, 2), Some(3.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_matrix(&dir.path().join("nope.txt"), Format::Auto, None).is_err());
    }

    #[test]
    fn sparse_header_over_ceiling_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.txt");
        fs::write(&path, "200000 200000 0\n").unwrap();
        let err = load_matrix(&path, Format::Auto, Some(10)).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("huge.txt"), "{msg}");
        assert!(msg.contains("exceeds the configured ceiling of 10"), "{msg}");
    }
}
