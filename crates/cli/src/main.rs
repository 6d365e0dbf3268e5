mod input;
mod output;
mod provenance;
mod speed;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use assignment::api::{
    draw_costs, write_sparse, AssignmentSolver, CostDist, Objective, RandomCostCfg, ReplayToken,
    SolverCfg, SparseLayout,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use input::Format;
use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Solve, generate, and time assignment problems")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a matrix file and print the pairs and total cost
    Solve {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,
        /// Maximize the total instead of minimizing it
        #[arg(long)]
        maximize: bool,
        /// Refuse matrices with more rows or columns than this
        #[arg(long)]
        max_dim: Option<usize>,
        /// Skip the optimality certificate
        #[arg(long)]
        no_verify: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write the JSON result (plus provenance sidecar) here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a random integer matrix in the sparse format
    Gen {
        #[arg(long)]
        rows: usize,
        #[arg(long)]
        cols: usize,
        /// Largest cost drawn (default rows * cols)
        #[arg(long)]
        max: Option<u64>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Omit zero cells instead of listing every cell
        #[arg(long)]
        skip_zeros: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Average solve time over random matrices
    Speed {
        #[arg(long, default_value_t = 10)]
        todo: u64,
        /// Side of a square matrix; `--rows`/`--cols` override either side
        #[arg(long, default_value_t = 50)]
        size: usize,
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        cols: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Solve {
            input,
            format,
            maximize,
            max_dim,
            no_verify,
            json,
            out,
        } => {
            let objective = if maximize {
                Objective::Maximize
            } else {
                Objective::Minimize
            };
            let cfg = SolverCfg {
                max_dim,
                verify: !no_verify,
                ..SolverCfg::default()
            };
            solve(&input, format, objective, cfg, json, out.as_deref())
        }
        Action::Gen {
            rows,
            cols,
            max,
            seed,
            index,
            skip_zeros,
            out,
        } => gen(rows, cols, max, ReplayToken::new(seed, index), skip_zeros, &out),
        Action::Speed {
            todo,
            size,
            rows,
            cols,
            seed,
        } => speed(todo, (rows.unwrap_or(size), cols.unwrap_or(size)), seed),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn solve(
    input: &Path,
    format: Format,
    objective: Objective,
    cfg: SolverCfg,
    as_json: bool,
    out: Option<&Path>,
) -> Result<()> {
    let matrix = input::load_matrix(input, format, cfg.max_dim)?;
    tracing::info!(
        input = %input.display(),
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        objective = output::objective_name(objective),
        "loaded"
    );

    let start = Instant::now();
    let assignment = AssignmentSolver::new(cfg)
        .solve(&matrix, objective)
        .with_context(|| format!("solving {}", input.display()))?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    tracing::info!(
        pairs = assignment.len(),
        total = assignment.total,
        elapsed_ms,
        "solved"
    );

    let report = output::SolveReport::new(&input.to_string_lossy(), &matrix, &assignment, elapsed_ms);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_text(&matrix, &assignment));
    }

    if let Some(out) = out {
        ensure_parent(out)?;
        std::fs::write(out, serde_json::to_vec_pretty(&report)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let prov = provenance::write_sidecar(
            out,
            Payload::new(
                "solve",
                json!({
                    "input": input.to_string_lossy(),
                    "format": format!("{format:?}").to_lowercase(),
                    "objective": output::objective_name(objective),
                    "max_dim": cfg.max_dim,
                    "verify": cfg.verify
                }),
            ),
        )?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "written");
    }
    Ok(())
}

fn gen(
    rows: usize,
    cols: usize,
    max: Option<u64>,
    tok: ReplayToken,
    skip_zeros: bool,
    out: &Path,
) -> Result<()> {
    if rows == 0 || cols == 0 {
        bail!("gen needs at least one row and one column, got {rows}x{cols}");
    }
    let max = max.unwrap_or((rows as u64).saturating_mul(cols as u64));
    let cfg = RandomCostCfg {
        rows,
        cols,
        dist: CostDist::Integer { max },
    };
    let matrix = draw_costs(cfg, tok)?;
    let layout = if skip_zeros {
        SparseLayout::NonZero
    } else {
        SparseLayout::Dense
    };

    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut w = BufWriter::new(file);
    write_sparse(&matrix, layout, &mut w).with_context(|| format!("writing {}", out.display()))?;
    w.flush()?;

    provenance::write_sidecar(
        out,
        Payload::new(
            "gen",
            json!({
                "rows": rows,
                "cols": cols,
                "max": max,
                "seed": tok.seed,
                "index": tok.index,
                "skip_zeros": skip_zeros
            }),
        ),
    )?;
    tracing::info!(rows, cols, max, seed = tok.seed, index = tok.index, out = %out.display(), "generated");
    Ok(())
}

fn speed(todo: u64, (rows, cols): (usize, usize), seed: u64) -> Result<()> {
    if rows == 0 || cols == 0 {
        bail!("speed needs a positive size, got {rows}x{cols}");
    }
    println!("== Speed Test ({todo} {rows}x{cols}) ==\n");
    let summary = speed::run(&AssignmentSolver::default(), todo, (rows, cols), seed, |label| {
        println!("{label}");
    })?;
    println!(
        "\nAverage Time ({}x{}): {:.3} ms\n",
        summary.rows, summary.cols, summary.avg_ms
    );
    tracing::info!(
        todo = summary.todo,
        rows = summary.rows,
        cols = summary.cols,
        avg_ms = summary.avg_ms,
        "speed"
    );
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "lib_version": assignment::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignment::api::parse_sparse;
    use serde_json::Value;
    use tempfile::tempdir;

    fn read_json(path: &Path) -> Value {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn gen_then_solve_writes_results_and_sidecars() {
        let dir = tempdir().unwrap();
        let matrix_path = dir.path().join("fixtures/m.txt");
        gen(3, 4, Some(9), ReplayToken::new(5, 2), false, &matrix_path).unwrap();

        let text = std::fs::read_to_string(&matrix_path).unwrap();
        let m = parse_sparse(&text).unwrap();
        assert_eq!((m.nrows(), m.ncols()), (3, 4));
        assert!(text.starts_with("4 3 12\n"));
        let gen_prov = read_json(&dir.path().join("fixtures/m.provenance.json"));
        assert_eq!(gen_prov["command"], "gen");
        assert_eq!(gen_prov["params"]["seed"], 5);
        assert_eq!(gen_prov["params"]["max"], 9);

        let out = dir.path().join("out/result.json");
        solve(
            &matrix_path,
            Format::Auto,
            Objective::Minimize,
            SolverCfg::default(),
            false,
            Some(&out),
        )
        .unwrap();
        let report = read_json(&out);
        assert_eq!(report["rows"], 3);
        assert_eq!(report["cols"], 4);
        assert_eq!(report["objective"], "minimize");
        let pairs = report["pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 3);
        let sum: f64 = pairs.iter().map(|p| p["value"].as_f64().unwrap()).sum();
        assert_eq!(report["total"].as_f64(), Some(sum));

        let prov = read_json(&dir.path().join("out/result.provenance.json"));
        assert_eq!(prov["command"], "solve");
        assert_eq!(prov["params"]["objective"], "minimize");
        assert_eq!(prov["params"]["verify"], true);
        assert_eq!(prov["outputs"][0], out.to_string_lossy().as_ref());
    }

    #[test]
    fn gen_skip_zeros_still_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sparse.txt");
        gen(5, 5, Some(1), ReplayToken::new(0, 0), true, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let m = parse_sparse(&text).unwrap();
        let listed: usize = text.lines().next().unwrap().split(' ').nth(2).unwrap().parse().unwrap();
        let nonzero = m.as_dmatrix().iter().filter(|&&c| c != 0.0).count();
        assert_eq!(listed, nonzero);
    }

    #[test]
    fn gen_refuses_empty_shape() {
        let dir = tempdir().unwrap();
        assert!(gen(0, 3, None, ReplayToken::default(), false, &dir.path().join("e.txt")).is_err());
    }

    #[test]
    fn solve_errors_reach_the_caller() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.txt");
        gen(2, 2, None, ReplayToken::default(), false, &path).unwrap();
        let capped = SolverCfg {
            max_dim: Some(1),
            ..SolverCfg::default()
        };
        let err = solve(&path, Format::Sparse, Objective::Minimize, capped, true, None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("exceeds the configured ceiling of 1"), "{msg}");

        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "2 2 1\n1 1 NaN\n").unwrap();
        let err = solve(
            &bad,
            Format::Sparse,
            Objective::Maximize,
            SolverCfg::default(),
            false,
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("non-finite"));
    }

    #[test]
    fn speed_accepts_rectangles_and_rejects_empty() {
        speed(2, (2, 5), 0).unwrap();
        assert!(speed(1, (0, 5), 0).is_err());
    }
}
