//! Numeric defaults for the solver (internal).
//!
//! Kept as fixed constants; `SolverCfg` exposes the few knobs callers need.

/// Relative tolerance for certificate checks, scaled by `1 + max |c|`.
pub(crate) const CERT_EPS: f64 = 1e-9;
/// Sentinel for a column with no matched row.
pub(crate) const UNMATCHED: usize = usize::MAX;
