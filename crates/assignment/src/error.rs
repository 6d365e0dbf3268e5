//! Error type shared by matrix construction, the sparse codec, and the solver.

use std::fmt;

/// Errors surfaced to callers. The solver never returns a partial result.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignmentError {
    /// Jagged rows, non-finite entries, or a malformed sparse file.
    InvalidInput { reason: String },
    /// A dimension exceeds the configured ceiling.
    TooLarge {
        rows: usize,
        cols: usize,
        limit: usize,
    },
    /// Potentials or labels broke an invariant; indicates a solver bug.
    InternalInvariant { reason: String },
}

impl AssignmentError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InternalInvariant {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::TooLarge { rows, cols, limit } => write!(
                f,
                "matrix {rows}x{cols} exceeds the configured ceiling of {limit}"
            ),
            Self::InternalInvariant { reason } => {
                write!(f, "internal invariant violated: {reason}")
            }
        }
    }
}

impl std::error::Error for AssignmentError {}

#[cfg(test)]
mod tests {
    use super::AssignmentError;

    #[test]
    fn display_names_the_limit() {
        let e = AssignmentError::TooLarge {
            rows: 10,
            cols: 3,
            limit: 8,
        };
        assert_eq!(
            e.to_string(),
            "matrix 10x3 exceeds the configured ceiling of 8"
        );
    }

    #[test]
    fn helpers_fill_reason() {
        let e = AssignmentError::invalid("row 2 has 3 entries");
        assert!(matches!(e, AssignmentError::InvalidInput { ref reason } if reason.contains("row 2")));
        assert!(AssignmentError::invariant("x")
            .to_string()
            .starts_with("internal invariant violated"));
    }
}
