//! Error types for contagio operations.
//!
//! Provides structured context for ingestion, panel, and modeling failures.

use std::fmt;

/// Main error type for contagio operations.
///
/// # Examples
///
/// ```
/// use contagio::error::ContagioError;
///
/// let err = ContagioError::DimensionMismatch {
///     expected: "100x4".to_string(),
///     actual: "100x3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum ContagioError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A CSV record failed to parse.
    CsvParse {
        /// 1-based line number in the source file
        line: usize,
        /// Column name or position
        column: String,
        /// Parser message
        message: String,
    },

    /// A required column is absent from a table.
    MissingColumn {
        /// Column name
        column: String,
        /// What was available, or how to fix it
        hint: String,
    },

    /// Optimization failed to converge within iteration limit.
    ConvergenceFailure {
        /// Number of iterations attempted
        iterations: usize,
        /// Final loss value
        final_loss: f64,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// IO error from file operations.
    Io(std::io::Error),

    /// Generic error with custom message.
    Other(String),
}

impl fmt::Display for ContagioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContagioError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            ContagioError::CsvParse {
                line,
                column,
                message,
            } => {
                write!(
                    f,
                    "CSV parse error at line {line}, column {column}: {message}"
                )
            }
            ContagioError::MissingColumn { column, hint } => {
                write!(f, "missing column '{column}': {hint}")
            }
            ContagioError::ConvergenceFailure {
                iterations,
                final_loss,
            } => {
                write!(
                    f,
                    "failed to converge after {iterations} iterations (final loss: {final_loss})"
                )
            }
            ContagioError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter {param}={value} (constraint: {constraint})"
                )
            }
            ContagioError::Io(e) => write!(f, "IO error: {e}"),
            ContagioError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ContagioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContagioError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ContagioError {
    fn from(e: std::io::Error) -> Self {
        ContagioError::Io(e)
    }
}

impl From<&str> for ContagioError {
    fn from(msg: &str) -> Self {
        ContagioError::Other(msg.to_string())
    }
}

impl From<String> for ContagioError {
    fn from(msg: String) -> Self {
        ContagioError::Other(msg)
    }
}

impl ContagioError {
    /// Convenience constructor for dimension mismatches.
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: actual.to_string(),
        }
    }

    /// Convenience constructor for empty inputs.
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Result type alias for contagio operations.
pub type Result<T> = std::result::Result<T, ContagioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ContagioError::DimensionMismatch {
            expected: "10x2".to_string(),
            actual: "10x3".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("10x2"));
    }

    #[test]
    fn test_csv_parse_display() {
        let err = ContagioError::CsvParse {
            line: 42,
            column: "polity".to_string(),
            message: "invalid float".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 42"));
        assert!(msg.contains("polity"));
    }

    #[test]
    fn test_missing_column_display() {
        let err = ContagioError::MissingColumn {
            column: "gdp_pc".to_string(),
            hint: "available: polity, war".to_string(),
        };
        assert!(err.to_string().contains("gdp_pc"));
    }

    #[test]
    fn test_from_str() {
        let err: ContagioError = "something broke".into();
        assert!(matches!(err, ContagioError::Other(_)));
        assert_eq!(err.to_string(), "something broke");
    }

    #[test]
    fn test_from_string() {
        let err: ContagioError = String::from("oops").into();
        assert!(matches!(err, ContagioError::Other(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ContagioError = io_err.into();
        assert!(matches!(err, ContagioError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContagioError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = ContagioError::dimension_mismatch("rows", 100, 50);
        let msg = err.to_string();
        assert!(msg.contains("rows=100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_empty_input_helper() {
        let err = ContagioError::empty_input("panel");
        assert!(err.to_string().contains("empty input"));
    }

    #[test]
    fn test_convergence_failure_display() {
        let err = ContagioError::ConvergenceFailure {
            iterations: 500,
            final_loss: 0.73,
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("converge"));
    }
}
