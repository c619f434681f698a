use std::fmt;

/// Errors related to an invalid sweep range
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str, value: f64 },
    InvertedRange { min: f64, max: f64 },
    NonPositiveStep(f64),
    /// The range and step would produce more grid points than a sweep allows
    TooManyPoints { count: f64, limit: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => {
                write!(f, "sweep {field} must be finite, got {value}")
            }
            ConfigError::InvertedRange { min, max } => {
                write!(f, "sweep min ({min}) must not exceed max ({max})")
            }
            ConfigError::NonPositiveStep(step) => {
                write!(f, "sweep step must be positive, got {step}")
            }
            ConfigError::TooManyPoints { count, limit } => {
                write!(f, "sweep would have {count} grid points, at most {limit} allowed")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while invoking the external solver
#[derive(Debug)]
pub enum SolverError {
    /// The solver process could not be started
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// The solver process ran but reported failure
    Failed {
        u_q: f64,
        status: Option<i32>,
        stderr: String,
    },
    /// A named output variable was absent from the solver namespace
    MissingVariable { u_q: f64, name: &'static str },
    /// The solver output could not be read as numeric data
    Malformed { u_q: f64, reason: String },
    /// A matrix field had rows of differing lengths
    Ragged { name: &'static str },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Spawn { program, source } => {
                write!(f, "failed to start solver '{program}': {source}")
            }
            SolverError::Failed {
                u_q,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "solver exited with status {code} for u_q={u_q}")?,
                    None => write!(f, "solver terminated by signal for u_q={u_q}")?,
                }
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
            SolverError::MissingVariable { u_q, name } => {
                write!(f, "solver output for u_q={u_q} has no variable '{name}'")
            }
            SolverError::Malformed { u_q, reason } => {
                write!(f, "unreadable solver output for u_q={u_q}: {reason}")
            }
            SolverError::Ragged { name } => {
                write!(f, "solver variable '{name}' is not a rectangular matrix")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from reading or writing the persisted sweep
#[derive(Debug)]
pub enum CacheError {
    Io(std::io::Error),
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    /// The file was written by an incompatible format version
    Version { found: u32, expected: u32 },
    /// The stored entries do not line up with the stored range
    Schema(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "cache I/O error: {e}"),
            CacheError::Decode(e) => write!(f, "failed to decode cache: {e}"),
            CacheError::Encode(e) => write!(f, "failed to encode cache: {e}"),
            CacheError::Version { found, expected } => {
                write!(f, "cache format version {found} (expected {expected})")
            }
            CacheError::Schema(msg) => write!(f, "cache schema mismatch: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(e) => Some(e),
            CacheError::Decode(e) | CacheError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}

/// Errors raised when solver output does not have the shape the curves need
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Each offset row must hold exactly two columns
    OffsetColumns { found: usize },
    /// Two sequences that must be aligned have different lengths
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// The adjustment term cannot be applied row by row
    Adjustment { rows: usize, shape: (usize, usize) },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::OffsetColumns { found } => {
                write!(f, "offset array needs exactly 2 columns, found {found}")
            }
            ShapeError::LengthMismatch {
                what,
                expected,
                found,
            } => write!(f, "{what}: expected length {expected}, found {found}"),
            ShapeError::Adjustment { rows, shape } => write!(
                f,
                "adjustment of shape {}x{} does not match {rows} offset rows",
                shape.0, shape.1
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Errors that abort a sweep
#[derive(Debug)]
pub enum SweepError {
    Config(ConfigError),
    Solver(SolverError),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Config(e) => write!(f, "{e}"),
            SweepError::Solver(e) => write!(f, "sweep aborted: {e}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Config(e) => Some(e),
            SweepError::Solver(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SweepError {
    fn from(e: ConfigError) -> Self {
        SweepError::Config(e)
    }
}

impl From<SolverError> for SweepError {
    fn from(e: SolverError) -> Self {
        SweepError::Solver(e)
    }
}

/// Errors from deriving a render frame for a selected parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The value is not one of the sweep's grid points
    NotOnGrid { u_q: f64, min: f64, max: f64, step: f64 },
    Shape(ShapeError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotOnGrid { u_q, min, max, step } => write!(
                f,
                "u_q={u_q} is not a grid point of {min}..={max} step {step}"
            ),
            SessionError::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for SessionError {
    fn from(e: ShapeError) -> Self {
        SessionError::Shape(e)
    }
}
