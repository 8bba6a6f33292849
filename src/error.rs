//! Error types.
//!
//! The library surfaces typed [`StatsError`]s. The `hs` binary converts them to
//! an [`AppError`] carrying a process exit code:
//!
//! - `2`: input/schema problems (missing file, unreadable sheet, unknown column)
//! - `3`: no usable data (empty sheet, non-numeric cells in a numeric selection)
//! - `4`: numeric failures (shape mismatch, degenerate regression input)

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by loading, deriving, and fitting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The input resource does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The resource exists but holds no rows.
    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    /// Any other failure while reading or parsing the input.
    #[error("Failed to load data: {0}")]
    Load(String),

    /// A referenced column does not exist in the dataset.
    #[error("Column not found: `{0}`")]
    ColumnNotFound(String),

    /// Feature/target shapes do not line up.
    #[error("Dimension mismatch: {0}")]
    Dimension(String),

    /// The regression problem has no well-defined solution or R².
    #[error("Degenerate regression input: {0}")]
    DegenerateInput(String),

    /// A numeric selection contains a missing or text cell.
    #[error("Non-numeric value in column `{column}` at row {row}")]
    NonNumeric { column: String, row: usize },

    /// Writing a report/export failed.
    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        let exit_code = match err {
            StatsError::NotFound(_)
            | StatsError::Load(_)
            | StatsError::ColumnNotFound(_)
            | StatsError::Export(_) => 2,
            StatsError::EmptyInput(_) | StatsError::NonNumeric { .. } => 3,
            StatsError::Dimension(_) | StatsError::DegenerateInput(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
