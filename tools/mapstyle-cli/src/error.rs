//! CLI Error Types

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spec document could not be processed
    #[error("{0}")]
    Codegen(#[from] mapstyle_codegen::CodegenError),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
