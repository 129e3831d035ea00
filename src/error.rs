//! Error types and exit codes for hookflow

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for hookflow operations
#[derive(Error, Debug)]
pub enum HookflowError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to parse source: {message}")]
    ParseFailure { message: String },

    #[error("Analysis failed: {message}")]
    AnalysisFailure { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HookflowError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Unsupported language
    /// - 3: Parse failure
    /// - 4: Internal analysis failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::UnsupportedLanguage { .. } => ExitCode::from(2),
            Self::ParseFailure { .. } => ExitCode::from(3),
            Self::AnalysisFailure { .. } => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for hookflow operations
pub type Result<T> = std::result::Result<T, HookflowError>;
