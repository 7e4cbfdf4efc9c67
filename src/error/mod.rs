// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for convcheck.
//!
//! Checking itself only produces [`ConfigError`] and [`ValidationFailure`];
//! the remaining kinds come from the git and hook integrations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for convcheck operations.
#[derive(Error, Debug)]
pub enum ConvError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Input did not satisfy a convention
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Hook errors
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // User cancelled operation
    #[error("Operation cancelled by user")]
    Cancelled,

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ConvError {
    /// Process exit status for this error.
    ///
    /// Validation failures exit with 1, everything else with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvError::Validation(_) => 1,
            _ => 2,
        }
    }
}

impl From<dialoguer::Error> for ConvError {
    fn from(err: dialoguer::Error) -> Self {
        ConvError::Ui(err.to_string())
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid pattern for convention '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    #[error("Invalid exempt glob for convention '{name}': {message}")]
    InvalidExempt { name: String, message: String },

    #[error("Duplicate convention name: '{name}'")]
    DuplicateConvention { name: String },

    #[error("Invalid convention name '{name}': use letters, digits, '-', '_' or '.'")]
    InvalidName { name: String },

    #[error("Unknown convention '{name}' (available: {available})")]
    UnknownConvention { name: String, available: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// An input that does not satisfy the convention it was checked against.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{input:?} does not satisfy '{convention}': {reason}")]
pub struct ValidationFailure {
    /// The checked input.
    pub input: String,
    /// Name of the convention.
    pub convention: String,
    /// Why the check failed.
    pub reason: String,
}

impl ValidationFailure {
    /// Build a failure summarising several failed checks.
    pub fn batch(failed: usize, total: usize) -> Self {
        Self {
            input: format!("{} inputs", total),
            convention: "multiple".to_string(),
            reason: format!("{} of {} checks failed", failed, total),
        }
    }
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to get branch: {message}")]
    BranchFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Detached HEAD state")]
    DetachedHead,
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Unknown hook: {hook}")]
    Unknown { hook: String },

    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook} (use --force to replace it)")]
    AlreadyExists { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },
}

/// Result type alias for convcheck operations.
pub type Result<T> = std::result::Result<T, ConvError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ConvError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
