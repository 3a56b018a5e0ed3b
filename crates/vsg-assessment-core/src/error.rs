//! Core error types for vsg-assessment-core.
//!
//! This module defines the error hierarchy using thiserror. Wizard
//! precondition failures are kept separate from I/O-backed failures so the
//! front end can show them as notices instead of fatal errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vsg-assessment-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Wizard transition or precondition errors
    #[error("{0}")]
    Wizard(#[from] WizardError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the wizard controller.
///
/// None of these change controller state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The respondent name is empty after trimming.
    #[error("Please enter your name before continuing.")]
    NameRequired,

    /// Submit was requested before reaching the last section.
    #[error("Submit is only available on the last section")]
    NotOnLastSection,

    /// The assessment has already been submitted.
    #[error("Assessment already submitted")]
    AlreadySubmitted,

    /// An action that needs a submitted assessment was requested too early.
    #[error("Assessment has not been submitted yet")]
    NotSubmitted,

    /// An export is already running.
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Section index out of range.
    #[error("Section {index} out of bounds (sections: {len})")]
    InvalidSection { index: usize, len: usize },

    /// Question id not present in the catalog.
    #[error("Unknown question id: {0}")]
    UnknownQuestion(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No home directory to place the config in
    #[error("Could not determine the configuration directory")]
    NoDataDir,
}

/// Document export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to write the rendered document
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::TaskFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
