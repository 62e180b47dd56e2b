//! Error types for the samplesheet check pipeline.
//!
//! This module defines one error type per stage:
//!
//! - [`LoadError`] - Reading and parsing the input samplesheet
//! - [`ValidationError`] - A samplesheet rule violation (user-facing)
//! - [`WriteError`] - Serializing the output tables
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Conversion into [`PipelineError`] is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Prefix of every user-facing validation report.
pub const REPORT_PREFIX: &str = "ERROR: Please check samplesheet -> ";

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while reading the input samplesheet.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the file.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text (e.g. inconsistent field counts).
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// No header row.
    #[error("Samplesheet is empty")]
    Empty,

    /// Header names a column twice.
    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// The rule a [`ValidationError`] comes from, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    RequiredColumns,
    IllegalLabel,
    ReservedLabel,
    PartialGroup,
    MissingRead1,
    InvalidExtension,
    DuplicateRead1,
    DuplicateRead2,
    InconsistentGroup,
    MixedEndedness,
    MissingRunAccessionColumn,
    NonUniqueRunAccession,
}

/// A samplesheet rule violation.
///
/// Carries the message shown to the user and, optionally, the offending
/// entity as a `(label, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub check: Check,
    pub message: String,
    pub context: Option<(String, String)>,
}

impl ValidationError {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.context = Some((label.into(), value.into()));
        self
    }

    /// Value of the context pair, if any.
    pub fn context_value(&self) -> Option<&str> {
        self.context.as_ref().map(|(_, value)| value.as_str())
    }

    /// True for checks on the table's shape rather than its contents.
    ///
    /// These are reported like load failures, not as a samplesheet report.
    pub fn is_structural(&self) -> bool {
        matches!(self.check, Check::RequiredColumns)
    }

    /// The diagnostic printed before exiting.
    ///
    /// The context line is only emitted when both label and value are
    /// non-blank.
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

/// Display adapter for [`ValidationError::report`].
pub struct Report<'a>(&'a ValidationError);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", REPORT_PREFIX, self.0.message)?;
        if let Some((label, value)) = &self.0.context {
            let (label, value) = (label.trim(), value.trim());
            if !label.is_empty() && !value.is_empty() {
                write!(f, "\n{}: '{}'", label, value)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while serializing output tables.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create or flush the file.
    #[error("Cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors returned by [`crate::check_samplesheet`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for validation.
pub type ValidationResult = Result<(), ValidationError>;

/// Result type for writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_context() {
        let err = ValidationError::new(Check::InvalidExtension, "FASTQ path has invalid extension")
            .with_context("Path", "a_R1.fq");
        assert_eq!(
            err.report().to_string(),
            "ERROR: Please check samplesheet -> FASTQ path has invalid extension\nPath: 'a_R1.fq'"
        );
    }

    #[test]
    fn test_report_without_context() {
        let err = ValidationError::new(Check::DuplicateRead1, "There are duplications within Read 1 paths!");
        assert_eq!(
            err.report().to_string(),
            "ERROR: Please check samplesheet -> There are duplications within Read 1 paths!"
        );
    }

    #[test]
    fn test_report_blank_context_value_omitted() {
        let err = ValidationError::new(Check::IllegalLabel, "bad label").with_context("Label", "  ");
        assert_eq!(err.report().to_string(), "ERROR: Please check samplesheet -> bad label");
    }

    #[test]
    fn test_structural_checks() {
        assert!(ValidationError::new(Check::RequiredColumns, "x").is_structural());
        assert!(!ValidationError::new(Check::MissingRead1, "x").is_structural());
    }

    #[test]
    fn test_error_conversion_chain() {
        let pipeline_err: PipelineError = LoadError::Empty.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let validation = ValidationError::new(Check::PartialGroup, "Group labels missing");
        let pipeline_err: PipelineError = validation.into();
        assert!(matches!(pipeline_err, PipelineError::Validation(_)));
    }
}
