//! # Samplesheet - sequencing samplesheet validation and normalization
//!
//! Checks a samplesheet describing sequencing runs (sample, FASTQ paths,
//! group, optional run accession) and rewrites it into the layout the
//! downstream pipeline expects, plus a side table of sample/group metadata.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────────────┐
//! │ Samplesheet │────▶│  Validator  │────▶│  Transform  │────▶│ samplesheet.csv     │
//! │    (CSV)    │     │ (fail-fast) │     │             │     │ group_metadata.csv  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use samplesheet::{check_samplesheet, CheckOptions};
//! use std::path::Path;
//!
//! let summary = check_samplesheet(
//!     Path::new("samplesheet.csv"),
//!     Path::new("samplesheet.valid.csv"),
//!     &CheckOptions::default(),
//! )?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Table and cell types
//! - [`parser`] - CSV loading with encoding detection
//! - [`validation`] - Ordered samplesheet rules
//! - [`transform`] - Normalization and the end-to-end pipeline
//! - [`writer`] - Output serialization
//! - [`logging`] - Tracing subscriber setup

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod writer;

pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    Check, LoadError, PipelineError, PipelineResult, ValidationError, ValidationResult,
    WriteError,
};

pub use models::{columns, Cell, Table};

pub use parser::{load_samplesheet, parse_samplesheet, parse_str};

pub use validation::{is_valid, validate, LabelRules, Validator};

pub use transform::{
    check_samplesheet, check_table, transform, CheckOptions, CheckSummary, Transformed,
};

pub use writer::{write_table, METADATA_FILE_NAME};
