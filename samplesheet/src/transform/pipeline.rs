//! High-level pipeline API: load, validate, transform, write.
//!
//! # Example
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
//! println!("{} rows, {} samples", summary.rows, summary.samples);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{columns, Table};
use crate::parser::load_samplesheet;
use crate::transform::normalize::{transform, Transformed};
use crate::validation::{LabelRules, Validator};
use crate::writer::{write_table, METADATA_DELIMITER, METADATA_FILE_NAME, SAMPLESHEET_DELIMITER};

/// Environment variable overriding [`CheckOptions::metadata_path`].
pub const ENV_METADATA_PATH: &str = "SAMPLESHEET_METADATA_PATH";

/// Environment variable enabling [`CheckOptions::deduplicate_reserved`].
pub const ENV_DEDUP_RESERVED: &str = "SAMPLESHEET_DEDUP_RESERVED";

/// Options for the check pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Where the tab-separated group metadata is written
    pub metadata_path: PathBuf,

    /// Drop the redundant `short_summary_$` reserved pattern
    pub deduplicate_reserved: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            metadata_path: PathBuf::from(METADATA_FILE_NAME),
            deduplicate_reserved: false,
        }
    }
}

impl CheckOptions {
    /// Defaults, overridden by `SAMPLESHEET_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(path) = lookup(ENV_METADATA_PATH).filter(|p| !p.is_empty()) {
            options.metadata_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup(ENV_DEDUP_RESERVED) {
            options.deduplicate_reserved = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        options
    }

    /// Validator configured by these options.
    pub fn validator(&self) -> Validator {
        if self.deduplicate_reserved {
            Validator::new(LabelRules::deduplicated())
        } else {
            Validator::default()
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub rows: usize,
    pub samples: usize,
    pub paired_end_rows: usize,
    pub output_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Validate and transform an in-memory table.
///
/// Nothing is written; useful for callers that handle output themselves.
pub fn check_table(table: Table, options: &CheckOptions) -> PipelineResult<Transformed> {
    if let Err(err) = options.validator().validate(&table) {
        debug!(check = ?err.check, "{}", err.message);
        return Err(PipelineError::Validation(err));
    }
    Ok(transform(table))
}

/// Check a samplesheet file and write both outputs.
///
/// Steps:
/// 1. Load the samplesheet
/// 2. Validate, stopping at the first violation
/// 3. Derive the output tables
/// 4. Write the group metadata, then the main samplesheet
///
/// No file is written if loading or validation fails.
pub fn check_samplesheet(
    file_in: &Path,
    file_out: &Path,
    options: &CheckOptions,
) -> PipelineResult<CheckSummary> {
    info!(path = %file_in.display(), "Reading samplesheet");
    let table = load_samplesheet(file_in)?;
    info!(rows = table.len(), columns = table.columns().len(), "Samplesheet loaded");

    let samples = count_distinct(&table, columns::SAMPLE);
    let paired_end_rows = table
        .column(columns::READ_2)
        .map(|reads| reads.filter(Option::is_some).count())
        .unwrap_or(0);

    let Transformed {
        samplesheet,
        metadata,
    } = check_table(table, options)?;
    info!("Samplesheet valid");

    write_table(&metadata, &options.metadata_path, METADATA_DELIMITER)?;
    info!(path = %options.metadata_path.display(), "Group metadata written");

    write_table(&samplesheet, file_out, SAMPLESHEET_DELIMITER)?;
    info!(path = %file_out.display(), rows = samplesheet.len(), "Samplesheet written");

    Ok(CheckSummary {
        rows: samplesheet.len(),
        samples,
        paired_end_rows,
        output_path: file_out.to_path_buf(),
        metadata_path: options.metadata_path.clone(),
    })
}

fn count_distinct(table: &Table, column: &str) -> usize {
    table
        .column(column)
        .map(|values| values.flatten().collect::<HashSet<_>>().len())
        .unwrap_or(0)
}
