//! Samplesheet validation rules.
//!
//! [`validate`] runs every check in a fixed order and stops at the first
//! violation. The order is part of the contract: callers rely on a given
//! input always producing the same single error.
//!
//! | # | Rule |
//! |---|------|
//! | 1 | `sample`, `read_1`, `read_2`, `group` columns present |
//! | 2 | `sample` labels legal |
//! | 3 | `group` missing for all rows or for none |
//! | 4 | `group` labels legal |
//! | 5 | `read_1` present |
//! | 6 | `read_1` has a FASTQ extension |
//! | 7 | `read_2` has a FASTQ extension |
//! | 8 | `read_1` paths unique |
//! | 9 | `read_2` paths unique |
//! | 10 | one `group` per sample |
//! | 11 | no single/paired-end mix per sample |
//! | 12 | `run_accession` column present when samples repeat |
//! | 13 | `run_accession` labels legal |
//! | 14 | `run_accession` unique within a repeated sample |
//!
//! # Example
//!
//! ```rust,ignore
//! use samplesheet::{parse_str, validate};
//!
//! let table = parse_str("sample,read_1,read_2,group\ns1,a.fq.gz,,g1\n")?;
//! validate(&table)?;
//! ```

pub mod labels;

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::{Check, ValidationError, ValidationResult};
use crate::models::{columns, Table};

pub use labels::{LabelRules, MatchRule, ReservedPattern, RESERVED_PATTERNS};

/// Accepted FASTQ file extensions.
pub const FASTQ_EXTENSIONS: [&str; 2] = [".fq.gz", ".fastq.gz"];

/// Validate with the default label rules.
pub fn validate(table: &Table) -> ValidationResult {
    Validator::default().validate(table)
}

/// Quick check: true when [`validate`] succeeds.
pub fn is_valid(table: &Table) -> bool {
    validate(table).is_ok()
}

/// Runs the ordered samplesheet checks.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    labels: LabelRules,
}

impl Validator {
    pub fn new(labels: LabelRules) -> Self {
        Self { labels }
    }

    pub fn validate(&self, table: &Table) -> ValidationResult {
        check_required_columns(table)?;
        debug!("Required columns present");

        self.check_labels(table, columns::SAMPLE, true)?;
        check_group_presence(table)?;
        self.check_labels(table, columns::GROUP, false)?;
        debug!("Sample and group labels legal");

        check_read_1_present(table)?;
        check_extensions(table, columns::READ_1)?;
        check_extensions(table, columns::READ_2)?;
        check_unique(
            table,
            columns::READ_1,
            Check::DuplicateRead1,
            "There are duplications within Read 1 paths!",
        )?;
        check_unique(
            table,
            columns::READ_2,
            Check::DuplicateRead2,
            "There are duplications within Read 2 paths!",
        )?;
        debug!("FASTQ paths valid");

        let by_sample = rows_by_sample(table);
        check_group_consistency(table, &by_sample)?;
        check_endedness(table, &by_sample)?;

        let duplicated = duplicated_samples(table);
        if !duplicated.is_empty() && !table.has_column(columns::RUN_ACCESSION) {
            return Err(ValidationError::new(
                Check::MissingRunAccessionColumn,
                "run_accesssion column must exist when there are duplicated sample labels",
            )
            .with_context("Samples", duplicated.join(",")));
        }
        if table.has_column(columns::RUN_ACCESSION) {
            self.check_labels(table, columns::RUN_ACCESSION, false)?;
        }
        if !duplicated.is_empty() {
            check_run_accessions(table, &by_sample)?;
        }
        debug!(rows = table.len(), samples = by_sample.len(), "Samplesheet valid");

        Ok(())
    }

    /// Check every label in a column. Missing cells are skipped unless
    /// `missing_is_illegal`, in which case they are checked as empty labels.
    fn check_labels(&self, table: &Table, column: &str, missing_is_illegal: bool) -> ValidationResult {
        let Some(values) = table.column(column) else {
            return Ok(());
        };
        for value in values {
            match value {
                Some(label) => self.labels.check(label)?,
                None if missing_is_illegal => self.labels.check("")?,
                None => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Structural checks
// =============================================================================

fn check_required_columns(table: &Table) -> ValidationResult {
    if columns::REQUIRED.iter().all(|c| table.has_column(c)) {
        Ok(())
    } else {
        Err(ValidationError::new(
            Check::RequiredColumns,
            format!("Design file must contain {} columns", columns::REQUIRED.join(",")),
        ))
    }
}

fn check_group_presence(table: &Table) -> ValidationResult {
    let present = cells(table, columns::GROUP).filter(Option::is_some).count();
    if present == 0 || present == table.len() {
        Ok(())
    } else {
        Err(ValidationError::new(
            Check::PartialGroup,
            "Group labels missing in some samples but not others!",
        ))
    }
}

// =============================================================================
// FASTQ path checks
// =============================================================================

fn check_read_1_present(table: &Table) -> ValidationResult {
    if cells(table, columns::READ_1).all(|v| v.is_some()) {
        Ok(())
    } else {
        Err(ValidationError::new(Check::MissingRead1, "Read 1 path cannot be missing!"))
    }
}

fn check_extensions(table: &Table, column: &str) -> ValidationResult {
    for path in cells(table, column).flatten() {
        if !has_fastq_extension(path) {
            return Err(ValidationError::new(Check::InvalidExtension, "FASTQ path has invalid extension")
                .with_context("Path", path));
        }
    }
    Ok(())
}

/// True when the path ends in one of [`FASTQ_EXTENSIONS`].
pub fn has_fastq_extension(path: &str) -> bool {
    FASTQ_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Present values of `column` must be unique.
fn check_unique(table: &Table, column: &str, check: Check, message: &str) -> ValidationResult {
    let mut seen = HashSet::new();
    for value in cells(table, column).flatten() {
        if !seen.insert(value) {
            return Err(ValidationError::new(check, message));
        }
    }
    Ok(())
}

// =============================================================================
// Per-sample checks
// =============================================================================

/// Row indices per sample, in ascending sample order.
type SampleRows<'a> = BTreeMap<&'a str, Vec<usize>>;

/// Rows with a missing sample are left out.
fn rows_by_sample(table: &Table) -> SampleRows<'_> {
    let mut groups: SampleRows<'_> = BTreeMap::new();
    for (row, sample) in cells(table, columns::SAMPLE).enumerate() {
        if let Some(sample) = sample {
            groups.entry(sample).or_default().push(row);
        }
    }
    groups
}

fn check_group_consistency(table: &Table, by_sample: &SampleRows<'_>) -> ValidationResult {
    let inconsistent: Vec<&str> = by_sample
        .iter()
        .filter(|(_, rows)| {
            let first = table.value(rows[0], columns::GROUP);
            rows.iter().any(|&r| table.value(r, columns::GROUP) != first)
        })
        .map(|(sample, _)| *sample)
        .collect();

    if inconsistent.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(
            Check::InconsistentGroup,
            "Group labels for samples not consistent across different runs",
        )
        .with_context("Samples", inconsistent.join(",")))
    }
}

fn check_endedness(table: &Table, by_sample: &SampleRows<'_>) -> ValidationResult {
    let mixed: Vec<&str> = by_sample
        .iter()
        .filter(|(_, rows)| {
            let paired = rows
                .iter()
                .filter(|&&r| table.value(r, columns::READ_2).is_some())
                .count();
            paired != 0 && paired != rows.len()
        })
        .map(|(sample, _)| *sample)
        .collect();

    if mixed.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(
            Check::MixedEndedness,
            "Single-end and paired-end data cannot be mixed for the same sample",
        )
        .with_context("Samples", mixed.join(",")))
    }
}

/// Every occurrence of a sample after its first, in row order.
fn duplicated_samples(table: &Table) -> Vec<&str> {
    let mut seen = HashSet::new();
    cells(table, columns::SAMPLE)
        .flatten()
        .filter(|sample| !seen.insert(*sample))
        .collect()
}

fn check_run_accessions(table: &Table, by_sample: &SampleRows<'_>) -> ValidationResult {
    for (sample, rows) in by_sample {
        if rows.len() < 2 {
            continue;
        }
        let distinct: HashSet<&str> = rows
            .iter()
            .filter_map(|&r| table.value(r, columns::RUN_ACCESSION))
            .collect();
        if distinct.len() != rows.len() {
            return Err(ValidationError::new(
                Check::NonUniqueRunAccession,
                "run_accession missing or not unique for the same sample",
            )
            .with_context("Sample", *sample));
        }
    }
    Ok(())
}

/// Cells of a column; empty when the column does not exist.
fn cells<'a>(table: &'a Table, column: &str) -> impl Iterator<Item = Option<&'a str>> + 'a {
    table.column(column).into_iter().flatten()
}
