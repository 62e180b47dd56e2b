//! Turn a validated samplesheet into the pipeline-ready tables.
//!
//! # Architecture
//!
//! ```text
//! Validated input                     Outputs
//! ┌───────────────────────────┐       ┌──────────────────────────────────────┐
//! │ sample read_1 read_2 group│  →    │ sample fastq_1 fastq_2 run_accession │
//! │                           │       │ instrument_platform single_end fasta │
//! └───────────────────────────┘       ├──────────────────────────────────────┤
//!                                     │ sampleid group                       │
//!                                     └──────────────────────────────────────┘
//! ```
//!
//! Existing columns keep their position; new columns are appended.

use serde::Serialize;
use tracing::debug;

use crate::models::{columns, Table};

/// Platform assumed when the samplesheet does not say.
pub const DEFAULT_INSTRUMENT_PLATFORM: &str = "ILLUMINA";

/// Boolean cell text, as the downstream pipeline reads it.
pub fn bool_cell(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Output of [`transform`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformed {
    /// Main samplesheet, `group` removed.
    pub samplesheet: Table,
    /// `sampleid` and `group`, one row per input row.
    pub metadata: Table,
}

/// Derive the output tables from a validated samplesheet.
pub fn transform(mut table: Table) -> Transformed {
    if !table.has_column(columns::RUN_ACCESSION) {
        table.fill_column(columns::RUN_ACCESSION, Some(String::new()));
    }

    // Not used yet; kept for compatibility with existing pipeline code.
    if !table.has_column(columns::INSTRUMENT_PLATFORM) {
        table.fill_column(
            columns::INSTRUMENT_PLATFORM,
            Some(DEFAULT_INSTRUMENT_PLATFORM.to_string()),
        );
    }

    let single_end: Vec<_> = table
        .column(columns::READ_2)
        .map(|reads| reads.map(|r| Some(bool_cell(r.is_none()))).collect())
        .unwrap_or_else(|| vec![Some(bool_cell(true)); table.len()]);
    table.set_column(columns::SINGLE_END, single_end);

    // Placeholder, as above.
    table.fill_column(columns::FASTA, Some(String::new()));

    table.rename_column(columns::READ_1, columns::FASTQ_1);
    table.rename_column(columns::READ_2, columns::FASTQ_2);

    let metadata = table.project(&[
        (columns::SAMPLE, columns::SAMPLE_ID),
        (columns::GROUP, columns::GROUP),
    ]);
    table.drop_column(columns::GROUP);

    debug!(
        rows = table.len(),
        columns = %table.columns().join(","),
        "Samplesheet normalized"
    );

    Transformed {
        samplesheet: table,
        metadata,
    }
}
