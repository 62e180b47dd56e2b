//! Tabular data model for samplesheets.
//!
//! - [`Cell`] - One value, `None` when missing
//! - [`Table`] - Ordered columns and rows
//! - [`columns`] - Column names read or written by the pipeline

use serde::Serialize;

/// A single table value. `None` marks a missing entry.
pub type Cell = Option<String>;

// =============================================================================
// Column names
// =============================================================================

/// Column names the pipeline knows about.
pub mod columns {
    pub const SAMPLE: &str = "sample";
    pub const READ_1: &str = "read_1";
    pub const READ_2: &str = "read_2";
    pub const GROUP: &str = "group";
    pub const RUN_ACCESSION: &str = "run_accession";

    pub const INSTRUMENT_PLATFORM: &str = "instrument_platform";
    pub const SINGLE_END: &str = "single_end";
    pub const FASTA: &str = "fasta";
    pub const FASTQ_1: &str = "fastq_1";
    pub const FASTQ_2: &str = "fastq_2";
    pub const SAMPLE_ID: &str = "sampleid";

    /// Columns every input samplesheet must carry.
    pub const REQUIRED: [&str; 4] = [SAMPLE, READ_1, READ_2, GROUP];
}

// =============================================================================
// Table
// =============================================================================

/// Ordered rows sharing one ordered column set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padded with missing cells or truncated to the header
    /// width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of a column, top to bottom. `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = Option<&str>> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    /// Cell at `row` in column `name`.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row)?[idx].as_deref()
    }

    /// Replace a column's values in place, or append it as the last column.
    ///
    /// `values` is padded with missing cells or truncated to the row count.
    pub fn set_column(&mut self, name: &str, mut values: Vec<Cell>) {
        values.resize(self.rows.len(), None);
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Set every row of a column to the same value.
    pub fn fill_column(&mut self, name: &str, value: Cell) {
        let values = vec![value; self.rows.len()];
        self.set_column(name, values);
    }

    /// Rename a column without moving it. Returns false if absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a column. Returns false if absent.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// New table with the given `(source, target)` columns, in that order.
    ///
    /// Source columns that do not exist yield missing cells.
    pub fn project(&self, mapping: &[(&str, &str)]) -> Table {
        let indices: Vec<Option<usize>> = mapping
            .iter()
            .map(|(source, _)| self.column_index(source))
            .collect();

        let mut out = Table::new(mapping.iter().map(|(_, target)| *target));
        for row in &self.rows {
            out.rows
                .push(indices.iter().map(|idx| idx.and_then(|i| row[i].clone())).collect());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Some(s.to_string())
    }

    fn sample_table() -> Table {
        let mut t = Table::new(["a", "b", "c"]);
        t.push_row(vec![cell("1"), None, cell("x")]);
        t.push_row(vec![cell("2"), cell("y"), cell("z")]);
        t
    }

    #[test]
    fn test_column_lookup() {
        let t = sample_table();
        assert_eq!(t.column_index("b"), Some(1));
        assert!(!t.has_column("d"));
        let b: Vec<_> = t.column("b").unwrap().collect();
        assert_eq!(b, vec![None, Some("y")]);
        assert_eq!(t.value(1, "c"), Some("z"));
        assert_eq!(t.value(0, "b"), None);
    }

    #[test]
    fn test_set_column_appends_then_replaces() {
        let mut t = sample_table();
        t.fill_column("d", cell("new"));
        assert_eq!(t.columns(), ["a", "b", "c", "d"]);

        t.set_column("b", vec![cell("p"), None]);
        assert_eq!(t.columns(), ["a", "b", "c", "d"]);
        assert_eq!(t.value(0, "b"), Some("p"));
        assert_eq!(t.value(1, "b"), None);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut t = sample_table();
        assert!(t.rename_column("b", "bee"));
        assert_eq!(t.columns(), ["a", "bee", "c"]);
        assert!(!t.rename_column("missing", "x"));
    }

    #[test]
    fn test_drop_column() {
        let mut t = sample_table();
        assert!(t.drop_column("a"));
        assert_eq!(t.columns(), ["b", "c"]);
        assert_eq!(t.rows()[1], vec![cell("y"), cell("z")]);
        assert!(!t.drop_column("a"));
    }

    #[test]
    fn test_project_renames() {
        let t = sample_table();
        let p = t.project(&[("c", "cee"), ("a", "ay")]);
        assert_eq!(p.columns(), ["cee", "ay"]);
        assert_eq!(p.rows()[0], vec![cell("x"), cell("1")]);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn test_push_row_fits_header_width() {
        let mut t = Table::new(["a", "b"]);
        t.push_row(vec![cell("1")]);
        t.push_row(vec![cell("2"), cell("3"), cell("extra")]);
        assert_eq!(t.rows()[0], vec![cell("1"), None]);
        assert_eq!(t.rows()[1], vec![cell("2"), cell("3")]);
    }

    #[test]
    fn test_set_column_fits_row_count() {
        let mut t = sample_table();
        t.set_column("d", vec![cell("only")]);
        let d: Vec<_> = t.column("d").unwrap().collect();
        assert_eq!(d, vec![Some("only"), None]);

        t.set_column("a", vec![cell("p"), cell("q"), cell("r")]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.value(1, "a"), Some("q"));
    }
}
