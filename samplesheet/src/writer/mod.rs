//! Delimited-text serialization of output tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::models::Table;

/// Field separator of the main samplesheet.
pub const SAMPLESHEET_DELIMITER: u8 = b',';

/// Field separator of the group metadata file.
pub const METADATA_DELIMITER: u8 = b'\t';

/// Default name of the group metadata file.
pub const METADATA_FILE_NAME: &str = "group_metadata.csv";

/// Write a table with a header row and no index column.
///
/// Missing cells become empty fields. Fields are quoted only when needed.
pub fn write_to<W: Write>(table: &Table, writer: W, delimiter: u8) -> WriteResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a table to a file, replacing any existing content.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P, delimiter: u8) -> WriteResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(table, file, delimiter)
}

/// Render a table to a string.
pub fn to_string(table: &Table, delimiter: u8) -> WriteResult<String> {
    let mut buf = Vec::new();
    write_to(table, &mut buf, delimiter)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new(["sampleid", "group"]);
        t.push_row(vec![Some("s1".into()), Some("g1".into())]);
        t.push_row(vec![Some("s2".into()), None]);
        t
    }

    #[test]
    fn test_tab_separated() {
        let out = to_string(&table(), METADATA_DELIMITER).unwrap();
        assert_eq!(out, "sampleid\tgroup\ns1\tg1\ns2\t\n");
    }

    #[test]
    fn test_comma_separated_with_quoting() {
        let mut t = Table::new(["a", "b"]);
        t.push_row(vec![Some("x,y".into()), Some("z".into())]);
        let out = to_string(&t, SAMPLESHEET_DELIMITER).unwrap();
        assert_eq!(out, "a,b\n\"x,y\",z\n");
    }

    #[test]
    fn test_write_table_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE_NAME);
        write_table(&table(), &path, METADATA_DELIMITER).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("sampleid\tgroup\n"));
    }

    #[test]
    fn test_unwritable_path() {
        let result = write_table(&table(), "/nonexistent/dir/out.csv", SAMPLESHEET_DELIMITER);
        assert!(matches!(result, Err(WriteError::Io { .. })));
    }
}
