//! CSV output of the result table.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use stmtx_core::StatementTable;

/// Write the table as CSV: header row, one row per record, no index column.
pub fn write_csv<W: Write>(writer: W, table: &StatementTable) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(StatementTable::headers())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the table to `path`, replacing any existing file.
pub fn write_csv_file(path: &Path, table: &StatementTable) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    write_csv(file, table).with_context(|| format!("failed to write {}", path.display()))
}
