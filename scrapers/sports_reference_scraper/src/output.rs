use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

use crate::types::SeasonTable;

/// Writes `table` as CSV to `path`, creating parent directories as needed.
/// Returns the number of data rows written.
pub fn write_table(path: &Path, table: &SeasonTable) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    debug!("Wrote {} rows to {:?}", table.rows.len(), path);
    Ok(table.rows.len())
}

/// Reads a CSV written by [`write_table`] back into a table.
pub fn read_table(path: &Path) -> Result<SeasonTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = SeasonTable::new(headers);
    for record in rdr.records() {
        let record = record.with_context(|| format!("Malformed row in {:?}", path))?;
        table.rows.push(record.iter().map(str::to_string).collect());
    }
    table.normalize_width();

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_directories_and_quotes_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("NCAAF/sec/sec-2021.csv");
        let table = SeasonTable {
            headers: vec!["School".into(), "Notes".into(), "yearId".into()],
            rows: vec![vec!["Alabama".into(), "won, then lost".into(), "2021".into()]],
        };

        assert_eq!(write_table(&path, &table).unwrap(), 1);
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "School,Notes,yearId\nAlabama,\"won, then lost\",2021\n");
        assert_eq!(read_table(&path).unwrap(), table);
    }
}
