use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::output::{read_table, write_table};
use crate::types::{RowFilter, SeasonTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
    pub output: PathBuf,
    pub files: usize,
    pub rows: usize,
    pub rows_filtered: usize,
}

/// CSV files in `dir` that belong in the combined archive, sorted by name.
/// Existing `*-ALL.csv` archives are never inputs.
pub fn input_files(dir: &Path, prefix: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().map(|ext| ext == "csv").unwrap_or(false))
        .filter(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            !name.ends_with("-ALL.csv") && prefix.map_or(true, |p| name.starts_with(p))
        })
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Concatenates tables under the union of their headers, in first-seen
/// column order. Cells for columns a table lacks are left empty.
pub fn concat_tables(tables: &[SeasonTable]) -> SeasonTable {
    let mut headers: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in tables {
        for header in &table.headers {
            if !positions.contains_key(header) {
                positions.insert(header.clone(), headers.len());
                headers.push(header.clone());
            }
        }
    }

    let mut combined = SeasonTable::new(headers);
    for table in tables {
        let mapping: Vec<usize> = table.headers.iter().map(|h| positions[h]).collect();
        for row in &table.rows {
            let mut out = vec![String::new(); combined.headers.len()];
            for (value, &target) in row.iter().zip(&mapping) {
                out[target] = value.clone();
            }
            combined.rows.push(out);
        }
    }
    combined
}

/// Combines a subleague's per-season or per-team CSVs into
/// `<subleague>-ALL.csv` inside `dir`.
pub fn combine_directory(
    dir: &Path,
    subleague: &str,
    prefix: Option<&str>,
    row_filter: Option<&RowFilter>,
) -> Result<CombineReport> {
    let files = input_files(dir, prefix)?;
    if files.is_empty() {
        return Err(ScrapeError::NothingToCombine { dir: dir.to_path_buf() }.into());
    }

    let output = dir.join(format!("{}-ALL.csv", subleague));
    info!("Combining {} files into {:?}", files.len(), output);

    let tables = files
        .iter()
        .map(|path| read_table(path))
        .collect::<Result<Vec<_>>>()?;
    let mut combined = concat_tables(&tables);

    let rows_filtered = row_filter.map_or(0, |filter| combined.retain_rows(filter));
    if rows_filtered > 0 {
        debug!("Removed {} filtered rows from {}", rows_filtered, subleague);
    }

    let rows = write_table(&output, &combined)?;

    Ok(CombineReport {
        output,
        files: files.len(),
        rows,
        rows_filtered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> SeasonTable {
        SeasonTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_concat_identical_headers_sums_rows() {
        let a = table(&["Team", "W", "yearId"], &[&["BOS", "50", "2020"], &["NYK", "41", "2020"]]);
        let b = table(&["Team", "W", "yearId"], &[&["BOS", "36", "2021"]]);

        let combined = concat_tables(&[a, b]);
        assert_eq!(combined.headers, vec!["Team", "W", "yearId"]);
        assert_eq!(combined.rows.len(), 3);
        assert_eq!(combined.rows[2], vec!["BOS", "36", "2021"]);
    }

    #[test]
    fn test_concat_differing_headers_uses_union() {
        let a = table(&["Team", "W"], &[&["BOS", "50"]]);
        let b = table(&["Team", "SRS", "W"], &[&["NYK", "2.1", "41"]]);

        let combined = concat_tables(&[a, b]);
        assert_eq!(combined.headers, vec!["Team", "W", "SRS"]);
        assert_eq!(combined.rows[0], vec!["BOS", "50", ""]);
        assert_eq!(combined.rows[1], vec!["NYK", "41", "2.1"]);
    }

    #[test]
    fn test_input_files_respects_prefix_and_skips_archives() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["NBA-1951.csv", "NBA-1950.csv", "BAA-1949.csv", "NBA-ALL.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "Team\n").unwrap();
        }

        let names: Vec<String> = input_files(dir.path(), Some("NBA-"))
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["NBA-1950.csv", "NBA-1951.csv"]);

        assert_eq!(input_files(dir.path(), None).unwrap().len(), 3);
    }

    #[test]
    fn test_combine_directory_filters_repeated_headers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("sec-2020.csv"),
            "School,W,L,yearId\nAlabama,10,0,2020\nSchool,W,L,2020\n",
        )
        .unwrap();
        fs::write(dir.path().join("sec-2021.csv"), "School,W,L,yearId\nGeorgia,8,0,2021\n").unwrap();

        let filter = RowFilter { column: "W", values: &["W"] };
        let report = combine_directory(dir.path(), "sec", Some("sec-"), Some(&filter)).unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.rows, 2);
        assert_eq!(report.rows_filtered, 1);
        assert_eq!(
            fs::read_to_string(&report.output).unwrap(),
            "School,W,L,yearId\nAlabama,10,0,2020\nGeorgia,8,0,2021\n"
        );

        // Rerunning does not fold the archive back into itself
        let again = combine_directory(dir.path(), "sec", Some("sec-"), Some(&filter)).unwrap();
        assert_eq!(again.rows, 2);
    }

    #[test]
    fn test_combine_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = combine_directory(dir.path(), "pcc", Some("pcc-"), None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::NothingToCombine { .. })
        ));
    }
}
