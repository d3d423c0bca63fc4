use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metrics::FetchMetrics;

/// One scraped HTML table, row-per-entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SeasonTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Appends a constant-valued column to the header and every row.
    pub fn append_column(&mut self, name: &str, value: &str) {
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// Pads short rows with empty cells and truncates long ones so every row
    /// matches the header width.
    pub fn normalize_width(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }

    /// Drops rows rejected by `filter`, returning how many were removed.
    pub fn retain_rows(&mut self, filter: &RowFilter) -> usize {
        let Some(idx) = self.column_index(filter.column) else {
            return 0;
        };
        let before = self.rows.len();
        self.rows
            .retain(|row| !row.get(idx).is_some_and(|cell| filter.matches(cell)));
        before - self.rows.len()
    }
}

/// Which `<table>` on a page holds the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSelector {
    First,
    Class(&'static str),
}

impl TableSelector {
    pub fn css(&self) -> String {
        match self {
            TableSelector::First => "table".to_string(),
            TableSelector::Class(class) => format!("table.{}", class),
        }
    }
}

/// Removes rows whose value in `column` equals any of `values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilter {
    pub column: &'static str,
    pub values: &'static [&'static str],
}

impl RowFilter {
    pub fn matches(&self, cell: &str) -> bool {
        self.values.iter().any(|v| *v == cell)
    }
}

/// Per-subleague post-processing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub table: TableSelector,
    /// Skip in-body rows tagged `class="thead"` (repeated headers, division labels).
    pub skip_thead_rows: bool,
    pub row_filter: Option<RowFilter>,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            table: TableSelector::First,
            skip_thead_rows: false,
            row_filter: None,
        }
    }
}

/// Column appended to every row of a fetched table before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntheticColumn {
    Year(i32),
    Team(String),
}

impl SyntheticColumn {
    pub const YEAR_HEADER: &'static str = "yearId";
    pub const TEAM_HEADER: &'static str = "teamId";

    pub fn header(&self) -> &'static str {
        match self {
            SyntheticColumn::Year(_) => Self::YEAR_HEADER,
            SyntheticColumn::Team(_) => Self::TEAM_HEADER,
        }
    }

    pub fn value(&self) -> String {
        match self {
            SyntheticColumn::Year(year) => year.to_string(),
            SyntheticColumn::Team(team) => team.clone(),
        }
    }
}

/// A single page to fetch and the file it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub url: String,
    pub file_name: String,
    pub column: SyntheticColumn,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeSummary {
    pub files_written: usize,
    pub rows_written: usize,
    pub rows_filtered: usize,
    pub combined_files: Vec<PathBuf>,
    pub metrics: FetchMetrics,
}
