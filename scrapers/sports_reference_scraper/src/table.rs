use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

use crate::error::ScrapeError;
use crate::types::{Quirks, SeasonTable};

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapses runs of whitespace (including `&nbsp;`) into single spaces.
pub fn clean_text(raw: &str) -> String {
    whitespace()
        .replace_all(&raw.replace('\u{a0}', " "), " ")
        .trim()
        .to_string()
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn row_cells(row: ElementRef) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in child_elements(row).filter(|c| matches!(c.value().name(), "th" | "td")) {
        let text = clean_text(&cell.text().collect::<String>());
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        cells.extend(std::iter::repeat(text).take(span));
    }
    cells
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Names blank headers `Unnamed: N` and suffixes repeats with `.1`, `.2`, ...
/// skipping any suffix already taken by another column.
fn disambiguate_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = if name.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name
            };
            let mut unique = name.clone();
            let count = counts.entry(name.clone()).or_insert(0);
            while used.contains(&unique) {
                *count += 1;
                unique = format!("{}.{}", name, count);
            }
            used.insert(unique.clone());
            unique
        })
        .collect()
}

/// Extracts the table chosen by `quirks.table` from a page.
///
/// Only the last `<thead>` row becomes the header; grouping rows above it are
/// dropped. `<tfoot>` rows (league totals and averages) are never included.
pub fn extract_table(html: &str, quirks: &Quirks) -> Result<SeasonTable> {
    let css = quirks.table.css();
    let selector = Selector::parse(&css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))?;
    let document = Html::parse_document(html);

    let table = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::TableNotFound { selector: css.clone() })?;

    let mut header_rows = Vec::new();
    let mut body_rows = Vec::new();
    for section in child_elements(table) {
        match section.value().name() {
            "thead" => header_rows.extend(child_elements(section).filter(|r| r.value().name() == "tr")),
            "tbody" => body_rows.extend(child_elements(section).filter(|r| r.value().name() == "tr")),
            "tr" => body_rows.push(section),
            _ => {}
        }
    }

    let mut body_rows = body_rows.into_iter();
    let header_row = match header_rows.last() {
        Some(row) => *row,
        None => body_rows
            .next()
            .ok_or_else(|| ScrapeError::MissingHeader { selector: css.clone() })?,
    };
    if header_rows.len() > 1 {
        debug!("Dropping {} over-header row(s) from {}", header_rows.len() - 1, css);
    }

    let mut season = SeasonTable::new(disambiguate_headers(row_cells(header_row)));

    for row in body_rows {
        if quirks.skip_thead_rows && (has_class(row, "thead") || has_class(row, "over_header")) {
            continue;
        }
        let cells = row_cells(row);
        if cells.is_empty() {
            continue;
        }
        season.rows.push(cells);
    }
    season.normalize_width();

    Ok(season)
}
