//! Parser for helm's tab-delimited CLI tables
//!
//! Helm prints `repo list` and `search` results as a header line followed by
//! tab-separated rows. The header names become record keys after
//! normalization: lower-cased, trimmed, internal whitespace replaced by
//! underscores (`CHART VERSION` becomes `chart_version`).

use indexmap::IndexMap;

use crate::error::{CoreError, Result};

/// One parsed table row, keyed by normalized header names in column order.
pub type TabularRecord = IndexMap<String, String>;

/// Parse a block of tab-delimited text into records.
///
/// Empty or blank input yields an empty sequence. Rows with fewer cells
/// than the header yield partial records (missing columns are absent, not
/// empty); cells beyond the header are dropped.
pub fn parse_table(input: &str) -> Result<Vec<TabularRecord>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = input.lines();
    let header: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split('\t')
        .map(normalize_header)
        .collect();
    let has_header = header.iter().any(|name| !name.is_empty());

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if !has_header {
            return Err(CoreError::MalformedTable {
                message: "data rows present but the header line is empty".to_string(),
            });
        }
        let mut record = TabularRecord::new();
        for (name, value) in header.iter().zip(line.split('\t')) {
            if name.is_empty() {
                continue;
            }
            record.insert(name.clone(), value.trim().to_string());
        }
        records.push(record);
    }
    Ok(records)
}

fn normalize_header(cell: &str) -> String {
    cell.trim()
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
