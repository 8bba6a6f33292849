//! Spreadsheet ingest and cleaning.
//!
//! The housing statistics export has a fixed layout:
//!
//! ```text
//! row 0          title (discarded while parsing)
//! row 1          column headers
//! rows 2..=8     secondary headers / metadata (7 rows)
//! rows 9..N-2    one record per year
//! row N-1        totals
//! ```
//!
//! Loading is split into two steps:
//! - `read_raw`: file -> raw table (title row skipped, header applied)
//! - `clean`: raw table -> canonical table (metadata + totals dropped, stock column renamed)
//!
//! `clean` is pure, so the row rules are testable without touching the disk.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::domain::{Cell, KnownColumn, Table};
use crate::error::{Result, StatsError};

/// Leading data rows holding secondary headers / metadata.
pub const METADATA_ROWS: usize = 7;

/// Trailing data rows holding aggregates.
pub const TOTALS_ROWS: usize = 1;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load and clean a housing statistics export.
///
/// Excel/ODS workbooks are read from their first sheet; any other extension is
/// parsed as CSV.
pub fn load(path: &Path) -> Result<Table> {
    let raw = read_raw(path)?;
    let rows_read = raw.row_count();
    let table = clean(raw);

    info!(
        path = %path.display(),
        rows_read,
        rows_kept = table.row_count(),
        columns = table.columns().len(),
        "loaded housing statistics"
    );
    Ok(table)
}

/// Apply the fixed-layout cleaning rules to a raw table.
///
/// Tables with fewer than `METADATA_ROWS + TOTALS_ROWS` rows come back empty
/// (columns kept, zero rows).
pub fn clean(mut raw: Table) -> Table {
    let n = raw.row_count();
    let end = n.saturating_sub(TOTALS_ROWS);
    raw.retain_rows(METADATA_ROWS..end);

    for known in KnownColumn::ALL {
        if let Some(source) = known.source_header() {
            if raw.rename_column(source, known.header()) {
                debug!(from = source, to = known.header(), "renamed column");
            }
        }
    }
    raw
}

/// Read the file into a raw table: title row skipped, next row used as header.
pub fn read_raw(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(StatsError::NotFound(path.to_path_buf()));
    }

    let records = if is_workbook(path) {
        read_workbook_records(path)?
    } else {
        read_csv_records(path)?
    };

    // records[0] = title, records[1] = header, rest = data.
    let mut records = records.into_iter().skip(1);
    let header = records
        .next()
        .ok_or_else(|| StatsError::EmptyInput(path.to_path_buf()))?;
    let rows: Vec<Vec<Cell>> = records.collect();
    if rows.is_empty() {
        return Err(StatsError::EmptyInput(path.to_path_buf()));
    }

    Ok(Table::from_rows(build_header(&header, &rows), rows))
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| WORKBOOK_EXTENSIONS.iter().any(|w| e.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

fn read_csv_records(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let file = File::open(path)
        .map_err(|e| StatsError::Load(format!("Failed to open '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| StatsError::Load(format!("CSV parse error at record {}: {e}", idx + 1)))?;
        out.push(record.iter().map(parse_field).collect());
    }
    Ok(out)
}

fn read_workbook_records(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| StatsError::Load(format!("Failed to open workbook '{}': {e}", path.display())))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range
            .map_err(|e| StatsError::Load(format!("Failed to read first sheet: {e}")))?,
        None => return Err(StatsError::EmptyInput(path.to_path_buf())),
    };

    let rows = range.rows().map(|row| row.iter().map(workbook_cell).collect()).collect();
    Ok(anchor_at_a1(range.start(), rows))
}

/// A calamine range begins at its first used cell; pad it back so row and
/// column positions match the sheet (title in row 1, headers in row 2).
fn anchor_at_a1(start: Option<(u32, u32)>, rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let Some((row_offset, col_offset)) = start else {
        return rows;
    };
    if row_offset > 0 || col_offset > 0 {
        debug!(row_offset, col_offset, "sheet data does not start at A1");
    }

    let mut out = vec![Vec::new(); row_offset as usize];
    out.extend(rows.into_iter().map(|row| {
        let mut padded = vec![Cell::Empty; col_offset as usize];
        padded.extend(row);
        padded
    }));
    out
}

fn workbook_cell(value: &Data) -> Cell {
    match value {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => parse_field(s),
        Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

/// Interpret one text field.
///
/// Thousands separators (spaces, including non-breaking ones) are accepted in
/// numbers since the publisher uses them in its exports.
pub fn parse_field(raw: &str) -> Cell {
    let s = raw.trim();
    if s.is_empty() {
        return Cell::Empty;
    }

    let compact: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect();
    match compact.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Text(s.to_string()),
    }
}

/// Header names: blank cells become `Unnamed: <idx>`, repeats get `.<n>` suffixes.
///
/// The header is widened to the longest data row so no cells are lost.
fn build_header(header: &[Cell], rows: &[Vec<Cell>]) -> Vec<String> {
    let width = rows.iter().map(Vec::len).fold(header.len(), usize::max);
    let mut seen: HashMap<String, usize> = HashMap::new();

    (0..width)
        .map(|idx| {
            let base = match header.get(idx) {
                Some(cell) if !cell.is_empty() => cell.to_string(),
                _ => format!("Unnamed: {idx}"),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
