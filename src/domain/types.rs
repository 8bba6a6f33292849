//! Shared table types.
//!
//! Tables are stored column-major: each [`Column`] owns one [`Cell`] per row, and
//! every column of a [`Table`] has the same length. This keeps the operations the
//! pipeline actually needs (append a derived column, pull one column out as a
//! numeric vector) cheap and obvious.

use crate::error::{Result, StatsError};

/// One spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    /// Missing value; also the null sentinel for the first row of a derived column.
    Empty,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Empty => Ok(()),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric view of the column; text and empty cells become `None`.
    pub fn numeric(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Cell::as_f64).collect()
    }

    /// Strict numeric view: every cell must be a number.
    pub fn to_f64(&self) -> Result<Vec<f64>> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_f64().ok_or_else(|| StatsError::NonNumeric {
                    column: self.name.clone(),
                    row,
                })
            })
            .collect()
    }
}

/// A rectangular, column-major table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns of equal length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(StatsError::Dimension(format!(
                "column `{}` has {} rows, expected {row_count}",
                bad.name,
                bad.len()
            )));
        }
        Ok(Self { columns, row_count })
    }

    /// Build a table from a header and row-major records.
    ///
    /// Short records are padded with [`Cell::Empty`]; cells beyond the header
    /// width are dropped.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let row_count = rows.len();
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().unwrap_or(Cell::Empty));
            }
        }

        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Validated lookup by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StatsError::ColumnNotFound(name.to_string()))
    }

    /// Append a column, or replace the column with the same name in place.
    pub fn upsert_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.row_count && !(self.columns.is_empty() && self.row_count == 0) {
            return Err(StatsError::Dimension(format!(
                "column `{}` has {} rows, table has {}",
                column.name,
                column.len(),
                self.row_count
            )));
        }
        if self.columns.is_empty() {
            self.row_count = column.len();
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Rename a column if present. Returns whether a rename happened.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.name == from) {
            Some(column) => {
                column.name = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Keep only rows in `range`, in every column.
    pub fn retain_rows(&mut self, range: std::ops::Range<usize>) {
        let start = range.start.min(self.row_count);
        let end = range.end.clamp(start, self.row_count);
        for column in self.columns.iter_mut() {
            column.values.truncate(end);
            column.values.drain(..start);
        }
        self.row_count = end - start;
    }
}

/// The semantic columns of the housing statistics export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownColumn {
    Year,
    HousingStock,
    UnitsBuilt,
    MarketTransactions,
    LoansDisbursed,
}

impl KnownColumn {
    pub const ALL: [KnownColumn; 5] = [
        KnownColumn::Year,
        KnownColumn::HousingStock,
        KnownColumn::UnitsBuilt,
        KnownColumn::MarketTransactions,
        KnownColumn::LoansDisbursed,
    ];

    /// Canonical header text after loading.
    pub fn header(self) -> &'static str {
        match self {
            KnownColumn::Year => "Év",
            KnownColumn::HousingStock => "Lakásállomány",
            KnownColumn::UnitsBuilt => "Épített lakás",
            KnownColumn::MarketTransactions => "Lakáspiaci tranzakció",
            KnownColumn::LoansDisbursed => "Folyósított lakáshitel, db",
        }
    }

    /// Header text as published, where it differs from the canonical one.
    pub fn source_header(self) -> Option<&'static str> {
        match self {
            KnownColumn::HousingStock => Some("Lakásállomány, január 1."),
            _ => None,
        }
    }
}
