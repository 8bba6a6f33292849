//! The statistical dataset: one cleaned table plus the current column selection.
//!
//! Construction is two-phase:
//!
//! 1. `io::ingest::load` produces the cleaned [`Table`] (pure, no selections)
//! 2. a [`Selection`] of column names is layered on top
//!
//! Selections are names only. Re-selecting never copies or mutates table data, and
//! every selector validates the name before assigning it.

use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::domain::{Cell, Column, KnownColumn, Table};
use crate::error::{Result, StatsError};
use crate::io::ingest;
use crate::metrics::{Targets, add_year_on_year};

/// Which columns play which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub features: Vec<String>,
    pub target: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            features: vec![KnownColumn::MarketTransactions.header().to_string()],
            target: KnownColumn::LoansDisbursed.header().to_string(),
            x_axis: KnownColumn::Year.header().to_string(),
            y_axis: KnownColumn::HousingStock.header().to_string(),
        }
    }
}

impl Selection {
    /// Fail with `ColumnNotFound` on the first selected name missing from `table`.
    pub fn validate(&self, table: &Table) -> Result<()> {
        self.features
            .iter()
            .chain([&self.target, &self.x_axis, &self.y_axis])
            .try_for_each(|name| table.column(name).map(|_| ()))
    }
}

#[derive(Debug, Clone)]
pub struct StatisticalDataset {
    table: Table,
    selection: Selection,
}

impl StatisticalDataset {
    /// Load a housing statistics export and apply the default selection.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_table(ingest::load(path)?)
    }

    /// Wrap an already cleaned table; the default columns must exist.
    pub fn from_table(table: Table) -> Result<Self> {
        Self::with_selection(table, Selection::default())
    }

    pub fn with_selection(table: Table, selection: Selection) -> Result<Self> {
        selection.validate(&table)?;
        Ok(Self { table, selection })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_feature(&mut self, column: &str) -> Result<()> {
        self.select_features(&[column])
    }

    pub fn select_features(&mut self, columns: &[&str]) -> Result<()> {
        if columns.is_empty() {
            return Err(StatsError::Dimension("at least one feature column is required".to_string()));
        }
        for name in columns {
            self.table.column(name)?;
        }
        self.selection.features = columns.iter().map(|s| s.to_string()).collect();
        Ok(())
    }

    pub fn select_target(&mut self, column: &str) -> Result<()> {
        self.selection.target = self.checked(column)?;
        Ok(())
    }

    pub fn select_x_axis(&mut self, column: &str) -> Result<()> {
        self.selection.x_axis = self.checked(column)?;
        Ok(())
    }

    pub fn select_y_axis(&mut self, column: &str) -> Result<()> {
        self.selection.y_axis = self.checked(column)?;
        Ok(())
    }

    /// Append year-over-year change columns to the owned table.
    pub fn apply_year_on_year(&mut self, targets: &Targets, results: Option<&Targets>) -> Result<Vec<String>> {
        add_year_on_year(&mut self.table, targets, results)
    }

    /// Selected feature columns as an `n x p` matrix.
    pub fn feature_matrix(&self) -> Result<DMatrix<f64>> {
        let n = self.table.row_count();
        let columns = self
            .selection
            .features
            .iter()
            .map(|name| self.table.column(name)?.to_f64())
            .collect::<Result<Vec<_>>>()?;
        let p = columns.len();
        Ok(DMatrix::from_fn(n, p, |i, j| columns[j][i]))
    }

    pub fn target_vector(&self) -> Result<DVector<f64>> {
        let values = self.table.column(&self.selection.target)?.to_f64()?;
        Ok(DVector::from_vec(values))
    }

    pub fn x_axis(&self) -> Result<&Column> {
        self.table.column(&self.selection.x_axis)
    }

    pub fn y_axis(&self) -> Result<&Column> {
        self.table.column(&self.selection.y_axis)
    }

    /// Selected time series as `(x label, y value)` pairs; non-numeric y cells are `None`.
    pub fn series(&self) -> Result<Vec<(String, Option<f64>)>> {
        let x = self.x_axis()?;
        let y = self.y_axis()?;
        Ok(x.values
            .iter()
            .map(Cell::to_string)
            .zip(y.values.iter().map(Cell::as_f64))
            .collect())
    }

    fn checked(&self, column: &str) -> Result<String> {
        self.table.column(column).map(|c| c.name.clone())
    }
}
