//! Daily series loading.

use brandcast_common::{BrandcastError, Result};
use std::path::Path;
use tracing::debug;

/// Chronological numeric table, one row per day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DailySeries {
    /// Builds a series from column names and rows of equal width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(BrandcastError::dataset("daily table has no columns"));
        }
        if let Some(row) = rows.iter().position(|r| r.len() != columns.len()) {
            return Err(BrandcastError::dataset(format!(
                "row {} has {} cells, expected {}",
                row + 1,
                rows[row].len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Single-column series, handy for competitors and tests.
    pub fn single(column: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            columns: vec![column.into()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    /// Reads a CSV with a header row. Every cell must be numeric.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .zip(&columns)
                .map(|(cell, column)| {
                    cell.parse::<f64>().map_err(|e| {
                        BrandcastError::dataset_with_source(
                            format!(
                                "non-numeric value '{cell}' in column '{column}' at row {}",
                                index + 1
                            ),
                            e,
                        )
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }

        debug!(
            "Loaded daily table {} ({} rows, {} columns)",
            path.display(),
            rows.len(),
            columns.len()
        );
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Last `n` values of a column (fewer if the table is shorter).
    pub fn tail(&self, name: &str, n: usize) -> Option<Vec<f64>> {
        let values = self.column(name)?;
        let start = values.len().saturating_sub(n);
        Some(values[start..].to_vec())
    }

    pub fn last(&self, name: &str) -> Option<f64> {
        let index = self.column_index(name)?;
        self.rows.last().map(|row| row[index])
    }
}
