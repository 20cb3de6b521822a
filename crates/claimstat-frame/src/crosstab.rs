use std::collections::BTreeMap;

use serde::Serialize;

use crate::{FrameError, table::DataTable};

/// Co-occurrence counts of two columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crosstab {
    pub row_column: String,
    pub col_column: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `counts[i][j]` counts rows labelled `row_labels[i]` and `col_labels[j]`.
    pub counts: Vec<Vec<u64>>,
}

impl Crosstab {
    #[must_use]
    pub fn get(&self, row_label: &str, col_label: &str) -> Option<u64> {
        let i = self.row_labels.iter().position(|l| l == row_label)?;
        let j = self.col_labels.iter().position(|l| l == col_label)?;
        Some(self.counts[i][j])
    }

    #[must_use]
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    #[must_use]
    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.col_labels.len())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Cross-tabulates two columns.
///
/// Labels are sorted, and rows missing a value in either column are
/// excluded.
///
/// ```
/// # use claimstat_frame::{crosstab::crosstab, table::{Column, DataTable}};
/// let table = DataTable::new(vec![
///     Column::categorical("Gender", [Some("Male"), Some("Female"), Some("Male")]),
///     Column::categorical("Province", [Some("Gauteng"), Some("Gauteng"), None]),
/// ])
/// .unwrap();
/// let table = crosstab(&table, "Gender", "Province").unwrap();
/// assert_eq!(table.get("Male", "Gauteng"), Some(1));
/// assert_eq!(table.total(), 2);
/// ```
pub fn crosstab(
    table: &DataTable,
    row_column: &str,
    col_column: &str,
) -> Result<Crosstab, FrameError> {
    let rows = table.column(row_column)?;
    let cols = table.column(col_column)?;

    let mut pairs = BTreeMap::<(String, String), u64>::new();
    for row in 0..table.height() {
        if let (Some(r), Some(c)) = (rows.display_value(row), cols.display_value(row)) {
            *pairs.entry((r.into_owned(), c.into_owned())).or_default() += 1;
        }
    }

    let row_labels = rows.unique_values();
    let col_labels = cols.unique_values();
    let counts = row_labels
        .iter()
        .map(|r| {
            col_labels
                .iter()
                .map(|c| pairs.get(&(r.clone(), c.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(Crosstab {
        row_column: row_column.to_owned(),
        col_column: col_column.to_owned(),
        row_labels,
        col_labels,
        counts,
    })
}
