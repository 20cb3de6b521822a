use serde::Serialize;

use crate::table::DataTable;

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValues {
    pub column: String,
    /// Absolute number of missing cells.
    pub count: usize,
    /// Share of missing cells in percent, `NaN` for an empty table.
    pub percentage: f64,
}

/// Reports missing cells per column, in table order.
///
/// ```
/// # use claimstat_frame::{missing::missing_values_summary, table::{Column, DataTable}};
/// let table = DataTable::new(vec![Column::numeric("TotalClaims", vec![1.0, f64::NAN, 3.0, 4.0])])
///     .unwrap();
/// let summary = missing_values_summary(&table);
/// assert_eq!(summary[0].count, 1);
/// assert_eq!(summary[0].percentage, 25.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn missing_values_summary(table: &DataTable) -> Vec<MissingValues> {
    let height = table.height() as f64;
    table
        .columns()
        .iter()
        .map(|column| {
            let count = column.missing_count();
            MissingValues {
                column: column.name().to_owned(),
                count,
                percentage: count as f64 / height * 100.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_counts_both_column_kinds() {
        let table = DataTable::new(vec![
            Column::categorical("Gender", [Some("Male"), None, None, Some("Female")]),
            Column::numeric("TotalPremium", vec![1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap();
        let summary = missing_values_summary(&table);
        assert_eq!(
            summary,
            vec![
                MissingValues {
                    column: "Gender".to_owned(),
                    count: 2,
                    percentage: 50.0,
                },
                MissingValues {
                    column: "TotalPremium".to_owned(),
                    count: 0,
                    percentage: 0.0,
                },
            ]
        );
    }

    #[test]
    fn test_empty_table_percentage_is_nan() {
        let table = DataTable::new(vec![Column::numeric("TotalClaims", vec![])]).unwrap();
        let summary = missing_values_summary(&table);
        assert_eq!(summary[0].count, 0);
        assert!(summary[0].percentage.is_nan());
    }
}
