//! Dataset cleaning: imputation, dropping sparse columns and incomplete rows,
//! and date normalization.

use chrono::{NaiveDate, NaiveDateTime};
use claimstat_stats::descriptive;

use crate::{
    FrameError,
    table::{Column, ColumnData, DataTable},
};

/// Default share of present values a column needs to survive [`drop_sparse_columns`].
pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.5;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Fills missing cells of numeric columns with the column mean.
///
/// Columns listed in `exclude` are left untouched, as are columns with no
/// observed value. Returns the cleaned table and the names of the imputed
/// columns.
pub fn impute_numeric_columns<S>(
    table: &DataTable,
    exclude: &[S],
) -> Result<(DataTable, Vec<String>), FrameError>
where
    S: AsRef<str>,
{
    let mut result = table.clone();
    let mut imputed = Vec::new();

    for column in table.columns() {
        if exclude.iter().any(|name| name.as_ref() == column.name()) {
            continue;
        }
        let Some(values) = column.as_numeric() else {
            continue;
        };
        let Some(mean) = column
            .present_values()
            .and_then(|present| descriptive::mean(&present))
        else {
            continue;
        };
        let filled = values
            .iter()
            .map(|&v| if v.is_nan() { mean } else { v })
            .collect();
        result.set_column(Column::numeric(column.name(), filled))?;
        imputed.push(column.name().to_owned());
    }

    log::info!("Imputed missing values in the following columns: {imputed:?}");
    Ok((result, imputed))
}

/// Drops columns whose present-value share is below `missing_threshold`.
///
/// A column is kept when at least `height × missing_threshold` of its cells
/// are present.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn drop_sparse_columns(table: &DataTable, missing_threshold: f64) -> DataTable {
    let required = table.height() as f64 * missing_threshold;
    let sparse = table
        .columns()
        .iter()
        .filter(|column| ((column.len() - column.missing_count()) as f64) < required)
        .map(|column| column.name().to_owned())
        .collect::<Vec<_>>();

    log::info!("Columns dropped: {}", sparse.len());
    table.drop_columns(&sparse)
}

/// Removes every row that has at least one missing cell.
#[must_use]
pub fn drop_incomplete_rows(table: &DataTable) -> DataTable {
    let cleaned = table.filter_rows(|row| !table.row_has_missing(row));
    log::info!(
        "Rows dropped: {}",
        table.height().saturating_sub(cleaned.height())
    );
    cleaned
}

/// Rewrites a date column as `YYYY-MM-DD` strings.
///
/// Cells that match none of the supported formats become missing. Accepted
/// inputs include `2002-06-01`, `6/1/2002`, `6/2002` (first of the month)
/// and ISO timestamps.
pub fn normalize_dates(table: &DataTable, column: &str) -> Result<DataTable, FrameError> {
    let source = table.column(column)?;
    let normalized = (0..source.len())
        .map(|row| {
            source
                .display_value(row)
                .and_then(|text| parse_date(&text))
                .map(|date| date.format("%Y-%m-%d").to_string())
        })
        .collect::<Vec<_>>();

    let coerced = normalized
        .iter()
        .enumerate()
        .filter(|(row, value)| value.is_none() && !source.is_missing(*row))
        .count();
    if coerced > 0 {
        log::warn!("{coerced} unparseable values in '{column}' set to missing");
    }

    let mut result = table.clone();
    result.set_column(Column::new(column, ColumnData::Categorical(normalized)))?;
    Ok(result)
}

/// Parses a date in one of the supported formats.
///
/// ```
/// # use claimstat_frame::cleaning::parse_date;
/// # use chrono::NaiveDate;
/// let expected = NaiveDate::from_ymd_opt(2002, 6, 1);
/// assert_eq!(parse_date("6/2002"), expected);
/// assert_eq!(parse_date("2002-06-01 00:00:00"), expected);
/// assert_eq!(parse_date("not a date"), None);
/// ```
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("1/{text}"), "%d/%m/%Y").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::numeric("TotalPremium", vec![10.0, f64::NAN, 30.0, f64::NAN]),
            Column::numeric("CustomValueEstimate", vec![f64::NAN, f64::NAN, f64::NAN, 5.0]),
            Column::categorical("Gender", [Some("Male"), Some("Female"), None, Some("Male")]),
            Column::categorical(
                "VehicleIntroDate",
                [Some("6/2002"), Some("2010-01-15"), Some("garbage"), None],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_impute_uses_column_mean() {
        let (imputed, columns) = impute_numeric_columns::<&str>(&sample_table(), &[]).unwrap();
        assert_eq!(columns, vec!["TotalPremium", "CustomValueEstimate"]);
        assert_eq!(
            imputed.numeric("TotalPremium").unwrap(),
            &[10.0, 20.0, 30.0, 20.0]
        );
        assert_eq!(
            imputed.numeric("CustomValueEstimate").unwrap(),
            &[5.0, 5.0, 5.0, 5.0]
        );
        // Categorical columns are not imputed
        assert!(imputed.column("Gender").unwrap().is_missing(2));
    }

    #[test]
    fn test_impute_respects_exclusions() {
        let (imputed, columns) =
            impute_numeric_columns(&sample_table(), &["CustomValueEstimate"]).unwrap();
        assert_eq!(columns, vec!["TotalPremium"]);
        assert_eq!(
            imputed.column("CustomValueEstimate").unwrap().missing_count(),
            3
        );
    }

    #[test]
    fn test_impute_skips_all_missing_columns() {
        let table =
            DataTable::new(vec![Column::numeric("Empty", vec![f64::NAN, f64::NAN])]).unwrap();
        let (imputed, columns) = impute_numeric_columns::<&str>(&table, &[]).unwrap();
        assert!(columns.is_empty());
        assert_eq!(imputed.column("Empty").unwrap().missing_count(), 2);
    }

    #[test]
    fn test_drop_sparse_columns() {
        let cleaned = drop_sparse_columns(&sample_table(), DEFAULT_MISSING_THRESHOLD);
        assert_eq!(
            cleaned.column_names().collect::<Vec<_>>(),
            vec!["TotalPremium", "Gender", "VehicleIntroDate"]
        );
        let strict = drop_sparse_columns(&sample_table(), 1.0);
        assert_eq!(strict.width(), 0);
    }

    #[test]
    fn test_drop_incomplete_rows() {
        let table = sample_table().drop_columns(&["CustomValueEstimate"]);
        let cleaned = drop_incomplete_rows(&table);
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.numeric("TotalPremium").unwrap(), &[10.0]);
    }

    #[test]
    fn test_normalize_dates_coerces_invalid_values() {
        let cleaned = normalize_dates(&sample_table(), "VehicleIntroDate").unwrap();
        assert_eq!(
            cleaned.categorical("VehicleIntroDate").unwrap(),
            &[
                Some("2002-06-01".to_owned()),
                Some("2010-01-15".to_owned()),
                None,
                None
            ]
        );
        assert!(matches!(
            normalize_dates(&sample_table(), "RegistrationYear"),
            Err(FrameError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_parse_date_formats() {
        let date = NaiveDate::from_ymd_opt(2015, 3, 7);
        assert_eq!(parse_date("2015-03-07"), date);
        assert_eq!(parse_date("2015/03/07"), date);
        assert_eq!(parse_date("3/7/2015"), date);
        assert_eq!(parse_date("2015-03-07T12:30:00"), date);
    }
}
