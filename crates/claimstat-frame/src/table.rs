//! In-memory tabular data.
//!
//! A [`DataTable`] is an ordered list of named [`Column`]s of equal length.
//! Numeric columns store `f64` values with `NaN` marking a missing cell;
//! categorical columns store optional strings.

use std::{borrow::Cow, collections::BTreeSet};

use crate::FrameError;

/// Cell storage of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric values, `NaN` marks a missing cell.
    Numeric(Vec<f64>),
    /// Text labels, `None` marks a missing cell.
    Categorical(Vec<Option<String>>),
}

/// A named column of a [`DataTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    #[must_use]
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    /// Creates a categorical column from optional labels.
    ///
    /// ```
    /// # use claimstat_frame::table::Column;
    /// let column = Column::categorical("Gender", [Some("Male"), None, Some("Female")]);
    /// assert_eq!(column.missing_count(), 1);
    /// ```
    #[must_use]
    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Categorical(values))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Categorical(_) => None,
        }
    }

    #[must_use]
    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Numeric(_) => None,
            ColumnData::Categorical(values) => Some(values),
        }
    }

    /// Whether the cell at `row` is missing.
    #[must_use]
    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(values) => values[row].is_nan(),
            ColumnData::Categorical(values) => values[row].is_none(),
        }
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.is_missing(row)).count()
    }

    /// Whether the cell at `row` equals `key`.
    ///
    /// Categorical cells compare as strings. Numeric cells compare numerically
    /// when `key` parses as a number, so `"2000"` matches `2000.0`.
    /// Missing cells never match.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn matches(&self, row: usize, key: &str) -> bool {
        match &self.data {
            ColumnData::Numeric(values) => key
                .trim()
                .parse::<f64>()
                .is_ok_and(|key| !values[row].is_nan() && values[row] == key),
            ColumnData::Categorical(values) => values[row].as_deref() == Some(key),
        }
    }

    /// Whether `a` and `b` select the same cells under [`Column::matches`].
    ///
    /// Numeric keys are compared after parsing, so `"2000"` and `" 2000.0"`
    /// are the same key.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn same_key(&self, a: &str, b: &str) -> bool {
        match &self.data {
            ColumnData::Numeric(_) => match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(a), Ok(b)) => a == b,
                _ => a == b,
            },
            ColumnData::Categorical(_) => a == b,
        }
    }

    /// Textual representation of the cell at `row`, `None` when missing.
    #[must_use]
    pub fn display_value(&self, row: usize) -> Option<Cow<'_, str>> {
        match &self.data {
            ColumnData::Numeric(values) => {
                let value = values[row];
                (!value.is_nan()).then(|| Cow::Owned(value.to_string()))
            }
            ColumnData::Categorical(values) => values[row].as_deref().map(Cow::Borrowed),
        }
    }

    /// Distinct non-missing values in ascending order.
    ///
    /// Numeric columns are ordered numerically, categorical columns lexically.
    #[must_use]
    pub fn unique_values(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Numeric(values) => {
                let mut present = values
                    .iter()
                    .copied()
                    .filter(|v| !v.is_nan())
                    .collect::<Vec<_>>();
                present.sort_by(f64::total_cmp);
                present.dedup();
                present.into_iter().map(|v| v.to_string()).collect()
            }
            ColumnData::Categorical(values) => values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Non-missing numeric values, `None` for categorical columns.
    #[must_use]
    pub fn present_values(&self) -> Option<Vec<f64>> {
        self.as_numeric()
            .map(|values| values.iter().copied().filter(|v| !v.is_nan()).collect())
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        let data = match &self.data {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(rows.iter().map(|&row| values[row]).collect())
            }
            ColumnData::Categorical(values) => {
                ColumnData::Categorical(rows.iter().map(|&row| values[row].clone()).collect())
            }
        };
        Self::new(self.name.clone(), data)
    }
}

/// An ordered collection of equally long, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    /// Builds a table, checking that names are unique and lengths agree.
    ///
    /// ```
    /// # use claimstat_frame::table::{Column, DataTable};
    /// let table = DataTable::new(vec![
    ///     Column::categorical("Gender", [Some("Male"), Some("Female")]),
    ///     Column::numeric("TotalClaims", vec![100.0, 200.0]),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.height(), 2);
    /// assert_eq!(table.width(), 2);
    /// ```
    pub fn new(columns: Vec<Column>) -> Result<Self, FrameError> {
        let mut table = Self::default();
        for column in columns {
            if table.contains(column.name()) {
                return Err(FrameError::DuplicateColumn {
                    name: column.name,
                });
            }
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    /// Names of all numeric columns, in table order.
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(Column::name)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, FrameError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FrameError::missing_column(name))
    }

    /// Values of a numeric column.
    pub fn numeric(&self, name: &str) -> Result<&[f64], FrameError> {
        self.column(name)?
            .as_numeric()
            .ok_or_else(|| FrameError::not_numeric(name))
    }

    /// Labels of a categorical column.
    pub fn categorical(&self, name: &str) -> Result<&[Option<String>], FrameError> {
        self.column(name)?
            .as_categorical()
            .ok_or_else(|| FrameError::NotCategorical {
                name: name.to_owned(),
            })
    }

    /// Replaces the column with the same name, or appends it.
    pub fn set_column(&mut self, column: Column) -> Result<(), FrameError> {
        self.check_length(&column)?;
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
        Ok(())
    }

    /// Returns a copy without the named columns. Unknown names are ignored.
    #[must_use]
    pub fn drop_columns<S>(&self, names: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|name| name.as_ref() == c.name()))
            .cloned()
            .collect();
        Self { columns }
    }

    /// Returns a copy keeping only the rows for which `keep` returns true.
    #[must_use]
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let rows = (0..self.height()).filter(|&row| keep(row)).collect::<Vec<_>>();
        let columns = self.columns.iter().map(|c| c.take_rows(&rows)).collect();
        Self { columns }
    }

    /// Whether any cell in `row` is missing.
    #[must_use]
    pub fn row_has_missing(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.is_missing(row))
    }

    fn push_column(&mut self, column: Column) -> Result<(), FrameError> {
        self.check_length(&column)?;
        self.columns.push(column);
        Ok(())
    }

    fn check_length(&self, column: &Column) -> Result<(), FrameError> {
        if self.columns.is_empty() || column.len() == self.height() {
            return Ok(());
        }
        Err(FrameError::LengthMismatch {
            name: column.name.clone(),
            expected: self.height(),
            actual: column.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::categorical("Gender", [Some("Male"), Some("Female"), None]),
            Column::numeric("PostalCode", vec![2000.0, 1459.0, 2000.0]),
            Column::numeric("TotalClaims", vec![100.0, f64::NAN, 50.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = DataTable::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![1.0]),
        ]);
        assert!(matches!(
            result,
            Err(FrameError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = DataTable::new(vec![
            Column::numeric("a", vec![1.0]),
            Column::numeric("a", vec![2.0]),
        ]);
        assert!(matches!(result, Err(FrameError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_lookup_errors() {
        let table = sample_table();
        assert!(matches!(
            table.column("Province"),
            Err(FrameError::MissingColumn { .. })
        ));
        assert!(matches!(
            table.numeric("Gender"),
            Err(FrameError::NotNumeric { .. })
        ));
        assert!(matches!(
            table.categorical("TotalClaims"),
            Err(FrameError::NotCategorical { .. })
        ));
    }

    #[test]
    fn test_matches_numeric_and_text() {
        let table = sample_table();
        let postal = table.column("PostalCode").unwrap();
        assert!(postal.matches(0, "2000"));
        assert!(postal.matches(2, "2000.0"));
        assert!(!postal.matches(1, "2000"));
        assert!(!postal.matches(0, "Gauteng"));

        let gender = table.column("Gender").unwrap();
        assert!(gender.matches(0, "Male"));
        assert!(!gender.matches(2, "Male"));
    }

    #[test]
    fn test_missing_cells() {
        let table = sample_table();
        assert_eq!(table.column("TotalClaims").unwrap().missing_count(), 1);
        assert!(table.row_has_missing(1));
        assert!(table.row_has_missing(2));
        assert!(!table.row_has_missing(0));
    }

    #[test]
    fn test_unique_values_are_sorted() {
        let table = sample_table();
        assert_eq!(
            table.column("PostalCode").unwrap().unique_values(),
            vec!["1459", "2000"]
        );
        assert_eq!(
            table.column("Gender").unwrap().unique_values(),
            vec!["Female", "Male"]
        );
    }

    #[test]
    fn test_filter_rows_and_drop_columns() {
        let table = sample_table();
        let males = table.filter_rows(|row| table.column("Gender").unwrap().matches(row, "Male"));
        assert_eq!(males.height(), 1);
        assert_eq!(males.numeric("TotalClaims").unwrap(), &[100.0]);

        let dropped = table.drop_columns(&["Gender", "Unknown"]);
        assert_eq!(
            dropped.column_names().collect::<Vec<_>>(),
            vec!["PostalCode", "TotalClaims"]
        );
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut table = sample_table();
        table
            .set_column(Column::numeric("PostalCode", vec![1.0, 2.0, 3.0]))
            .unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.numeric("PostalCode").unwrap(), &[1.0, 2.0, 3.0]);
        assert!(table
            .set_column(Column::numeric("Extra", vec![1.0]))
            .is_err());
    }

    #[test]
    fn test_set_column_checks_length_of_single_column_table() {
        let mut table =
            DataTable::new(vec![Column::numeric("TotalClaims", vec![1.0, 2.0])]).unwrap();
        assert!(matches!(
            table.set_column(Column::numeric("TotalClaims", vec![1.0])),
            Err(FrameError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert_eq!(table.height(), 2);
    }

    #[test]
    fn test_same_key() {
        let codes = Column::numeric("PostalCode", vec![2000.0, 1459.0]);
        assert!(codes.same_key("2000", "2000.0"));
        assert!(codes.same_key("2000", " 2000"));
        assert!(!codes.same_key("2000", "1459"));
        assert!(!codes.same_key("nan", "nan"));
        let gender = Column::categorical("Gender", [Some("Male"), None]);
        assert!(gender.same_key("Male", "Male"));
        assert!(!gender.same_key("Male", " Male"));
    }
}
