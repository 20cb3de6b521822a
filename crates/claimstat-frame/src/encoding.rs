//! Categorical encodings.

use serde::Serialize;

use crate::{
    FrameError,
    table::{Column, DataTable},
};

/// Naming and layout options for [`one_hot_encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotOptions {
    /// Prefix of generated column names, the source column name when `None`.
    pub prefix: Option<String>,
    pub separator: String,
    /// Skip the indicator of the first category.
    pub drop_first: bool,
}

impl Default for OneHotOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            separator: "_".to_owned(),
            drop_first: true,
        }
    }
}

/// Replaces categorical columns with `0/1` indicator columns.
///
/// One indicator is generated per distinct non-missing value, in sorted
/// order, and appended at the end of the table. The source columns are
/// removed. Missing cells encode as all zeros.
///
/// ```
/// # use claimstat_frame::{encoding::{one_hot_encode, OneHotOptions}, table::{Column, DataTable}};
/// let table = DataTable::new(vec![Column::categorical(
///     "VehicleType",
///     [Some("Bus"), Some("Heavy Commercial"), Some("Passenger Vehicle")],
/// )])
/// .unwrap();
/// let encoded = one_hot_encode(&table, &["VehicleType"], &OneHotOptions::default()).unwrap();
/// assert_eq!(
///     encoded.column_names().collect::<Vec<_>>(),
///     vec!["VehicleType_Heavy Commercial", "VehicleType_Passenger Vehicle"]
/// );
/// ```
pub fn one_hot_encode<S>(
    table: &DataTable,
    columns: &[S],
    options: &OneHotOptions,
) -> Result<DataTable, FrameError>
where
    S: AsRef<str>,
{
    let mut indicators = Vec::new();
    for name in columns {
        let source = table.column(name.as_ref())?;
        let prefix = options.prefix.as_deref().unwrap_or(source.name());
        let categories = source.unique_values();
        let skip = usize::from(options.drop_first && !categories.is_empty());

        for category in &categories[skip..] {
            let values = (0..source.len())
                .map(|row| if source.matches(row, category) { 1.0 } else { 0.0 })
                .collect();
            indicators.push(Column::numeric(
                format!("{prefix}{}{category}", options.separator),
                values,
            ));
        }
    }

    let mut result = table.drop_columns(columns);
    for column in indicators {
        if result.contains(column.name()) {
            return Err(FrameError::DuplicateColumn {
                name: column.name().to_owned(),
            });
        }
        result.set_column(column)?;
    }
    Ok(result)
}

/// Classes assigned by [`label_encode`], code `i` standing for `classes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMapping {
    pub column: String,
    pub classes: Vec<String>,
}

impl LabelMapping {
    /// Integer code of `value`, if it was seen during encoding.
    #[must_use]
    pub fn code(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == value)
    }
}

/// Replaces each column in place by integer codes of its sorted distinct values.
///
/// Missing cells stay missing.
#[expect(clippy::cast_precision_loss)]
pub fn label_encode<S>(
    table: &DataTable,
    columns: &[S],
) -> Result<(DataTable, Vec<LabelMapping>), FrameError>
where
    S: AsRef<str>,
{
    let mut result = table.clone();
    let mut mappings = Vec::with_capacity(columns.len());

    for name in columns {
        let source = table.column(name.as_ref())?;
        let mapping = LabelMapping {
            column: source.name().to_owned(),
            classes: source.unique_values(),
        };
        let codes = (0..source.len())
            .map(|row| {
                mapping
                    .classes
                    .iter()
                    .position(|class| source.matches(row, class))
                    .map_or(f64::NAN, |code| code as f64)
            })
            .collect();
        result.set_column(Column::numeric(source.name(), codes))?;
        mappings.push(mapping);
    }

    Ok((result, mappings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::categorical("Grade", [Some("B"), Some("A"), Some("C"), None, Some("A")]),
            Column::numeric("TotalClaims", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_one_hot_drops_first_category() {
        let encoded =
            one_hot_encode(&sample_table(), &["Grade"], &OneHotOptions::default()).unwrap();
        assert_eq!(
            encoded.column_names().collect::<Vec<_>>(),
            vec!["TotalClaims", "Grade_B", "Grade_C"]
        );
        assert_eq!(encoded.numeric("Grade_B").unwrap(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(encoded.numeric("Grade_C").unwrap(), &[0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_one_hot_keep_first_with_prefix() {
        let options = OneHotOptions {
            prefix: Some("g".to_owned()),
            separator: "-".to_owned(),
            drop_first: false,
        };
        let encoded = one_hot_encode(&sample_table(), &["Grade"], &options).unwrap();
        assert_eq!(
            encoded.column_names().collect::<Vec<_>>(),
            vec!["TotalClaims", "g-A", "g-B", "g-C"]
        );
        // Missing row encodes as all zeros
        for name in ["g-A", "g-B", "g-C"] {
            assert_eq!(encoded.numeric(name).unwrap()[3], 0.0);
        }
    }

    #[test]
    fn test_one_hot_name_clash() {
        let table = DataTable::new(vec![
            Column::categorical("Grade", [Some("A"), Some("B")]),
            Column::numeric("Grade_B", vec![0.0, 0.0]),
        ])
        .unwrap();
        let result = one_hot_encode(&table, &["Grade"], &OneHotOptions::default());
        assert!(matches!(result, Err(FrameError::DuplicateColumn { name }) if name == "Grade_B"));
    }

    #[test]
    fn test_one_hot_unknown_column() {
        let result = one_hot_encode(&sample_table(), &["Province"], &OneHotOptions::default());
        assert!(matches!(result, Err(FrameError::MissingColumn { .. })));
    }

    #[test]
    fn test_label_encode() {
        let (encoded, mappings) = label_encode(&sample_table(), &["Grade"]).unwrap();
        assert_eq!(
            encoded.column_names().collect::<Vec<_>>(),
            vec!["Grade", "TotalClaims"]
        );
        let codes = encoded.numeric("Grade").unwrap();
        assert_eq!(&codes[..3], &[1.0, 0.0, 2.0]);
        assert!(codes[3].is_nan());
        assert_eq!(mappings[0].classes, vec!["A", "B", "C"]);
        assert_eq!(mappings[0].code("C"), Some(2));
        assert_eq!(mappings[0].code("D"), None);
    }
}
