//! Delimited text input and output.
//!
//! Files are expected to carry a header row. Each column is typed on load:
//! it becomes numeric when every non-missing field parses as a number, and
//! categorical otherwise.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use crate::{
    FrameError,
    table::{Column, ColumnData, DataTable},
};

/// Field contents treated as a missing cell (compared after trimming).
pub const MISSING_MARKERS: [&str; 13] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>", "NAN",
];

/// Reads a delimited text file into a table.
///
/// # Errors
///
/// Returns [`FrameError::FileAccess`] when the file cannot be opened and
/// [`FrameError::Csv`] when its contents are malformed.
pub fn read_table<P>(path: P, delimiter: u8) -> Result<DataTable, FrameError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FrameError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_from_reader(BufReader::new(file), delimiter)
}

/// Reads delimited text from any reader into a table.
///
/// ```
/// # use claimstat_frame::loader::read_table_from_reader;
/// let input = "Gender|TotalClaims\nMale|100\nFemale|\n";
/// let table = read_table_from_reader(input.as_bytes(), b'|').unwrap();
/// assert_eq!(table.height(), 2);
/// assert!(table.column("TotalClaims").unwrap().is_numeric());
/// assert!(table.column("TotalClaims").unwrap().is_missing(1));
/// ```
pub fn read_table_from_reader<R>(reader: R, delimiter: u8) -> Result<DataTable, FrameError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(FrameError::Csv)?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>();

    let mut cells = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(FrameError::Csv)?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(parse_cell(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();
    DataTable::new(columns)
}

/// Loads a table, reporting failures instead of propagating them.
///
/// A missing or unreadable file is logged and yields `None`.
pub fn load_table<P>(path: P, delimiter: u8) -> Option<DataTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match read_table(path, delimiter) {
        Ok(table) => Some(table),
        Err(FrameError::FileAccess { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::error!("The file at {} was not found.", path.display());
            None
        }
        Err(err) => {
            log::error!("An error occurred: {err}");
            None
        }
    }
}

/// Writes a table as delimited text with a header row.
///
/// Missing cells are written as empty fields.
pub fn write_table<W>(table: &DataTable, writer: W, delimiter: u8) -> Result<(), FrameError>
where
    W: io::Write,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    writer
        .write_record(table.column_names())
        .map_err(FrameError::Csv)?;
    for row in 0..table.height() {
        let record = table
            .columns()
            .iter()
            .map(|column| {
                column
                    .display_value(row)
                    .map(Cow::into_owned)
                    .unwrap_or_default()
            });
        writer.write_record(record).map_err(FrameError::Csv)?;
    }
    writer.flush().map_err(FrameError::Io)?;
    Ok(())
}

fn parse_cell(field: &str) -> Option<String> {
    let field = field.trim();
    if MISSING_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_owned())
    }
}

fn infer_column(name: String, cells: Vec<Option<String>>) -> Column {
    let numeric = cells
        .iter()
        .map(|cell| match cell {
            Some(text) => text.parse::<f64>().ok(),
            None => Some(f64::NAN),
        })
        .collect::<Option<Vec<_>>>();

    match numeric {
        Some(values) => Column::new(name, ColumnData::Numeric(values)),
        None => Column::new(name, ColumnData::Categorical(cells)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
UnderwrittenCoverID|Gender|PostalCode|VehicleType|TotalPremium|TotalClaims
1|Male|2000|Passenger Vehicle|21.93|0
2|Female|1459|Medium Commercial|  57.01 |
3|Not specified|2000||0|0
4|Male|NA|Passenger Vehicle|100|35.5
";

    #[test]
    fn test_infers_column_types() {
        let table = read_table_from_reader(SAMPLE.as_bytes(), b'|').unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 6);
        assert!(table.column("PostalCode").unwrap().is_numeric());
        assert!(table.column("TotalPremium").unwrap().is_numeric());
        assert!(!table.column("Gender").unwrap().is_numeric());
        assert_eq!(table.numeric("TotalPremium").unwrap()[1], 57.01);
    }

    #[test]
    fn test_missing_markers() {
        let table = read_table_from_reader(SAMPLE.as_bytes(), b'|').unwrap();
        assert!(table.column("TotalClaims").unwrap().is_missing(1));
        assert!(table.column("VehicleType").unwrap().is_missing(2));
        assert!(table.column("PostalCode").unwrap().is_missing(3));
        assert_eq!(table.column("Gender").unwrap().missing_count(), 0);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let input = "a,b\n1,2\n3\n";
        let result = read_table_from_reader(input.as_bytes(), b',');
        assert!(matches!(result, Err(FrameError::Csv(_))));
    }

    #[test]
    fn test_missing_file_is_reported_not_fatal() {
        let path = Path::new("/nonexistent/claimstat/MachineLearningRating_v3.txt");
        assert!(matches!(
            read_table(path, b'|'),
            Err(FrameError::FileAccess { .. })
        ));
        assert!(load_table(path, b'|').is_none());
    }

    #[test]
    fn test_write_then_read_back() {
        let table = read_table_from_reader(SAMPLE.as_bytes(), b'|').unwrap();
        let mut buf = Vec::new();
        write_table(&table, &mut buf, b',').unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("UnderwrittenCoverID,Gender,PostalCode,VehicleType,TotalPremium,TotalClaims")
        );
        assert_eq!(lines.next(), Some("1,Male,2000,Passenger Vehicle,21.93,0"));
        assert_eq!(lines.next(), Some("2,Female,1459,Medium Commercial,57.01,"));

        let reread = read_table_from_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(reread.height(), table.height());
        assert!(reread.column("TotalClaims").unwrap().is_missing(1));
        assert!(reread.column("VehicleType").unwrap().is_missing(2));
        assert_eq!(
            reread.numeric("TotalPremium").unwrap(),
            table.numeric("TotalPremium").unwrap()
        );
    }
}
