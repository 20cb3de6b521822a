use std::{io, path::PathBuf};

/// Errors produced by table operations.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum FrameError {
    #[display("column '{name}' not found")]
    MissingColumn { name: String },
    #[display("column '{name}' is not numeric")]
    NotNumeric { name: String },
    #[display("column '{name}' is not categorical")]
    NotCategorical { name: String },
    #[display("column '{name}' already exists")]
    DuplicateColumn { name: String },
    #[display("column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[display(
        "group '{group}' has {count} usable observations, at least 2 are required"
    )]
    InsufficientData { group: String, count: usize },
    #[display("groups must be distinct, both are '{value}'")]
    OverlappingGroups { value: String },
    #[display("'{measure}' has zero variance in both groups but different means")]
    ZeroVariance { measure: String },
    #[display("'{measure}' contains non-finite values")]
    NonFinite { measure: String },
    #[display("failed to read '{}': {source}", path.display())]
    FileAccess { path: PathBuf, source: io::Error },
    #[display("malformed delimited data: {_0}")]
    Csv(#[error(source)] csv::Error),
    #[display("I/O error: {_0}")]
    Io(#[error(source)] io::Error),
}

impl FrameError {
    pub(crate) fn missing_column(name: &str) -> Self {
        Self::MissingColumn {
            name: name.to_owned(),
        }
    }

    pub(crate) fn not_numeric(name: &str) -> Self {
        Self::NotNumeric {
            name: name.to_owned(),
        }
    }
}
