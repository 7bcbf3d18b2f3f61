use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid table id: {0:?}")]
    InvalidTableId(String),

    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    #[error("total value is neither \"no data\" nor a number: {0:?}")]
    InvalidTotal(String),

    /// No registered table matches the given or derived field set.
    ///
    /// Raised before any row is processed; the run never partially imports
    /// into an unknown table.
    #[error(
        "couldn't establish which table to use for these fields. \
         Have you added an entry to the table registry?\nFields: {fields:?}"
    )]
    TableResolution { fields: Vec<String> },

    #[error("table {table} has no release for year {year}")]
    UnknownRelease { table: String, year: String },

    #[error("table {table} expects fields {expected:?} but the file declares {found:?}")]
    SchemaMismatch {
        table: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("failed to read table registry: {path}")]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table registry: {path}")]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
