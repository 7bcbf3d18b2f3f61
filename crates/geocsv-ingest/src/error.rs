use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open input file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The header does not match `geo_level, geo_code, <fields…>, total`.
    #[error("bad header: {reason}")]
    Header { reason: String },

    #[error("bad record on line {line}: {reason}")]
    Record { line: u64, reason: String },

    /// A `total` cell is neither the `"no data"` sentinel nor a number.
    /// Fatal; aborts the run mid-stream.
    #[error("line {line}: total value is neither \"no data\" nor a number: {value:?}")]
    NumericConversion { line: u64, value: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
