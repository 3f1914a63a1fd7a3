use thiserror::Error;

/// Everything that can stop a clustering sweep
#[derive(Error, Debug)]
pub enum KcmError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no points to cluster")]
    EmptyInput,

    #[error("line {line}: unable to parse field `{field}` as a number")]
    Parse { line: usize, field: String },

    #[error("line {line}: `{field}` is not a finite number")]
    NonFinite { line: usize, field: String },

    #[error("line {line}: expected {expected} dimensions, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("every candidate produced a non-finite entropy")]
    NoFiniteModel,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to serialize plot: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KcmError>;
