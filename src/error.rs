#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("insufficient data: expected at least {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("base58 error: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("failed to fetch lookup table {table}: {reason}")]
    TableFetch { table: String, reason: String },

    #[error("failed to parse lookup table: {reason}")]
    TableParse { reason: String },

    #[error("transaction has no inner instructions")]
    EmptyTransaction,

    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
