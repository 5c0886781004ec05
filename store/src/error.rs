use oracle_types::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for OracleError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Backend(msg) => OracleError::Storage(msg),
            StoreError::Serialization(msg) => OracleError::Serialization(msg),
        }
    }
}
