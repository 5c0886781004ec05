use oracle_types::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("ballot for {denom} is empty")]
    EmptyBallot { denom: String },

    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl From<TallyError> for OracleError {
    fn from(e: TallyError) -> Self {
        OracleError::Tally(e.to_string())
    }
}
