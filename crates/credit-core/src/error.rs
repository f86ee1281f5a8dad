use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// Rejected before any mutation took place
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
