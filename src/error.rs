use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid record date: {value:?}")]
    InvalidDate { value: String },

    #[error("json error: {0}")]
    Json(String),
}
