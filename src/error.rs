use thiserror::Error;

#[derive(Error, Debug)]
pub enum HearthError {
    #[error("Invalid timestamp for '{field}': {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object, got: {0}")]
    NotAnObject(String),
}

pub type Result<T> = std::result::Result<T, HearthError>;
