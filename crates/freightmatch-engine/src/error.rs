use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Duplicate load_id in catalog: {0}")]
    DuplicateLoadId(String),

    #[error("Invalid load {load_id}: {reason}")]
    InvalidLoad { load_id: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
