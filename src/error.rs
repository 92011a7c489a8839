use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid logger options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {var}, expected a boolean flag")]
    InvalidFlag { var: &'static str, value: String },
}
