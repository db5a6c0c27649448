use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown route: {0}")]
    Route(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
