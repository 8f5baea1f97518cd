use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Failed to extract text: {0}")]
    Extraction(String),

    #[error("Failed to extract text: document has no pages")]
    NoPages,

    #[error("File size must be less than {limit} bytes (got {size})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StudyError>;
