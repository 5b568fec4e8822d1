use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unsupported output representation: '{0}' (expected one of: bytes, surface, base64)")]
    InvalidOutput(String),

    #[error("No stats recorded for vehicle '{0}'")]
    MissingVehicle(String),

    #[error("Draw Backend Error: {0}")]
    Backend(String),
}

pub type CfResult<T> = Result<T, CardForgeError>;
