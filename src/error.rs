use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinateFormat(String),

    #[error("Numeric conversion error: {0}")]
    NumericConversion(String),

    #[error("Resolved date out of range: day {day} relative to year {year}")]
    DateOutOfRange { day: i32, year: i32 },

    #[error("Unexpected page structure: {0}")]
    PageStructure(String),

    #[error("Missing required data: {0}")]
    MissingData(String),
}
