use thiserror::Error;

/// Errors raised by the input, configuration and output layers.
///
/// The numeric core never returns these: it signals trouble through short
/// tables, `None` and 0.0 sentinels instead.
#[derive(Debug, Error)]
pub enum BallisticsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown drag model: {0} (expected G1..G8)")]
    UnknownDragModel(String),

    #[error("at least one ballistic coefficient is required")]
    NoCoefficients,

    #[error("unable to read load file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML load file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<&str> for BallisticsError {
    fn from(msg: &str) -> Self {
        BallisticsError::InvalidInput(msg.to_string())
    }
}

impl From<String> for BallisticsError {
    fn from(msg: String) -> Self {
        BallisticsError::InvalidInput(msg)
    }
}
