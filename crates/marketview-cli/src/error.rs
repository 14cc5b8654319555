use marketview_core::MarketDataError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MarketData(MarketDataError::Validation(_)) => 2,
            Self::MarketData(MarketDataError::Transport { .. }) => 3,
            Self::MarketData(MarketDataError::DataUnavailable { .. }) => 4,
            Self::MarketData(MarketDataError::MalformedRecord(_)) => 5,
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
