use thiserror::Error;

/// Validation and contract errors exposed by `marketview-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("market qualifier cannot be empty")]
    EmptyMarket,
    #[error("market qualifier contains invalid character '{ch}'")]
    MarketInvalidChar { ch: char },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("bar high must be >= open, close and low")]
    InvalidBarHigh,

    #[error("price series must be strictly ascending by date: '{previous}' then '{next}'")]
    UnorderedSeries { previous: String, next: String },

    #[error("indicator period '{name}' must be at least 1")]
    ZeroPeriod { name: &'static str },
}

/// A row-level defect inside an otherwise-present time series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("time series payload is not a JSON object")]
    SeriesNotObject,
    #[error("row '{date}' is not a JSON object")]
    RowNotObject { date: String },
    #[error("row '{date}' field '{field}' is not a string or number")]
    NonScalarField { date: String, field: String },
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("row '{date}' field '{field}' has invalid number '{value}'")]
    InvalidNumber {
        date: String,
        field: &'static str,
        value: String,
    },
    #[error("row '{date}' is missing field '{field}'")]
    MissingField { date: String, field: &'static str },
    #[error("duplicate date '{date}' in time series")]
    DuplicateDate { date: String },
    #[error("row '{date}' violates bar invariants: {source}")]
    InvalidBar {
        date: String,
        #[source]
        source: ValidationError,
    },
}

/// Failure of one market-data request. Every variant aborts the current render.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketDataError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("data unavailable for '{symbol}': {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("malformed record: {0}")]
    MalformedRecord(#[from] MalformedRecord),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MarketDataError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn data_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}
