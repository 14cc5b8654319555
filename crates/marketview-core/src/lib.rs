//! # marketview core
//!
//! Retrieval, normalization and indicator computation for a single-security
//! market dashboard.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage) |
//! | [`config`] | Credential and endpoint configuration |
//! | [`data_source`] | Source trait and request/snapshot types |
//! | [`domain`] | Domain models (PriceBar, PriceSeries, FundamentalsRecord) |
//! | [`error`] | Error taxonomy |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`indicators`] | MACD, RSI, EMA, SMA |
//! | [`normalize`] | Provider rows to canonical price series |
//! | [`overview`] | Company overview to fundamentals record |
//! | [`pipeline`] | One render cycle from user input to dashboard |
//! | [`presentation`] | Tables, chart objects and the display sink seam |
//!
//! ## Flow
//!
//! ```text
//! user input ──▶ SecuritySource ──▶ normalize / overview
//!                                         │
//!                                         ▼
//!                 DisplaySink ◀── Dashboard ◀── indicators
//! ```
//!
//! ## Errors
//!
//! Every failure of a render cycle is a [`MarketDataError`]:
//!
//! ```rust
//! use marketview_core::MarketDataError;
//!
//! fn describe(error: &MarketDataError) -> &'static str {
//!     match error {
//!         MarketDataError::Transport { .. } => "network problem, try again later",
//!         MarketDataError::DataUnavailable { .. } => "unknown symbol or provider limit",
//!         MarketDataError::MalformedRecord(_) => "provider sent unreadable rows",
//!         MarketDataError::Validation(_) => "invalid input",
//!     }
//! }
//! ```
//!
//! Missing fundamentals are not errors: each metric is [`Reported::Unknown`].

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod indicators;
pub mod normalize;
pub mod overview;
pub mod pipeline;
pub mod presentation;

pub use adapters::AlphaVantageClient;

pub use config::{ApiKey, ClientConfig};

pub use data_source::{SecurityRequest, SecuritySnapshot, SecuritySource};

pub use domain::{
    FundamentalMetric, FundamentalsRecord, Market, MetricKind, MetricValue, PriceBar, PriceSeries,
    Reported, Symbol,
};

pub use error::{MalformedRecord, MarketDataError, ValidationError};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use indicators::{IndicatorSeries, MacdLines, MacdParams, RsiParams};

pub use normalize::{FieldMapping, PriceField, RawBar, ALPHA_VANTAGE_DAILY_ADJUSTED};

pub use overview::RawOverview;

pub use pipeline::{render, RenderOutcome, UserInput};

pub use presentation::{Dashboard, DisplayOptions, DisplaySink, Table, TableRow};
