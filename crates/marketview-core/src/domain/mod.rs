//! # Domain Models
//!
//! Canonical domain types for marketview.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated security ticker |
//! | [`Market`] | Exchange qualifier for time-series lookups |
//! | [`PriceBar`] | Daily OHLCV bar with adjusted close |
//! | [`PriceSeries`] | Bars in strictly ascending date order |
//! | [`FundamentalsRecord`] | Company overview metrics, each possibly unknown |
//! | [`Reported`] | Known value or explicit unknown |
//!
//! Construction validates invariants: a bar's high is never below its open,
//! close or low, and a series never holds two bars for the same date.

mod fundamentals;
mod price;
mod symbol;

pub use fundamentals::{FundamentalMetric, FundamentalsRecord, MetricKind, MetricValue, Reported};
pub use price::{format_date, PriceBar, PriceSeries, DATE_FORMAT};
pub(crate) use price::serialize_date;
pub use symbol::{Market, Symbol};
