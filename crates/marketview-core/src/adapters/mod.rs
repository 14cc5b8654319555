//! Provider adapters implementing [`crate::SecuritySource`].

pub mod alphavantage;

pub use alphavantage::AlphaVantageClient;
