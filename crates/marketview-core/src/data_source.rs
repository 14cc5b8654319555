//! Market data source contract.
//!
//! A [`SecuritySource`] answers one question: given a symbol (and optionally
//! a market qualifier), return its recent daily bars and its company overview.
//!
//! ```rust,ignore
//! use marketview_core::{AlphaVantageClient, ClientConfig, SecurityRequest, SecuritySource};
//!
//! async fn show(client: &AlphaVantageClient) -> Result<(), marketview_core::MarketDataError> {
//!     let request = SecurityRequest::parse("IBM", None)?;
//!     let snapshot = client.fetch_security(request).await?;
//!     println!("{} bars, name = {}", snapshot.prices.len(), snapshot.fundamentals.name);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::domain::{FundamentalsRecord, Market, PriceSeries, Symbol};
use crate::{MarketDataError, ValidationError};

/// Symbol plus optional exchange qualifier for one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRequest {
    pub symbol: Symbol,
    pub market: Option<Market>,
}

impl SecurityRequest {
    pub fn new(symbol: Symbol, market: Option<Market>) -> Self {
        Self { symbol, market }
    }

    /// Parse user input. A blank market is treated as no qualifier.
    pub fn parse(symbol: &str, market: Option<&str>) -> Result<Self, ValidationError> {
        let symbol = Symbol::parse(symbol)?;
        let market = market
            .filter(|value| !value.trim().is_empty())
            .map(Market::parse)
            .transpose()?;
        Ok(Self::new(symbol, market))
    }
}

/// Prices and fundamentals for one security, fetched in one request cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecuritySnapshot {
    pub symbol: Symbol,
    pub prices: PriceSeries,
    pub fundamentals: FundamentalsRecord,
}

/// Adapter contract for a market-data provider.
pub trait SecuritySource: Send + Sync {
    fn fetch_security<'a>(
        &'a self,
        request: SecurityRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SecuritySnapshot, MarketDataError>> + Send + 'a>>;
}
