//! One render cycle: input → fetch → indicators → dashboard.
//!
//! Nothing survives between cycles; every call fetches and recomputes.

use tracing::{debug, info_span, Instrument};

use crate::data_source::{SecurityRequest, SecuritySource};
use crate::indicators::{IndicatorSeries, MacdParams, RsiParams};
use crate::presentation::{Dashboard, DisplayOptions, DisplaySink};
use crate::MarketDataError;

pub const SYMBOL_PROMPT: &str = "Please enter a stock symbol (e.g. AAPL, MSFT, IBM) to continue";

/// Raw user controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub symbol: Option<String>,
    pub market: Option<String>,
    pub options: DisplayOptions,
}

impl UserInput {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// The trimmed symbol, or `None` when nothing was entered.
    fn entered_symbol(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No symbol was entered; nothing was fetched.
    NeedsSymbol,
    Rendered(Box<Dashboard>),
}

impl RenderOutcome {
    /// Deliver the outcome to a sink: the prompt, or every dashboard artifact.
    pub fn present<S: DisplaySink>(&self, sink: &mut S) -> Result<(), S::Error> {
        match self {
            Self::NeedsSymbol => sink.prompt(SYMBOL_PROMPT),
            Self::Rendered(dashboard) => dashboard.present(sink),
        }
    }
}

/// Run one full cycle against `source` with default indicator periods.
pub async fn render<S>(source: &S, input: &UserInput) -> Result<RenderOutcome, MarketDataError>
where
    S: SecuritySource + ?Sized,
{
    let Some(symbol) = input.entered_symbol() else {
        debug!("no symbol entered; prompting");
        return Ok(RenderOutcome::NeedsSymbol);
    };

    let request = SecurityRequest::parse(symbol, input.market.as_deref())?;
    let span = info_span!("render", symbol = request.symbol.as_str());

    async move {
        let snapshot = source.fetch_security(request).await?;
        let indicators =
            IndicatorSeries::compute(&snapshot.prices, MacdParams::default(), RsiParams::default());
        debug!(bars = snapshot.prices.len(), "computed indicators");

        Ok(RenderOutcome::Rendered(Box::new(Dashboard::build(
            &snapshot,
            &indicators,
            input.options,
        ))))
    }
    .instrument(span)
    .await
}
