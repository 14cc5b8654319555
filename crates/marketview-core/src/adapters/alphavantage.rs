use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::data_source::{SecurityRequest, SecuritySnapshot, SecuritySource};
use crate::domain::{format_date, FundamentalsRecord, PriceSeries, Symbol};
use crate::http_client::{HttpClient, HttpErrorKind, HttpRequest, ReqwestHttpClient};
use crate::normalize::{normalize_daily_adjusted, RawBar};
use crate::overview::{extract, raw_overview_from_json};
use crate::{MalformedRecord, MarketDataError};

/// Top-level key holding the daily rows.
pub const TIME_SERIES_KEY: &str = "Time Series (Daily)";

/// Keys Alpha Vantage uses to explain an empty answer (unknown symbol, throttling).
const DIAGNOSTIC_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Bounded recent window (about 100 bars) rather than the full history.
const OUTPUT_SIZE: &str = "compact";

/// Alpha Vantage client issuing one time-series and one overview lookup per request.
///
/// Single attempt, no caching: every call goes to the provider.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl AlphaVantageClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `TIME_SERIES_DAILY_ADJUSTED` URL; the market qualifier only applies here.
    pub fn time_series_url(&self, request: &SecurityRequest) -> String {
        let mut url = format!(
            "{}?function=TIME_SERIES_DAILY_ADJUSTED&symbol={}&outputsize={OUTPUT_SIZE}&apikey={}",
            self.config.base_url,
            urlencoding::encode(request.symbol.as_str()),
            urlencoding::encode(self.config.api_key.expose()),
        );
        if let Some(market) = &request.market {
            url.push_str("&market=");
            url.push_str(&urlencoding::encode(market.as_str()));
        }
        url
    }

    pub fn overview_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}?function=OVERVIEW&symbol={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(self.config.api_key.expose()),
        )
    }

    /// Fetch and normalize the daily series.
    pub async fn fetch_prices(&self, request: &SecurityRequest) -> Result<PriceSeries, MarketDataError> {
        let body = self.get_body(self.time_series_url(request)).await?;
        let symbol = request.symbol.as_str();

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            MarketDataError::data_unavailable(symbol, format!("response is not valid JSON: {e}"))
        })?;
        let rows = take_series(symbol, payload)?;
        if rows.is_empty() {
            return Err(MarketDataError::data_unavailable(
                symbol,
                format!("'{TIME_SERIES_KEY}' has no rows"),
            ));
        }
        let series = normalize_daily_adjusted(raw_rows(rows)?)?;

        if let (Some(first), Some(last)) = (series.first(), series.last()) {
            info!(
                symbol,
                bars = series.len(),
                first = %format_date(first.date),
                last = %format_date(last.date),
                "fetched daily series"
            );
        }

        Ok(series)
    }

    /// Fetch the company overview. Missing or unusable content degrades to unknown fields.
    pub async fn fetch_fundamentals(&self, symbol: &Symbol) -> Result<FundamentalsRecord, MarketDataError> {
        let body = self.get_body(self.overview_url(symbol)).await?;

        let raw = serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(raw_overview_from_json);

        let record = match raw {
            Some(raw) => extract(&raw),
            None => {
                warn!(symbol = symbol.as_str(), "overview payload is not a JSON object; all fields unknown");
                FundamentalsRecord::unknown()
            }
        };

        debug!(
            symbol = symbol.as_str(),
            known = record.known_count(),
            "extracted fundamentals"
        );
        Ok(record)
    }

    async fn get_body(&self, url: String) -> Result<String, MarketDataError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);
        let target = request.redacted_url();
        debug!(url = %target, "alphavantage request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            let label = match error.kind() {
                HttpErrorKind::Timeout => "timeout",
                HttpErrorKind::Connect => "connect",
                HttpErrorKind::Body => "body",
                HttpErrorKind::Other => "request",
            };
            MarketDataError::transport(format!("alphavantage {label} error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(MarketDataError::transport(format!(
                "alphavantage returned status {} for {target}",
                response.status
            )));
        }

        Ok(response.body)
    }
}

impl SecuritySource for AlphaVantageClient {
    fn fetch_security<'a>(
        &'a self,
        request: SecurityRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SecuritySnapshot, MarketDataError>> + Send + 'a>> {
        Box::pin(async move {
            let (prices, fundamentals) = tokio::join!(
                self.fetch_prices(&request),
                self.fetch_fundamentals(&request.symbol)
            );

            Ok(SecuritySnapshot {
                prices: prices?,
                fundamentals: fundamentals?,
                symbol: request.symbol,
            })
        })
    }
}

/// Pull the series object out of the payload before any row is inspected.
fn take_series(symbol: &str, payload: Value) -> Result<Map<String, Value>, MarketDataError> {
    let Value::Object(mut object) = payload else {
        return Err(MarketDataError::data_unavailable(
            symbol,
            "response is not a JSON object",
        ));
    };

    match object.remove(TIME_SERIES_KEY) {
        Some(Value::Object(rows)) => Ok(rows),
        Some(_) => Err(MalformedRecord::SeriesNotObject.into()),
        None => {
            let reason = DIAGNOSTIC_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_str))
                .map(str::to_owned)
                .unwrap_or_else(|| format!("response is missing '{TIME_SERIES_KEY}'"));
            Err(MarketDataError::data_unavailable(symbol, reason))
        }
    }
}

fn raw_rows(rows: Map<String, Value>) -> Result<Vec<(String, RawBar)>, MalformedRecord> {
    rows.into_iter()
        .map(|(date, row)| {
            let Value::Object(fields) = row else {
                return Err(MalformedRecord::RowNotObject { date });
            };
            let mut bar = RawBar::new();
            for (field, value) in fields {
                let text = match value {
                    Value::String(text) => text,
                    Value::Number(number) => number.to_string(),
                    _ => {
                        return Err(MalformedRecord::NonScalarField {
                            date: date.clone(),
                            field,
                        })
                    }
                };
                bar.insert(field, text);
            }
            Ok((date, bar))
        })
        .collect()
}
