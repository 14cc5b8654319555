//! Shared fixtures for the behavior and contract tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use marketview_core::{
    ApiKey, ClientConfig, HttpClient, HttpError, HttpRequest, HttpResponse, PriceBar, PriceSeries,
};
use serde_json::{json, Map, Value};
use time::{Date, Duration, Month};

pub const BASE_URL: &str = "https://av.test/query";
pub const API_KEY: &str = "secret-test-key";

/// Transport that replays one canned answer per lookup and records every request.
pub struct ScriptedHttpClient {
    time_series: Result<HttpResponse, HttpError>,
    overview: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl ScriptedHttpClient {
    pub fn new(time_series: Value, overview: Value) -> Self {
        Self::with_responses(
            Ok(HttpResponse::ok_json(time_series.to_string())),
            Ok(HttpResponse::ok_json(overview.to_string())),
        )
    }

    pub fn with_responses(
        time_series: Result<HttpResponse, HttpError>,
        overview: Result<HttpResponse, HttpError>,
    ) -> Self {
        Self {
            time_series,
            overview,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = if request.url.contains("function=OVERVIEW") {
            self.overview.clone()
        } else {
            self.time_series.clone()
        };
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new(ApiKey::new(API_KEY)).with_base_url(BASE_URL)
}

/// One Alpha Vantage daily adjusted row.
pub fn daily_row(open: f64, high: f64, low: f64, close: f64, volume: u64) -> Value {
    json!({
        "1. open": format!("{open:.4}"),
        "2. high": format!("{high:.4}"),
        "3. low": format!("{low:.4}"),
        "4. close": format!("{close:.4}"),
        "5. adjusted close": format!("{close:.4}"),
        "6. volume": volume.to_string(),
        "7. dividend amount": "0.0000",
        "8. split coefficient": "1.0"
    })
}

/// Daily payload with the given (date, row) pairs in the given order.
pub fn daily_payload(rows: Vec<(&str, Value)>) -> Value {
    let mut series = Map::new();
    for (date, row) in rows {
        series.insert(date.to_owned(), row);
    }
    json!({
        "Meta Data": { "1. Information": "Daily Time Series with Splits and Dividend Events" },
        "Time Series (Daily)": Value::Object(series),
    })
}

/// Payload with `count` consecutive days of rising closes, newest first as the provider sends it.
pub fn rising_daily_payload(count: usize) -> Value {
    let start = Date::from_calendar_date(2024, Month::January, 1).expect("valid date");
    let mut rows = (0..count)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);
            let close = 100.0 + offset as f64;
            (
                date.to_string(),
                daily_row(close - 0.5, close + 1.0, close - 1.0, close, 1_000 + offset as u64),
            )
        })
        .collect::<Vec<_>>();
    rows.reverse();

    let mut series = Map::new();
    for (date, row) in rows {
        series.insert(date, row);
    }
    json!({ "Time Series (Daily)": Value::Object(series) })
}

pub fn acme_overview() -> Value {
    json!({
        "Symbol": "ACME",
        "Name": "Acme Corp",
        "Industry": "Widgets",
        "AnalystTargetPrice": "123.45",
        "BookValue": "20.1",
        "PriceToBookRatio": "3.2",
        "PERatio": "18.5",
        "ForwardPE": "16.0",
        "EVToRevenue": "4.1",
        "EVToEBITDA": "11.9",
        "EBITDA": "1500000000",
        "Beta": "1.05",
        "52WeekHigh": "130.00",
        "52WeekLow": "90.00",
        "EPS": "6.2",
        "PEGRatio": "None"
    })
}

/// In-memory series from closing prices, one bar per day starting 2024-01-01.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = Date::from_calendar_date(2024, Month::January, 1).expect("valid date");
    let bars = closes
        .iter()
        .enumerate()
        .map(|(offset, &close)| {
            PriceBar::new(
                start + Duration::days(offset as i64),
                close,
                close,
                close,
                close,
                close,
                1_000,
            )
            .expect("valid bar")
        })
        .collect();
    PriceSeries::new(bars).expect("ascending dates")
}
