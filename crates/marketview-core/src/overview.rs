//! Fundamentals extraction from a company overview payload.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::domain::{FundamentalMetric, FundamentalsRecord, MetricKind, MetricValue, Reported};

/// Raw overview payload: key to optional string value.
pub type RawOverview = BTreeMap<String, Option<String>>;

/// Alpha Vantage `OVERVIEW` key for each metric.
pub const ALPHA_VANTAGE_OVERVIEW_KEYS: [(FundamentalMetric, &str); 15] = [
    (FundamentalMetric::Name, "Name"),
    (FundamentalMetric::Industry, "Industry"),
    (FundamentalMetric::AnalystTargetPrice, "AnalystTargetPrice"),
    (FundamentalMetric::BookValue, "BookValue"),
    (FundamentalMetric::PriceToBookRatio, "PriceToBookRatio"),
    (FundamentalMetric::PeRatio, "PERatio"),
    (FundamentalMetric::ForwardPe, "ForwardPE"),
    (FundamentalMetric::EvToRevenue, "EVToRevenue"),
    (FundamentalMetric::EvToEbitda, "EVToEBITDA"),
    (FundamentalMetric::Ebitda, "EBITDA"),
    (FundamentalMetric::Beta, "Beta"),
    (FundamentalMetric::WeekHigh52, "52WeekHigh"),
    (FundamentalMetric::WeekLow52, "52WeekLow"),
    (FundamentalMetric::Eps, "EPS"),
    (FundamentalMetric::PegRatio, "PEGRatio"),
];

/// Placeholders the provider emits instead of omitting a key.
const ABSENT_MARKERS: [&str; 3] = ["", "None", "-"];

/// Pull the fixed metric set out of a raw overview. Never fails.
pub fn extract(raw: &RawOverview) -> FundamentalsRecord {
    let mut record = FundamentalsRecord::unknown();

    for (metric, key) in ALPHA_VANTAGE_OVERVIEW_KEYS {
        let value = raw
            .get(key)
            .and_then(Option::as_deref)
            .map(str::trim)
            .filter(|value| !ABSENT_MARKERS.contains(value));

        let reported = match (metric.kind(), value) {
            (_, None) => Reported::Unknown,
            (MetricKind::Text, Some(text)) => Reported::Known(MetricValue::Text(text.to_owned())),
            (MetricKind::Number, Some(text)) => match text.parse::<f64>() {
                Ok(number) if number.is_finite() => Reported::Known(MetricValue::Number(number)),
                _ => {
                    debug!(key, value = text, "overview value is not numeric; treating as unknown");
                    Reported::Unknown
                }
            },
        };

        record.set(metric, reported);
    }

    record
}

/// Convert a decoded JSON body into a [`RawOverview`].
///
/// Non-object bodies yield `None`. Within an object, strings are kept, numbers
/// and booleans are stringified, and nulls, arrays and nested objects become absent values.
pub fn raw_overview_from_json(value: &Value) -> Option<RawOverview> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    Value::Bool(flag) => Some(flag.to_string()),
                    Value::Null | Value::Array(_) | Value::Object(_) => None,
                };
                (key.clone(), text)
            })
            .collect(),
    )
}
