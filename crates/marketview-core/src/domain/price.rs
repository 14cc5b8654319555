use serde::{Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

/// Calendar date layout used by the provider and by serialized output.
pub const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBar {
    #[serde(serialize_with = "serialize_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: u64,
}

impl PriceBar {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adjusted_close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("high", high)?;
        validate_price("low", low)?;
        validate_price("close", close)?;
        validate_price("adjusted_close", adjusted_close)?;

        if high < open || high < close || high < low {
            return Err(ValidationError::InvalidBarHigh);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adjusted_close,
            volume,
        })
    }
}

/// Bars in strictly ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<PriceBar>);

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(ValidationError::UnorderedSeries {
                previous: format_date(pair[0].date),
                next: format_date(pair[1].date),
            });
        }
        Ok(Self(bars))
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.0.last()
    }

    pub fn dates(&self) -> Vec<Date> {
        self.0.iter().map(|bar| bar.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|bar| bar.close).collect()
    }
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| String::from("<unformattable>"))
}

pub(crate) fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
