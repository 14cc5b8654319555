//! Quote normalization: provider-shaped daily rows into a [`PriceSeries`].
//!
//! Provider field names are mapped to canonical fields through a
//! [`FieldMapping`] table, so supporting another provider's layout means
//! declaring another table rather than touching the parser.

use std::collections::BTreeMap;

use time::Date;

use crate::domain::{PriceBar, PriceSeries, DATE_FORMAT};
use crate::MalformedRecord;

/// One raw row: provider field name to string-encoded value.
pub type RawBar = BTreeMap<String, String>;

/// Canonical bar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    AdjustedClose,
    Volume,
}

impl PriceField {
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::AdjustedClose,
        Self::Volume,
    ];

    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::AdjustedClose => "adjusted_close",
            Self::Volume => "volume",
        }
    }
}

/// Provider field name for each canonical field. Unlisted provider fields are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    entries: &'static [(&'static str, PriceField)],
}

impl FieldMapping {
    pub const fn new(entries: &'static [(&'static str, PriceField)]) -> Self {
        Self { entries }
    }

    pub fn provider_name(&self, field: PriceField) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, canonical)| *canonical == field)
            .map(|(name, _)| *name)
    }

    pub fn canonical_field(&self, provider_name: &str) -> Option<PriceField> {
        self.entries
            .iter()
            .find(|(name, _)| *name == provider_name)
            .map(|(_, field)| *field)
    }
}

/// Alpha Vantage `TIME_SERIES_DAILY_ADJUSTED` row layout.
///
/// `7. dividend amount` and `8. split coefficient` are intentionally absent.
pub const ALPHA_VANTAGE_DAILY_ADJUSTED: FieldMapping = FieldMapping::new(&[
    ("1. open", PriceField::Open),
    ("2. high", PriceField::High),
    ("3. low", PriceField::Low),
    ("4. close", PriceField::Close),
    ("5. adjusted close", PriceField::AdjustedClose),
    ("6. volume", PriceField::Volume),
]);

/// Parse, rename and sort raw rows into an ascending series.
///
/// Fails with [`MalformedRecord`] on the first unparseable date or number, on a
/// missing mapped field, on a bar that breaks OHLC invariants, and on two rows
/// sharing a date.
pub fn normalize<I, K>(raw: I, mapping: &FieldMapping) -> Result<PriceSeries, MalformedRecord>
where
    I: IntoIterator<Item = (K, RawBar)>,
    K: AsRef<str>,
{
    let mut bars = raw
        .into_iter()
        .map(|(date, row)| normalize_row(date.as_ref(), &row, mapping))
        .collect::<Result<Vec<_>, _>>()?;

    bars.sort_by_key(|bar| bar.date);

    if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
        return Err(MalformedRecord::DuplicateDate {
            date: crate::domain::format_date(pair[0].date),
        });
    }

    // Sorted and de-duplicated above, so construction cannot observe disorder.
    PriceSeries::new(bars).map_err(|source| MalformedRecord::InvalidBar {
        date: String::from("<series>"),
        source,
    })
}

/// [`normalize`] with the Alpha Vantage daily adjusted layout.
pub fn normalize_daily_adjusted<I, K>(raw: I) -> Result<PriceSeries, MalformedRecord>
where
    I: IntoIterator<Item = (K, RawBar)>,
    K: AsRef<str>,
{
    normalize(raw, &ALPHA_VANTAGE_DAILY_ADJUSTED)
}

pub fn parse_date(value: &str) -> Result<Date, MalformedRecord> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|_| MalformedRecord::InvalidDate {
        value: value.to_owned(),
    })
}

fn normalize_row(
    date: &str,
    row: &RawBar,
    mapping: &FieldMapping,
) -> Result<PriceBar, MalformedRecord> {
    let parsed_date = parse_date(date)?;
    let price = |field: PriceField| parse_price(date, row, mapping, field);

    let open = price(PriceField::Open)?;
    let high = price(PriceField::High)?;
    let low = price(PriceField::Low)?;
    let close = price(PriceField::Close)?;
    let adjusted_close = price(PriceField::AdjustedClose)?;
    let volume = parse_volume(date, row, mapping)?;

    PriceBar::new(parsed_date, open, high, low, close, adjusted_close, volume).map_err(|source| {
        MalformedRecord::InvalidBar {
            date: date.to_owned(),
            source,
        }
    })
}

fn raw_value<'a>(
    date: &str,
    row: &'a RawBar,
    mapping: &FieldMapping,
    field: PriceField,
) -> Result<&'a str, MalformedRecord> {
    let missing = || MalformedRecord::MissingField {
        date: date.to_owned(),
        field: field.canonical_name(),
    };
    let provider_name = mapping.provider_name(field).ok_or_else(missing)?;
    row.get(provider_name)
        .map(|value| value.trim())
        .ok_or_else(missing)
}

fn parse_price(
    date: &str,
    row: &RawBar,
    mapping: &FieldMapping,
    field: PriceField,
) -> Result<f64, MalformedRecord> {
    let value = raw_value(date, row, mapping, field)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| MalformedRecord::InvalidNumber {
            date: date.to_owned(),
            field: field.canonical_name(),
            value: value.to_owned(),
        })
}

fn parse_volume(date: &str, row: &RawBar, mapping: &FieldMapping) -> Result<u64, MalformedRecord> {
    let value = raw_value(date, row, mapping, PriceField::Volume)?;
    value
        .parse::<u64>()
        .map_err(|_| MalformedRecord::InvalidNumber {
            date: date.to_owned(),
            field: PriceField::Volume.canonical_name(),
            value: value.to_owned(),
        })
}
