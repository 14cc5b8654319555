use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

/// A provider-reported value, or `Unknown` when the provider did not supply it.
///
/// Unknown is never coerced to a default such as zero or an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Reported<T> {
    Known(T),
    Unknown,
}

impl<T> Default for Reported<T> {
    fn default() -> Self {
        Self::Unknown
    }
}

impl<T> Reported<T> {
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reported<U> {
        match self {
            Self::Known(value) => Reported::Known(f(value)),
            Self::Unknown => Reported::Unknown,
        }
    }
}

impl<T: Display> Display for Reported<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl<T: Serialize> Serialize for Reported<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Known(value) => value.serialize(serializer),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

/// Whether a metric is carried as free text or as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Text,
    Number,
}

/// The fixed set of company metrics shown in the overview table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FundamentalMetric {
    Name,
    Industry,
    AnalystTargetPrice,
    BookValue,
    PriceToBookRatio,
    PeRatio,
    ForwardPe,
    EvToRevenue,
    EvToEbitda,
    Ebitda,
    Beta,
    WeekHigh52,
    WeekLow52,
    Eps,
    PegRatio,
}

impl FundamentalMetric {
    pub const ALL: [Self; 15] = [
        Self::Name,
        Self::Industry,
        Self::AnalystTargetPrice,
        Self::BookValue,
        Self::PriceToBookRatio,
        Self::PeRatio,
        Self::ForwardPe,
        Self::EvToRevenue,
        Self::EvToEbitda,
        Self::Ebitda,
        Self::Beta,
        Self::WeekHigh52,
        Self::WeekLow52,
        Self::Eps,
        Self::PegRatio,
    ];

    pub const fn kind(self) -> MetricKind {
        match self {
            Self::Name | Self::Industry => MetricKind::Text,
            _ => MetricKind::Number,
        }
    }

    /// Human-readable row label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Industry => "Industry",
            Self::AnalystTargetPrice => "Analyst Target Price",
            Self::BookValue => "Book Value",
            Self::PriceToBookRatio => "P/B Ratio",
            Self::PeRatio => "P/E Ratio",
            Self::ForwardPe => "Forward P/E",
            Self::EvToRevenue => "EV/Revenue",
            Self::EvToEbitda => "EV/EBITDA",
            Self::Ebitda => "EBITDA",
            Self::Beta => "Beta",
            Self::WeekHigh52 => "52 Week High",
            Self::WeekLow52 => "52 Week Low",
            Self::Eps => "EPS",
            Self::PegRatio => "PEG Ratio",
        }
    }
}

/// Value of a single metric, typed by its [`MetricKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Text(String),
    Number(f64),
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Company overview snapshot. Every field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundamentalsRecord {
    pub name: Reported<String>,
    pub industry: Reported<String>,
    pub analyst_target_price: Reported<f64>,
    pub book_value: Reported<f64>,
    pub price_to_book_ratio: Reported<f64>,
    pub pe_ratio: Reported<f64>,
    pub forward_pe: Reported<f64>,
    pub ev_to_revenue: Reported<f64>,
    pub ev_to_ebitda: Reported<f64>,
    pub ebitda: Reported<f64>,
    pub beta: Reported<f64>,
    pub week_high_52: Reported<f64>,
    pub week_low_52: Reported<f64>,
    pub eps: Reported<f64>,
    pub peg_ratio: Reported<f64>,
}

impl FundamentalsRecord {
    /// A record in which every metric is unknown.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: FundamentalMetric) -> Reported<MetricValue> {
        match metric {
            FundamentalMetric::Name => self.name.clone().map(MetricValue::Text),
            FundamentalMetric::Industry => self.industry.clone().map(MetricValue::Text),
            other => self.number_slot(other).map(MetricValue::Number),
        }
    }

    /// Assign a metric. A value whose type does not match the metric's kind is ignored.
    pub fn set(&mut self, metric: FundamentalMetric, value: Reported<MetricValue>) {
        match (metric, value) {
            (FundamentalMetric::Name, Reported::Known(MetricValue::Text(text))) => {
                self.name = Reported::Known(text);
            }
            (FundamentalMetric::Industry, Reported::Known(MetricValue::Text(text))) => {
                self.industry = Reported::Known(text);
            }
            (FundamentalMetric::Name, Reported::Unknown) => self.name = Reported::Unknown,
            (FundamentalMetric::Industry, Reported::Unknown) => self.industry = Reported::Unknown,
            (other, Reported::Known(MetricValue::Number(number))) => {
                if let Some(slot) = self.number_slot_mut(other) {
                    *slot = Reported::Known(number);
                }
            }
            (other, Reported::Unknown) => {
                if let Some(slot) = self.number_slot_mut(other) {
                    *slot = Reported::Unknown;
                }
            }
            (_, Reported::Known(MetricValue::Text(_))) => {}
        }
    }

    /// `(metric, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(FundamentalMetric, Reported<MetricValue>)> {
        FundamentalMetric::ALL
            .into_iter()
            .map(|metric| (metric, self.get(metric)))
            .collect()
    }

    pub fn known_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|(_, value)| value.is_known())
            .count()
    }

    fn number_slot(&self, metric: FundamentalMetric) -> Reported<f64> {
        match metric {
            FundamentalMetric::AnalystTargetPrice => self.analyst_target_price.clone(),
            FundamentalMetric::BookValue => self.book_value.clone(),
            FundamentalMetric::PriceToBookRatio => self.price_to_book_ratio.clone(),
            FundamentalMetric::PeRatio => self.pe_ratio.clone(),
            FundamentalMetric::ForwardPe => self.forward_pe.clone(),
            FundamentalMetric::EvToRevenue => self.ev_to_revenue.clone(),
            FundamentalMetric::EvToEbitda => self.ev_to_ebitda.clone(),
            FundamentalMetric::Ebitda => self.ebitda.clone(),
            FundamentalMetric::Beta => self.beta.clone(),
            FundamentalMetric::WeekHigh52 => self.week_high_52.clone(),
            FundamentalMetric::WeekLow52 => self.week_low_52.clone(),
            FundamentalMetric::Eps => self.eps.clone(),
            FundamentalMetric::PegRatio => self.peg_ratio.clone(),
            FundamentalMetric::Name | FundamentalMetric::Industry => Reported::Unknown,
        }
    }

    fn number_slot_mut(&mut self, metric: FundamentalMetric) -> Option<&mut Reported<f64>> {
        let slot = match metric {
            FundamentalMetric::AnalystTargetPrice => &mut self.analyst_target_price,
            FundamentalMetric::BookValue => &mut self.book_value,
            FundamentalMetric::PriceToBookRatio => &mut self.price_to_book_ratio,
            FundamentalMetric::PeRatio => &mut self.pe_ratio,
            FundamentalMetric::ForwardPe => &mut self.forward_pe,
            FundamentalMetric::EvToRevenue => &mut self.ev_to_revenue,
            FundamentalMetric::EvToEbitda => &mut self.ev_to_ebitda,
            FundamentalMetric::Ebitda => &mut self.ebitda,
            FundamentalMetric::Beta => &mut self.beta,
            FundamentalMetric::WeekHigh52 => &mut self.week_high_52,
            FundamentalMetric::WeekLow52 => &mut self.week_low_52,
            FundamentalMetric::Eps => &mut self.eps,
            FundamentalMetric::PegRatio => &mut self.peg_ratio,
            FundamentalMetric::Name | FundamentalMetric::Industry => return None,
        };
        Some(slot)
    }
}
