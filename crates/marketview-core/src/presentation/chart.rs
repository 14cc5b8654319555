use serde::Serialize;
use time::Date;

use crate::domain::{format_date, PriceBar, Symbol};

/// Named plot colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Yellow,
    Red,
    Blue,
    Gray,
}

impl Color {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Figure dimensions in inches, or a width:height ratio plus scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FigureSize {
    Inches { width: f64, height: f64 },
    Ratio { width: u16, height: u16, scale: f64 },
}

/// One dated value; `None` where the line has no value yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(serialize_with = "crate::domain::serialize_date")]
    pub date: Date,
    pub value: Option<f64>,
}

/// A labelled line drawn over the date axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub label: String,
    pub color: Color,
    pub width: f64,
    pub points: Vec<ChartPoint>,
}

impl LineSeries {
    pub fn new(
        label: impl Into<String>,
        color: Color,
        width: f64,
        dates: &[Date],
        values: &[Option<f64>],
    ) -> Self {
        Self {
            label: label.into(),
            color,
            width,
            points: dates
                .iter()
                .zip(values)
                .map(|(date, value)| ChartPoint {
                    date: *date,
                    value: *value,
                })
                .collect(),
        }
    }

    /// Most recent defined point.
    pub fn last_defined(&self) -> Option<(Date, f64)> {
        self.points
            .iter()
            .rev()
            .find_map(|point| point.value.map(|value| (point.date, value)))
    }

    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|point| point.value.is_some()).count()
    }
}

/// Horizontal guide line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: Color,
    pub style: LineStyle,
}

/// Moving-average overlay drawn on the candlestick panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageOverlay {
    pub period: usize,
    pub line: LineSeries,
}

/// Candlestick chart with moving-average overlays and a volume sub-panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickChart {
    pub title: String,
    pub title_font_size: u8,
    pub style: &'static str,
    pub figure: FigureSize,
    pub symbol: Symbol,
    pub bars: Vec<PriceBar>,
    pub overlays: Vec<MovingAverageOverlay>,
    pub volume_panel: bool,
}

impl CandlestickChart {
    pub fn date_range(&self) -> Option<(String, String)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((format_date(first.date), format_date(last.date))),
            _ => None,
        }
    }
}

/// Line chart with optional horizontal reference lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub title_font_size: u8,
    pub figure: FigureSize,
    pub series: Vec<LineSeries>,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend: bool,
}
