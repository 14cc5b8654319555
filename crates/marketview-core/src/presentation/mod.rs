//! # Presentation Adapter
//!
//! Turns a fetched security and its indicators into display-ready objects:
//! the company overview table, the candlestick chart, and the optional MACD
//! and RSI charts. Only layout and styling are decided here; the values come
//! from the indicator engine and the actual drawing belongs to a
//! [`DisplaySink`].

mod chart;
mod sink;

pub use chart::{
    CandlestickChart, ChartPoint, Color, FigureSize, LineChart, LineSeries, LineStyle,
    MovingAverageOverlay, ReferenceLine,
};
pub use sink::DisplaySink;

use serde::Serialize;

use crate::data_source::SecuritySnapshot;
use crate::domain::{FundamentalsRecord, PriceSeries, Symbol};
use crate::indicators::{sma, IndicatorSeries};

pub const PAGE_TITLE: &str = "Market View";
pub const OVERVIEW_TITLE: &str = "Company Overview";
pub const PRICE_CHART_TITLE: &str = "Security Performance";

/// Moving-average overlays on the candlestick panel: (period, color).
pub const PRICE_OVERLAYS: [(usize, Color); 2] = [(35, Color::Yellow), (50, Color::Red)];

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// User toggles for the optional indicator charts. Both default to shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    pub show_macd: bool,
    pub show_rsi: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_macd: true,
            show_rsi: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub metric: String,
    pub value: String,
}

/// Two-column metric table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn value_of(&self, metric: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.metric == metric)
            .map(|row| row.value.as_str())
    }
}

/// Everything shown for one security.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub symbol: Symbol,
    pub fundamentals: Table,
    pub price_chart: CandlestickChart,
    pub macd_chart: Option<LineChart>,
    pub rsi_chart: Option<LineChart>,
}

impl Dashboard {
    pub fn build(
        snapshot: &SecuritySnapshot,
        indicators: &IndicatorSeries,
        options: DisplayOptions,
    ) -> Self {
        let dates = snapshot.prices.dates();

        Self {
            title: String::from(PAGE_TITLE),
            symbol: snapshot.symbol.clone(),
            fundamentals: fundamentals_table(&snapshot.fundamentals),
            price_chart: price_chart(&snapshot.symbol, &snapshot.prices),
            macd_chart: options
                .show_macd
                .then(|| macd_chart(&dates, indicators)),
            rsi_chart: options.show_rsi.then(|| rsi_chart(&dates, indicators)),
        }
    }

    /// Hand every artifact to the sink: table, candlesticks, then MACD and RSI if present.
    pub fn present<S: DisplaySink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.table(&self.fundamentals)?;
        sink.candlestick(&self.price_chart)?;
        if let Some(chart) = &self.macd_chart {
            sink.line_chart(chart)?;
        }
        if let Some(chart) = &self.rsi_chart {
            sink.line_chart(chart)?;
        }
        Ok(())
    }
}

/// One row per metric; unknown values read `unknown`.
pub fn fundamentals_table(record: &FundamentalsRecord) -> Table {
    Table {
        title: String::from(OVERVIEW_TITLE),
        rows: record
            .entries()
            .into_iter()
            .map(|(metric, value)| TableRow {
                metric: metric.label().to_owned(),
                value: value.to_string(),
            })
            .collect(),
    }
}

pub fn price_chart(symbol: &Symbol, prices: &PriceSeries) -> CandlestickChart {
    let dates = prices.dates();
    let closes = prices.closes();

    CandlestickChart {
        title: String::from(PRICE_CHART_TITLE),
        title_font_size: 18,
        style: "nightclouds",
        figure: FigureSize::Ratio {
            width: 20,
            height: 12,
            scale: 0.95,
        },
        symbol: symbol.clone(),
        bars: prices.bars().to_vec(),
        overlays: PRICE_OVERLAYS
            .iter()
            .map(|&(period, color)| MovingAverageOverlay {
                period,
                line: LineSeries::new(
                    format!("SMA {period}"),
                    color,
                    1.0,
                    &dates,
                    &sma(&closes, period),
                ),
            })
            .collect(),
        volume_panel: true,
    }
}

pub fn macd_chart(dates: &[time::Date], indicators: &IndicatorSeries) -> LineChart {
    LineChart {
        title: String::from("MACD"),
        title_font_size: 24,
        figure: FigureSize::Inches {
            width: 12.0,
            height: 4.0,
        },
        series: vec![
            LineSeries::new("MACD", Color::Yellow, 2.0, dates, &indicators.macd),
            LineSeries::new("Signal", Color::Red, 2.0, dates, &indicators.signal),
        ],
        reference_lines: vec![ReferenceLine {
            value: 0.0,
            color: Color::Gray,
            style: LineStyle::Dashed,
        }],
        legend: true,
    }
}

pub fn rsi_chart(dates: &[time::Date], indicators: &IndicatorSeries) -> LineChart {
    LineChart {
        title: String::from("RSI"),
        title_font_size: 24,
        figure: FigureSize::Inches {
            width: 12.0,
            height: 4.0,
        },
        series: vec![LineSeries::new(
            "RSI",
            Color::Blue,
            2.0,
            dates,
            &indicators.rsi,
        )],
        reference_lines: [RSI_OVERSOLD, RSI_OVERBOUGHT]
            .into_iter()
            .map(|value| ReferenceLine {
                value,
                color: Color::Red,
                style: LineStyle::Dashed,
            })
            .collect(),
        legend: true,
    }
}
