use std::io::{self, Write};

use marketview_core::pipeline::SYMBOL_PROMPT;
use marketview_core::presentation::{CandlestickChart, LineChart, LineSeries};
use marketview_core::{DisplaySink, RenderOutcome, Table};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(outcome: &RenderOutcome, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let document = match outcome {
                RenderOutcome::NeedsSymbol => json!({ "prompt": SYMBOL_PROMPT }),
                RenderOutcome::Rendered(dashboard) => serde_json::to_value(dashboard)?,
            };
            let payload = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            if let RenderOutcome::Rendered(dashboard) = outcome {
                writeln!(out, "{} - {}", dashboard.title, dashboard.symbol)?;
                writeln!(out)?;
            }
            outcome.present(&mut TerminalSink::new(&mut out))?;
        }
    }

    Ok(())
}

/// Text rendition of the dashboard: the overview table in full and a short
/// description of every chart.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn series_summary(&mut self, series: &LineSeries) -> io::Result<()> {
        match series.last_defined() {
            Some((date, value)) => writeln!(
                self.out,
                "  {:<8} {:>12.4}  (as of {}, {} points, {})",
                series.label,
                value,
                marketview_core::domain::format_date(date),
                series.defined_count(),
                series.color.as_str(),
            ),
            None => writeln!(
                self.out,
                "  {:<8} {:>12}  ({})",
                series.label,
                "n/a",
                series.color.as_str()
            ),
        }
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    type Error = io::Error;

    fn table(&mut self, table: &Table) -> io::Result<()> {
        let width = table
            .rows
            .iter()
            .map(|row| row.metric.len())
            .max()
            .unwrap_or(0);

        writeln!(self.out, "{}", table.title)?;
        for row in &table.rows {
            writeln!(self.out, "  {:<width$}  {}", row.metric, row.value)?;
        }
        writeln!(self.out)
    }

    fn candlestick(&mut self, chart: &CandlestickChart) -> io::Result<()> {
        writeln!(self.out, "{}", chart.title)?;
        match (chart.date_range(), chart.bars.last()) {
            (Some((from, to)), Some(last)) => {
                writeln!(self.out, "  {} bars, {from} .. {to}", chart.bars.len())?;
                writeln!(
                    self.out,
                    "  last     O {:.2}  H {:.2}  L {:.2}  C {:.2}  V {}",
                    last.open, last.high, last.low, last.close, last.volume
                )?;
            }
            _ => writeln!(self.out, "  no bars")?,
        }
        for overlay in &chart.overlays {
            self.series_summary(&overlay.line)?;
        }
        writeln!(self.out)
    }

    fn line_chart(&mut self, chart: &LineChart) -> io::Result<()> {
        writeln!(self.out, "{}", chart.title)?;
        for series in &chart.series {
            self.series_summary(series)?;
        }
        if !chart.reference_lines.is_empty() {
            let levels = chart
                .reference_lines
                .iter()
                .map(|line| format!("{}", line.value))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.out, "  reference lines at {levels}")?;
        }
        writeln!(self.out)
    }

    fn prompt(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketview_core::presentation::{fundamentals_table, rsi_chart};
    use marketview_core::{FundamentalsRecord, IndicatorSeries};

    fn rendered(f: impl FnOnce(&mut TerminalSink<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut TerminalSink::new(&mut buffer)).expect("write to memory");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn table_lists_unknown_metrics() {
        let table = fundamentals_table(&FundamentalsRecord::unknown());

        let text = rendered(|sink| sink.table(&table));

        assert!(text.starts_with("Company Overview\n"));
        assert!(text.contains("Name"));
        assert!(text.contains("unknown"));
        assert_eq!(text.lines().count(), 1 + table.rows.len() + 1);
    }

    #[test]
    fn empty_rsi_chart_reports_no_value_and_guides() {
        let indicators = IndicatorSeries::default();
        let chart = rsi_chart(&[], &indicators);

        let text = rendered(|sink| sink.line_chart(&chart));

        assert!(text.contains("RSI"));
        assert!(text.contains("n/a"));
        assert!(text.contains("reference lines at 30, 70"));
    }

    #[test]
    fn prompt_is_printed_verbatim() {
        let text = rendered(|sink| sink.prompt(SYMBOL_PROMPT));
        assert_eq!(text, format!("{SYMBOL_PROMPT}\n"));
    }
}
