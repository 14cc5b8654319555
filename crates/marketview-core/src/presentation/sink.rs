use super::{CandlestickChart, LineChart, Table};

/// Destination for rendered artifacts (terminal, UI toolkit, plotting backend).
pub trait DisplaySink {
    type Error;

    fn table(&mut self, table: &Table) -> Result<(), Self::Error>;

    fn candlestick(&mut self, chart: &CandlestickChart) -> Result<(), Self::Error>;

    fn line_chart(&mut self, chart: &LineChart) -> Result<(), Self::Error>;

    /// Ask the user for missing input instead of reporting an error.
    fn prompt(&mut self, message: &str) -> Result<(), Self::Error>;
}
