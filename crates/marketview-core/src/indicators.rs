//! # Indicator Engine
//!
//! Pure functions from a [`PriceSeries`] to indicator lines. Every output is
//! aligned one-to-one with the input bars; `None` marks a position without
//! enough history.
//!
//! | Indicator | Warm-up | Notes |
//! |-----------|---------|-------|
//! | EMA | none | seeded with the first value, α = 2/(period+1) |
//! | MACD / signal | none | EMA(fast) − EMA(slow), signal = EMA of MACD |
//! | RSI | first `period` positions | Wilder smoothing, see [`rsi`] |
//! | SMA | first `period − 1` positions | used for chart overlays |

use serde::Serialize;

use crate::domain::PriceSeries;
use crate::ValidationError;

pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// MACD periods. All must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacdParams {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, ValidationError> {
        require_period("fast", fast)?;
        require_period("slow", slow)?;
        require_period("signal", signal)?;
        Ok(Self { fast, slow, signal })
    }

    pub const fn fast(self) -> usize {
        self.fast
    }

    pub const fn slow(self) -> usize {
        self.slow
    }

    pub const fn signal(self) -> usize {
        self.signal
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_MACD_FAST,
            slow: DEFAULT_MACD_SLOW,
            signal: DEFAULT_MACD_SIGNAL,
        }
    }
}

/// RSI lookback. Must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RsiParams {
    period: usize,
}

impl RsiParams {
    pub fn new(period: usize) -> Result<Self, ValidationError> {
        require_period("rsi", period)?;
        Ok(Self { period })
    }

    pub const fn period(self) -> usize {
        self.period
    }
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

/// MACD line and its signal line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdLines {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// All indicator lines for one series, aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn compute(series: &PriceSeries, macd_params: MacdParams, rsi_params: RsiParams) -> Self {
        let MacdLines { macd, signal } = macd(series, macd_params);
        Self {
            macd,
            signal,
            rsi: rsi(series, rsi_params),
        }
    }

    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// MACD over closing prices.
pub fn macd(series: &PriceSeries, params: MacdParams) -> MacdLines {
    let closes = series.closes();
    let fast = ema(&closes, params.fast);
    let slow = ema(&closes, params.slow);

    let line = fast
        .iter()
        .zip(&slow)
        .map(|(fast, slow)| fast - slow)
        .collect::<Vec<_>>();
    let signal = ema(&line, params.signal);

    MacdLines {
        macd: line.into_iter().map(Some).collect(),
        signal: signal.into_iter().map(Some).collect(),
    }
}

/// Wilder RSI over closing prices.
///
/// The first average gain/loss is the mean of the first `period` price
/// changes; later averages use `(prev * (period - 1) + current) / period`.
/// Positions `0..period` are `None`. When the last `period` changes are all
/// zero the window shows no movement and the value is `None` as well.
///
/// Seeding with a simple mean differs from an exponential seed taken from the
/// first change (`ewm(alpha = 1/period)`), so the earliest values after the
/// warm-up can differ from such tools; the two converge as the series grows.
pub fn rsi(series: &PriceSeries, params: RsiParams) -> Vec<Option<f64>> {
    rsi_values(&series.closes(), params.period)
}

/// Simple moving average; `None` until `period` values are available.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (index, value) in values.iter().enumerate() {
        sum += value;
        if index >= period {
            sum -= values[index - period];
        }
        out.push((index + 1 >= period).then(|| sum / period as f64));
    }
    out
}

/// Exponential moving average with α = 2/(period+1), seeded by the first value.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;

    for &value in values {
        let next = match previous {
            None => value,
            Some(prev) => alpha * value + (1.0 - alpha) * prev,
        };
        out.push(next);
        previous = Some(next);
    }
    out
}

fn rsi_values(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let changes = closes
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect::<Vec<_>>();
    let gain = |change: f64| change.max(0.0);
    let loss = |change: f64| (-change).max(0.0);
    let weight = period as f64;

    let seed = &changes[..period];
    let mut avg_gain = seed.iter().copied().map(gain).sum::<f64>() / weight;
    let mut avg_loss = seed.iter().copied().map(loss).sum::<f64>() / weight;
    let mut flat_run = trailing_flat_run(seed);

    out[period] = rsi_point(avg_gain, avg_loss, flat_run >= period);

    for (offset, &change) in changes[period..].iter().enumerate() {
        avg_gain = (avg_gain * (weight - 1.0) + gain(change)) / weight;
        avg_loss = (avg_loss * (weight - 1.0) + loss(change)) / weight;
        flat_run = if change == 0.0 { flat_run + 1 } else { 0 };

        out[period + offset + 1] = rsi_point(avg_gain, avg_loss, flat_run >= period);
    }

    out
}

fn rsi_point(avg_gain: f64, avg_loss: f64, flat_window: bool) -> Option<f64> {
    if flat_window {
        return None;
    }
    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let relative_strength = avg_gain / avg_loss;
    Some((100.0 - 100.0 / (1.0 + relative_strength)).clamp(0.0, 100.0))
}

fn trailing_flat_run(changes: &[f64]) -> usize {
    changes
        .iter()
        .rev()
        .take_while(|change| **change == 0.0)
        .count()
}

fn require_period(name: &'static str, period: usize) -> Result<(), ValidationError> {
    if period == 0 {
        return Err(ValidationError::ZeroPeriod { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ema_is_seeded_with_first_value() {
        let values = ema(&[10.0, 11.0, 12.0], 3);
        // alpha = 0.5
        assert_close(values[0], 10.0);
        assert_close(values[1], 10.5);
        assert_close(values[2], 11.25);
    }

    #[test]
    fn ema_of_empty_input_is_empty() {
        assert!(ema(&[], 12).is_empty());
    }

    #[test]
    fn sma_warms_up_for_period_minus_one_positions() {
        let values = sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert_close(values[2].expect("defined"), 2.0);
        assert_close(values[3].expect("defined"), 3.0);
    }

    #[test]
    fn sma_longer_than_input_is_all_undefined() {
        assert_eq!(sma(&[1.0, 2.0], 35), vec![None, None]);
    }

    #[test]
    fn rsi_matches_hand_computed_wilder_values() {
        // changes: +1, -1, +2, then +1
        let values = rsi_values(&[10.0, 11.0, 10.0, 12.0, 13.0], 3);

        assert_eq!(&values[..3], &[None, None, None]);
        // seed: gain = 3/3 = 1, loss = 1/3
        assert_close(values[3].expect("defined"), 75.0);
        // gain = (1*2 + 1)/3 = 1, loss = (1/3*2 + 0)/3 = 2/9
        let expected = 100.0 - 100.0 / (1.0 + 1.0 / (2.0 / 9.0));
        assert_close(values[4].expect("defined"), expected);
    }

    #[test]
    fn rsi_is_100_without_losses_and_0_without_gains() {
        let rising = rsi_values(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(rising[4], Some(100.0));

        let falling = rsi_values(&[5.0, 4.0, 3.0, 2.0, 1.0], 2);
        assert_eq!(falling[4], Some(0.0));
    }

    #[test]
    fn rsi_is_undefined_once_the_lookback_window_goes_flat() {
        let values = rsi_values(&[1.0, 2.0, 3.0, 3.0, 3.0, 4.0], 2);
        assert_eq!(values[2], Some(100.0));
        assert_eq!(values[3], Some(100.0));
        assert_eq!(values[4], None);
        assert_eq!(values[5], Some(100.0));
    }

    #[test]
    fn zero_periods_are_rejected() {
        assert_eq!(
            MacdParams::new(12, 0, 9),
            Err(ValidationError::ZeroPeriod { name: "slow" })
        );
        assert_eq!(
            RsiParams::new(0),
            Err(ValidationError::ZeroPeriod { name: "rsi" })
        );
        assert_eq!(MacdParams::default(), MacdParams::new(12, 26, 9).expect("valid"));
    }
}
