// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// over the same trailing window.  The Band Width (BBW) is the normalised
// distance: BBW = (upper - lower) / middle * 100.

use serde::Serialize;

use super::sma::sma;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_NUM_STD: f64 = 2.0;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    fn undefined() -> Self {
        Self {
            upper: f64::NAN,
            middle: f64::NAN,
            lower: f64::NAN,
        }
    }

    /// Band width as a percentage of the middle band.  NaN when the middle
    /// band is zero or undefined.
    pub fn width_percent(&self) -> f64 {
        if self.middle == 0.0 {
            return f64::NAN;
        }
        (self.upper - self.lower) / self.middle * 100.0
    }
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `upper`  = SMA + `num_std` * σ
/// - `middle` = SMA
/// - `lower`  = SMA - `num_std` * σ
///
/// All three are NaN when `period == 0` or fewer than `period` closes exist.
/// A flat window (σ = 0) collapses all three bands onto the middle.
pub fn bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    if period == 0 || closes.len() < period {
        return BollingerBands::undefined();
    }

    let middle = sma(closes, period);
    let window = &closes[closes.len() - period..];
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    BollingerBands {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = bollinger(&closes, DEFAULT_PERIOD, DEFAULT_NUM_STD);
        assert!((bb.middle - 10.5).abs() < 1e-10);
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!(((bb.upper - bb.middle) - (bb.middle - bb.lower)).abs() < 1e-10);
        assert!(bb.width_percent() > 0.0);
    }

    #[test]
    fn bollinger_known_std_dev() {
        // Population σ of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = bollinger(&closes, 8, 1.5);
        assert!((bb.middle - 5.0).abs() < 1e-12);
        assert!((bb.upper - 8.0).abs() < 1e-12);
        assert!((bb.lower - 2.0).abs() < 1e-12);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert!(bb.upper.is_nan() && bb.middle.is_nan() && bb.lower.is_nan());
        assert!(bollinger(&[1.0, 2.0, 3.0], 0, 2.0).middle.is_nan());
    }

    #[test]
    fn bollinger_flat() {
        let bb = bollinger(&[100.0; 20], 20, 2.0);
        assert_eq!(bb.upper, 100.0);
        assert_eq!(bb.lower, 100.0);
        assert!(bb.width_percent().abs() < 1e-10);
    }
}
