// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators used by
// the analytics engine.  Every function is total: insufficient data and
// numerical edge cases are reported with NaN (or NaN-filled tuples/series)
// rather than errors, so callers read NaN as "not enough data yet".

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use adx::adx;
pub use atr::atr;
pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use macd::{macd, MacdValue};
pub use obv::obv;
pub use roc::roc;
pub use rsi::{compute_rsi_series, rsi, RsiSeries, RsiZone};
pub use sma::sma;
pub use stochastic::{stochastic, StochasticValue};
