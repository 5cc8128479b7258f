//! Numeric kernels behind the feature stages.
//!
//! Everything here is a pure function from a price (or derived) slice to a
//! series of the same length, with `f64::NAN` marking rows that lack history.
//! The feature stages in `crate::features` name and place these series in a
//! `FeatureTable`.

pub mod bollinger;
pub mod ema;
pub mod rolling;
pub mod rsi;

pub use bollinger::BollingerBands;
pub use ema::ewm_mean;
pub use rolling::{diff, lag, lead, pct_change, rolling_mean, rolling_std};
pub use rsi::rsi;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
