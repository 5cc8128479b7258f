//! Relative Strength Index (RSI) over simple rolling averages.
//!
//! gain = max(delta, 0), loss = max(-delta, 0), averaged over a trailing window.
//! RSI = 100 - 100 / (1 + avg_gain / (avg_loss + epsilon))
//!
//! The first delta is undefined and counts as zero gain and zero loss, so the
//! first RSI value lands at index `window - 1`. The epsilon keeps a window with
//! no losses finite (pinned just under 100) instead of dividing by zero.

use super::rolling::{diff, rolling_mean};

pub const DEFAULT_EPSILON_GUARD: f64 = 1e-10;

pub fn rsi(values: &[f64], window: usize, epsilon: f64) -> Vec<f64> {
    let delta = diff(values);

    // NaN comparisons are false, so an undefined delta becomes 0 in both legs.
    let gains: Vec<f64> = delta.iter().map(|&d| if d > 0.0 { d } else { 0.0 }).collect();
    let losses: Vec<f64> = delta.iter().map(|&d| if d < 0.0 { -d } else { 0.0 }).collect();

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            let rs = g / (l + epsilon);
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn first_value_at_window_minus_one() {
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3, DEFAULT_EPSILON_GUARD);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_finite());
    }

    #[test]
    fn mixed_known_value() {
        // Window ending at index 4 covers deltas -0.25, -0.48, +0.72
        // avg_gain = 0.72/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.72/0.73)
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3, DEFAULT_EPSILON_GUARD);
        let expected = 100.0 - 100.0 / (1.0 + 0.72 / 0.73);
        assert_approx(result[4], expected, 1e-6);
    }

    #[test]
    fn all_gains_pinned_near_100() {
        let result = rsi(&[100.0, 101.0, 102.0, 103.0, 104.0], 3, DEFAULT_EPSILON_GUARD);
        for &v in &result[2..] {
            assert!(v < 100.0);
            assert_approx(v, 100.0, 1e-6);
        }
    }

    #[test]
    fn all_losses_is_zero() {
        let result = rsi(&[105.0, 104.0, 103.0, 102.0], 3, DEFAULT_EPSILON_GUARD);
        assert_approx(result[3], 0.0, 1e-12);
    }

    #[test]
    fn flat_prices_are_zero() {
        let result = rsi(&[50.0; 5], 3, DEFAULT_EPSILON_GUARD);
        assert_eq!(result[4], 0.0);
    }

    #[test]
    fn bounds_with_losses_present() {
        let values = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let result = rsi(&values, 3, DEFAULT_EPSILON_GUARD);
        for (i, &v) in result.iter().enumerate().skip(2) {
            assert!(v > 0.0 && v < 100.0, "RSI out of bounds at {i}: {v}");
        }
    }
}
