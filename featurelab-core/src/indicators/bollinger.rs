//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: rolling mean(price, window)
//! - Upper: middle + mult * std(price, window)
//! - Lower: middle - mult * std(price, window)
//!
//! Uses sample stddev (divide by N - 1).
//! First defined value at index window - 1.

use super::rolling::{rolling_mean, rolling_std};

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerBands {
    pub fn compute(values: &[f64], window: usize, multiplier: f64) -> Self {
        let middle = rolling_mean(values, window);
        let std = rolling_std(values, window);
        let upper = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m + s * multiplier)
            .collect();
        let lower = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m - s * multiplier)
            .collect();
        Self {
            middle,
            upper,
            lower,
        }
    }

    /// Distance between the upper and lower band.
    pub fn width(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(u, l)| u - l)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn middle_is_rolling_mean() {
        let bands = BollingerBands::compute(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        assert!(bands.middle[0].is_nan());
        assert!(bands.middle[1].is_nan());
        assert_approx(bands.middle[2], 11.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bands_symmetric() {
        let bands = BollingerBands::compute(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        for i in 2..5 {
            let half_width = bands.upper[i] - bands.middle[i];
            assert_approx(bands.middle[i] - bands.lower[i], half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn width_is_four_std() {
        // Window [10, 11, 12]: sample std = 1
        let bands = BollingerBands::compute(&[10.0, 11.0, 12.0], 3, 2.0);
        assert_approx(bands.width()[2], 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_price_zero_width() {
        let bands = BollingerBands::compute(&[100.0; 4], 3, 2.0);
        let width = bands.width();
        assert!(width[1].is_nan());
        assert_eq!(width[2], 0.0);
        assert_eq!(width[3], 0.0);
    }
}
