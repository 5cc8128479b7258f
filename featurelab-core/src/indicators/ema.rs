//! Exponential Moving Average (EMA), bias-uncorrected.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1)
//! Seed: EMA at the first observation equals that observation. There is no
//! warm-up window and no weight renormalization, so the output is defined from
//! the first finite value onward.

/// Smoothing factor for a decay span.
pub fn alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// EMA of `values` with the given decay span.
///
/// Leading NaNs stay NaN and the recurrence seeds on the first finite value.
/// A NaN after the seed taints every later value.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };

    let alpha = alpha(span);
    let mut prev = values[start];
    result[start] = prev;

    for i in (start + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}
