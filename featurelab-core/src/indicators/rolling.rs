//! Trailing-window statistics over a numeric series.
//!
//! Every window ends at (and includes) the current index; nothing here reads
//! ahead. A window that is not yet full, or that contains a NaN, yields NaN.
//! Output always has the same length as the input.

/// The `window` values ending at `index`, or `None` when the window is not
/// full yet or holds a NaN.
fn full_window(values: &[f64], index: usize, window: usize) -> Option<&[f64]> {
    if window == 0 || index + 1 < window {
        return None;
    }
    let slice = &values[(index + 1 - window)..=index];
    if slice.iter().any(|v| v.is_nan()) {
        None
    } else {
        Some(slice)
    }
}

fn mean(slice: &[f64]) -> f64 {
    slice.iter().sum::<f64>() / slice.len() as f64
}

/// Sample standard deviation (divide by n - 1).
fn sample_std(slice: &[f64]) -> f64 {
    if slice.len() < 2 {
        return f64::NAN;
    }
    let m = mean(slice);
    let ss: f64 = slice.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (slice.len() - 1) as f64).sqrt()
}

/// Rolling arithmetic mean. First defined value at index `window - 1`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| full_window(values, i, window).map_or(f64::NAN, mean))
        .collect()
}

/// Rolling sample standard deviation. First defined value at index
/// `window - 1`; a window of 1 is never defined.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| full_window(values, i, window).map_or(f64::NAN, sample_std))
        .collect()
}

/// Percentage change from the previous value: `(v[i] - v[i-1]) / v[i-1]`.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = (values[i] - values[i - 1]) / values[i - 1];
    }
    out
}

/// First difference: `v[i] - v[i-1]`, NaN at index 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

/// Value observed `periods` rows earlier: `out[i] = v[i - periods]`.
pub fn lag(values: &[f64], periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if periods < n {
        out[periods..].copy_from_slice(&values[..n - periods]);
    }
    out
}

/// Value observed `periods` rows later: `out[i] = v[i + periods]`.
pub fn lead(values: &[f64], periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if periods < n {
        out[..n - periods].copy_from_slice(&values[periods..]);
    }
    out
}
