//! Statistics kernel
//!
//! Numeric primitives used by the forecasters. All functions are total:
//! short or constant input returns a defined value instead of NaN.

/// Least-squares fit of `value = slope * index + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, in [0, 1]
    pub r2: f64,
}

impl LinearFit {
    /// Value of the fitted line at index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `values` using their index (0..n-1) as the x-axis.
///
/// Fewer than two values gives a flat line through the single value (or 0)
/// with `r2 = 0`. A constant series has nothing left to explain, so its
/// `r2` is forced to 1. Negative R² is floored at 0.
pub fn linear_regression(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            r2: 0.0,
        };
    }

    let n_f = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    // n >= 2 with distinct integer x, so this is always positive
    let denominator = n_f * sum_x2 - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n_f * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n_f;

    let y_mean = sum_y / n_f;
    let (mut ss_tot, mut ss_res) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        ss_tot += (y - y_mean).powi(2);
        ss_res += (y - predicted).powi(2);
    }

    let r2 = if ss_tot == 0.0 {
        1.0
    } else {
        (1.0 - ss_res / ss_tot).max(0.0)
    };

    LinearFit {
        slope,
        intercept,
        r2,
    }
}

/// Single-parameter exponential smoothing.
///
/// `S_0 = v_0`, `S_i = alpha * v_i + (1 - alpha) * S_{i-1}`. The output has
/// the same length as the input.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(values.len());
    let mut iter = values.iter();

    let Some(&first) = iter.next() else {
        return smoothed;
    };

    let mut level = first;
    smoothed.push(level);
    for &v in iter {
        level = alpha * v + (1.0 - alpha) * level;
        smoothed.push(level);
    }

    smoothed
}

/// Autocorrelation of `values` with itself shifted by `lag`.
///
/// The numerator runs over every index with a partner `lag` steps ahead; the
/// denominator is the total squared deviation of the whole series. Returns 0
/// for an empty or constant series, or when the lag leaves no pairs.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n == 0 || lag >= n {
        return 0.0;
    }

    let m = mean(values);
    let denominator: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if denominator == 0.0 {
        return 0.0;
    }

    let numerator: f64 = values
        .iter()
        .zip(values.iter().skip(lag))
        .map(|(a, b)| (a - m) * (b - m))
        .sum();

    numerator / denominator
}

/// Flag a repeating pattern of length `period` when the lag autocorrelation
/// exceeds `threshold`. Needs at least two full periods of data.
pub fn detect_seasonality(values: &[f64], period: usize, threshold: f64) -> bool {
    if period == 0 || values.len() < 2 * period {
        return false;
    }
    autocorrelation(values, period) > threshold
}

/// Sample standard deviation (n - 1 divisor); 0 for fewer than two values
pub fn standard_deviation(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
