//! Line of best fit through the normal equations, and prediction from it.
//!
//! With design matrix `A` (rows `[1, xᵢ]`) and targets `b`, least squares
//! solves `(AᵗA) β = Aᵗb`. The predictor is centred first (rows
//! `[1, xᵢ − x̄]`), which turns the 2×2 system diagonal:
//!
//! ```text
//!   | n    0   | |  β₀   |   | Σy          |
//!   | 0    Sxx | | slope | = | Σ(xᵢ − x̄)yᵢ |
//! ```
//!
//! with `Sxx = Σ(xᵢ − x̄)²`, and `intercept = β₀ − slope·x̄`.

use serde::Serialize;

use crate::errors::{StatsError, StatsResult};

/// A fitted line `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub intercept: f64,
    pub slope: f64,
}

impl FitResult {
    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        predict(self, x)
    }
}

/// Fit `y = intercept + slope·x` by least squares.
///
/// Needs at least two distinct `x` values; otherwise `AᵗA` is singular.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> StatsResult<FitResult> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { field: "xs" });
    }

    // one point, or all x equal: Sxx is zero
    if xs.iter().all(|&x| x == xs[0]) {
        return Err(StatsError::SingularMatrix);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let (mut sum_y, mut sxx, mut sxy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sum_y += y;
        sxx += dx * dx;
        sxy += dx * y;
    }
    if !sxx.is_finite() || sxx <= 0.0 {
        return Err(StatsError::SingularMatrix);
    }

    let slope = sxy / sxx;
    Ok(FitResult {
        intercept: sum_y / n - slope * mean_x,
        slope,
    })
}

/// `intercept + slope·x`
pub fn predict(fit: &FitResult, x: f64) -> f64 {
    fit.intercept + fit.slope * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        // y = 2 + 3x
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 + 3.0 * x).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.intercept - 2.0).abs() < 1e-9);
        assert!((fit.slope - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_near_linear() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let ys = [2.1, 4.0, 5.9, 8.1, 10.0, 11.9, 14.1, 16.0, 17.9, 20.1];

        let fit = fit_line(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert!((fit.predict(x) - y).abs() < 0.2, "x = {x}");
        }
    }

    #[test]
    fn test_matches_textbook_slope() {
        // slope = cov / var, intercept = ȳ - slope·x̄
        let xs = [65.3, 72.0, 80.4, 58.8, 91.2];
        let ys = [181.0, 205.0, 222.0, 160.0, 251.0];
        let fit = fit_line(&xs, &ys).unwrap();

        let mx = xs.iter().sum::<f64>() / 5.0;
        let my = ys.iter().sum::<f64>() / 5.0;
        let sxy: f64 = xs.iter().zip(&ys).map(|(x, y)| (x - mx) * (y - my)).sum();
        let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
        let slope = sxy / sxx;

        assert!((fit.slope - slope).abs() < 1e-9);
        assert!((fit.intercept - (my - slope * mx)).abs() < 1e-7);
    }

    #[test]
    fn test_line_far_from_origin() {
        // y = 2 + 3x with x near 1e6
        let xs = [1e6, 1e6 + 1.0, 1e6 + 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 + 3.0 * x).collect();

        let fit = fit_line(&xs, &ys).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-9);
        assert!((fit.intercept - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_point_is_singular() {
        let result = fit_line(&[3.0], &[7.0]);
        assert!(matches!(result, Err(StatsError::SingularMatrix)));
    }

    #[test]
    fn test_constant_x_is_singular() {
        let result = fit_line(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(StatsError::SingularMatrix)));
    }

    #[test]
    fn test_fit_input_errors() {
        assert!(matches!(
            fit_line(&[], &[]),
            Err(StatsError::EmptyInput { .. })
        ));
        assert!(matches!(
            fit_line(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_predict() {
        let fit = FitResult {
            intercept: 1.5,
            slope: -2.0,
        };
        assert_eq!(predict(&fit, 4.0), -6.5);
        assert_eq!(fit.predict(0.0), 1.5);
    }
}
