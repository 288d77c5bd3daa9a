//! Mean, covariance, spread and Pearson correlation.
//!
//! NOTE: `sample_covariance` and `sample_std` are *unnormalized*: neither is
//! divided by `n` or `n - 1`. The sheet outputs depend on this convention, so
//! these are not the textbook sample statistics and must not be "fixed".
//! Because both sides share the convention, `correlation` is still the usual
//! Pearson r.

use crate::errors::{StatsError, StatsResult};

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> StatsResult<f64> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { field: "xs" });
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Σ (xᵢ − x̄)(yᵢ − ȳ), not divided by `n`.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> StatsResult<f64> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    Ok(xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum())
}

/// sqrt(Σ (xᵢ − x̄)²), not divided by `n`.
///
/// Exactly zero for a constant input, even when `x̄` is off by rounding.
pub fn sample_std(xs: &[f64]) -> StatsResult<f64> {
    let mean_x = mean(xs)?;
    if xs.iter().all(|&x| x == xs[0]) {
        return Ok(0.0);
    }
    let sum_sq: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    Ok(sum_sq.sqrt())
}

/// Pearson correlation: `sample_covariance / (sample_std(xs) * sample_std(ys))`.
///
/// A constant input has zero spread and yields `DivisionByZero`, never NaN.
pub fn correlation(xs: &[f64], ys: &[f64]) -> StatsResult<f64> {
    let cov = sample_covariance(xs, ys)?;
    let sigma_x = sample_std(xs)?;
    let sigma_y = sample_std(ys)?;

    let denom = sigma_x * sigma_y;
    if denom == 0.0 {
        return Err(StatsError::DivisionByZero {
            what: "correlation",
        });
    }
    Ok(cov / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 6.0]).unwrap() - 3.0).abs() < TOL);
        assert!(matches!(mean(&[]), Err(StatsError::EmptyInput { .. })));
    }

    #[test]
    fn test_covariance_is_unnormalized() {
        // deviations: x = [-1, 0, 1], y = [-2, 0, 2] → Σ = 4, not 4/3 or 2
        let cov = sample_covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((cov - 4.0).abs() < TOL);
    }

    #[test]
    fn test_covariance_length_mismatch() {
        let result = sample_covariance(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(StatsError::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_std_is_unnormalized() {
        // Σ(x - 5)² = 9+1+1+1+0+0+4+16 = 32
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = sample_std(&xs).unwrap();
        assert!((std - 32.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_std_of_constant_is_zero() {
        for c in [0.0, 1.5, -42.0, 1e6] {
            assert_eq!(sample_std(&[c; 7]).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_std_of_inexact_constant_is_zero() {
        // sum / n misses these constants by an ulp
        assert_eq!(sample_std(&[0.1; 3]).unwrap(), 0.0);
        assert_eq!(sample_std(&[33.3; 6]).unwrap(), 0.0);
        assert_eq!(sample_std(&[72.3; 10]).unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_inexact_constant_input() {
        let ys = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        for c in [33.3, 0.7, 0.1] {
            let result = correlation(&[c; 6], &ys);
            assert!(
                matches!(result, Err(StatsError::DivisionByZero { .. })),
                "c = {c}: {result:?}"
            );
        }
    }

    #[test]
    fn test_std_empty() {
        assert!(matches!(
            sample_std(&[]),
            Err(StatsError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_self_correlation_is_one() {
        let xs = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        assert!((correlation(&xs, &xs).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_symmetry() {
        let xs = [80.0, 90.0, 60.0, 72.0];
        let ys = [200.0, 250.0, 150.0, 190.0];
        let a = correlation(&xs, &ys).unwrap();
        let b = correlation(&ys, &xs).unwrap();
        assert!((a - b).abs() < TOL);
    }

    #[test]
    fn test_negative_correlation() {
        let r = correlation(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < TOL);
    }

    #[test]
    fn test_correlation_constant_input() {
        let result = correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(StatsError::DivisionByZero { .. })));
    }
}
