//! Statistics engine: descriptive statistics, correlation weighting and the
//! least-squares line fit.

mod descriptive;
mod fit;
mod weighting;

pub use descriptive::{correlation, mean, sample_covariance, sample_std};
pub use fit::{fit_line, predict, FitResult};
pub use weighting::{
    all_correlations, weighted_mark, weighted_marks, weights, CorrelationVector, Subject,
    WeightVector,
};
