//! selective-predictor: correlation-weighted marks and a least-squares line of
//! best fit for student assessment sheets.
//!
//! Student records are read from a [`sheet::CellStore`], subject correlations
//! with the selective score become weights, the weighted marks are regressed
//! against the score, and the fitted line predicts a new student's score.

pub mod config;
pub mod data;
pub mod errors;
pub mod job;
pub mod sheet;
pub mod stats;

pub use errors::{StatsError, StatsResult};
