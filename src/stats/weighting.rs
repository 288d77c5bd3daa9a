//! Correlation-derived subject weights and the weighted composite mark.

use std::fmt;
use std::ops::Index;

use log::debug;
use serde::{Deserialize, Serialize};

use super::descriptive::correlation;
use crate::data::{extract_field, Dataset, OUTCOME_FIELD};
use crate::errors::{StatsError, StatsResult};

/// The three predictor subjects, in the order the sheet lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    English,
    Math,
    #[serde(rename = "GA")]
    GeneralAbility,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::English, Subject::Math, Subject::GeneralAbility];

    /// Column header in the student records.
    pub const fn field_name(self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::Math => "Math",
            Subject::GeneralAbility => "GA",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Subject::English => 0,
            Subject::Math => 1,
            Subject::GeneralAbility => 2,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Correlation of each subject with the outcome, in [`Subject::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationVector(pub [f64; 3]);

/// Per-subject weights, in [`Subject::ALL`] order. Elements sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector(pub [f64; 3]);

impl CorrelationVector {
    pub fn values(&self) -> &[f64; 3] {
        &self.0
    }
}

impl WeightVector {
    pub fn values(&self) -> &[f64; 3] {
        &self.0
    }
}

impl Index<Subject> for CorrelationVector {
    type Output = f64;

    fn index(&self, subject: Subject) -> &f64 {
        &self.0[subject.index()]
    }
}

impl Index<Subject> for WeightVector {
    type Output = f64;

    fn index(&self, subject: Subject) -> &f64 {
        &self.0[subject.index()]
    }
}

/// Correlate every subject column with the outcome column.
pub fn all_correlations(dataset: &Dataset) -> StatsResult<CorrelationVector> {
    let outcome = extract_field(dataset, OUTCOME_FIELD)?;

    let mut corr = [0.0; 3];
    for subject in Subject::ALL {
        let marks = extract_field(dataset, subject.field_name())?;
        corr[subject.index()] = correlation(&marks, &outcome)?;
        debug!("corr({subject}, {OUTCOME_FIELD}) = {}", corr[subject.index()]);
    }
    Ok(CorrelationVector(corr))
}

/// Normalize correlations so they sum to one: `wᵢ = corrᵢ / Σ corr`.
pub fn weights(corr: &CorrelationVector) -> StatsResult<WeightVector> {
    let total: f64 = corr.0.iter().sum();
    if !total.is_finite() || total.abs() <= f64::EPSILON {
        return Err(StatsError::DivisionByZero {
            what: "correlation weights",
        });
    }
    Ok(WeightVector(corr.0.map(|c| c / total)))
}

/// `w0·english + w1·math + w2·ga`
pub fn weighted_mark(weights: &WeightVector, english: f64, math: f64, ga: f64) -> f64 {
    let [w0, w1, w2] = weights.0;
    w0 * english + w1 * math + w2 * ga
}

/// Composite mark for every student, in dataset order.
pub fn weighted_marks(dataset: &Dataset, weights: &WeightVector) -> StatsResult<Vec<f64>> {
    let english = extract_field(dataset, Subject::English.field_name())?;
    let math = extract_field(dataset, Subject::Math.field_name())?;
    let ga = extract_field(dataset, Subject::GeneralAbility.field_name())?;

    Ok(english
        .iter()
        .zip(&math)
        .zip(&ga)
        .map(|((&e, &m), &g)| weighted_mark(weights, e, m, g))
        .collect())
}
