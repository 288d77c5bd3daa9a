use thiserror::Error;

/// Errors raised by the statistics core.
///
/// None of these are recovered from: the batch job aborts on the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Missing field '{field}' in record {row}")]
    MissingField { field: String, row: usize },

    #[error("Field '{field}' in record {row} is not numeric: '{value}'")]
    NonNumericField {
        field: String,
        row: usize,
        value: String,
    },

    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Length mismatch: {left} values vs {right} values")]
    LengthMismatch { left: usize, right: usize },

    #[error("Division by zero while computing {what}")]
    DivisionByZero { what: &'static str },

    #[error("Normal equations are singular or near-singular")]
    SingularMatrix,
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
