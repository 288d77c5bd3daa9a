use crate::errors::{StatsError, StatsResult};

use super::model::{CellValue, Dataset};

/// Extract the numeric values of `field` from every record, in dataset order.
///
/// Blank cells count as missing.
pub fn extract_field(dataset: &Dataset, field: &str) -> StatsResult<Vec<f64>> {
    dataset
        .records
        .iter()
        .enumerate()
        .map(|(row, rec)| match rec.get(field) {
            None | Some(CellValue::Null) => Err(StatsError::MissingField {
                field: field.to_string(),
                row,
            }),
            Some(value) => value.as_f64().ok_or_else(|| StatsError::NonNumericField {
                field: field.to_string(),
                row,
                value: value.to_string(),
            }),
        })
        .collect()
}
