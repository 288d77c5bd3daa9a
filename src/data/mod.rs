/// Data layer: record types, loading, and field extraction.
///
/// Architecture:
/// ```text
///  sheet grid / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header row + rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column names in source order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  extract  │  one named field → Vec<f64>, same order as the records
///   └──────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;

pub use extract::extract_field;
pub use model::{CellValue, Dataset, Record, MARK_FIELD, OUTCOME_FIELD, STUDENT_FIELDS};
