use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Outcome column every model is fitted against.
pub const OUTCOME_FIELD: &str = "Selective Score";

/// Single predictor column used by the plain line-of-best-fit run.
pub const MARK_FIELD: &str = "Mark";

/// Columns a student row is recognised by: the three subjects, the outcome
/// and the plain mark.
pub const STUDENT_FIELDS: [&str; 5] = ["English", "Math", "GA", OUTCOME_FIELD, MARK_FIELD];

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes off the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Type raw cell text: empty → Null, then integer, float, bool, string.
    pub fn from_text(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        // non-finite parses ("NaN", "inf") stay text
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one student row
// ---------------------------------------------------------------------------

/// One student's row: header-derived field name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) {
        self.fields.insert(field.into(), value);
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – all student rows in source order
// ---------------------------------------------------------------------------

/// The full set of rows read from a source, in source order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Student rows. Index `i` in every extracted column refers to `records[i]`.
    pub records: Vec<Record>,
    /// Header names in source column order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, column_names: Vec<String>) -> Self {
        Dataset {
            records,
            column_names,
        }
    }

    /// Build a dataset from rows alone; column names are collected from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for rec in &records {
            for key in rec.fields.keys() {
                if !column_names.contains(key) {
                    column_names.push(key.clone());
                }
            }
        }
        Dataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
