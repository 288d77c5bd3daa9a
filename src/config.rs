use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Which marks feed the composite used for the final prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMarkMode {
    /// English, Math, GA.
    #[default]
    Corrected,
    /// English, Math, Math: the legacy sheet passed the Math input in the GA slot.
    Literal,
}

impl FromStr for InputMarkMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "corrected" => Ok(InputMarkMode::Corrected),
            "literal" => Ok(InputMarkMode::Literal),
            other => bail!("unknown input mode '{other}' (expected 'literal' or 'corrected')"),
        }
    }
}

impl fmt::Display for InputMarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMarkMode::Corrected => f.write_str("corrected"),
            InputMarkMode::Literal => f.write_str("literal"),
        }
    }
}

/// Anchor labels for the weighted run. Each output block is placed at a fixed
/// offset from its label cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Correlations go 1..=3 rows below.
    pub correlation_label: String,
    /// Weights go 1..=3 rows below.
    pub weight_label: String,
    /// Student i's composite goes i+1 rows below.
    pub weighted_mark_label: String,
    /// Input marks sit one column right of each label, in subject order.
    pub input_labels: [String; 3],
    /// Prediction goes one column right.
    pub output_label: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            correlation_label: "Corr (Python)".into(),
            weight_label: "Weight (Python)".into(),
            weighted_mark_label: "WAM (Python)".into(),
            input_labels: [
                "Input English".into(),
                "Input Math".into(),
                "Input GA".into(),
            ],
            output_label: "Output Mark".into(),
        }
    }
}

/// Fixed A1 cells for the single-predictor run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleLayout {
    pub intercept_cell: String,
    pub slope_cell: String,
    pub input_cell: String,
    pub output_cell: String,
}

impl Default for SimpleLayout {
    fn default() -> Self {
        Self {
            intercept_cell: "F2".into(),
            slope_cell: "F3".into(),
            input_cell: "F5".into(),
            output_cell: "F6".into(),
        }
    }
}

/// Job configuration, usually read from a JSON file. Every field is optional.
///
/// ```json
/// { "input_mode": "literal", "layout": { "output_label": "Predicted" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub layout: SheetLayout,
    pub simple: SimpleLayout,
    pub input_mode: InputMarkMode,
}

impl JobConfig {
    /// Read a config file, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
