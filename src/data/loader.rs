use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, Record, STUDENT_FIELDS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load student records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with field names, one student per row
/// * `.json` – `[{ "English": 80, "Math": 70, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    debug!(
        "loaded {} records with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

/// Turn header cells plus raw rows into a [`Dataset`].
///
/// Rows are consumed until the first one whose key cells are all blank. The
/// key columns are the [`STUDENT_FIELDS`] present in the header, or every
/// labelled column when the header has none of them. Output blocks written
/// under other labelled columns therefore never extend the student rows.
/// Cells under a blank header are dropped.
pub(crate) fn records_from_rows<I>(headers: &[String], rows: I) -> Dataset
where
    I: IntoIterator<Item = Vec<String>>,
{
    let labelled: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (i, h.trim()))
        .filter(|(_, h)| !h.is_empty())
        .collect();
    let column_names: Vec<String> = labelled.iter().map(|(_, h)| h.to_string()).collect();

    let mut key_columns: Vec<usize> = labelled
        .iter()
        .filter(|(_, h)| STUDENT_FIELDS.contains(h))
        .map(|&(i, _)| i)
        .collect();
    if key_columns.is_empty() {
        key_columns = labelled.iter().map(|&(i, _)| i).collect();
    }

    let mut records = Vec::new();
    for row in rows {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        if key_columns.iter().all(|&i| cell(i).trim().is_empty()) {
            break;
        }
        let record: Record = labelled
            .iter()
            .map(|&(i, header)| (header, CellValue::from_text(cell(i))))
            .collect();
        records.push(record);
    }

    Dataset::new(records, column_names)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, one object per student):
///
/// ```json
/// [
///   { "Student name": "Ada", "English": 80, "Math": 70, "GA": 60, "Selective Score": 200 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record: Record = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::from_text(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|v| v.to_string()).collect::<Vec<_>>());
    }

    Ok(records_from_rows(&headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_records_stop_at_blank_row() {
        let headers = strings(&["Student name", "English", "", "Notes"]);
        let rows = vec![
            strings(&["Ada", "80", "ignored", ""]),
            strings(&["Ben", "75", "", "late"]),
            strings(&["", "", "Input English", ""]),
            strings(&["Cy", "60", "", ""]),
        ];
        let ds = records_from_rows(&headers, rows);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names, strings(&["Student name", "English", "Notes"]));
        assert_eq!(ds.records[1].get("English"), Some(&CellValue::Integer(75)));
        assert_eq!(ds.records[0].get("Notes"), Some(&CellValue::Null));
    }

    #[test]
    fn test_output_only_rows_are_not_records() {
        let headers = strings(&["Student name", "English", "Selective Score", "Corr (Python)"]);
        let rows = vec![
            strings(&["Ada", "80", "200", "0.91"]),
            strings(&["Ben", "75", "180", "0.88"]),
            strings(&["", "", "", "0.67"]),
        ];
        let ds = records_from_rows(&headers, rows);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].get("Corr (Python)"), Some(&CellValue::Float(0.88)));
    }

    #[test]
    fn test_plain_header_uses_every_labelled_column() {
        let headers = strings(&["id", "value"]);
        let rows = vec![strings(&["", "3"]), strings(&["", ""]), strings(&["x", "4"])];
        let ds = records_from_rows(&headers, rows);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].get("value"), Some(&CellValue::Integer(3)));
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "English,Math,GA,Selective Score").unwrap();
        writeln!(file, "80,70,60,200").unwrap();
        writeln!(file, "90,85,75,250").unwrap();
        file.flush().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].get("GA"), Some(&CellValue::Integer(75)));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"English": 80, "Selective Score": 200.5}}, {{"English": "90", "Selective Score": null}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("Selective Score"), Some(&CellValue::Float(200.5)));
        assert_eq!(ds.records[1].get("English"), Some(&CellValue::Integer(90)));
        assert_eq!(ds.records[1].get("Selective Score"), Some(&CellValue::Null));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(load_file(file.path()).is_err());
    }
}
