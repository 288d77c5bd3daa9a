use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use super::{CellStore, Position, SheetError};
use crate::data::loader::records_from_rows;
use crate::data::{CellValue, Dataset};

/// A worksheet held as a grid of raw cell text, backed by a CSV file.
///
/// Writes only touch the in-memory grid; nothing reaches disk until
/// [`CsvSheet::save`].
#[derive(Debug, Clone, Default)]
pub struct CsvSheet {
    rows: Vec<Vec<String>>,
    path: Option<PathBuf>,
}

impl CsvSheet {
    /// Load every cell of a CSV file. No row is treated as a header here.
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("opening sheet {}", path.display()))?;

        let mut rows = Vec::new();
        for (row_no, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("sheet row {}", row_no + 1))?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }
        debug!("opened sheet {} ({} rows)", path.display(), rows.len());

        Ok(CsvSheet {
            rows,
            path: Some(path.to_path_buf()),
        })
    }

    /// An unsaved sheet built from raw rows.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        CsvSheet { rows, path: None }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Write the grid back to the file it was opened from.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .context("sheet has no backing file to save to")?;
        self.save_as(path)
    }

    /// Write the grid to `path`, padding every row to the same width.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating sheet {}", path.display()))?;
        for row in &self.rows {
            let padded = row
                .iter()
                .map(String::as_str)
                .chain(std::iter::repeat("").take(width - row.len()));
            writer.write_record(padded).context("writing sheet row")?;
        }
        writer.flush().context("flushing sheet")?;
        info!("saved sheet {} ({} rows)", path.display(), self.rows.len());
        Ok(())
    }

    fn cell_text(&self, pos: Position) -> Option<&str> {
        if pos.row == 0 || pos.col == 0 {
            return None;
        }
        self.rows
            .get(pos.row - 1)
            .and_then(|r| r.get(pos.col - 1))
            .map(String::as_str)
    }
}

impl CellStore for CsvSheet {
    fn read_records(&self) -> Result<Dataset> {
        let Some((header, body)) = self.rows.split_first() else {
            return Ok(Dataset::default());
        };
        Ok(records_from_rows(header, body.iter().cloned()))
    }

    fn locate(&self, label: &str) -> Result<Position> {
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.iter().position(|cell| cell.trim() == label) {
                return Ok(Position::new(r + 1, c + 1));
            }
        }
        Err(SheetError::LabelNotFound(label.to_string()).into())
    }

    fn read_cell(&self, pos: Position) -> Result<CellValue> {
        // Cells past the used range read as blank, like any spreadsheet.
        Ok(self
            .cell_text(pos)
            .map(CellValue::from_text)
            .unwrap_or(CellValue::Null))
    }

    fn write_cell(&mut self, pos: Position, value: f64) -> Result<()> {
        if pos.row == 0 || pos.col == 0 {
            return Err(SheetError::OutOfRange(format!("R{}C{}", pos.row, pos.col)).into());
        }
        if self.rows.len() < pos.row {
            self.rows.resize_with(pos.row, Vec::new);
        }
        let row = &mut self.rows[pos.row - 1];
        if row.len() < pos.col {
            row.resize(pos.col, String::new());
        }
        row[pos.col - 1] = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> CsvSheet {
        CsvSheet::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_locate_row_major() {
        let sheet = grid(&[&["a", "b"], &["WAM", "c"], &["x", "WAM"]]);
        assert_eq!(sheet.locate("WAM").unwrap(), Position::new(2, 1));
        assert!(sheet.locate("missing").is_err());
    }

    #[test]
    fn test_write_grows_grid() {
        let mut sheet = grid(&[&["a"]]);
        sheet.write_cell(Position::new(3, 4), 1.25).unwrap();
        assert_eq!(sheet.rows().len(), 3);
        assert_eq!(sheet.read_cell(Position::new(3, 4)).unwrap(), CellValue::Float(1.25));
        assert_eq!(sheet.read_cell(Position::new(9, 9)).unwrap(), CellValue::Null);
        assert!(sheet.write_cell(Position::new(0, 1), 1.0).is_err());
    }

    #[test]
    fn test_read_records_uses_header_row() {
        let sheet = grid(&[
            &["Student name", "English", "Corr (Python)"],
            &["Ada", "80", ""],
            &["Ben", "70", ""],
            &["", "", ""],
            &["Input English", "75", ""],
        ]);
        let ds = sheet.read_records().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("English"), Some(&CellValue::Integer(80)));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");

        let mut sheet = grid(&[&["Label", "Value", "Extra"], &["Output Mark"]]);
        sheet.write_cell(Position::new(2, 2), 212.5).unwrap();
        sheet.save_as(&path).unwrap();

        let reopened = CsvSheet::open(&path).unwrap();
        assert_eq!(reopened.rows()[1], vec!["Output Mark", "212.5", ""]);
        assert_eq!(reopened.locate("Output Mark").unwrap(), Position::new(2, 1));
    }

    #[test]
    fn test_save_without_path_fails() {
        assert!(grid(&[&["a"]]).save().is_err());
    }
}
