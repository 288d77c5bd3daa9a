//! Spreadsheet boundary: where records come from and where results go.
//!
//! ```text
//!   ┌───────────┐  read_records / locate / read_cell / write_cell
//!   │ CellStore │◄──────────────────────────────────────────────── job
//!   └───────────┘
//!        ▲
//!        │ impl
//!   ┌───────────┐
//!   │ CsvSheet  │  in-memory grid, saved back to its CSV file
//!   └───────────┘
//! ```
//!
//! The statistics code never sees sheet layout. Everything positional goes
//! through an anchor label and a fixed offset from it.

pub mod address;
pub mod grid;

use std::fmt;

use anyhow::Result;
use log::debug;
use thiserror::Error;

use crate::data::{CellValue, Dataset};

pub use address::{column_label, parse_a1};
pub use grid::CsvSheet;

/// Sheet-level failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("No cell labelled '{0}' in the sheet")]
    LabelNotFound(String),

    #[error("Invalid cell address: '{0}'")]
    InvalidAddress(String),

    #[error("Cell {address} is not numeric: '{value}'")]
    NotNumeric { address: String, value: String },

    #[error("Cell {0} lies outside the sheet")]
    OutOfRange(String),
}

/// A 1-based (row, column) cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The position `rows` below and `cols` right of this one.
    pub fn offset(self, rows: usize, cols: usize) -> Self {
        Position {
            row: self.row + rows,
            col: self.col + cols,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.col), self.row)
    }
}

/// A tabular store the job reads records from and writes results into.
///
/// No transactional guarantee: a store may apply each write immediately, so a
/// run that fails halfway can leave earlier writes behind.
pub trait CellStore {
    /// All student rows; row 1 is the header.
    fn read_records(&self) -> Result<Dataset>;

    /// Position of the first cell (row-major) whose text equals `label`.
    fn locate(&self, label: &str) -> Result<Position>;

    fn read_cell(&self, pos: Position) -> Result<CellValue>;

    fn write_cell(&mut self, pos: Position, value: f64) -> Result<()>;
}

/// Read the number `rows` below and `cols` right of the `label` anchor.
pub fn read_named_cell<S: CellStore + ?Sized>(
    store: &S,
    label: &str,
    rows: usize,
    cols: usize,
) -> Result<f64> {
    let pos = store.locate(label)?.offset(rows, cols);
    read_number(store, pos)
}

/// Write `value` `rows` below and `cols` right of the `label` anchor.
pub fn write_named_cell<S: CellStore + ?Sized>(
    store: &mut S,
    label: &str,
    rows: usize,
    cols: usize,
    value: f64,
) -> Result<Position> {
    let pos = store.locate(label)?.offset(rows, cols);
    debug!("{label} → {pos} = {value}");
    store.write_cell(pos, value)?;
    Ok(pos)
}

/// Write `values` down the anchor's column, starting `first_row` rows below it.
pub fn write_named_column<S: CellStore + ?Sized>(
    store: &mut S,
    label: &str,
    first_row: usize,
    values: &[f64],
) -> Result<Position> {
    let anchor = store.locate(label)?;
    for (i, &value) in values.iter().enumerate() {
        let pos = anchor.offset(first_row + i, 0);
        debug!("{label} → {pos} = {value}");
        store.write_cell(pos, value)?;
    }
    Ok(anchor)
}

/// Read a numeric cell at an absolute position.
pub fn read_number<S: CellStore + ?Sized>(store: &S, pos: Position) -> Result<f64> {
    let value = store.read_cell(pos)?;
    value.as_f64().ok_or_else(|| {
        SheetError::NotNumeric {
            address: pos.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}
