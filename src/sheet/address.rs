//! A1-style cell addresses (`F2`, `AA10`).

use super::{Position, SheetError};

/// Parse an A1 address into a 1-based [`Position`]. Letters are case-insensitive.
pub fn parse_a1(address: &str) -> Result<Position, SheetError> {
    let trimmed = address.trim();
    let invalid = || SheetError::InvalidAddress(address.to_string());

    let split = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;
    let (letters, digits) = trimmed.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut col: usize = 0;
    for b in letters.bytes() {
        let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(invalid)?;
    }
    let row: usize = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok(Position { row, col })
}

/// Column letters for a 1-based column index (`1 → A`, `27 → AA`).
pub fn column_label(col: usize) -> String {
    let mut n = col;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}
