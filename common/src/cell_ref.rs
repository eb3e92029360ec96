//! Cell address resolution
//!
//! Converts A1-style addresses ("C5", "aa10") into zero-based
//! `(row, column)` pairs and back.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A zero-based cell position within a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Same column, `delta` rows further down
    pub const fn shifted_down(self, delta: u32) -> Self {
        Self {
            row: self.row + delta,
            col: self.col,
        }
    }

    /// Absolute position as used by `calamine::Range::get_value`
    pub const fn position(self) -> (u32, u32) {
        (self.row, self.col)
    }
}

/// Resolves an A1-style address to a zero-based `(row, column)` pair.
///
/// Returns `None` for empty input, anything that is not letters followed by
/// digits, row `0`, or addresses too large to index.
pub fn cell_to_index(cell: &str) -> Option<(u32, u32)> {
    lazy_static::lazy_static! {
        static ref CELL_RE: Regex = Regex::new(r"^([A-Za-z]+)([0-9]+)$").unwrap();
    }

    let caps = CELL_RE.captures(cell.trim())?;
    let letters = caps.get(1)?.as_str();
    let digits = caps.get(2)?.as_str();

    let col_number = letters.bytes().try_fold(0u32, |acc, b| {
        let digit = u32::from(b.to_ascii_uppercase() - b'A' + 1);
        acc.checked_mul(26)?.checked_add(digit)
    })?;
    let row_number: u32 = digits.parse().ok()?;

    Some((row_number.checked_sub(1)?, col_number - 1))
}

/// Encodes a zero-based column index as spreadsheet letters (0 → "A", 26 → "AA")
pub fn column_letters(col: u32) -> String {
    let mut n = u64::from(col) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        cell_to_index(s)
            .map(|(row, col)| CellRef::new(row, col))
            .ok_or_else(|| Error::InvalidCellRef(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), u64::from(self.row) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_addresses() {
        assert_eq!(cell_to_index("A1"), Some((0, 0)));
        assert_eq!(cell_to_index("C5"), Some((4, 2)));
        assert_eq!(cell_to_index("AA10"), Some((9, 26)));
        assert_eq!(cell_to_index("Z1"), Some((0, 25)));
        assert_eq!(cell_to_index("AZ3"), Some((2, 51)));
    }

    #[test]
    fn test_lowercase_letters() {
        assert_eq!(cell_to_index("c5"), Some((4, 2)));
        assert_eq!(cell_to_index("aA10"), Some((9, 26)));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(cell_to_index(" A25 "), Some((24, 0)));
    }

    #[test]
    fn test_unresolvable_addresses() {
        assert_eq!(cell_to_index(""), None);
        assert_eq!(cell_to_index("5A"), None);
        assert_eq!(cell_to_index("A"), None);
        assert_eq!(cell_to_index("12"), None);
        assert_eq!(cell_to_index("A1B"), None);
        assert_eq!(cell_to_index("$A$1"), None);
        assert_eq!(cell_to_index("A0"), None);
        assert_eq!(cell_to_index("A99999999999"), None);
        assert_eq!(cell_to_index("ZZZZZZZZZ1"), None);
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_resolve_then_encode_recovers_address() {
        for address in ["A1", "c5", "aa10", "H39", "iv65536", "XFD1048576", "zz7"] {
            let cell: CellRef = address.parse().unwrap();
            assert_eq!(cell.to_string(), address.to_uppercase());
        }

        for col in (0..2000).step_by(7) {
            for row in [0u32, 1, 24, 999, 65535] {
                let cell = CellRef::new(row, col);
                let reparsed: CellRef = cell.to_string().parse().unwrap();
                assert_eq!(reparsed, cell);
            }
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "5A".parse::<CellRef>().unwrap_err();
        assert_eq!(err, Error::InvalidCellRef("5A".to_string()));
    }

    #[test]
    fn test_shifted_down() {
        let cell: CellRef = "C41".parse().unwrap();
        assert_eq!(cell.shifted_down(2).to_string(), "C43");
        assert_eq!(cell.shifted_down(0), cell);
    }
}
