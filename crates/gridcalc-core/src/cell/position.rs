//! Cell position and sheet size types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell position (e.g., "A1")
///
/// Rows and columns are 0-based internally. In A1 text the column is written
/// as base-26 letters (A-Z, AA, ...) and the row as a 1-based number.
///
/// Positions order row-major: first by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl Position {
    /// The distinguished invalid position
    pub const NONE: Position = Position {
        row: u32::MAX,
        col: u32::MAX,
    };

    /// Create a new position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Check that the position lies within the sheet limits
    pub fn is_valid(&self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse a position from A1-style notation
    ///
    /// Column letters must be uppercase and the row number must not carry a
    /// sign or leading whitespace.
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::Position;
    ///
    /// let pos = Position::from_a1("A1").unwrap();
    /// assert_eq!(pos, Position::new(0, 0));
    ///
    /// let pos = Position::from_a1("AB12").unwrap();
    /// assert_eq!(pos, Position::new(11, 27));
    ///
    /// assert!(Position::from_a1("a1").is_err());
    /// assert!(Position::from_a1("A0").is_err());
    /// ```
    pub fn from_a1(s: &str) -> Result<Self> {
        let letters_end = s
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(s.len());

        if letters_end == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let (letters, digits) = s.split_at(letters_end);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(letters)?;

        // Anything longer than the limit's digit count is out of range anyway
        let row: u64 = if digits.len() > 10 {
            u64::MAX
        } else {
            digits
                .parse()
                .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?
        };

        if row == 0 || row > MAX_ROWS as u64 {
            return Err(Error::InvalidAddress(format!(
                "row number out of range in '{}'",
                s
            )));
        }

        Ok(Self::new((row - 1) as u32, col))
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c as u64 - 'A' as u64 + 1);
            if col > MAX_COLS as u64 {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' out of range",
                    letters
                )));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Format as A1-style string
    ///
    /// The invalid position formats as an empty string.
    pub fn to_a1_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }

        let mut result = Self::column_to_letters(self.col);
        result.push_str(&(self.row + 1).to_string());
        result
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_a1(s)
    }
}

/// Printable bounds of a sheet, as row and column counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Check whether the bounds contain no cells
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Smallest size that also covers `pos`
    pub fn covering(self, pos: Position) -> Self {
        Self {
            rows: self.rows.max(pos.row + 1),
            cols: self.cols.max(pos.col + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(Position::column_to_letters(0), "A");
        assert_eq!(Position::column_to_letters(25), "Z");
        assert_eq!(Position::column_to_letters(26), "AA");
        assert_eq!(Position::column_to_letters(701), "ZZ");
        assert_eq!(Position::column_to_letters(702), "AAA");
        assert_eq!(Position::column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(Position::letters_to_column("A").unwrap(), 0);
        assert_eq!(Position::letters_to_column("Z").unwrap(), 25);
        assert_eq!(Position::letters_to_column("AA").unwrap(), 26);
        assert_eq!(Position::letters_to_column("XFD").unwrap(), 16383);

        assert!(Position::letters_to_column("XFE").is_err());
        assert!(Position::letters_to_column("ZZZZZZZZZZZZZZ").is_err());
        assert!(Position::letters_to_column("a").is_err());
    }

    #[test]
    fn test_position_parse() {
        assert_eq!(Position::from_a1("A1").unwrap(), Position::new(0, 0));
        assert_eq!(Position::from_a1("B2").unwrap(), Position::new(1, 1));
        assert_eq!(Position::from_a1("Z9").unwrap(), Position::new(8, 25));
        assert_eq!(
            Position::from_a1("XFD16384").unwrap(),
            Position::new(16383, 16383)
        );
    }

    #[test]
    fn test_position_parse_errors() {
        assert!(Position::from_a1("").is_err());
        assert!(Position::from_a1("A").is_err());
        assert!(Position::from_a1("1").is_err());
        assert!(Position::from_a1("A0").is_err());
        assert!(Position::from_a1("A16385").is_err());
        assert!(Position::from_a1("A99999999999999999999").is_err());
        assert!(Position::from_a1("XFE1").is_err());
        assert!(Position::from_a1("$A$1").is_err());
        assert!(Position::from_a1("A1B").is_err());
        assert!(Position::from_a1(" A1").is_err());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(0, 0).to_string(), "A1");
        assert_eq!(Position::new(99, 2).to_string(), "C100");
        assert_eq!(Position::NONE.to_string(), "");
    }

    #[test]
    fn test_position_validity() {
        assert!(Position::new(0, 0).is_valid());
        assert!(Position::new(16383, 16383).is_valid());
        assert!(!Position::new(16384, 0).is_valid());
        assert!(!Position::new(0, 16384).is_valid());
        assert!(!Position::NONE.is_valid());
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(1, 0) < Position::new(1, 1));
    }

    #[test]
    fn test_size_covering() {
        let size = Size::default();
        assert!(size.is_empty());

        let size = size.covering(Position::new(2, 0));
        assert_eq!(size, Size::new(3, 1));

        let size = size.covering(Position::new(0, 4));
        assert_eq!(size, Size::new(3, 5));
    }
}
