use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use super::{COLS, ROWS, SIZE, piece::Piece};

// Full row (all cells occupied)
const FULL_ROW_MASK: u8 = (1 << COLS) - 1;

/// Single row of the board.
///
/// Bit `c` (LSB first) is set when column `c` is occupied. Bits above
/// `COLS` are always zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRow {
    bits: u8,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every cell of the row is occupied.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    /// Checks if the cell at the given column is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, col: usize) -> bool {
        debug_assert!(col < COLS);
        (self.bits & (1 << col)) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, col: usize) {
        debug_assert!(col < COLS);
        self.bits |= 1 << col;
    }

    /// Number of occupied cells in the row.
    #[inline]
    #[must_use]
    pub fn occupied_count(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates over the cells of the row from column 0, returning their occupied status.
    pub fn iter_cells(self) -> impl Iterator<Item = bool> {
        (0..COLS).map(move |col| self.is_cell_occupied(col))
    }
}

/// Settled cells of the tritris board.
///
/// The board is `ROWS` x `COLS` cells. Row 0 is the bottom row, so pieces fall
/// toward lower row indices. Flattened cell order is `row * COLS + col`, the same
/// order used by feature vectors.
///
/// Any coordinate outside the board reads as occupied, which makes walls and the
/// floor collide like settled cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BitRow; ROWS],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "0,c,8,..." (comma-separated hex rows, bottom row first)
        let mut hex_string = String::with_capacity(ROWS * 2);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                hex_string.push(',');
            }
            write!(&mut hex_string, "{:x}", row.bits)
                .map_err(<S::Error as serde::ser::Error>::custom)?;
        }
        serializer.serialize_str(&hex_string)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != ROWS {
            return Err(serde::de::Error::custom(format!(
                "expected {ROWS} comma-separated hex values, got {}",
                parts.len()
            )));
        }

        let mut rows = [BitRow::EMPTY; ROWS];
        for (i, hex_str) in parts.iter().enumerate() {
            let bits = u8::from_str_radix(hex_str, 16).map_err(|e| {
                serde::de::Error::custom(format!("invalid hex at row {i}: {hex_str} ({e})"))
            })?;
            if bits & !FULL_ROW_MASK != 0 {
                return Err(serde::de::Error::custom(format!(
                    "row {i} has bits outside the {COLS} board columns: {hex_str}"
                )));
            }
            rows[i] = BitRow { bits };
        }

        Ok(Board { rows })
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;
    pub const SIZE: usize = SIZE;

    pub const EMPTY: Self = Self {
        rows: [BitRow::EMPTY; ROWS],
    };

    /// Builds a board from a flat slice of cells in `row * COLS + col` order.
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not contain exactly `ROWS * COLS` values.
    #[must_use]
    pub fn from_cells(cells: &[bool]) -> Self {
        assert_eq!(
            cells.len(),
            SIZE,
            "board must have exactly {SIZE} cells, got {}",
            cells.len()
        );
        let mut board = Self::EMPTY;
        for (i, _) in cells.iter().enumerate().filter(|(_, occupied)| **occupied) {
            board.rows[i / COLS].occupy_cell(i % COLS);
        }
        board
    }

    /// Creates a `Board` from ASCII art representation for testing.
    ///
    /// '#' represents an occupied cell, '.' represents an empty cell.
    /// Rows are specified from top to bottom, so the last line is row 0.
    ///
    /// # Panics
    ///
    /// Panics unless the art has exactly `ROWS` lines of `COLS` cells.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert_eq!(
            lines.len(),
            ROWS,
            "Board must have exactly {ROWS} rows, got {}",
            lines.len()
        );

        let mut board = Self::EMPTY;
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                COLS,
                "Each row must have exactly {COLS} cells, got {} at line {i}",
                chars.len(),
            );
            let row = ROWS - 1 - i;
            for (col, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[row].occupy_cell(col);
                }
            }
        }
        board
    }

    /// Returns a row by index (0 is the bottom row).
    #[must_use]
    pub fn row(&self, row: usize) -> BitRow {
        self.rows[row]
    }

    /// Returns an iterator over the rows from bottom to top.
    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    /// Returns an iterator over all cells in `row * COLS + col` order.
    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows().flat_map(BitRow::iter_cells)
    }

    /// Checks if a cell is occupied. Cells outside the board are reported as occupied.
    #[must_use]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        match cell_index(row, col) {
            Some((row, col)) => self.rows[row].is_cell_occupied(col),
            None => true,
        }
    }

    /// Total number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows().map(BitRow::occupied_count).sum()
    }

    /// Checks if any row is completely occupied.
    #[must_use]
    pub fn has_filled_row(&self) -> bool {
        self.rows().any(BitRow::is_filled)
    }

    /// Checks if any cell of the piece is outside the board or overlaps an occupied cell.
    #[must_use]
    pub fn is_colliding(&self, piece: Piece) -> bool {
        piece
            .occupied_positions()
            .into_iter()
            .any(|(row, col)| self.is_occupied(row, col))
    }

    /// Locks a piece onto the board by setting its occupied cells.
    ///
    /// # Panics
    ///
    /// Panics if a cell of the piece lies outside the board.
    pub fn fill_piece(&mut self, piece: Piece) {
        for (row, col) in piece.occupied_positions() {
            let (row, col) =
                cell_index(row, col).expect("locked piece must lie inside the board");
            self.rows[row].occupy_cell(col);
        }
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Rows are scanned from the bottom. When a row is cleared, every row above
    /// it moves down by one, the top row becomes empty, and the same row index
    /// is checked again.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut row = 0;
        while row < ROWS {
            if self.rows[row].is_filled() {
                self.rows.copy_within(row + 1.., row);
                self.rows[ROWS - 1] = BitRow::EMPTY;
                count += 1;
            } else {
                row += 1;
            }
        }
        count
    }

    /// Renders the board top row first, drawing `piece` (if any) over the settled cells.
    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, piece: Option<Piece>) -> fmt::Result {
        let piece_cells = piece.map(|p| p.occupied_positions());
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                if col > 0 {
                    f.write_char(' ')?;
                }
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let pos = (row as i8, col as i8);
                let ch = if piece_cells.is_some_and(|cells| cells.contains(&pos)) {
                    'x'
                } else if self.rows[row].is_cell_occupied(col) {
                    '#'
                } else {
                    '.'
                };
                f.write_char(ch)?;
            }
            if row > 0 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, None)
    }
}

fn cell_index(row: i8, col: i8) -> Option<(usize, usize)> {
    let row = usize::try_from(row).ok().filter(|&r| r < ROWS)?;
    let col = usize::try_from(col).ok().filter(|&c| c < COLS)?;
    Some((row, col))
}
