//! Utility functions for reading grids from text.

use crate::engine::{Grid, TileId, GRID_CELLS, GRID_SIDE};
use thiserror::Error;

/// Errors produced when parsing a text grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("expected 3 rows, found {found}")]
    WrongRowCount { found: usize },
    #[error("row {row} has {found} cells (expected 3)")]
    WrongRowLength { row: usize, found: usize },
    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedCharacter { ch: char, row: usize, col: usize },
    #[error("cells do not form a permutation of tiles 1-8 plus one blank")]
    NotAPermutation,
}

/// Parses an array of string slices into a `Grid`.
///
/// Each string slice represents one row, top to bottom. Valid characters
/// are `'1'..='8'` for tiles and `'.'` for the blank; the nine cells must
/// form a permutation (every tile exactly once, exactly one blank).
///
/// # Arguments
/// * `rows`: A slice of string slices (`&[&str]`), one per row, starting
///   from the top row.
///
/// # Returns
/// * `Ok(Grid)` if parsing is successful.
/// * `Err(GridParseError)` when the shape is wrong, a character is not
///   recognized, or the cells do not form a permutation.
///
/// # Examples
/// ```
/// use tileshift::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["123", "456", "78."]).unwrap();
/// assert!(grid.is_solved());
///
/// assert!(grid_from_str_array(&["123", "4X6", "78."]).is_err());
/// assert!(grid_from_str_array(&["113", "456", "78."]).is_err());
/// ```
pub fn grid_from_str_array(rows: &[&str]) -> Result<Grid, GridParseError> {
    if rows.len() != GRID_SIDE {
        return Err(GridParseError::WrongRowCount { found: rows.len() });
    }

    let mut cells = [TileId::BLANK; GRID_CELLS];
    for (row, row_str) in rows.iter().enumerate() {
        let len = row_str.chars().count();
        if len != GRID_SIDE {
            return Err(GridParseError::WrongRowLength { row, found: len });
        }
        for (col, ch) in row_str.chars().enumerate() {
            cells[row * GRID_SIDE + col] = TileId::from_char(ch)
                .ok_or(GridParseError::UnrecognizedCharacter { ch, row, col })?;
        }
    }

    Grid::from_cells(cells).ok_or(GridParseError::NotAPermutation)
}
