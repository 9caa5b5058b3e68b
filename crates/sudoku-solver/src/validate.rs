//! Whole-grid validation.
//!
//! A grid counts as solved only when every cell is filled and all 27 units
//! (rows, columns, boxes) hold pairwise distinct values.

use crate::board::{Board, DIM};

/// True when all nine values of a unit are pairwise distinct. Sorts a copy
/// and scans for adjacent equal pairs.
pub fn all_distinct(mut values: [u8; DIM]) -> bool {
    values.sort_unstable();
    values.windows(2).all(|pair| pair[0] != pair[1])
}

/// True when the grid is a complete, valid solution: no empty cells, and
/// every row, column, and box is internally distinct.
pub fn is_solved(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }
    for index in 0..DIM {
        if !all_distinct(board.row(index))
            || !all_distinct(board.col(index))
            || !all_distinct(board.box_values(index))
        {
            return false;
        }
    }
    true
}
