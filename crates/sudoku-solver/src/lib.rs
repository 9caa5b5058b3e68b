//! Backtracking Sudoku solver.
//!
//! This crate provides a 9x9 Sudoku engine: board state with given-cell
//! protection, constraint-checked fills and erases, per-cell candidate
//! enumeration, solution validation, and a bounded backtracking search.

pub mod board;
pub mod candidates;
pub mod solver;
pub mod validate;

// Re-export main types
pub use board::{Board, MoveError, ParseError, Position, Sudoku, BLANK, DIM};
pub use candidates::{candidates_for, next_forced_cell, Candidates};
pub use solver::{solve, SolveReport, SolveStatus, SolverConfig};
pub use validate::{all_distinct, is_solved};
