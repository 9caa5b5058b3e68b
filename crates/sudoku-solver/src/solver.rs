//! Bounded backtracking search.
//!
//! The search fills the first empty cell in row-major order, trying its
//! candidates in ascending order and undoing each fill whose subtree fails,
//! until the grid validates as solved or every branch is exhausted. Both a
//! wall-clock and a node budget bound the worst case, which is exponential
//! in the number of empty cells.

use std::time::{Duration, Instant};

use crate::board::Sudoku;
use crate::candidates::candidates_for;
use crate::validate::is_solved;

/// Configuration for the search
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum time to search
    pub timeout: Duration,
    /// Maximum number of search nodes to visit
    pub max_nodes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_nodes: 2_000_000,
        }
    }
}

/// Terminal outcome of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The working grid holds a complete, valid solution
    Solved,
    /// Every branch was exhausted without reaching a solution
    Unsolvable,
    /// The node budget ran out before the search finished
    NodeLimit,
    /// The time budget ran out before the search finished
    Timeout,
}

/// Outcome of a search together with its statistics
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub status: SolveStatus,
    /// Number of search nodes visited
    pub nodes_visited: usize,
    /// Number of fills undone after a failed subtree
    pub backtracks: usize,
    /// Deepest recursion reached
    pub max_depth: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

struct SearchState {
    deadline: Instant,
    max_nodes: usize,
    nodes: usize,
    backtracks: usize,
    max_depth: usize,
}

enum Walk {
    Solved,
    Exhausted,
    NodeLimit,
    Timeout,
}

/// Attempt to complete the puzzle in place.
///
/// On `Solved` the working grid holds the solution; on any other status it
/// is left at the deepest fill state the search reached.
pub fn solve(sudoku: &mut Sudoku, config: &SolverConfig) -> SolveReport {
    let start = Instant::now();
    let mut state = SearchState {
        deadline: start + config.timeout,
        max_nodes: config.max_nodes,
        nodes: 0,
        backtracks: 0,
        max_depth: 0,
    };

    let status = match search(sudoku, 0, &mut state) {
        Walk::Solved => SolveStatus::Solved,
        Walk::Exhausted => SolveStatus::Unsolvable,
        Walk::NodeLimit => SolveStatus::NodeLimit,
        Walk::Timeout => SolveStatus::Timeout,
    };

    SolveReport {
        status,
        nodes_visited: state.nodes,
        backtracks: state.backtracks,
        max_depth: state.max_depth,
        time_elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

fn search(sudoku: &mut Sudoku, depth: usize, state: &mut SearchState) -> Walk {
    state.nodes += 1;
    state.max_depth = state.max_depth.max(depth);
    if state.nodes > state.max_nodes {
        return Walk::NodeLimit;
    }
    if Instant::now() > state.deadline {
        return Walk::Timeout;
    }

    if is_solved(sudoku.board()) {
        return Walk::Solved;
    }

    let pos = match sudoku.board().first_empty() {
        Some(pos) => pos,
        // Full but not solved: an inconsistent fill state with nothing
        // left to try.
        None => return Walk::Exhausted,
    };

    let candidates = candidates_for(sudoku.board(), pos);
    if candidates.is_empty() {
        return Walk::Exhausted;
    }

    for &value in &candidates {
        if sudoku.fill(pos, value).is_err() {
            continue;
        }
        match search(sudoku, depth + 1, state) {
            Walk::Exhausted => {
                sudoku.clear(pos);
                state.backtracks += 1;
            }
            done => return done,
        }
    }
    Walk::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    const EASY: &str = "\
53--7----
6--195---
-98----6-
8---6---3
4--8-3--1
7---2---6
-6----28-
---419--5
----8--79
";

    const EMPTY_GRID: &str = "\
---------
---------
---------
---------
---------
---------
---------
---------
---------
";

    // Cell (0,0) sees 1-8 in its row and 9 in its column; no candidate fits.
    const DEAD_END: &str = "\
-12345678
---------
---------
---------
---------
---------
---------
---------
9--------
";

    #[test]
    fn test_solve_easy_puzzle() {
        let mut sudoku = Sudoku::parse(EASY).unwrap();
        let report = solve(&mut sudoku, &SolverConfig::default());
        assert_eq!(report.status, SolveStatus::Solved);
        assert!(is_solved(sudoku.board()));
        assert!(report.nodes_visited > 0);
    }

    #[test]
    fn test_solve_preserves_givens() {
        let mut sudoku = Sudoku::parse(EASY).unwrap();
        solve(&mut sudoku, &SolverConfig::default());
        for row in 0..9 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                if sudoku.is_given(pos) {
                    assert_eq!(sudoku.board().get(pos), sudoku.givens().get(pos));
                }
            }
        }
    }

    #[test]
    fn test_solve_empty_grid() {
        let mut sudoku = Sudoku::parse(EMPTY_GRID).unwrap();
        let report = solve(&mut sudoku, &SolverConfig::default());
        assert_eq!(report.status, SolveStatus::Solved);
        assert!(is_solved(sudoku.board()));
    }

    #[test]
    fn test_dead_end_is_unsolvable() {
        let mut sudoku = Sudoku::parse(DEAD_END).unwrap();
        let report = solve(&mut sudoku, &SolverConfig::default());
        assert_eq!(report.status, SolveStatus::Unsolvable);
        // The first empty cell has zero candidates, so the search stops at
        // the root
        assert_eq!(report.nodes_visited, 1);
    }

    #[test]
    fn test_node_limit() {
        let mut sudoku = Sudoku::parse(EASY).unwrap();
        let config = SolverConfig {
            timeout: Duration::from_secs(15),
            max_nodes: 1,
        };
        let report = solve(&mut sudoku, &config);
        assert_eq!(report.status, SolveStatus::NodeLimit);
    }

    #[test]
    fn test_solved_input_is_immediate() {
        let mut sudoku = Sudoku::parse(EASY).unwrap();
        solve(&mut sudoku, &SolverConfig::default());
        let solved_text = sudoku.board().to_string();

        let mut solved = Sudoku::parse(&solved_text).unwrap();
        let report = solve(&mut solved, &SolverConfig::default());
        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.nodes_visited, 1);
        assert_eq!(report.backtracks, 0);
    }
}
