//! CLI entry point for the Sudoku solver.
//!
//! Usage:
//!   sudoku-solver solve <grid.txt> [options]
//!   sudoku-solver solve --stdin [options]
//!   sudoku-solver hint <grid.txt>
//!   sudoku-solver check <grid.txt>
//!
//! Grids are nine rows of nine characters: digits 1-9 for givens, `-` for
//! blanks.
//!
//! Options:
//!   --timeout <seconds>   Maximum search time (default: 15)
//!   --max-nodes <n>       Maximum search nodes to visit (default: 2000000)
//!   --json                Emit a JSON report instead of the solved grid

mod board;
mod candidates;
mod solver;
mod validate;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use board::Sudoku;
use candidates::{candidates_for, next_forced_cell};
use solver::{solve, SolveReport, SolveStatus, SolverConfig};
use validate::is_solved;

#[derive(Parser)]
#[command(name = "sudoku-solver")]
#[command(about = "Backtracking Sudoku solver with bounded search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle with backtracking search
    Solve {
        /// Path to the grid file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Maximum search time in seconds
        #[arg(long, default_value = "15")]
        timeout: u64,

        /// Maximum number of search nodes to visit
        #[arg(long, default_value = "2000000")]
        max_nodes: usize,

        /// Emit a JSON report instead of the solved grid
        #[arg(long)]
        json: bool,
    },

    /// Locate the first empty cell with exactly one legal value
    Hint {
        /// Path to the grid file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },

    /// Check whether a grid is a complete, valid solution
    Check {
        /// Path to the grid file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },
}

/// Output format for a solve report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    status: &'static str,
    solved: bool,
    nodes_visited: usize,
    backtracks: usize,
    max_depth: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            timeout,
            max_nodes,
            json,
        } => {
            let mut sudoku = read_grid(file, stdin);
            let config = SolverConfig {
                timeout: Duration::from_secs(timeout),
                max_nodes,
            };

            let report = solve(&mut sudoku, &config);

            if json {
                let output = format_report(&report, &sudoku);
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
            } else {
                match report.status {
                    SolveStatus::Solved => {
                        println!();
                        print!("{}", sudoku.board());
                        println!();
                    }
                    SolveStatus::Unsolvable => {
                        eprintln!(
                            "unsolvable: search exhausted after {} nodes",
                            report.nodes_visited
                        );
                    }
                    SolveStatus::NodeLimit => {
                        eprintln!(
                            "gave up: node budget exhausted after {} nodes",
                            report.nodes_visited
                        );
                    }
                    SolveStatus::Timeout => {
                        eprintln!("gave up: timed out after {} ms", report.time_elapsed_ms);
                    }
                }
            }

            if report.status == SolveStatus::Solved {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }

        Commands::Hint { file, stdin } => {
            let sudoku = read_grid(file, stdin);
            match next_forced_cell(sudoku.board()) {
                Some(pos) => {
                    let value = candidates_for(sudoku.board(), pos)[0];
                    println!("row {}, col {}: {}", pos.row + 1, pos.col + 1, value);
                }
                None => {
                    eprintln!("no forced cell");
                    process::exit(1);
                }
            }
        }

        Commands::Check { file, stdin } => {
            let sudoku = read_grid(file, stdin);
            if is_solved(sudoku.board()) {
                println!("solved");
            } else {
                println!("not solved");
                process::exit(1);
            }
        }
    }
}

/// Read and parse a grid from a file or stdin
fn read_grid(file: Option<PathBuf>, stdin: bool) -> Sudoku {
    let text = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        process::exit(1);
    };

    match Sudoku::parse(&text) {
        Ok(sudoku) => sudoku,
        Err(e) => {
            eprintln!("Error parsing grid: {}", e);
            process::exit(1);
        }
    }
}

fn format_report(report: &SolveReport, sudoku: &Sudoku) -> SolveOutput {
    let status = match report.status {
        SolveStatus::Solved => "solved",
        SolveStatus::Unsolvable => "unsolvable",
        SolveStatus::NodeLimit => "node_limit",
        SolveStatus::Timeout => "timeout",
    };

    let solution = if report.status == SolveStatus::Solved {
        // Compact 81-character form
        Some(
            sudoku
                .board()
                .to_string()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        )
    } else {
        None
    };

    SolveOutput {
        status,
        solved: report.status == SolveStatus::Solved,
        nodes_visited: report.nodes_visited,
        backtracks: report.backtracks,
        max_depth: report.max_depth,
        time_elapsed_ms: report.time_elapsed_ms,
        solution,
    }
}
