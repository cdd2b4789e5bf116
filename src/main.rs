//! # dlx-solver
//!
//! `dlx-solver` is a command-line exact cover solver built on Knuth's
//! dancing links technique (DLX, Algorithm X). It can enumerate the exact
//! covers of an instance given in a DIMACS-like text format, either from a
//! file or as inline text, and it includes a Sudoku solver that reduces
//! puzzles to exact cover.
//!
//! ## Usage
//!
//! ### General Syntax
//!
//! ```sh
//! dlx-solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     it's treated as a path to an instance file to be solved.
//!
//!     ```sh
//!     dlx-solver <path_to_instance_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve an exact cover instance file.
//!     ```sh
//!     dlx-solver file --path <path_to_instance_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve an instance provided as plain text.
//!     ```sh
//!     dlx-solver text --input "<instance_string>" [OPTIONS]
//!     # Example: dlx-solver text --input "p cover 2\n0 1"
//!     ```
//!
//! 3.  **`sudoku`**: Solve a Sudoku puzzle.
//!     ```sh
//!     dlx-solver sudoku --path <path_to_sudoku_file> [OPTIONS]
//!     ```
//!
//! ### Common Options (available for all subcommands and global file path)
//!
//! -   `-d, --debug`: Dump the active column listing before searching
//!     (default: `false`).
//! -   `--stats`: Enable printing of statistics (default: `true`).
//! -   `-p, --print-solutions`: Print every cover found (default: `false`).
//! -   `-m, --max-solutions <N>`: Stop after `N` covers.
//!
//! This file (`main.rs`) contains the main entry point, CLI parsing logic,
//! and orchestrates the solving process based on user input.
//! It uses the `dlx` module for the engine and `sudoku` for the puzzle
//! front-end.

use crate::dlx::matrix::Matrix;
use crate::dlx::parse::{parse_cover, parse_file};
use crate::dlx::search::{Cover, Dlx};
use clap::{Args, Parser, Subcommand};
use std::io::Cursor;
use std::ops::ControlFlow;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

mod dlx;
mod sudoku;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the exact cover solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dlx-solver",
    version,
    about = "An exact cover solver using dancing links"
)]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to an instance file to solve.
    #[arg(global = true)]
    path: Option<String>,

    /// Specifies the subcommand to execute (e.g., `file`, `text`, `sudoku`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve an exact cover instance file.
    File {
        /// Path to the instance file (`p cover` format).
        #[arg(long)]
        path: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve an exact cover instance provided as plain text.
    Text {
        /// Instance input as a string (e.g., "p cover 2\n0 1\n1").
        /// Each line after the problem line is one option, listing the
        /// column indices it covers.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku puzzle.
    /// The puzzle is encoded as an exact cover matrix, which is then solved.
    Sudoku {
        /// Path to the Sudoku file. The format of this file is defined by the
        /// `sudoku::solver::parse_sudoku_file` function.
        #[arg(long)]
        path: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default)]
struct CommonOptions {
    /// Enable debug output: dump the active column listing before searching.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Enable printing of every exact cover found, as row key sequences.
    #[arg(short, long, default_value_t = false)]
    print_solutions: bool,

    /// Stop the search after this many covers have been found.
    #[arg(short, long)]
    max_solutions: Option<usize>,
}

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command handler,
/// and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a subcommand.
    // This defaults to solving an instance file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let time = std::time::Instant::now();
            let matrix =
                parse_file(&path).unwrap_or_else(|e| panic!("Failed to parse file {path}: {e}"));
            let elapsed = time.elapsed();

            solve_and_report(matrix, &cli.common, Some(&path), elapsed);
            return;
        }
    }

    // Match on the specified subcommand.
    match cli.command {
        Some(Commands::File { path, common }) => {
            let time = std::time::Instant::now();
            let matrix =
                parse_file(&path).unwrap_or_else(|e| panic!("Failed to parse file {path}: {e}"));
            let elapsed = time.elapsed();

            solve_and_report(matrix, &common, Some(&path), elapsed);
        }

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let matrix = parse_cover(Cursor::new(input.replace("\\n", "\n")));
            let elapsed = time.elapsed();

            solve_and_report(matrix, &common, None, elapsed);
        }

        Some(Commands::Sudoku { path, common }) => {
            let time = std::time::Instant::now();
            match sudoku::solver::parse_sudoku_file(&path) {
                Ok(sudoku) => {
                    println!("Parsed Sudoku:\n{}", sudoku.board());

                    let matrix = sudoku
                        .to_matrix()
                        .unwrap_or_else(|e| panic!("Failed to encode Sudoku: {e}"));
                    let parse_time = time.elapsed();

                    let covers = solve_and_report(matrix, &common, Some(&path), parse_time);
                    if covers.is_empty() {
                        println!("No solution found");
                    }
                    for cover in &covers {
                        println!("Solution:\n{}", sudoku.decode(cover));
                    }
                }
                Err(e) => {
                    eprintln!("Error parsing Sudoku file: {e}");
                }
            }
        }

        None => {
            // This case is reached if no subcommand was provided and
            // `cli.path` was also None; a global path would have been
            // handled by the first `if` block.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

/// Solves an instance and reports results including stats.
///
/// This function is a convenience wrapper around `enumerate` and
/// `print_stats`. It returns the covers found so callers can decode them.
///
/// # Arguments
/// * `matrix` - The instance, typically parsed from a file or text.
/// * `common` - `CommonOptions` providing the reporting configuration.
/// * `label` - An optional label for the problem (e.g., file path).
/// * `parse_time` - The time taken to parse the input.
fn solve_and_report(
    matrix: Matrix,
    common: &CommonOptions,
    label: Option<&str>,
    parse_time: Duration,
) -> Vec<Cover> {
    if let Some(name) = label {
        println!("Solving: {name:?}");
    }

    if common.debug {
        println!("Columns: {}", matrix.column_count());
        println!("Incidences: {}", matrix.incidence_count());
        for info in matrix.columns() {
            println!("{info}");
        }
    }

    let column_count = matrix.column_count();
    let incidence_count = matrix.incidence_count();

    // Advance epoch for jemalloc stats, helps isolate memory usage for the
    // solving phase.
    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let covers = enumerate(matrix, common.max_solutions);
    let elapsed = time.elapsed();

    // Advance epoch again to ensure memory stats capture everything up to
    // this point.
    epoch::advance().unwrap();

    // Read memory statistics using tikv_jemalloc_ctl.
    // These functions return byte counts.
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    // Convert bytes to MiB for reporting.
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            column_count,
            incidence_count,
            &covers,
            allocated_mib,
            resident_mib,
        );
    }

    if common.print_solutions {
        for cover in &covers {
            println!("Cover: {cover:?}");
        }
    }

    covers
}

/// Runs the search on a matrix, honoring an optional solution limit.
///
/// # Arguments
/// * `matrix` - The instance to solve.
/// * `max_solutions` - If `Some(n)`, the search stops after `n` covers.
///
/// # Returns
/// The covers found, in discovery order.
fn enumerate(matrix: Matrix, max_solutions: Option<usize>) -> Vec<Cover> {
    let mut dlx = Dlx::new(matrix);
    match max_solutions {
        None => dlx.covers(),
        Some(limit) => {
            let mut found = Vec::new();
            dlx.visit_covers(|rows| {
                found.push(rows.to_vec());
                if found.len() >= limit {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            found
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the search.
/// * `column_count` - Number of columns in the instance.
/// * `incidence_count` - Number of incidences in the instance.
/// * `covers` - The covers found by the search.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    column_count: usize,
    incidence_count: usize,
    covers: &[Cover],
    allocated: f64,
    resident: f64,
) {
    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Columns", column_count);
    stat_line("Incidences", incidence_count);

    println!("========================[ Search Statistics ]========================");
    stat_line("Covers found", covers.len());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");

    if covers.is_empty() {
        println!("\nNO EXACT COVER");
    } else {
        println!("\n{} EXACT COVER(S)", covers.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_matrix() -> Matrix {
        let mut matrix = Matrix::new(2).unwrap();
        for (row, column) in [(0, 0), (1, 1), (2, 0), (3, 1)] {
            matrix.add_incidence(row, column).unwrap();
        }
        matrix
    }

    #[test]
    fn enumerate_honors_the_solution_limit() {
        let covers = enumerate(two_column_matrix(), Some(2));
        assert_eq!(covers, vec![vec![0, 1], vec![0, 3]]);
    }

    #[test]
    fn enumerate_without_a_limit_finds_every_cover() {
        let covers = enumerate(two_column_matrix(), None);
        assert_eq!(covers.len(), 4);
    }
}
