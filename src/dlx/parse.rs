#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for a DIMACS-like exact cover text format.
//!
//! The format mirrors the conventions of the DIMACS CNF family:
//! - Comment lines start with `c`.
//! - A problem line `p cover <columns>` declares the column universe and
//!   must precede any option line.
//! - Every other non-empty line is one option, listing the column indices
//!   the option covers, separated by whitespace. Options receive the row
//!   keys `0, 1, 2, ...` in file order.
//! - An optional `%` line marks end-of-data; everything after it is ignored.
//!
//! Example instance (the unique cover is options 0 and 2):
//!
//! ```text
//! c three columns, four options
//! p cover 3
//! 0 2
//! 1 2
//! 1
//! 0 1
//! ```

use crate::dlx::matrix::Matrix;
use crate::dlx::node::RowKey;
use itertools::Itertools;
use std::io::{self, BufRead};

/// Parses exact cover data from a `BufRead` source into a [`Matrix`].
///
/// # Panics
///
/// - If reading a line from the `reader` fails.
/// - If an option line appears before the `p cover` problem line, or the
///   problem line is malformed or duplicated.
/// - If a column index cannot be parsed as an integer or is out of range
///   for the declared column count.
pub fn parse_cover<R: BufRead>(reader: R) -> Matrix {
    let lines = reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("Failed to read line: {e}")));

    let mut matrix: Option<Matrix> = None;
    let mut next_row: RowKey = 0;

    for line in lines {
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => {
                assert!(matrix.is_none(), "duplicate problem line: '{line}'");
                let (kind, count) = parts
                    .skip(1)
                    .collect_tuple()
                    .unwrap_or_else(|| panic!("Malformed problem line: '{line}'"));
                assert_eq!(kind, "cover", "unsupported problem kind '{kind}'");
                let column_count = count
                    .parse::<usize>()
                    .unwrap_or_else(|e| panic!("Failed to parse column count '{count}': {e}"));
                matrix = Some(
                    Matrix::new(column_count)
                        .unwrap_or_else(|e| panic!("Invalid problem line: {e}")),
                );
            }
            Some(_) => {
                let matrix = matrix
                    .as_mut()
                    .unwrap_or_else(|| panic!("Option line before problem line: '{line}'"));
                for token in parts {
                    let column = token
                        .parse::<usize>()
                        .unwrap_or_else(|e| panic!("Failed to parse column '{token}': {e}"));
                    matrix
                        .add_incidence(next_row, column)
                        .unwrap_or_else(|e| panic!("Bad incidence on option {next_row}: {e}"));
                }
                next_row += 1;
            }
        }
    }

    matrix.unwrap_or_else(|| panic!("Input has no problem line"))
}

/// Parses an exact cover file specified by its path.
///
/// Convenience wrapper that opens the file, wraps it in a `BufReader`, and
/// calls [`parse_cover`].
///
/// # Errors
///
/// Returns `io::Result::Err` if the file cannot be opened. Panics from
/// [`parse_cover`] (malformed content) propagate.
pub fn parse_file(file_path: &str) -> io::Result<Matrix> {
    let file = std::fs::File::open(file_path)?;
    let reader = io::BufReader::new(file);
    Ok(parse_cover(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::search::Dlx;
    use std::io::Cursor;

    #[test]
    fn parses_a_simple_instance() {
        let input = "c comment\n\
                     p cover 3\n\
                     0 2\n\
                     1 2\n\
                     1\n\
                     0 1\n";
        let matrix = parse_cover(Cursor::new(input));
        assert_eq!(matrix.column_count(), 3);
        assert_eq!(matrix.incidence_count(), 7);

        let mut dlx = Dlx::new(matrix);
        assert_eq!(dlx.covers(), vec![vec![0, 2]]);
    }

    #[test]
    fn skips_blank_lines_and_stops_at_end_marker() {
        let input = "p cover 2\n\
                     \n\
                     0 1\n\
                     %\n\
                     this is not parsed\n";
        let matrix = parse_cover(Cursor::new(input));
        assert_eq!(matrix.incidence_count(), 2);
        // The blank line did not consume a row key.
        let mut dlx = Dlx::new(matrix);
        assert_eq!(dlx.covers(), vec![vec![0]]);
    }

    #[test]
    #[should_panic(expected = "Option line before problem line")]
    fn option_before_problem_line_panics() {
        parse_cover(Cursor::new("0 1\np cover 2\n"));
    }

    #[test]
    #[should_panic(expected = "Failed to parse column 'x'")]
    fn malformed_column_panics() {
        parse_cover(Cursor::new("p cover 2\n0 x\n"));
    }

    #[test]
    #[should_panic(expected = "Bad incidence on option 0")]
    fn out_of_range_column_panics() {
        parse_cover(Cursor::new("p cover 2\n0 5\n"));
    }

    #[test]
    #[should_panic(expected = "Input has no problem line")]
    fn missing_problem_line_panics() {
        parse_cover(Cursor::new("c only a comment\n"));
    }
}
