#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as an exact cover problem.
//!
//! An n×n Sudoku is the classic showcase for dancing links: every placement
//! of a digit `d` in cell `(r, c)` is one option, and the constraints form
//! four families of columns, `4n²` in total:
//!
//! - cell columns: each cell holds exactly one digit,
//! - row columns: each row contains each digit exactly once,
//! - column columns: each column contains each digit exactly once,
//! - box columns: each box contains each digit exactly once.
//!
//! A filled cell contributes a single option (its given digit), an empty
//! cell one option per candidate digit. Exact covers of this matrix are
//! precisely the completed grids.

use crate::dlx::errors::DlxError;
use crate::dlx::matrix::Matrix;
use crate::dlx::node::RowKey;
use crate::dlx::search::Dlx;
use itertools::{Itertools, iproduct};
use smallvec::SmallVec;
use std::fmt;
use std::io::{self, BufRead};

/// An n×n Sudoku grid; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    #[must_use]
    pub const fn new(board: Vec<Vec<usize>>) -> Self {
        Self(board)
    }

    /// Side length of the grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> usize {
        self.0[row][column]
    }

    fn set(&mut self, row: usize, column: usize, digit: usize) {
        self.0[row][column] = digit;
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(board: Vec<Vec<usize>>) -> Self {
        Self::new(board)
    }
}

impl From<[[usize; 4]; 4]> for Board {
    fn from(board: [[usize; 4]; 4]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

impl From<[[usize; 9]; 9]> for Board {
    fn from(board: [[usize; 9]; 9]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

/// A 4×4 puzzle with a blank first row; each missing digit is forced by its
/// column, so the solution is unique.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] =
    [[0, 0, 0, 0], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];

/// The classic 9×9 example puzzle.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A Sudoku instance ready to be encoded as an exact cover matrix.
#[derive(Debug, Clone)]
pub struct Sudoku {
    board: Board,
    n: usize,
    box_size: usize,
}

impl Sudoku {
    /// Wraps a board for solving.
    ///
    /// # Panics
    ///
    /// Panics if the board is not square, if its side length is not a
    /// perfect square (no box structure), or if any cell value exceeds the
    /// side length.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let n = board.size();
        assert!(n > 0, "board must not be empty");
        assert!(
            board.0.iter().all(|row| row.len() == n),
            "board must be square"
        );
        let box_size = (1..=n)
            .find(|b| b * b == n)
            .unwrap_or_else(|| panic!("side length {n} is not a perfect square"));
        assert!(
            board.0.iter().flatten().all(|&d| d <= n),
            "cell values must be at most {n}"
        );
        Self { board, n, box_size }
    }

    /// The wrapped board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Encodes the puzzle as an exact cover matrix over `4n²` columns.
    ///
    /// Options are keyed by `(row · n + column) · n + digit − 1`, so a cover
    /// decodes back to placements without extra bookkeeping.
    ///
    /// # Errors
    ///
    /// Propagates [`DlxError`] from matrix construction.
    pub fn to_matrix(&self) -> Result<Matrix, DlxError> {
        let n = self.n;
        let mut matrix = Matrix::new(4 * n * n)?;
        for (row, column) in iproduct!(0..n, 0..n) {
            let given = self.board.get(row, column);
            let digits = if given == 0 { 1..=n } else { given..=given };
            for digit in digits {
                let key = self.placement_key(row, column, digit);
                let constraints: SmallVec<[usize; 4]> = SmallVec::from_slice(&[
                    self.cell_column(row, column),
                    self.row_column(row, digit),
                    self.column_column(column, digit),
                    self.box_column(row, column, digit),
                ]);
                for constraint in constraints {
                    matrix.add_incidence(key, constraint)?;
                }
            }
        }
        Ok(matrix)
    }

    /// Enumerates every completion of the puzzle, in discovery order.
    ///
    /// # Errors
    ///
    /// Propagates [`DlxError`] from matrix construction.
    pub fn solve(&self) -> Result<Vec<Board>, DlxError> {
        let mut dlx = Dlx::new(self.to_matrix()?);
        Ok(dlx.covers().iter().map(|cover| self.decode(cover)).collect())
    }

    /// Translates an exact cover back into a filled board.
    ///
    /// # Panics
    ///
    /// Panics on keys that were not produced by [`to_matrix`](Self::to_matrix).
    #[must_use]
    pub fn decode(&self, cover: &[RowKey]) -> Board {
        let n = self.n;
        let mut board = self.board.clone();
        for &key in cover {
            let key = usize::try_from(key).expect("placement keys are non-negative");
            let digit = key % n + 1;
            let cell = key / n;
            board.set(cell / n, cell % n, digit);
        }
        board
    }

    fn placement_key(&self, row: usize, column: usize, digit: usize) -> RowKey {
        RowKey::try_from((row * self.n + column) * self.n + digit - 1)
            .expect("boards are small enough for i32 keys")
    }

    fn cell_column(&self, row: usize, column: usize) -> usize {
        row * self.n + column
    }

    fn row_column(&self, row: usize, digit: usize) -> usize {
        self.n * self.n + row * self.n + digit - 1
    }

    fn column_column(&self, column: usize, digit: usize) -> usize {
        2 * self.n * self.n + column * self.n + digit - 1
    }

    fn box_column(&self, row: usize, column: usize, digit: usize) -> usize {
        let b = self.box_size;
        let box_index = (row / b) * b + column / b;
        3 * self.n * self.n + box_index * self.n + digit - 1
    }
}

/// Parses a Sudoku board from a `BufRead` source.
///
/// Each non-empty line is one row of whitespace-separated cell values, `0`
/// for an empty cell. Lines starting with `#` are comments.
///
/// # Panics
///
/// Panics if a cell value is not a number, or if the resulting board fails
/// the [`Sudoku::new`] shape checks.
pub fn parse_sudoku<R: BufRead>(reader: R) -> Sudoku {
    let rows: Vec<Vec<usize>> = reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("Failed to read line: {e}")))
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|line| {
            line.split_whitespace()
                .map(|token| {
                    token
                        .parse::<usize>()
                        .unwrap_or_else(|e| panic!("Failed to parse cell '{token}': {e}"))
                })
                .collect()
        })
        .collect();
    Sudoku::new(Board::new(rows))
}

/// Parses a Sudoku file specified by its path.
///
/// # Errors
///
/// Returns `io::Result::Err` if the file cannot be opened. Panics from
/// [`parse_sudoku`] (malformed content) propagate.
pub fn parse_sudoku_file(file_path: &str) -> io::Result<Sudoku> {
    let file = std::fs::File::open(file_path)?;
    let reader = io::BufReader::new(file);
    Ok(parse_sudoku(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const NINE_SOLUTION: [[usize; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn four_by_four_example_has_its_forced_completion() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_FOUR));
        let solutions = sudoku.solve().unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0],
            Board::from([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]])
        );
    }

    #[test]
    fn nine_by_nine_example_solves_uniquely() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_NINE));
        let solutions = sudoku.solve().unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0], Board::from(NINE_SOLUTION));
    }

    #[test]
    fn completed_board_is_its_own_unique_cover() {
        let sudoku = Sudoku::new(Board::from(NINE_SOLUTION));
        let solutions = sudoku.solve().unwrap();
        assert_eq!(solutions, vec![Board::from(NINE_SOLUTION)]);
    }

    #[test]
    fn matrix_has_four_incidences_per_placement() {
        let sudoku = Sudoku::new(Board::from(EXAMPLE_FOUR));
        let matrix = sudoku.to_matrix().unwrap();
        assert_eq!(matrix.column_count(), 4 * 4 * 4);
        // Four blank cells with four candidates each, twelve givens.
        assert_eq!(matrix.incidence_count(), (4 * 4 + 12) * 4);
    }

    #[test]
    fn parses_a_board_with_comments() {
        let input = "# toy puzzle\n\
                     0 0 0 0\n\
                     3 4 1 2\n\
                     2 1 4 3\n\
                     4 3 2 1\n";
        let sudoku = parse_sudoku(Cursor::new(input));
        assert_eq!(sudoku.board(), &Board::from(EXAMPLE_FOUR));
    }

    #[test]
    #[should_panic(expected = "side length 3 is not a perfect square")]
    fn non_square_side_length_panics() {
        let _ = Sudoku::new(Board::new(vec![vec![0; 3]; 3]));
    }

    #[test]
    #[should_panic(expected = "cell values must be at most 4")]
    fn oversized_cell_value_panics() {
        let mut board = EXAMPLE_FOUR;
        board[0][0] = 5;
        let _ = Sudoku::new(Board::from(board));
    }

    #[test]
    fn board_displays_as_rows_of_numbers() {
        let board = Board::from(EXAMPLE_FOUR);
        let shown = board.to_string();
        assert!(shown.starts_with("0 0 0 0\n3 4 1 2\n"));
    }
}
