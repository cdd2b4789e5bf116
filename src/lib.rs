//! This crate enumerates all exact covers of a finite constraint universe
//! using Knuth's dancing links technique (DLX) atop Algorithm X, plus a
//! Sudoku front-end that reduces puzzles to exact cover.

/// The `dlx` module implements the dancing links engine: the toroidal link
/// structure, the reversible cover/uncover operations, and the backtracking
/// search.
pub mod dlx;

/// The `sudoku` module implements the Sudoku puzzle solver, which encodes a
/// grid as an exact cover matrix.
pub mod sudoku;
