#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles by
//! reduction to exact cover.

/// The `solver` module contains the board type and the exact cover encoding.
pub mod solver;
