#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knuth's dancing links (DLX) engine for the exact cover problem.

pub mod errors;
pub mod matrix;
pub mod node;
pub mod parse;
pub mod search;

pub use errors::DlxError;
pub use matrix::{ColumnInfo, Matrix};
pub use node::RowKey;
pub use search::{Cover, Dlx};
