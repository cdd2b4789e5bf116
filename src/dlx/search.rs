#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Algorithm X: the recursive backtracking search over a covered matrix.
//!
//! The search repeatedly selects the active column with the smallest live
//! size (leftmost wins ties, which makes enumeration order deterministic),
//! covers it, and branches over the rows of its vertical ring. Selecting a
//! row covers every other column that row uses; on return the covers are
//! undone in exact reverse order, restoring the state the parent call saw.
//! A state in which the master ring is empty is an exact cover, reported as
//! the ordered sequence of selected row keys.

use crate::dlx::matrix::Matrix;
use crate::dlx::node::{HEAD, RowKey};
use smallvec::SmallVec;
use std::ops::ControlFlow;

/// An exact cover: the row keys of the chosen options, in selection order.
pub type Cover = Vec<RowKey>;

/// The exact cover search engine.
///
/// A `Dlx` takes ownership of a fully built [`Matrix`], so no incidence can
/// be added once searching has begun. A completed search leaves the matrix
/// in its pristine state (every cover is unwound on backtrack), which is why
/// [`covers`](Self::covers) may be called repeatedly and always returns the
/// same sequence.
#[derive(Debug, Clone)]
pub struct Dlx {
    matrix: Matrix,
    /// Row keys of the currently selected options, one per recursion level.
    partial: SmallVec<[RowKey; 32]>,
}

impl Dlx {
    /// Creates a search engine over the given matrix.
    #[must_use]
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            partial: SmallVec::new(),
        }
    }

    /// Enumerates every exact cover, in discovery order.
    ///
    /// Finding no cover is not an error; the result is simply empty. The
    /// search always terminates because every ring strictly shrinks along a
    /// branch before backtracking restores it.
    pub fn covers(&mut self) -> Vec<Cover> {
        let mut found = Vec::new();
        self.visit_covers(|rows| {
            found.push(rows.to_vec());
            ControlFlow::Continue(())
        });
        found
    }

    /// Calls `visit` on each exact cover as it is discovered, stopping early
    /// if the visitor returns [`ControlFlow::Break`].
    ///
    /// Aborting still unwinds every open cover on the way out, so the matrix
    /// is back in its pre-search state when this returns.
    pub fn visit_covers<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[RowKey]) -> ControlFlow<()>,
    {
        let _ = self.descend(&mut visit);
        debug_assert!(self.partial.is_empty(), "backtracking left a partial path");
    }

    /// Gives the matrix back, e.g. for diagnostics after a search.
    #[must_use]
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// Read-only view of the underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// One level of Algorithm X.
    fn descend<F>(&mut self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[RowKey]) -> ControlFlow<()>,
    {
        let Some(column) = self.choose_column() else {
            // Master ring empty: the selected rows form an exact cover.
            return visit(&self.partial);
        };

        self.matrix.cover_column(column);
        let header = Matrix::header_of(column);

        let mut flow = ControlFlow::Continue(());
        let mut r = self.matrix.down_of(header);
        while r != header {
            self.partial.push(self.matrix.row_of(r));

            // Cover the other columns of this row, left to right.
            let mut j = self.matrix.right_of(r);
            while j != r {
                self.matrix.cover_column(self.matrix.column_of(j));
                j = self.matrix.right_of(j);
            }

            let inner = self.descend(visit);

            // Undo in mirror order: right to left.
            let mut j = self.matrix.left_of(r);
            while j != r {
                self.matrix.uncover_column(self.matrix.column_of(j));
                j = self.matrix.left_of(j);
            }
            self.partial.pop();

            if inner.is_break() {
                flow = ControlFlow::Break(());
                break;
            }
            r = self.matrix.down_of(r);
        }

        self.matrix.uncover_column(column);
        flow
    }

    /// Scans the master ring left to right for the column with the minimum
    /// live size. The strictly-smaller comparison keeps the leftmost column
    /// on ties, so selection depends only on ring order.
    ///
    /// Returns [`None`] once the ring holds only the sentinel.
    fn choose_column(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        let mut header = self.matrix.right_of(HEAD);
        while header != HEAD {
            let column = header - 1;
            let size = self.matrix.size_of(column);
            if best.is_none_or(|(_, smallest)| size < smallest) {
                best = Some((column, size));
            }
            header = self.matrix.right_of(header);
        }
        best.map(|(column, _)| column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn matrix_of(column_count: usize, incidences: &[(RowKey, usize)]) -> Matrix {
        let mut matrix = Matrix::new(column_count).unwrap();
        for &(row, column) in incidences {
            matrix.add_incidence(row, column).unwrap();
        }
        matrix
    }

    /// row0 = {0, 2}, row1 = {1, 2}, row2 = {1}, row3 = {0, 1}; the only
    /// exact cover is rows 0 and 2.
    fn sample() -> Matrix {
        matrix_of(3, &[(0, 0), (0, 2), (1, 1), (1, 2), (2, 1), (3, 0), (3, 1)])
    }

    /// The 6-row, 7-column instance from Knuth's "Dancing Links" paper.
    fn knuth() -> Matrix {
        matrix_of(
            7,
            &[
                (0, 2), (0, 4), (0, 5),
                (1, 0), (1, 3), (1, 6),
                (2, 1), (2, 2), (2, 5),
                (3, 0), (3, 3),
                (4, 1), (4, 6),
                (5, 3), (5, 4), (5, 6),
            ],
        )
    }

    /// Checks that a reported cover really partitions the column universe.
    fn assert_is_exact_cover(column_count: usize, incidences: &[(RowKey, usize)], cover: &[RowKey]) {
        let mut rows: FxHashMap<RowKey, Vec<usize>> = FxHashMap::default();
        for &(row, column) in incidences {
            rows.entry(row).or_default().push(column);
        }
        let mut covered = vec![0usize; column_count];
        for row in cover {
            for &column in &rows[row] {
                covered[column] += 1;
            }
        }
        assert!(covered.iter().all(|&count| count == 1), "not an exact cover: {covered:?}");
    }

    #[test]
    fn sample_has_the_single_cover_rows_zero_and_two() {
        let mut dlx = Dlx::new(sample());
        assert_eq!(dlx.covers(), vec![vec![0, 2]]);
    }

    #[test]
    fn matrix_without_incidences_yields_nothing() {
        let mut dlx = Dlx::new(Matrix::new(2).unwrap());
        assert!(dlx.covers().is_empty());
    }

    #[test]
    fn permanently_empty_column_starves_the_search() {
        // Column 1 is never satisfiable, so even though row 0 covers
        // column 0 there is no exact cover.
        let mut dlx = Dlx::new(matrix_of(2, &[(0, 0)]));
        assert!(dlx.covers().is_empty());
    }

    #[test]
    fn knuth_example_has_its_unique_cover() {
        let incidences = [
            (0, 2), (0, 4), (0, 5),
            (1, 0), (1, 3), (1, 6),
            (2, 1), (2, 2), (2, 5),
            (3, 0), (3, 3),
            (4, 1), (4, 6),
            (5, 3), (5, 4), (5, 6),
        ];
        let mut dlx = Dlx::new(knuth());
        let covers = dlx.covers();
        assert_eq!(covers.len(), 1);
        // Keys appear in selection order: row 3 is chosen while covering
        // column 0, then row 0 for column 4, then row 4.
        assert_eq!(covers[0], vec![3, 0, 4]);
        assert_is_exact_cover(7, &incidences, &covers[0]);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut dlx = Dlx::new(knuth());
        let first = dlx.covers();
        let second = dlx.covers();
        assert_eq!(first, second);
    }

    #[test]
    fn ties_resolve_to_the_leftmost_column() {
        // Columns 0 and 1 both have live size 2.
        let dlx = Dlx::new(matrix_of(2, &[(0, 0), (1, 1), (2, 0), (3, 1)]));
        assert_eq!(dlx.choose_column(), Some(0));
    }

    #[test]
    fn enumeration_order_follows_ring_order() {
        // Branching on column 0 first, top to bottom, then on column 1.
        let mut dlx = Dlx::new(matrix_of(2, &[(0, 0), (1, 1), (2, 0), (3, 1)]));
        assert_eq!(
            dlx.covers(),
            vec![vec![0, 1], vec![0, 3], vec![2, 1], vec![2, 3]]
        );
    }

    #[test]
    fn row_keys_may_be_arbitrary_integers() {
        let mut dlx = Dlx::new(matrix_of(2, &[(41, 0), (41, 1), (-3, 0)]));
        assert_eq!(dlx.covers(), vec![vec![41]]);
    }

    #[test]
    fn visitor_break_stops_early_and_restores_the_matrix() {
        let mut dlx = Dlx::new(matrix_of(2, &[(0, 0), (1, 1), (2, 0), (3, 1)]));
        let mut seen = Vec::new();
        dlx.visit_covers(|rows| {
            seen.push(rows.to_vec());
            ControlFlow::Break(())
        });
        assert_eq!(seen, vec![vec![0, 1]]);

        // The abort unwound every open cover; a fresh search still sees
        // the full enumeration.
        assert_eq!(dlx.covers().len(), 4);
        assert_eq!(dlx.matrix().columns().len(), 2);
    }
}
