#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The sparse matrix builder and the reversible cover/uncover engine.
//!
//! A [`Matrix`] is built once — a fixed number of columns, then a stream of
//! (row, column) incidences — and afterwards mutated only through the paired
//! [`cover`](Matrix::cover)/[`uncover`](Matrix::uncover) operations. Covering
//! splices a column header out of the master ring and detaches every row that
//! conflicts with the column; uncovering is the exact inverse and must be
//! invoked in LIFO order with respect to the covers still open. The matrix
//! keeps an explicit stack of open covers so that a mis-nested uncover is
//! reported as an error instead of silently corrupting the links.

use crate::dlx::errors::DlxError;
use crate::dlx::node::{HEAD, NO_ROW, Node, RowKey};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// Identity and live size of one active column, as reported by
/// [`Matrix::columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Stable column identity, in `0..column_count`.
    pub id: usize,
    /// Number of element nodes currently linked into the column's vertical
    /// ring.
    pub size: usize,
}

impl fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column(id={}, size={})", self.id, self.size)
    }
}

/// The toroidal sparse matrix of an exact cover instance.
///
/// Columns are the constraints of the universe, rows are the candidate
/// option-sets, and each element node records one (row, column) incidence.
/// Construction is append-only; element nodes are created once and are never
/// destroyed, only detached and reattached by the cover engine.
#[derive(Debug, Clone)]
pub struct Matrix {
    /// The node arena. Index [`HEAD`] is the sentinel, `1..=column_count`
    /// are the column headers, element nodes follow in insertion order.
    nodes: Vec<Node>,
    /// Live vertical-ring size per column id.
    sizes: Vec<usize>,
    column_count: usize,
    /// First and last arena index of each row's horizontal ring, so that new
    /// incidences can be appended at the ring's tail in O(1).
    row_rings: FxHashMap<RowKey, (usize, usize)>,
    /// Column ids of the covers currently open, innermost last.
    open_covers: Vec<usize>,
    /// Total number of accepted `add_incidence` calls.
    incidences: usize,
}

impl Matrix {
    /// Creates a matrix with `column_count` columns (ids `0..column_count`)
    /// and no incidences. Every column's vertical ring starts as a self-loop
    /// with live size zero.
    ///
    /// # Errors
    ///
    /// Returns [`DlxError::InvalidColumnCount`] if `column_count` is zero.
    pub fn new(column_count: usize) -> Result<Self, DlxError> {
        if column_count == 0 {
            return Err(DlxError::InvalidColumnCount { column_count });
        }

        let mut nodes = Vec::with_capacity(column_count + 1);
        nodes.push(Node::self_linked(HEAD, NO_ROW));
        for header in 1..=column_count {
            let mut node = Node::self_linked(header, NO_ROW);
            node.left = header - 1;
            node.right = if header == column_count { HEAD } else { header + 1 };
            nodes.push(node);
        }
        nodes[HEAD].right = 1;
        nodes[HEAD].left = column_count;

        Ok(Self {
            nodes,
            sizes: vec![0; column_count],
            column_count,
            row_rings: FxHashMap::default(),
            open_covers: Vec::new(),
            incidences: 0,
        })
    }

    /// Appends one (row, column) incidence.
    ///
    /// The new element node is linked into the column's vertical ring
    /// directly above the header, and at the tail of the row's horizontal
    /// ring, so both rings preserve insertion order. The first node of a row
    /// self-loops until a second incidence of the same row arrives. Rows may
    /// be introduced in any order and interleaved freely.
    ///
    /// # Errors
    ///
    /// Returns [`DlxError::ColumnOutOfRange`] if `column` is not in
    /// `0..column_count`; the matrix is left in its previous state.
    pub fn add_incidence(&mut self, row: RowKey, column: usize) -> Result<(), DlxError> {
        if column >= self.column_count {
            return Err(DlxError::ColumnOutOfRange {
                column,
                column_count: self.column_count,
            });
        }

        let header = column + 1;
        let index = self.nodes.len();

        // Vertical: insert between the current last element and the header.
        let up = self.nodes[header].up;
        self.nodes.push(Node {
            left: index,
            right: index,
            up,
            down: header,
            top: header,
            row,
        });
        self.nodes[up].down = index;
        self.nodes[header].up = index;
        self.sizes[column] += 1;
        self.incidences += 1;

        // Horizontal: append at the tail of the row's ring.
        match self.row_rings.entry(row) {
            Entry::Vacant(slot) => {
                slot.insert((index, index));
            }
            Entry::Occupied(mut slot) => {
                let (first, last) = *slot.get();
                self.nodes[index].left = last;
                self.nodes[index].right = first;
                self.nodes[last].right = index;
                self.nodes[first].left = index;
                slot.get_mut().1 = index;
            }
        }
        Ok(())
    }

    /// Number of columns the matrix was created with.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    /// Total number of incidences added so far.
    #[must_use]
    pub const fn incidence_count(&self) -> usize {
        self.incidences
    }

    /// Read-only listing of the currently active columns, in master-ring
    /// order, with their live sizes.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnInfo> {
        let mut infos = Vec::new();
        let mut header = self.nodes[HEAD].right;
        while header != HEAD {
            infos.push(ColumnInfo {
                id: header - 1,
                size: self.sizes[header - 1],
            });
            header = self.nodes[header].right;
        }
        infos
    }

    /// Covers a column: splices its header out of the master ring, then
    /// detaches every other entry of every row that uses the column from its
    /// own column's vertical ring. The covered column's ring itself stays
    /// intact so the caller can still enumerate its rows.
    ///
    /// Cost is proportional to the number of entries touched; no allocation
    /// beyond the open-cover bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`DlxError::ColumnOutOfRange`] if `column` is not in
    /// `0..column_count`.
    pub fn cover(&mut self, column: usize) -> Result<(), DlxError> {
        if column >= self.column_count {
            return Err(DlxError::ColumnOutOfRange {
                column,
                column_count: self.column_count,
            });
        }
        self.cover_column(column);
        Ok(())
    }

    /// Uncovers a column, restoring every pointer and counter touched by the
    /// matching [`cover`](Self::cover) call. Covers are undone strictly
    /// innermost-first.
    ///
    /// # Errors
    ///
    /// Returns [`DlxError::ColumnOutOfRange`] for an unknown column, and
    /// [`DlxError::NestingViolation`] if `column` is not the innermost open
    /// cover; in both cases the matrix is untouched.
    pub fn uncover(&mut self, column: usize) -> Result<(), DlxError> {
        if column >= self.column_count {
            return Err(DlxError::ColumnOutOfRange {
                column,
                column_count: self.column_count,
            });
        }
        match self.open_covers.last().copied() {
            Some(open) if open == column => {
                self.uncover_column(column);
                Ok(())
            }
            expected => Err(DlxError::NestingViolation {
                expected,
                found: column,
            }),
        }
    }

    /// Cover without the public-API bounds check; the search engine only
    /// names columns it found in the active ring.
    pub(crate) fn cover_column(&mut self, column: usize) {
        self.open_covers.push(column);
        let header = column + 1;

        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        // Top to bottom over the column's rows, left to right within each row.
        let mut i = self.nodes[header].down;
        while i != header {
            let mut j = self.nodes[i].right;
            while j != i {
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[self.nodes[j].top - 1] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Exact mirror of [`cover_column`](Self::cover_column): bottom to top,
    /// right to left, then the header is spliced back into the master ring.
    pub(crate) fn uncover_column(&mut self, column: usize) {
        let open = self.open_covers.pop();
        debug_assert_eq!(
            open,
            Some(column),
            "uncover must match the innermost open cover"
        );
        let header = column + 1;

        let mut i = self.nodes[header].up;
        while i != header {
            let mut j = self.nodes[i].left;
            while j != i {
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = j;
                self.nodes[down].up = j;
                self.sizes[self.nodes[j].top - 1] += 1;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }

    // Link accessors for the search engine.

    pub(crate) fn right_of(&self, index: usize) -> usize {
        self.nodes[index].right
    }

    pub(crate) fn left_of(&self, index: usize) -> usize {
        self.nodes[index].left
    }

    pub(crate) fn down_of(&self, index: usize) -> usize {
        self.nodes[index].down
    }

    pub(crate) fn row_of(&self, index: usize) -> RowKey {
        self.nodes[index].row
    }

    /// Column id owning the element node at `index`.
    pub(crate) fn column_of(&self, index: usize) -> usize {
        self.nodes[index].top - 1
    }

    pub(crate) fn header_of(column: usize) -> usize {
        column + 1
    }

    pub(crate) fn size_of(&self, column: usize) -> usize {
        self.sizes[column]
    }

    /// True once every column header has been spliced out of the master
    /// ring, i.e. the current selection is an exact cover.
    pub(crate) fn fully_covered(&self) -> bool {
        self.nodes[HEAD].right == HEAD
    }
}
