#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The link structure underlying the dancing links matrix.
//!
//! Every node of the torus lives in one arena (`Vec<Node>`) and is addressed
//! by its index, so the four neighbour relations are plain `usize` fields and
//! cover/uncover reduce to index rewiring. The roles are distinguished by
//! index range rather than by a tag:
//!
//! - index [`HEAD`] is the master header sentinel,
//! - indices `1..=column_count` are the column headers (column id = index − 1),
//! - every later index is an element node for one (row, column) incidence.

/// Row identifiers are arbitrary integer keys chosen by the caller; they need
/// not be contiguous or ordered.
pub type RowKey = i32;

/// Arena index of the master header sentinel.
///
/// The sentinel anchors the horizontal ring of active column headers. It is
/// never counted, never selectable, and carries [`NO_ROW`] as its row key.
pub(crate) const HEAD: usize = 0;

/// Row key stored on the sentinel and the column headers, which represent no
/// incidence of any row.
pub(crate) const NO_ROW: RowKey = -1;

/// One node of the torus.
///
/// A node participates in exactly two circular doubly-linked rings at all
/// times: the horizontal ring of its row (or of the master header list, for
/// column headers) and the vertical ring of its column. Covering detaches a
/// node from the rings without touching its own link fields, which is what
/// makes uncovering a pure reinsertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub left: usize,
    pub right: usize,
    pub up: usize,
    pub down: usize,
    /// Arena index of the owning column header. Headers and the sentinel
    /// point at themselves.
    pub top: usize,
    /// Row key of the incidence this node represents; [`NO_ROW`] for the
    /// sentinel and the column headers.
    pub row: RowKey,
}

impl Node {
    /// A node linked only to itself, the state of every ring before any
    /// neighbour is added.
    pub(crate) fn self_linked(index: usize, row: RowKey) -> Self {
        Self {
            left: index,
            right: index,
            up: index,
            down: index,
            top: index,
            row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_linked_node_is_a_loop_in_both_rings() {
        let node = Node::self_linked(5, 9);
        assert_eq!(node.left, 5);
        assert_eq!(node.right, 5);
        assert_eq!(node.up, 5);
        assert_eq!(node.down, 5);
        assert_eq!(node.top, 5);
        assert_eq!(node.row, 9);
    }
}
