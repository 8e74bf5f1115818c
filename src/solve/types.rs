use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use thiserror::Error;

/// The state of the knowledge base is logically inconsistent.
///
/// Never produced by the update protocol itself; only by the explicit
/// consistency checks, since the reasoner trusts the counts it is given.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Error)]
#[error("inconsistent knowledge: {0}")]
pub struct InconsistencyError(pub &'static str);

/// A `(row, col)` coordinate on the board.
///
/// Ordering is row-major, which is also the order every ordered set of cells
/// in this crate iterates in.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}
impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
        }
    }
}
impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A logical statement about the board: exactly `count` of `cells` are
/// mines.
///
/// Sentences compare, hash and order structurally (sorted cells, then
/// count), so duplicates can be detected without any notion of identity.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sentence {
    /// The cells the statement is about
    cells: BTreeSet<Cell>,
    /// How many of `cells` are mines. Signed, because an inference over
    /// inconsistent observations may transiently go negative.
    count: isize,
}
impl Sentence {
    /// No validation is performed; see [`Sentence::check_consistency`].
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: isize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    /// The empty sentence `{} = 0`, which carries no information.
    pub fn trivial() -> Self {
        Self {
            cells: BTreeSet::new(),
            count: 0,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> isize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Is this the empty sentence `{} = 0`?
    pub fn is_trivial(&self) -> bool {
        self.is_empty() && self.count == 0
    }

    #[allow(clippy::cast_possible_wrap)]
    fn size(&self) -> isize {
        // A set can never hold more than isize::MAX cells
        self.len() as isize
    }

    /// Every cell is a mine when there are exactly as many mines as cells.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if self.size() == self.count {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell is safe when there are no mines left.
    pub fn known_safes(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Narrow the sentence given that `cell` is a mine: the cell leaves and
    /// takes one unit of the count with it.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            self.count -= 1;
        }
    }

    /// Narrow the sentence given that `cell` is safe.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// Subset elimination.
    ///
    /// If one sentence's cells are a subset of the other's, the cells only the
    /// larger one mentions must hold the difference of the two counts. Equal
    /// cell sets give [`Sentence::trivial`] (or an inconsistent empty sentence
    /// if the counts disagree). Returns `None` when neither contains the
    /// other.
    pub fn infer_from(&self, other: &Self) -> Option<Self> {
        let (outer, inner) = if other.cells.is_subset(&self.cells) {
            (self, other)
        } else if self.cells.is_subset(&other.cells) {
            (other, self)
        } else {
            return None;
        };
        Some(Self {
            cells: outer.cells.difference(&inner.cells).copied().collect(),
            count: outer.count - inner.count,
        })
    }

    /// Check that the count can actually be satisfied by the cells.
    pub fn check_consistency(&self) -> Result<(), InconsistencyError> {
        if self.count < 0 {
            Err(InconsistencyError("Sentence with a negative number of mines"))
        } else if self.count > self.size() {
            Err(InconsistencyError("Sentence with more mines than cells"))
        } else {
            Ok(())
        }
    }
}
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}
