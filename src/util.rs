use std::collections::BTreeSet;
use std::fmt;

use frozenset::FrozenSet;
use rand::seq::IteratorRandom;
use rand::Rng;
use thiserror::Error;

use crate::internal_util::{all_cells, neighbourhood};
use crate::{Cell, KnowledgeBase, ReasonerConfig};

/// Reasons a [`Board`] could not be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,
    #[error("board must be rectangular (found row with length {found}, expected length {expected})")]
    NotRectangular { found: usize, expected: usize },
    #[error("invalid character '{character}' at ({row}, {col})")]
    InvalidCharacter {
        character: char,
        row: usize,
        col: usize,
    },
    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
}

/// The true layout of a minefield (no game logic!)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    /// The height of the board
    height: usize,
    /// The width of the board
    width: usize,
    /// Where the mines are
    mines: FrozenSet<Cell>,
}
impl Board {
    /// Create a board from an ASCII-encoded layout, where:
    /// - `*` is a mine
    /// - `.` is a safe cell
    /// - Trailing or leading whitespace is ignored
    ///
    /// # Errors
    ///
    /// If the board is not rectangular, has a width or height of 0, or
    /// contains any other character, an error is returned.
    pub fn new(encoded: &str) -> Result<Self, BoardError> {
        let lines = encoded.trim().lines().map(str::trim).collect::<Vec<_>>();
        let height = lines.len();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        if let Some(line) = lines.iter().find(|l| l.chars().count() != width) {
            return Err(BoardError::NotRectangular {
                found: line.chars().count(),
                expected: width,
            });
        }

        let mut mines = Vec::new();
        for (row, line) in lines.into_iter().enumerate() {
            for (col, character) in line.chars().enumerate() {
                match character {
                    '*' => mines.push(Cell::new(row, col)),
                    '.' => (),
                    _ => {
                        return Err(BoardError::InvalidCharacter {
                            character,
                            row,
                            col,
                        });
                    },
                }
            }
        }
        Ok(Self {
            height,
            width,
            mines: mines.into_iter().collect(),
        })
    }

    /// Place exactly `mines` mines uniformly at random on a `height` x
    /// `width` board.
    ///
    /// # Errors
    ///
    /// If either dimension is 0, or there are more mines than cells.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        let cells = height * width;
        if mines > cells {
            return Err(BoardError::TooManyMines {
                mines,
                cells,
            });
        }
        Ok(Self {
            height,
            width,
            mines: all_cells(height, width)
                .choose_multiple(rng, mines)
                .into_iter()
                .collect(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    pub fn mines(&self) -> &FrozenSet<Cell> {
        &self.mines
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines adjacent to `cell`, not counting `cell` itself
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        neighbourhood(cell, self.height, self.width)
            .filter(|neighbour| self.mines.contains(neighbour))
            .count()
    }

    /// Has every mine, and nothing else, been flagged?
    pub fn won(&self, flagged: &BTreeSet<Cell>) -> bool {
        flagged.len() == self.mines.len()
            && flagged.iter().all(|cell| self.mines.contains(cell))
    }

    /// A knowledge base sized to this board
    pub fn knowledge_base(&self, config: ReasonerConfig) -> KnowledgeBase {
        KnowledgeBase::with_config(self.height, self.width, config)
    }
}
impl fmt::Display for Board {
    /// Draws the mine layout, `X` marking each mine.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("{}-", "--".repeat(self.width));
        for row in 0..self.height {
            writeln!(f, "{separator}")?;
            for col in 0..self.width {
                let mark = if self.is_mine(Cell::new(row, col)) { 'X' } else { ' ' };
                write!(f, "|{mark}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{separator}")
    }
}

/// Why a cell was revealed
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MoveKind {
    /// The knowledge base proved the cell safe
    Safe,
    /// Nothing was provably safe, so the cell was a guess
    Random,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Outcome {
    /// Every safe cell was revealed and every mine flagged
    Won,
    /// The given cell was a mine
    Lost(Cell),
    /// No move was left, but the board was not solved. Only reachable if the
    /// knowledge base flagged a cell that is not actually a mine.
    Stuck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: Outcome,
    /// Every move made, in order
    pub moves: Vec<Move>,
    /// The cells the knowledge base proved to be mines
    pub flagged: BTreeSet<Cell>,
}

/// Play `board` to the end: reveal a provably safe cell whenever there is one,
/// otherwise guess, and report every observation to a fresh knowledge base.
pub fn autoplay<R: Rng + ?Sized>(
    board: &Board,
    config: ReasonerConfig,
    rng: &mut R,
) -> GameReport {
    let mut kb = board.knowledge_base(config);
    tracing::debug!(
        height = kb.height(),
        width = kb.width(),
        convergence = ?kb.config().convergence,
        "new game"
    );
    let mut moves = Vec::new();
    loop {
        let next = kb
            .make_safe_move()
            .map(|cell| {
                Move {
                    cell,
                    kind: MoveKind::Safe,
                }
            })
            .or_else(|| {
                kb.make_random_move_with(rng).map(|cell| {
                    Move {
                        cell,
                        kind: MoveKind::Random,
                    }
                })
            });
        let Some(next) = next else { break; };
        tracing::debug!(cell = %next.cell, kind = ?next.kind, "move");
        moves.push(next);

        if board.is_mine(next.cell) {
            tracing::info!(cell = %next.cell, moves = moves.len(), "hit a mine");
            return GameReport {
                outcome: Outcome::Lost(next.cell),
                moves,
                flagged: kb.mines().clone(),
            };
        }
        kb.add_knowledge(next.cell, board.nearby_mines(next.cell));
    }

    let flagged = kb.mines().clone();
    let outcome = if board.won(&flagged) {
        tracing::info!(moves = moves.len(), "all mines flagged");
        Outcome::Won
    } else {
        tracing::warn!(flagged = flagged.len(), "ran out of moves");
        Outcome::Stuck
    };
    GameReport {
        outcome,
        moves,
        flagged,
    }
}
