//! The knowledge base: sentences about the board, plus everything they have
//! proven so far.

use std::collections::BTreeSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::internal_util::{all_cells, neighbourhood, unseen};

mod combine;
mod config;
mod types;

pub use config::{Convergence, ReasonerConfig};
pub use types::{Cell, InconsistencyError, Sentence};

/// A minesweeper player that reasons over what the board has told it.
///
/// Every revealed cell becomes a [`Sentence`] over its unrevealed neighbours.
/// Facts proven by any sentence are pushed into every other sentence, and new
/// sentences are derived by subset elimination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    config: ReasonerConfig,
    /// Cells that have been revealed
    moves_made: BTreeSet<Cell>,
    /// Cells known not to be mines
    safes: BTreeSet<Cell>,
    /// Cells known to be mines
    mines: BTreeSet<Cell>,
    /// Sentences known to be true, in the order they were learned
    knowledge: Vec<Sentence>,
}
impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_config(height, width, ReasonerConfig::default())
    }

    pub fn with_config(height: usize, width: usize, config: ReasonerConfig) -> Self {
        Self {
            height,
            width,
            config,
            moves_made: BTreeSet::new(),
            safes: BTreeSet::new(),
            mines: BTreeSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// The on-board neighbours of `cell`, not including `cell` itself
    pub fn nearby_cells(&self, cell: Cell) -> BTreeSet<Cell> {
        neighbourhood(cell, self.height, self.width).collect()
    }

    /// Record `cell` as a mine, and narrow every sentence accordingly.
    pub fn mark_mine(&mut self, cell: Cell) {
        self.mines.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Record `cell` as safe, and narrow every sentence accordingly.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.safes.insert(cell);
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Learn that `cell` was revealed safely and has `count` mines around it.
    ///
    /// The observation is narrowed by everything already known and added to
    /// the knowledge base, after which known facts are extracted, new
    /// sentences inferred and empty sentences dropped. How often that last
    /// part repeats is governed by [`ReasonerConfig::convergence`].
    ///
    /// `count` is trusted: an observation that contradicts earlier ones is
    /// absorbed without complaint (see [`KnowledgeBase::check_consistency`]).
    #[allow(clippy::cast_possible_wrap)]
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) {
        tracing::debug!(%cell, count, "observation");
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut sentence = Sentence::new(self.nearby_cells(cell), count as isize);
        for &mine in &self.mines {
            sentence.mark_mine(mine);
        }
        for &safe in &self.safes {
            sentence.mark_safe(safe);
        }
        tracing::trace!(%sentence, "encoded");
        self.knowledge.push(sentence);

        let rounds = self.config.rounds();
        for round in 1..=rounds {
            if !self.update_round() {
                tracing::trace!(round, "nothing left to update");
                break;
            }
            if self.config.convergence != Convergence::FixedPoint {
                continue;
            }
            // Contradictory sentences keep deriving new contradictions, so
            // further rounds cannot converge
            if let Err(error) = self.check_consistency() {
                tracing::warn!(round, %error, "stopped iterating on inconsistent knowledge");
                break;
            }
            if round == rounds {
                tracing::warn!(rounds, "stopped before reaching a fixed point");
            }
        }
    }

    /// One extract/infer/cleanup round; did it change anything?
    fn update_round(&mut self) -> bool {
        let learned = self.extract_known();
        let inferred = self.infer_new();
        let removed = self.cleanup();
        tracing::debug!(
            learned,
            inferred,
            removed,
            sentences = self.knowledge.len(),
            "update round"
        );
        learned + inferred + removed > 0
    }

    /// Mark every cell that some sentence proves to be a mine or safe.
    ///
    /// All sentences are read before any is narrowed. Returns the number of
    /// cells that were not already known.
    pub fn extract_known(&mut self) -> usize {
        let (new_mines, new_safes) = combine::collect_known(&self.knowledge);
        let mut learned = 0;
        for cell in unseen(&new_mines, &self.mines) {
            tracing::debug!(%cell, "found mine");
            learned += 1;
        }
        for cell in unseen(&new_safes, &self.safes) {
            tracing::debug!(%cell, "found safe cell");
            learned += 1;
        }

        for cell in new_mines {
            self.mark_mine(cell);
        }
        for cell in new_safes {
            self.mark_safe(cell);
        }
        learned
    }

    /// Add every sentence that subset elimination can derive from a pair of
    /// existing sentences and that is not known already. Returns how many
    /// were added.
    pub fn infer_new(&mut self) -> usize {
        let staged = combine::pairwise_inferences(&self.knowledge);
        let added = staged.len();
        self.knowledge.extend(staged);
        added
    }

    /// Drop sentences that carry no information. Returns how many were
    /// dropped.
    pub fn cleanup(&mut self) -> usize {
        combine::remove_trivial(&mut self.knowledge)
    }

    /// A cell known to be safe that has not been revealed yet.
    ///
    /// Always the first such cell in row-major order.
    pub fn make_safe_move(&self) -> Option<Cell> {
        unseen(&self.safes, &self.moves_made).find(|cell| !self.mines.contains(cell))
    }

    /// A uniformly random cell that has not been revealed and is not known to
    /// be a mine.
    pub fn make_random_move(&self) -> Option<Cell> {
        self.make_random_move_with(&mut rand::thread_rng())
    }

    /// As [`KnowledgeBase::make_random_move`], drawing from `rng`.
    pub fn make_random_move_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        all_cells(self.height, self.width)
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .choose(rng)
    }

    /// Check that the knowledge base has not been fed contradictory
    /// observations.
    ///
    /// Inconsistency is reported, never repaired; sentences are checked first,
    /// then the known cells.
    pub fn check_consistency(&self) -> Result<(), InconsistencyError> {
        for sentence in &self.knowledge {
            sentence.check_consistency()?;
        }
        if self.safes.intersection(&self.mines).next().is_some() {
            return Err(InconsistencyError("Cell known to be both safe and a mine"));
        }
        Ok(())
    }
}
