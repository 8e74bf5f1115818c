/// How far a single observation is pushed through the knowledge base.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convergence {
    /// Extract, infer and clean up exactly once per observation. Facts that
    /// only become derivable after that pass wait for the next observation.
    #[default]
    SinglePass,
    /// Repeat extract/infer/cleanup until a round changes nothing, or until
    /// [`ReasonerConfig::max_rounds`] rounds have run.
    FixedPoint,
}

/// Tuning knobs for [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReasonerConfig {
    pub convergence: Convergence,
    /// Upper bound on rounds per observation under
    /// [`Convergence::FixedPoint`]. Iteration also stops as soon as the
    /// knowledge base becomes inconsistent, since contradictory sentences
    /// never stop producing new ones.
    pub max_rounds: usize,
}
impl ReasonerConfig {
    pub const DEFAULT_MAX_ROUNDS: usize = 64;

    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    /// Number of extract/infer/cleanup rounds allowed per observation
    pub(crate) fn rounds(&self) -> usize {
        match self.convergence {
            Convergence::SinglePass => 1,
            Convergence::FixedPoint => self.max_rounds.max(1),
        }
    }
}
impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            convergence: Convergence::default(),
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }
}
