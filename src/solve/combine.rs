use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;

use crate::solve::{Cell, Sentence};

/// Cells that some sentence forces to be mines, and cells that some sentence
/// forces to be safe.
///
/// Only reads `knowledge`; the caller applies the result afterwards.
pub(crate) fn collect_known(knowledge: &[Sentence]) -> (BTreeSet<Cell>, BTreeSet<Cell>) {
    let mut mines = BTreeSet::new();
    let mut safes = BTreeSet::new();
    for sentence in knowledge {
        mines.extend(sentence.known_mines());
        safes.extend(sentence.known_safes());
    }
    (mines, safes)
}

/// Try subset elimination on every unordered pair of sentences, returning the
/// non-trivial results that are not already part of `knowledge`.
///
/// Each new sentence is returned once, in the order it was first derived.
pub(crate) fn pairwise_inferences(knowledge: &[Sentence]) -> Vec<Sentence> {
    let inferred = knowledge
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| a.infer_from(b))
        .filter(|inferred| !inferred.is_trivial())
        .collect_vec();
    let mut seen = knowledge.iter().collect::<HashSet<_>>();

    let mut staged = Vec::new();
    for sentence in &inferred {
        if seen.insert(sentence) {
            tracing::trace!(%sentence, "inferred");
            staged.push(sentence.clone());
        }
    }
    staged
}

/// Drop every `{} = 0` sentence, returning how many were dropped.
pub(crate) fn remove_trivial(knowledge: &mut Vec<Sentence>) -> usize {
    let before = knowledge.len();
    knowledge.retain(|sentence| !sentence.is_trivial());
    before - knowledge.len()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sentence(coords: &[(usize, usize)], count: isize) -> Sentence {
        Sentence::new(coords.iter().copied().map(Cell::from), count)
    }

    #[test]
    fn collects_from_every_sentence() {
        let knowledge = vec![
            sentence(&[(0, 0)], 1),
            sentence(&[(1, 1), (1, 2)], 0),
            sentence(&[(2, 2), (2, 3)], 1),
        ];
        let (mines, safes) = collect_known(&knowledge);
        assert_eq!(mines, BTreeSet::from([Cell::new(0, 0)]));
        assert_eq!(safes, BTreeSet::from([Cell::new(1, 1), Cell::new(1, 2)]));
    }

    #[test]
    fn infers_only_from_subsets() {
        let knowledge = vec![
            sentence(&[(0, 0), (0, 1), (0, 2)], 1),
            sentence(&[(0, 0), (0, 1)], 1),
            sentence(&[(5, 5), (5, 6)], 1),
        ];
        assert_eq!(pairwise_inferences(&knowledge), vec![sentence(&[(0, 2)], 0)]);
    }

    #[test]
    fn skips_already_known_and_duplicate_inferences() {
        let knowledge = vec![
            sentence(&[(0, 0), (0, 1), (0, 2)], 1),
            sentence(&[(0, 0), (0, 1)], 1),
            sentence(&[(0, 2)], 0),
        ];
        // Two pairs would each derive something already present
        assert!(pairwise_inferences(&knowledge).is_empty());

        let knowledge = vec![
            sentence(&[(0, 0), (0, 1), (0, 2)], 1),
            sentence(&[(0, 0), (0, 1)], 1),
            sentence(&[(0, 0), (0, 1)], 1),
        ];
        assert_eq!(pairwise_inferences(&knowledge), vec![sentence(&[(0, 2)], 0)]);
    }

    #[test]
    fn second_pass_adds_nothing() {
        let mut knowledge = vec![
            sentence(&[(0, 0), (0, 1), (0, 2)], 1),
            sentence(&[(0, 0), (0, 1)], 1),
        ];
        let first = pairwise_inferences(&knowledge);
        assert_eq!(first, vec![sentence(&[(0, 2)], 0)]);
        knowledge.extend(first);
        assert!(pairwise_inferences(&knowledge).is_empty());
    }

    #[test]
    fn equal_sentences_infer_nothing() {
        let knowledge = vec![sentence(&[(0, 0), (0, 1)], 1), sentence(&[(0, 0), (0, 1)], 1)];
        assert!(pairwise_inferences(&knowledge).is_empty());
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut knowledge = vec![
            sentence(&[(0, 0)], 1),
            Sentence::trivial(),
            sentence(&[(1, 0), (1, 1)], 1),
            Sentence::trivial(),
        ];
        assert_eq!(remove_trivial(&mut knowledge), 2);
        let after = knowledge.clone();
        assert_eq!(remove_trivial(&mut knowledge), 0);
        assert_eq!(knowledge, after);
    }
}
