use std::collections::BTreeSet;

use itertools::Itertools;
use minesweeper_kb::util::Board;
use minesweeper_kb::{Cell, Convergence, KnowledgeBase, ReasonerConfig, Sentence};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Cells of `board` that are mines with at least one safe neighbour; these
/// are exactly the mines any observation can ever mention.
fn visible_mines(board: &Board) -> BTreeSet<Cell> {
    let kb = KnowledgeBase::new(board.height(), board.width());
    board
        .mines()
        .iter()
        .copied()
        .filter(|&mine| kb.nearby_cells(mine).iter().any(|&n| !board.is_mine(n)))
        .collect()
}

fn safe_cells(board: &Board) -> Vec<Cell> {
    (0..board.height())
        .cartesian_product(0..board.width())
        .map(Cell::from)
        .filter(|&cell| !board.is_mine(cell))
        .collect()
}

#[test]
fn observing_every_safe_cell_finds_every_visible_mine() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::random(7, 7, 9, &mut rng).unwrap();
        let mut order = safe_cells(&board);
        order.shuffle(&mut rng);

        for convergence in [Convergence::SinglePass, Convergence::FixedPoint] {
            let config = ReasonerConfig::default().with_convergence(convergence);
            let mut kb = KnowledgeBase::with_config(board.height(), board.width(), config);
            for &cell in &order {
                kb.add_knowledge(cell, board.nearby_mines(cell));
            }
            assert_eq!(kb.mines(), &visible_mines(&board), "seed {seed}");
            assert_eq!(kb.make_safe_move(), None, "seed {seed}");
            assert_eq!(kb.check_consistency(), Ok(()), "seed {seed}");
        }
    }
}

#[test]
fn partial_observations_only_deduce_truths() {
    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::random(6, 6, 6, &mut rng).unwrap();
        let mut order = safe_cells(&board);
        order.shuffle(&mut rng);
        order.truncate(order.len() / 2);

        let mut single = KnowledgeBase::new(board.height(), board.width());
        let mut fixed = KnowledgeBase::with_config(
            board.height(),
            board.width(),
            ReasonerConfig::default().with_convergence(Convergence::FixedPoint),
        );
        for &cell in &order {
            single.add_knowledge(cell, board.nearby_mines(cell));
            fixed.add_knowledge(cell, board.nearby_mines(cell));
        }
        for kb in [&single, &fixed] {
            assert!(kb.mines().iter().all(|&cell| board.is_mine(cell)), "seed {seed}");
            assert!(kb.safes().iter().all(|&cell| !board.is_mine(cell)), "seed {seed}");
            assert_eq!(kb.check_consistency(), Ok(()), "seed {seed}");
        }
    }
}

#[test]
fn two_by_two_single_mine() {
    let board = Board::new("..\n.*").unwrap();
    let mut kb = KnowledgeBase::new(2, 2);
    for cell in [Cell::new(1, 0), Cell::new(0, 0), Cell::new(0, 1)] {
        kb.add_knowledge(cell, board.nearby_mines(cell));
    }
    assert_eq!(kb.mines(), &BTreeSet::from([Cell::new(1, 1)]));
    assert_eq!(kb.make_safe_move(), None);
    assert!(kb.knowledge().iter().all(|s| s != &Sentence::trivial()));
}
