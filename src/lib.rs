//! A minesweeper player built on a propositional knowledge base.
//!
//! Each revealed cell tells the player how many mines surround it. That
//! observation becomes a [`Sentence`] ("exactly `count` of these cells are
//! mines"), and the [`KnowledgeBase`] combines sentences by subset
//! elimination to prove further cells safe or mined.
//!
//! ```
//! use minesweeper_kb::{Cell, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new(1, 2);
//! kb.add_knowledge(Cell::new(0, 1), 1);
//! assert!(kb.mines().contains(&Cell::new(0, 0)));
//! assert_eq!(kb.make_safe_move(), None);
//! ```
//!
//! The [`util`] module holds a ground-truth [`util::Board`] and a driver that
//! plays a board to the end.
mod internal_util;
pub mod solve;
pub mod util;

pub use solve::{
    Cell,
    Convergence,
    InconsistencyError,
    KnowledgeBase,
    ReasonerConfig,
    Sentence,
};
