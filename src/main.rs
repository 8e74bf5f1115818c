use minesweeper_kb::util::{autoplay, Board};
use minesweeper_kb::{Convergence, ReasonerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();

    let board = Board::new(concat!(
        "...*....\n",
        "........\n",
        "*.....*.\n",
        "........\n",
        "....*...\n",
        ".*......\n",
        "......*.\n",
        "..*.....\n",
    ))
    .expect("demo board is well-formed");
    println!("Board:\n{board}");

    for convergence in [Convergence::SinglePass, Convergence::FixedPoint] {
        let config = ReasonerConfig::default().with_convergence(convergence);
        let report = autoplay(&board, config, &mut StdRng::seed_from_u64(0));
        println!(
            "{convergence:?}: {:?} after {} moves, {} mines flagged",
            report.outcome,
            report.moves.len(),
            report.flagged.len(),
        );
    }
}
