//! Search functions.

mod alpha_beta;
mod guard;
mod minimax;

pub use alpha_beta::*;
pub use guard::*;
pub use minimax::*;

use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::coretypes::{Color, Cp, Move, PlyKind};
use crate::error;
use crate::oracle::RulesOracle;

/// Counters gathered while searching.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct SearchStats {
    /// Number of nodes visited, the root and leaves included.
    pub nodes: u64,
    /// Number of nodes whose remaining siblings were pruned.
    pub cutoffs: u64,
}

/// The results found from running a search on some root position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move to make from the root, or None if the root is terminal or depth is 0.
    pub best_move: Option<Move>,
    /// Standard Algebraic Notation of `best_move`.
    pub san: Option<String>,
    /// The centipawn score of making the best move, with absolute Cp (+White, -Black).
    pub score: Cp,
    /// Depth in plies that was searched.
    pub depth: PlyKind,
    /// The color whose perspective the search took. White maximizes, Black minimizes.
    pub player: Color,
    pub nodes: u64,
    pub cutoffs: u64,
    /// Total time elapsed from the start to the end of a search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Get average nodes per second of search.
    pub fn nps(&self) -> f64 {
        (self.nodes as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)).round()
    }

    /// Converts the score of the search into one that is relative to search's root player.
    pub fn relative_score(&self) -> Cp {
        self.score * self.player.sign()
    }

    /// Returns the color who is leading in the search of the root position, or None if drawn.
    pub fn leading(&self) -> Option<Color> {
        self.score.leading()
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let best_move = match (&self.best_move, &self.san) {
            (Some(move_), Some(san)) => format!("{san} ({move_})"),
            (Some(move_), None) => move_.to_string(),
            _ => "none".to_string(),
        };
        let mut displayed = String::new();
        displayed.push_str("SearchResult {\n");
        displayed.push_str(&format!("    best_move: {best_move}\n"));
        displayed.push_str(&format!("    abs_score: {}\n", self.score));
        displayed.push_str(&format!("    player   : {}\n", self.player));
        displayed.push_str(&format!("    depth    : {}\n", self.depth));
        displayed.push_str(&format!("    nodes    : {}\n", self.nodes));
        displayed.push_str(&format!("    cutoffs  : {}\n", self.cutoffs));
        displayed.push_str(&format!("    nps      : {}\n", self.nps()));
        displayed.push_str(&format!(
            "    elapsed  : {}.{:03}s\n",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis()
        ));
        displayed.push_str("}\n");

        write!(f, "{displayed}")
    }
}

/// Primary search function. Searches `depth` plies from the oracle's current state
/// from the perspective of `player`: White maximizes the score, Black minimizes it.
///
/// The oracle is restored to its original state before returning, on success or error.
pub fn search<R: RulesOracle + ?Sized>(
    oracle: &mut R,
    depth: PlyKind,
    player: Color,
) -> error::Result<SearchResult> {
    let start_time = Instant::now();
    let mut stats = SearchStats::default();
    let maximizing = player == Color::White;

    let (score, best_move) = alpha_beta(oracle, depth, Cp::MIN, Cp::MAX, maximizing, &mut stats)?;
    let san = best_move.map(|move_| oracle.notation(move_)).transpose()?;

    let result = SearchResult {
        best_move,
        san,
        score,
        depth,
        player,
        nodes: stats.nodes,
        cutoffs: stats.cutoffs,
        elapsed: start_time.elapsed(),
    };
    debug!(
        depth,
        %player,
        score = %result.score,
        best_move = result.san.as_deref().unwrap_or("none"),
        nodes = result.nodes,
        cutoffs = result.cutoffs,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "search complete"
    );
    Ok(result)
}

/// Choose a move for the computer playing `computer`, and return its notation.
///
/// Returns None when there is nothing to choose: the game is over, depth is 0,
/// or it is not the computer's turn.
pub fn best_move<R: RulesOracle + ?Sized>(
    oracle: &mut R,
    depth: PlyKind,
    computer: Color,
) -> error::Result<Option<String>> {
    if oracle.side_to_move() != computer {
        debug!(%computer, "not the computer's turn to move");
        return Ok(None);
    }
    Ok(search(oracle, depth, computer)?.san)
}
