//! Minimax implementation.

use crate::coretypes::{Cp, Move, PlyKind};
use crate::error;
use crate::eval::evaluate;
use crate::oracle::RulesOracle;
use crate::search::{MoveGuard, SearchStats};

/// Exhaustive minimax: visits every node to `depth` with no pruning.
/// Selects moves with the same rules as `alpha_beta`, so both always agree on the
/// best move and score, at a much higher node count.
pub fn minimax<R: RulesOracle + ?Sized>(
    oracle: &mut R,
    depth: PlyKind,
    maximizing: bool,
    stats: &mut SearchStats,
) -> error::Result<(Cp, Option<Move>)> {
    stats.nodes += 1;

    if depth == 0 || oracle.is_game_over() {
        return Ok((evaluate(oracle), None));
    }

    let mut best_score = match maximizing {
        true => Cp::MIN,
        false => Cp::MAX,
    };
    let mut best_move = None;

    for legal_move in oracle.legal_moves() {
        let mut guard = MoveGuard::apply(oracle, legal_move)?;
        let (score, _) = minimax(&mut *guard, depth - 1, !maximizing, stats)?;

        let is_better = match maximizing {
            true => score > best_score,
            false => score < best_score,
        };
        if is_better {
            best_score = score;
            best_move = Some(legal_move);
        }
    }

    Ok((best_score, best_move))
}
