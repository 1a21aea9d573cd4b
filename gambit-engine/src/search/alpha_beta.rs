//! Minimax with Alpha-Beta pruning implementation.

use crate::coretypes::{Cp, Move, PlyKind};
use crate::error;
use crate::eval::evaluate;
use crate::oracle::RulesOracle;
use crate::search::{MoveGuard, SearchStats};

/// Properties of Alpha-Beta pruning.
/// * The maxing player can only update alpha from its children.
/// * The minning player can only update beta from its children.
/// * Alpha and Beta can only be inherited from their ancestors, and are otherwise Alpha=-Inf, Beta=Inf.
/// * Alpha is usually less than Beta. When they are equal or cross, a cut off occurs.
///
/// Searches `depth` plies below the oracle's current state and returns the best absolute score
/// for the player to move along with the move that reaches it. White is the maxing player.
///
/// Moves are tried in the oracle's order. A later move replaces the best only with a
/// strictly better score, so ties keep the earlier move. A depth of 0 or a finished game
/// returns the static evaluation and no move. The oracle is left exactly as it was found,
/// including when an error is returned.
pub fn alpha_beta<R: RulesOracle + ?Sized>(
    oracle: &mut R,
    depth: PlyKind,
    mut alpha: Cp,
    mut beta: Cp,
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
        let score = {
            let mut guard = MoveGuard::apply(oracle, legal_move)?;
            let (score, _) =
                alpha_beta(&mut *guard, depth - 1, alpha, beta, !maximizing, stats)?;
            score
        };

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(legal_move);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(legal_move);
            }
            beta = beta.min(best_score);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    Ok((best_score, best_move))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Square::*;
    use crate::fen::Fen;
    use crate::game::Game;

    fn root(game: &mut Game, depth: PlyKind) -> (Cp, Option<Move>, SearchStats) {
        let mut stats = SearchStats::default();
        let maximizing = game.side_to_move() == crate::coretypes::Color::White;
        let (score, best) =
            alpha_beta(game, depth, Cp::MIN, Cp::MAX, maximizing, &mut stats).unwrap();
        (score, best, stats)
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut game = Game::start_position();
        let (score, best, stats) = root(&mut game, 0);
        assert_eq!(score, evaluate(&game));
        assert_eq!(best, None);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn finds_back_rank_mates() {
        let mut game = Game::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let (score, best, _) = root(&mut game, 1);
        assert_eq!(best, Some(Move::new(A1, A8, None)));
        assert_eq!(score, Cp::CHECKMATE);

        let mut game = Game::parse_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let (score, best, _) = root(&mut game, 1);
        assert_eq!(best, Some(Move::new(A8, A1, None)));
        assert_eq!(score, -Cp::CHECKMATE);
    }

    #[test]
    fn terminal_root_has_no_move() {
        let mut game = Game::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let (score, best, _) = root(&mut game, 3);
        assert_eq!(score, Cp::DRAW);
        assert_eq!(best, None);
    }

    #[test]
    fn pruning_happens() {
        let mut game = Game::start_position();
        let (_, _, stats) = root(&mut game, 3);
        assert!(stats.cutoffs > 0);
        // 1 + 20 + 400 + 8902 nodes without pruning.
        assert!(stats.nodes < 9323);
    }
}
