//! The rules oracle, the only view of chess the evaluator and searcher rely on.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Move};
use crate::error;
use crate::movelist::MoveList;

/// A stateful game of chess that knows the rules.
///
/// Moves are applied and undone in strict stack order. The searcher applies a move,
/// explores beneath it, and undoes it before trying the next, so after any search
/// the oracle is back where it started.
pub trait RulesOracle {
    /// All legal moves for the side to move.
    fn legal_moves(&self) -> MoveList;

    /// Play a legal move. Illegal moves return an error and leave the state unchanged.
    fn apply_move(&mut self, move_: Move) -> error::Result<()>;

    /// Take back the most recent applied move, returning it.
    /// Returns None if no move has been applied.
    fn undo_last_move(&mut self) -> Option<Move>;

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_threefold_repetition(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;

    /// Any drawn state: stalemate, insufficient material, threefold repetition,
    /// or the fifty-move rule.
    fn is_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn side_to_move(&self) -> Color;

    /// The current piece placement.
    fn board_snapshot(&self) -> Mailbox;

    /// Human readable notation of a legal move in the current state.
    fn notation(&self, move_: Move) -> error::Result<String>;
}
