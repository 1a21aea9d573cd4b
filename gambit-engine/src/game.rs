//! Game structure.

use std::fmt::{self, Display};

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Move, MoveCount, MoveInfo, PieceKind};
use crate::error::{self, ErrorKind};
use crate::fen::{Fen, ParseFenError};
use crate::movelist::MoveList;
use crate::notation;
use crate::oracle::RulesOracle;
use crate::position::Position;
use crate::zobrist::{HashKind, ZobristTable};

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_HALFMOVES: MoveCount = 100;

/// A legal move together with how it reads on a board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveDetail {
    pub move_: Move,
    pub san: String,
    pub piece_kind: PieceKind,
    pub is_capture: bool,
}

/// Game contains information for an in progress game:
/// the position the game started from, every move played since,
/// and the hash of every position reached, for repetition detection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    base_position: Position,
    position: Position,
    history: Vec<MoveInfo>,
    /// Hash of every position in the game, `hashes[0]` is the base position.
    hashes: Vec<HashKind>,
}

impl Game {
    /// Create a new Game from a base position and a sequence of moves.
    /// If a move in the sequence is illegal, Err is returned.
    pub fn new(base_position: Position, moves: &[Move]) -> error::Result<Self> {
        let mut game = Self::from(base_position);
        for move_ in moves {
            game.play(*move_)?;
        }
        Ok(game)
    }

    /// Create a new game in the standard chess start position.
    pub fn start_position() -> Self {
        Self::from(Position::start_position())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn base_position(&self) -> &Position {
        &self.base_position
    }

    /// Moves played since the base position, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(MoveInfo::move_)
    }

    /// Number of moves played since the base position.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Play a legal move.
    pub fn play(&mut self, move_: Move) -> error::Result<MoveInfo> {
        if !self.position.is_legal_move(move_) {
            return Err((ErrorKind::GameIllegalMove, move_).into());
        }
        let move_info = self.position.do_move(move_);
        self.history.push(move_info);
        self.hashes
            .push(ZobristTable::global().generate_hash(&self.position));
        Ok(move_info)
    }

    /// Parse move text, coordinate or SAN, and play it.
    pub fn play_str(&mut self, text: &str) -> error::Result<MoveInfo> {
        let move_ = notation::parse_move(&self.position, text)?;
        self.play(move_)
    }

    /// Take back the last played move.
    pub fn undo(&mut self) -> error::Result<Move> {
        let move_info = self.history.pop().ok_or(ErrorKind::GameNoMoveToUndo)?;
        self.hashes.pop();
        self.position.undo_move(move_info);
        Ok(move_info.move_())
    }

    /// The current position has occurred at least three times in the game.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = match self.hashes.last() {
            Some(hash) => *hash,
            None => return false,
        };
        // Only positions since the last irreversible move can repeat.
        let reversible = self
            .history
            .iter()
            .rev()
            .take_while(|move_info| !move_info.is_unrepeatable())
            .count();
        let start = self.hashes.len() - 1 - reversible;

        self.hashes[start..]
            .iter()
            .filter(|&&hash| hash == current)
            .count()
            >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
    }

    /// Every legal move in the current position with its SAN.
    pub fn legal_moves_verbose(&self) -> Vec<MoveDetail> {
        let board = self.position.board();
        notation::legal_san(&self.position)
            .into_iter()
            .filter_map(|(move_, san)| {
                let piece = board[move_.from]?;
                let is_capture = board[move_.to].is_some()
                    || (piece.piece_kind == PieceKind::Pawn
                        && self.position.en_passant() == Some(move_.to));
                Some(MoveDetail {
                    move_,
                    san,
                    piece_kind: piece.piece_kind,
                    is_capture,
                })
            })
            .collect()
    }
}

/// Convert a position to a Game with no past moves.
impl From<Position> for Game {
    fn from(position: Position) -> Self {
        Self {
            base_position: position,
            position,
            history: Vec::new(),
            hashes: vec![ZobristTable::global().generate_hash(&position)],
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::start_position()
    }
}

/// A game parsed from FEN has no past moves.
impl Fen for Game {
    fn parse_fen(s: &str) -> Result<Self, ParseFenError> {
        Position::parse_fen(s).map(Self::from)
    }
    fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

impl RulesOracle for Game {
    fn legal_moves(&self) -> MoveList {
        self.position.get_legal_moves()
    }

    fn apply_move(&mut self, move_: Move) -> error::Result<()> {
        self.play(move_).map(|_| ())
    }

    fn undo_last_move(&mut self) -> Option<Move> {
        self.undo().ok()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_threefold_repetition(&self) -> bool {
        Game::is_threefold_repetition(self)
    }

    fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    fn is_draw(&self) -> bool {
        self.is_stalemate()
            || self.is_insufficient_material()
            || Game::is_threefold_repetition(self)
            || self.is_fifty_move_draw()
    }

    /// Checkmate and stalemate both leave the player to move without a legal move,
    /// so one move generation answers for the two of them.
    fn is_game_over(&self) -> bool {
        !self.position.has_legal_move()
            || self.is_insufficient_material()
            || Game::is_threefold_repetition(self)
            || self.is_fifty_move_draw()
    }

    fn side_to_move(&self) -> Color {
        self.position.player()
    }

    fn board_snapshot(&self) -> Mailbox {
        *self.position.board()
    }

    fn notation(&self, move_: Move) -> error::Result<String> {
        notation::to_san(&self.position, move_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Square::*;

    fn shuffle(game: &mut Game) {
        for text in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            game.play_str(text).unwrap();
        }
    }

    #[test]
    fn play_and_undo_restore_game() {
        let mut game = Game::start_position();
        let before = game.clone();
        game.play_str("e4").unwrap();
        game.play_str("e7e5").unwrap();
        assert_eq!(game.ply(), 2);
        assert_eq!(game.undo().unwrap(), Move::new(E7, E5, None));
        assert_eq!(game.undo().unwrap(), Move::new(E2, E4, None));
        assert_eq!(game, before);
        assert_eq!(game.undo().unwrap_err().kind(), ErrorKind::GameNoMoveToUndo);
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = Game::start_position();
        let before = game.clone();
        let err = game.apply_move(Move::new(E2, E5, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameIllegalMove);
        assert_eq!(game, before);
    }

    #[test]
    fn knight_shuffle_is_threefold() {
        let mut game = Game::start_position();
        shuffle(&mut game);
        assert!(!game.is_threefold_repetition());
        shuffle(&mut game);
        assert!(game.is_threefold_repetition());
        assert!(RulesOracle::is_draw(&game));
        assert!(game.is_game_over());

        game.undo().unwrap();
        assert!(!game.is_threefold_repetition());
    }

    #[test]
    fn fifty_move_rule() {
        let mut game = Game::parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
        assert!(!game.is_draw());
        game.play_str("Ra2").unwrap();
        assert!(game.is_fifty_move_draw());
        assert!(game.is_draw());
        assert!(!game.is_checkmate());
    }

    #[test]
    fn verbose_moves_carry_san() {
        let game = Game::start_position();
        let verbose = game.legal_moves_verbose();
        assert_eq!(verbose.len(), 20);
        assert!(verbose.iter().any(|detail| detail.san == "Nc3"));
        assert!(verbose.iter().all(|detail| !detail.is_capture));
    }

    #[test]
    fn oracle_reports_side_and_board() {
        let mut game = Game::start_position();
        assert_eq!(game.side_to_move(), Color::White);
        game.apply_move(Move::new(D2, D4, None)).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.board_snapshot()[D4].is_some());
        assert_eq!(game.undo_last_move(), Some(Move::new(D2, D4, None)));
        assert_eq!(game.undo_last_move(), None);
    }
}
