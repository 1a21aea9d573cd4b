//! Holds Position struct, the most important data structure for the engine.
//! Position represents a chess position.

use std::fmt::{self, Display};

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, Move, MoveCount, MoveInfo, MoveKind, Piece, Square};
use crate::coretypes::{Color::*, PieceKind::*};
use crate::fen::Fen;
use crate::movegen as mg;
use crate::movelist::MoveList;

/// struct Position
/// A complete data set that can represent any chess position.
/// # Members:
/// * board - a square-centric container of every piece on the board.
/// * player - Color of player whose turn it is.
/// * castling - Castling rights for both players.
/// * en_passant - Indicates if en passant is possible, and for which square.
/// * halfmoves - Tracker for 50 move draw rule. Resets after capture/pawn move.
/// * fullmoves - Starts at 1, increments after each black player's move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub(crate) board: Mailbox,
    pub(crate) player: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
}

impl Position {
    /// Standard chess start position.
    pub fn start_position() -> Self {
        Self {
            board: Mailbox::start_position(),
            player: Color::White,
            castling: Castling::start_position(),
            en_passant: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Const getters.
    pub fn board(&self) -> &Mailbox {
        &self.board
    }
    pub fn player(&self) -> Color {
        self.player
    }
    pub fn castling(&self) -> Castling {
        self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub fn fullmoves(&self) -> MoveCount {
        self.fullmoves
    }

    /// Classify a move in context of this position, before it is applied.
    fn move_kind(&self, move_: Move, moving: Piece) -> MoveKind {
        let file_distance = (move_.from.file_u8() as i8 - move_.to.file_u8() as i8).abs();

        if moving.piece_kind == King && file_distance == 2 {
            MoveKind::Castle
        } else if let Some(captured) = self.board[move_.to] {
            MoveKind::Capture(captured.piece_kind)
        } else if moving.piece_kind == Pawn && Some(move_.to) == self.en_passant {
            MoveKind::EnPassant
        } else {
            MoveKind::Quiet
        }
    }

    /// Rook origin and target squares for a castling king move.
    fn castling_rook(king_to: Square) -> (Square, Square) {
        match king_to {
            Square::G1 => (Square::H1, Square::F1),
            Square::C1 => (Square::A1, Square::D1),
            Square::G8 => (Square::H8, Square::F8),
            _ => (Square::A8, Square::D8),
        }
    }

    /// Square of the pawn removed by an en passant capture landing on `to`.
    fn en_passant_victim(to: Square, capturer: Color) -> Square {
        to.offset(0, -capturer.pawn_direction())
            .expect("en passant target is never on a back rank")
    }

    /// Apply a move to self, in place, assuming the move is legal.
    /// Returns the MoveInfo which can restore this position with `undo_move`.
    ///
    /// # Panics
    /// If the player to move has no piece on the move's origin square.
    pub fn do_move(&mut self, move_: Move) -> MoveInfo {
        let moving = self.board[move_.from].expect("do_move requires a piece on from square");
        debug_assert_eq!(moving.color, self.player);

        let move_kind = self.move_kind(move_, moving);
        let move_info = MoveInfo {
            move_,
            piece_kind: moving.piece_kind,
            move_kind,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmoves: self.halfmoves,
        };

        self.board[move_.from] = None;
        self.board[move_.to] = Some(match move_.promotion {
            Some(promotion) => Piece::new(self.player, promotion),
            None => moving,
        });

        match move_kind {
            MoveKind::Castle => {
                let (rook_from, rook_to) = Self::castling_rook(move_.to);
                self.board[rook_to] = self.board[rook_from].take();
            }
            MoveKind::EnPassant => {
                self.board[Self::en_passant_victim(move_.to, self.player)] = None;
            }
            MoveKind::Capture(_) | MoveKind::Quiet => (),
        }

        self.castling
            .clear(Castling::lost_on(move_.from) | Castling::lost_on(move_.to));

        // Only a double pawn push creates an en passant target, directly behind the pawn.
        let rank_distance = (move_.from.rank_u8() as i8 - move_.to.rank_u8() as i8).abs();
        self.en_passant = match moving.piece_kind == Pawn && rank_distance == 2 {
            true => move_.from.offset(0, self.player.pawn_direction()),
            false => None,
        };

        if move_info.is_unrepeatable() {
            self.halfmoves = 0;
        } else {
            self.halfmoves += 1;
        }
        if self.player == Black {
            self.fullmoves += 1;
        }
        self.player = !self.player;

        move_info
    }

    /// Undo the application of a move, in place.
    /// `move_info` must be the value returned by the most recent `do_move`.
    pub fn undo_move(&mut self, move_info: MoveInfo) {
        let move_ = move_info.move_;
        self.player = !self.player;
        if self.player == Black {
            self.fullmoves -= 1;
        }
        let mover = self.player;

        self.board[move_.from] = Some(Piece::new(mover, move_info.piece_kind));
        self.board[move_.to] = match move_info.move_kind {
            MoveKind::Capture(captured) => Some(Piece::new(!mover, captured)),
            _ => None,
        };

        match move_info.move_kind {
            MoveKind::Castle => {
                let (rook_from, rook_to) = Self::castling_rook(move_.to);
                self.board[rook_from] = self.board[rook_to].take();
            }
            MoveKind::EnPassant => {
                self.board[Self::en_passant_victim(move_.to, mover)] =
                    Some(Piece::new(!mover, Pawn));
            }
            MoveKind::Capture(_) | MoveKind::Quiet => (),
        }

        self.castling = move_info.castling;
        self.en_passant = move_info.en_passant;
        self.halfmoves = move_info.halfmoves;
    }

    /// Generates a new Position from applying move on current Position.
    pub fn make_move(&self, move_: Move) -> Self {
        let mut position = *self;
        position.do_move(move_);
        position
    }

    /// Returns true if `color`'s king is attacked. A missing king is never in check.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.board
            .king_square(color)
            .map_or(false, |king| mg::is_attacked(&self.board, king, !color))
    }

    /// Returns true if active player's king is in any check.
    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.player)
    }

    /// A pseudo-legal move is legal if it does not leave the mover's king attacked.
    fn keeps_king_safe(&self, move_: Move) -> bool {
        let mut scratch = *self;
        scratch.do_move(move_);
        !scratch.is_king_attacked(self.player)
    }

    /// Returns a list of all legal moves for active player.
    pub fn get_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        mg::pseudo_legal_moves(self, &mut moves);
        moves.retain(|move_| self.keeps_king_safe(*move_));
        moves
    }

    /// Returns true if the active player has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        let mut moves = MoveList::new();
        mg::pseudo_legal_moves(self, &mut moves);
        moves.into_iter().any(|move_| self.keeps_king_safe(move_))
    }

    /// Checks if given move is legal for current position.
    /// Only the moves of the piece on the move's origin square are generated.
    pub fn is_legal_move(&self, move_: Move) -> bool {
        let mut moves = MoveList::new();
        mg::pseudo_legal_moves_from(self, move_.from, &mut moves);
        moves.contains(&move_) && self.keeps_king_safe(move_)
    }

    /// Returns true if the active player is in check and has no legal moves.
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_move()
    }

    /// Returns true if the active player is not in check and has no legal moves.
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_move()
    }

    /// Returns true if neither player can possibly deliver checkmate:
    /// K v K, K and one minor piece v K, or kings with bishops that all share a square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];

        for (square, piece) in self.board.pieces() {
            match piece.piece_kind {
                King => (),
                Knight => {
                    minors += 1;
                    knights += 1;
                }
                Bishop => {
                    minors += 1;
                    bishop_colors[square.is_dark() as usize] = true;
                }
                Pawn | Rook | Queen => return false,
            }
        }

        let bishops_share_color = knights == 0 && bishop_colors[0] != bishop_colors[1];
        minors <= 1 || bishops_share_color
    }

    /// Returns true if en passant is set and a pawn of the player to move can actually capture there.
    /// Positions that differ only in an uncapturable en passant square repeat each other.
    pub fn is_en_passant_capturable(&self) -> bool {
        let ep = match self.en_passant {
            Some(ep) => ep,
            None => return false,
        };
        let pawn = Some(Piece::new(self.player, Pawn));
        [-1, 1].into_iter().any(|file_delta| {
            ep.offset(file_delta, -self.player.pawn_direction())
                .map_or(false, |from| self.board[from] == pawn)
        })
    }

    /// Returns the position mirrored across the board's horizontal axis with colors swapped,
    /// including the player to move. Every evaluation of it is negated.
    pub fn color_flip(&self) -> Self {
        Self {
            board: self.board.color_flip(),
            player: !self.player,
            castling: self.castling.color_flip(),
            en_passant: self.en_passant.map(|square| square.flip_rank()),
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }
}

/// Defaults to standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

/// Displays pretty-printed chess board and Fen string representing Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n Fen: {}\n", self.board, self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::PieceKind;
    use crate::coretypes::Square::*;

    #[test]
    fn pretty_print_position() {
        let start_pos = Position::start_position();
        let printed = start_pos.to_string();
        assert!(printed.contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    }

    #[test]
    fn do_move_with_legal_move() {
        let move1 = Move::new(E2, E4, None);
        let mut position = Position::start_position();
        let info = position.do_move(move1);
        assert_eq!(position.board[E4], Some(Piece::new(White, Pawn)));
        assert_eq!(position.board[E2], None);
        assert_eq!(position.en_passant, Some(E3));
        assert_eq!(position.player, Black);
        assert_eq!(info.move_kind(), MoveKind::Quiet);
    }

    #[test]
    fn undo_restores_every_special_move() {
        let cases = [
            // Castling both sides.
            ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10", Move::new(E1, G1, None)),
            ("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10", Move::new(E8, C8, None)),
            // En passant.
            ("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", Move::new(E5, D6, None)),
            // Capture promotion.
            ("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Move::new(A7, B8, Some(PieceKind::Knight))),
            // Rook capture removing castling rights.
            ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Move::new(A1, A8, None)),
        ];

        for (fen, move_) in cases {
            let original = Position::parse_fen(fen).unwrap();
            assert!(original.is_legal_move(move_), "{move_} illegal in {fen}");
            let mut position = original;
            let info = position.do_move(move_);
            assert_ne!(position, original);
            position.undo_move(info);
            assert_eq!(position, original, "{move_} not restored in {fen}");
        }
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        position.do_move(Move::new(E1, G1, None));
        assert_eq!(position.board[F1], Some(Piece::new(White, Rook)));
        assert_eq!(position.board[H1], None);
        assert!(!position.castling.has(Castling::W_KING));
        assert!(!position.castling.has(Castling::W_QUEEN));
        assert!(position.castling.has(Castling::B_SIDE));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // The knight on e2 is pinned by the rook on e8.
        let position = Position::parse_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(!position.is_legal_move(Move::new(E2, C3, None)));
        assert!(position.is_legal_move(Move::new(E1, D1, None)));
        assert!(position
            .get_legal_moves()
            .iter()
            .all(|move_| move_.from != E2));
    }

    #[test]
    fn checkmate_and_stalemate() {
        let mate = Position::parse_fen("k7/1r6/8/8/4B3/8/1q6/K7 w - - 0 1").unwrap();
        assert!(mate.is_in_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());

        let stale = Position::parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stale.is_in_check());
        assert!(stale.is_stalemate());
        assert!(!stale.is_checkmate());
    }

    #[test]
    fn insufficient_material_cases() {
        let insufficient = [
            "8/8/4k3/8/8/3K4/8/8 w - - 0 1",
            "8/8/4k3/8/8/3KB3/8/8 w - - 0 1",
            "8/8/4k3/8/8/3KN3/8/8 b - - 0 1",
            "8/2b5/4k3/8/8/3K4/3B4/8 w - - 0 1",
        ];
        let sufficient = [
            "8/8/4k3/8/8/3KP3/8/8 w - - 0 1",
            "8/3b4/4k3/8/8/3K4/3B4/8 w - - 0 1",
            "8/8/4k3/8/8/3KNN2/8/8 w - - 0 1",
            "8/8/4k3/8/8/3K4/3R4/8 w - - 0 1",
        ];
        for fen in insufficient {
            assert!(Position::parse_fen(fen).unwrap().is_insufficient_material(), "{fen}");
        }
        for fen in sufficient {
            assert!(!Position::parse_fen(fen).unwrap().is_insufficient_material(), "{fen}");
        }
    }

    #[test]
    fn color_flip_twice_is_identity() {
        let position =
            Position::parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w Kq - 0 1")
                .unwrap();
        let flipped = position.color_flip();
        assert_eq!(flipped.player, Black);
        assert!(flipped.castling.has(Castling::B_KING));
        assert!(flipped.castling.has(Castling::W_QUEEN));
        assert_eq!(flipped.color_flip(), position);
        assert_eq!(
            flipped.get_legal_moves().len(),
            position.get_legal_moves().len()
        );
    }
}
