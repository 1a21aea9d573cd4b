//! Forsyth-Edwards Notation, a standard notation for describing a chess position.
//! [FEN](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation)
//!
//! Example: Starting Chess FEN
//! "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"

use std::convert::TryFrom;
use std::error;
use std::fmt::{self, Display};

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, MoveCount, Piece, PieceKind, Square};
use crate::coretypes::{File, Rank, NUM_FILES, NUM_RANKS};
use crate::position::Position;

/// The FEN of the standard chess start position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Reasons a FEN string may be rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParseFenError {
    /// FEN has fewer than 4 or more than 6 space separated fields.
    FieldCount,
    /// Placement does not have exactly 8 ranks of exactly 8 squares.
    Ranks,
    /// Placement contains a character that is not a piece or digit 1-8.
    PieceChar,
    /// Each side must have exactly one king.
    KingCount,
    /// Pawns cannot stand on the first or last rank.
    PawnOnBackRank,
    /// Side to move is not `w` or `b`.
    SideToMove,
    /// Castling field is malformed.
    Castling,
    /// En passant field is malformed or not on the rank behind a just-pushed pawn.
    EnPassant,
    /// Halfmove clock is not a number.
    HalfMoves,
    /// Fullmove counter is not a positive number.
    FullMoves,
    /// The player not to move is in check.
    OpponentInCheck,
}

impl ParseFenError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseFenError::FieldCount => "fen must have between 4 and 6 fields",
            ParseFenError::Ranks => "placement must have 8 ranks of 8 squares",
            ParseFenError::PieceChar => "placement has an unknown piece character",
            ParseFenError::KingCount => "each side must have exactly one king",
            ParseFenError::PawnOnBackRank => "pawns cannot be on the first or last rank",
            ParseFenError::SideToMove => "side to move must be w or b",
            ParseFenError::Castling => "castling must be - or a subset of KQkq",
            ParseFenError::EnPassant => "en passant must be - or a square on rank 3 or 6",
            ParseFenError::HalfMoves => "halfmove clock must be a non-negative number",
            ParseFenError::FullMoves => "fullmove counter must be a positive number",
            ParseFenError::OpponentInCheck => "side not to move is in check",
        }
    }
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl error::Error for ParseFenError {}

/// Allows conversion of a type to and from a FEN string.
pub trait Fen: Sized {
    fn parse_fen(s: &str) -> Result<Self, ParseFenError>;
    fn to_fen(&self) -> String;
}

impl Fen for Position {
    /// Parse a FEN string. The move counter fields may be omitted and default to `0 1`.
    fn parse_fen(s: &str) -> Result<Self, ParseFenError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(ParseFenError::FieldCount);
        }

        let board = parse_placement(fields[0])?;
        let player = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::SideToMove),
        };
        let castling: Castling = fields[2].parse().map_err(|_| ParseFenError::Castling)?;
        let en_passant = parse_en_passant(fields[3], player)?;
        let halfmoves = match fields.get(4) {
            Some(field) => field
                .parse::<MoveCount>()
                .map_err(|_| ParseFenError::HalfMoves)?,
            None => 0,
        };
        let fullmoves = match fields.get(5) {
            Some(field) => match field.parse::<MoveCount>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ParseFenError::FullMoves),
            },
            None => 1,
        };

        let position = Position {
            board,
            player,
            castling: sanitize_castling(&board, castling),
            en_passant,
            halfmoves,
            fullmoves,
        };

        if position.is_king_attacked(!player) {
            return Err(ParseFenError::OpponentInCheck);
        }
        Ok(position)
    }

    fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(72);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.board[Square::from((file, rank))] {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(char::from(piece));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank != Rank::R1 {
                placement.push('/');
            }
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |square| square.to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            self.player.to_char(),
            self.castling,
            en_passant,
            self.halfmoves,
            self.fullmoves
        )
    }
}

fn parse_placement(placement: &str) -> Result<Mailbox, ParseFenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(ParseFenError::Ranks);
    }

    let mut board = Mailbox::new();
    // FEN lists rank 8 first.
    for (rank_str, rank) in ranks.into_iter().zip(Rank::ALL.into_iter().rev()) {
        let mut file_idx = 0usize;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ParseFenError::PieceChar);
                }
                file_idx += skip as usize;
            } else {
                let piece = Piece::try_from(ch).map_err(|_| ParseFenError::PieceChar)?;
                let file = File::from_u8(file_idx as u8).ok_or(ParseFenError::Ranks)?;
                if piece.piece_kind == PieceKind::Pawn && (rank == Rank::R1 || rank == Rank::R8) {
                    return Err(ParseFenError::PawnOnBackRank);
                }
                board[Square::from((file, rank))] = Some(piece);
                file_idx += 1;
            }
            if file_idx > NUM_FILES {
                return Err(ParseFenError::Ranks);
            }
        }
        if file_idx != NUM_FILES {
            return Err(ParseFenError::Ranks);
        }
    }

    for color in Color::ALL {
        if board.count(Piece::new(color, PieceKind::King)) != 1 {
            return Err(ParseFenError::KingCount);
        }
    }

    Ok(board)
}

fn parse_en_passant(field: &str, player: Color) -> Result<Option<Square>, ParseFenError> {
    if field == "-" {
        return Ok(None);
    }
    let square: Square = field.parse().map_err(|_| ParseFenError::EnPassant)?;
    let expected_rank = match player {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    };
    match square.rank() == expected_rank {
        true => Ok(Some(square)),
        false => Err(ParseFenError::EnPassant),
    }
}

/// Drop castling rights whose king or rook is not on its home square.
fn sanitize_castling(board: &Mailbox, mut castling: Castling) -> Castling {
    use crate::coretypes::Square::*;
    let requirements = [
        (Castling::W_KING, E1, H1, Color::White),
        (Castling::W_QUEEN, E1, A1, Color::White),
        (Castling::B_KING, E8, H8, Color::Black),
        (Castling::B_QUEEN, E8, A8, Color::Black),
    ];
    for (rights, king, rook, color) in requirements {
        let in_place = board[king] == Some(Piece::new(color, PieceKind::King))
            && board[rook] == Some(Piece::new(color, PieceKind::Rook));
        if !in_place {
            castling.clear(rights);
        }
    }
    castling
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_start_fen() {
        let position = Position::parse_fen(START_FEN).unwrap();
        assert_eq!(position, Position::start_position());
        assert_eq!(position.to_fen(), START_FEN);
    }

    #[test]
    fn fen_round_trips() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            assert_eq!(Position::parse_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn counters_default_when_omitted() {
        let position = Position::parse_fen("4k3/8/8/8/8/8/8/4K3 b -").err();
        assert_eq!(position, Some(ParseFenError::FieldCount));

        let position = Position::parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(position.halfmoves(), 0);
        assert_eq!(position.fullmoves(), 1);
    }

    #[test]
    fn castling_rights_without_pieces_are_dropped() {
        let position = Position::parse_fen("4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
        assert_eq!(position.castling(), Castling::W_KING);
    }

    #[test]
    fn invalid_fens_are_rejected() {
        use ParseFenError::*;
        let cases = [
            ("", FieldCount),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", Ranks),
            ("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", PieceChar),
            ("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Ranks),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1", PieceChar),
            ("rnbqqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", KingCount),
            ("4k3/8/8/8/8/8/8/P3K3 w - - 0 1", PawnOnBackRank),
            (START_FEN_WITH_SIDE_X, SideToMove),
            ("4k3/8/8/8/8/8/8/4K3 w KX - 0 1", Castling),
            ("4k3/8/8/8/8/8/8/4K3 w - e3 0 1", EnPassant),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", HalfMoves),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 0", FullMoves),
            ("4k3/8/8/8/8/8/8/3KR3 w - - 0 1", OpponentInCheck),
        ];
        for (fen, expected) in cases {
            assert_eq!(Position::parse_fen(fen), Err(expected), "{fen}");
        }
    }

    const START_FEN_WITH_SIDE_X: &str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1";
}
