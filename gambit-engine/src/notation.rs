//! Move notation: Standard Algebraic Notation output, and parsing of user move text.
//!
//! Input may be coordinate notation (`e2e4`, `e7e8q`) or SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`).

use crate::coretypes::{Move, PieceKind, Square};
use crate::error::{ErrorKind, Result};
use crate::movelist::MoveList;
use crate::position::Position;

/// Returns the SAN text of a legal move in `position`, check and mate suffixes included.
pub fn to_san(position: &Position, move_: Move) -> Result<String> {
    let legal_moves = position.get_legal_moves();
    if !legal_moves.contains(&move_) {
        return Err((ErrorKind::GameIllegalMove, move_).into());
    }
    Ok(san_unchecked(position, &legal_moves, move_))
}

/// SAN of every legal move, in move generation order.
pub fn legal_san(position: &Position) -> Vec<(Move, String)> {
    let legal_moves = position.get_legal_moves();
    legal_moves
        .iter()
        .map(|&move_| (move_, san_unchecked(position, &legal_moves, move_)))
        .collect()
}

fn san_unchecked(position: &Position, legal_moves: &MoveList, move_: Move) -> String {
    let mut san = String::with_capacity(8);
    let board = position.board();
    // A legal move always starts on one of the mover's pieces.
    let piece_kind = match board[move_.from] {
        Some(piece) => piece.piece_kind,
        None => return move_.to_string(),
    };
    let file_distance = (move_.from.file_u8() as i8 - move_.to.file_u8() as i8).abs();

    if piece_kind == PieceKind::King && file_distance == 2 {
        san.push_str(match move_.to.file_u8() > move_.from.file_u8() {
            true => "O-O",
            false => "O-O-O",
        });
    } else if piece_kind == PieceKind::Pawn {
        let is_capture = file_distance == 1;
        if is_capture {
            san.push(move_.from.file().to_char());
            san.push('x');
        }
        san.push_str(&move_.to.to_string());
        if let Some(promotion) = move_.promotion {
            san.push('=');
            san.push(promotion.to_char());
        }
    } else {
        san.push(piece_kind.to_char());
        san.push_str(&disambiguation(position, legal_moves, move_, piece_kind));
        if board[move_.to].is_some() {
            san.push('x');
        }
        san.push_str(&move_.to.to_string());
    }

    let after = position.make_move(move_);
    if after.is_checkmate() {
        san.push('#');
    } else if after.is_in_check() {
        san.push('+');
    }
    san
}

/// Origin file, rank, or both, as needed to tell this move apart from other moves
/// of the same piece kind to the same square.
fn disambiguation(
    position: &Position,
    legal_moves: &MoveList,
    move_: Move,
    piece_kind: PieceKind,
) -> String {
    let rivals: Vec<Square> = legal_moves
        .iter()
        .filter(|other| other.to == move_.to && other.from != move_.from)
        .filter(|other| {
            position.board()[other.from].map(|piece| piece.piece_kind) == Some(piece_kind)
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != move_.from.file()) {
        move_.from.file().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != move_.from.rank()) {
        move_.from.rank().to_string()
    } else {
        move_.from.to_string()
    }
}

/// Parse move text into a legal move of `position`.
/// Coordinate notation is tried first, then SAN. Check marks and annotations are ignored.
pub fn parse_move(position: &Position, text: &str) -> Result<Move> {
    let text = text.trim();
    if let Ok(move_) = text.parse::<Move>() {
        return match position.is_legal_move(move_) {
            true => Ok(move_),
            false => Err((ErrorKind::GameIllegalMove, move_).into()),
        };
    }

    let wanted = normalize_san(text);
    if wanted.is_empty() {
        return Err((ErrorKind::ParseMoveMalformed, text).into());
    }
    let mut matches = legal_san(position)
        .into_iter()
        .filter(|(_, san)| normalize_san(san) == wanted)
        .map(|(move_, _)| move_);

    match (matches.next(), matches.next()) {
        (Some(move_), None) => Ok(move_),
        (Some(_), Some(_)) => Err((ErrorKind::ParseMoveAmbiguous, text).into()),
        (None, _) if is_san_shaped(&wanted) => Err((ErrorKind::GameIllegalMove, text).into()),
        (None, _) => Err((ErrorKind::ParseMoveMalformed, text).into()),
    }
}

/// True if normalized `san` reads as a move, legal or not:
/// castling, or `[piece][file][rank][x]<square>[promotion]`.
fn is_san_shaped(san: &str) -> bool {
    if san == "O-O" || san == "O-O-O" {
        return true;
    }
    let chars: Vec<char> = san.chars().collect();
    let chars = match chars.as_slice() {
        [rest @ .., 'Q' | 'R' | 'B' | 'N'] => rest,
        all => all,
    };
    let [prefix @ .., 'a'..='h', '1'..='8'] = chars else {
        return false;
    };
    let prefix = match prefix {
        ['K' | 'Q' | 'R' | 'B' | 'N', rest @ ..] => rest,
        _ => prefix,
    };
    let prefix = match prefix {
        [rest @ .., 'x'] => rest,
        _ => prefix,
    };
    matches!(prefix, [] | ['a'..='h'] | ['1'..='8'] | ['a'..='h', '1'..='8'])
}

/// Strips check marks, annotations and promotion `=`, and accepts zeros in castling.
fn normalize_san(san: &str) -> String {
    san.trim_end_matches(|ch| matches!(ch, '+' | '#' | '!' | '?'))
        .replace('0', "O")
        .replace('=', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::PieceKind::*;
    use crate::coretypes::Square::*;
    use crate::fen::Fen;

    fn san(fen: &str, move_: &str) -> String {
        let position = Position::parse_fen(fen).unwrap();
        to_san(&position, move_.parse().unwrap()).unwrap()
    }

    #[test]
    fn san_of_simple_moves() {
        let start = Position::start_position();
        assert_eq!(to_san(&start, Move::new(E2, E4, None)).unwrap(), "e4");
        assert_eq!(to_san(&start, Move::new(G1, F3, None)).unwrap(), "Nf3");
        assert!(to_san(&start, Move::new(E2, E5, None)).is_err());
    }

    #[test]
    fn san_of_captures_castles_and_promotions() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(san(fen, "e1g1"), "O-O");
        assert_eq!(san(fen, "e1c1"), "O-O-O");
        assert_eq!(san(fen, "d5e6"), "dxe6");
        assert_eq!(san(fen, "e2a6"), "Bxa6");
        assert_eq!(san("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8q"), "a8=Q");
        assert_eq!(san("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", "e5d6"), "exd6");
    }

    #[test]
    fn san_disambiguates() {
        // Knights on b1 and f1 may both go to d2.
        assert_eq!(san("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks on a1 and a5 may both go to a3.
        assert_eq!(san("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
    }

    #[test]
    fn san_marks_check_and_mate() {
        assert_eq!(san("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1a8"), "Ra8#");
        assert_eq!(san("6k1/8/8/8/8/8/8/R5K1 w - - 0 1", "a1a8"), "Ra8+");
    }

    #[test]
    fn parse_coordinate_and_san() {
        let start = Position::start_position();
        assert_eq!(parse_move(&start, "e2e4").unwrap(), Move::new(E2, E4, None));
        assert_eq!(parse_move(&start, "Nf3").unwrap(), Move::new(G1, F3, None));
        assert_eq!(parse_move(&start, " d4 ").unwrap(), Move::new(D2, D4, None));
        assert_eq!(
            parse_move(&start, "e2e5").unwrap_err().kind(),
            ErrorKind::GameIllegalMove
        );
        assert_eq!(
            parse_move(&start, "Qh5").unwrap_err().kind(),
            ErrorKind::GameIllegalMove
        );
        assert_eq!(
            parse_move(&start, "hello").unwrap_err().kind(),
            ErrorKind::ParseMoveMalformed
        );

        let promo = Position::parse_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(parse_move(&promo, "a8=N").unwrap(), Move::new(A7, A8, Some(Knight)));
        assert_eq!(parse_move(&promo, "a8Q+").unwrap(), Move::new(A7, A8, Some(Queen)));

        let castle = Position::parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(parse_move(&castle, "0-0").unwrap(), Move::new(E1, G1, None));
    }

    #[test]
    fn well_formed_but_illegal_san_is_illegal_move() {
        let position = Position::parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        for text in ["Kd8", "O-O-O", "Rxh8+", "exd5", "Nbd7", "R1h2", "e8=Q"] {
            assert_eq!(
                parse_move(&position, text).unwrap_err().kind(),
                ErrorKind::GameIllegalMove,
                "{text}"
            );
        }
        for text in ["Kz9", "xx", "Pe4", "e9", "Rh1h2h3"] {
            assert_eq!(
                parse_move(&position, text).unwrap_err().kind(),
                ErrorKind::ParseMoveMalformed,
                "{text}"
            );
        }
    }
}
