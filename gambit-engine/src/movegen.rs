//! Mailbox move generation.
//!
//! Moves are generated pseudo-legally, by walking piece offsets on the 8x8 board,
//! and are filtered for king safety by `Position`, which plays each candidate on a
//! scratch copy of itself.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Castling, Color, Move, Piece, PieceKind, PieceKind::*, Square, Square::*};
use crate::movelist::MoveList;
use crate::position::Position;

/// (file, rank) deltas.
type Offset = (i8, i8);

#[rustfmt::skip]
const KNIGHT_JUMPS: [Offset; 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
#[rustfmt::skip]
const KING_STEPS: [Offset; 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];
const ORTHOGONALS: [Offset; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONALS: [Offset; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Returns true if any piece of color `by` attacks `square`.
pub fn is_attacked(board: &Mailbox, square: Square, by: Color) -> bool {
    // An attacking pawn stands one rank behind the square, from its own point of view.
    let pawn = Some(Piece::new(by, Pawn));
    for file_delta in [-1, 1] {
        if let Some(from) = square.offset(file_delta, -by.pawn_direction()) {
            if board[from] == pawn {
                return true;
            }
        }
    }

    let knight = Some(Piece::new(by, Knight));
    if leaper_squares(square, &KNIGHT_JUMPS).any(|from| board[from] == knight) {
        return true;
    }
    let king = Some(Piece::new(by, King));
    if leaper_squares(square, &KING_STEPS).any(|from| board[from] == king) {
        return true;
    }

    slider_hits(board, square, &ORTHOGONALS, by, Rook)
        || slider_hits(board, square, &DIAGONALS, by, Bishop)
}

/// True if the first piece met along any direction is a `by` queen or `slider`.
fn slider_hits(
    board: &Mailbox,
    square: Square,
    directions: &[Offset],
    by: Color,
    slider: PieceKind,
) -> bool {
    directions.iter().any(|&(df, dr)| {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            if let Some(piece) = board[next] {
                return piece.color == by
                    && (piece.piece_kind == slider || piece.piece_kind == Queen);
            }
            current = next;
        }
        false
    })
}

fn leaper_squares<'a>(square: Square, offsets: &'a [Offset]) -> impl Iterator<Item = Square> + 'a {
    offsets
        .iter()
        .filter_map(move |&(df, dr)| square.offset(df, dr))
}

/// Generate all pseudo-legal moves for the player to move.
/// Moves are ordered by origin square from A1 to H8, castling last.
pub fn pseudo_legal_moves(position: &Position, moves: &mut MoveList) {
    for from in Square::ALL {
        match position.board[from] {
            Some(piece) if piece.color == position.player => {
                piece_moves(position, from, piece.piece_kind, moves)
            }
            _ => (),
        }
    }
    castling_moves(position, moves);
}

/// Generate pseudo-legal moves for the piece of the player to move on `from`.
/// Castling moves are included when `from` holds the king.
pub fn pseudo_legal_moves_from(position: &Position, from: Square, moves: &mut MoveList) {
    if let Some(piece) = position.board[from] {
        if piece.color == position.player {
            piece_moves(position, from, piece.piece_kind, moves);
            if piece.piece_kind == King {
                castling_moves(position, moves);
            }
        }
    }
}

fn piece_moves(position: &Position, from: Square, piece_kind: PieceKind, moves: &mut MoveList) {
    match piece_kind {
        Pawn => pawn_moves(position, from, moves),
        Knight => leaper_moves(position, from, &KNIGHT_JUMPS, moves),
        Bishop => slider_moves(position, from, &DIAGONALS, moves),
        Rook => slider_moves(position, from, &ORTHOGONALS, moves),
        Queen => {
            slider_moves(position, from, &ORTHOGONALS, moves);
            slider_moves(position, from, &DIAGONALS, moves);
        }
        King => leaper_moves(position, from, &KING_STEPS, moves),
    }
}

fn can_land_on(position: &Position, to: Square) -> bool {
    match position.board[to] {
        Some(piece) => piece.color != position.player,
        None => true,
    }
}

fn leaper_moves(position: &Position, from: Square, offsets: &[Offset], moves: &mut MoveList) {
    for to in leaper_squares(from, offsets) {
        if can_land_on(position, to) {
            moves.push(Move::new(from, to, None));
        }
    }
}

fn slider_moves(position: &Position, from: Square, directions: &[Offset], moves: &mut MoveList) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match position.board[to] {
                None => moves.push(Move::new(from, to, None)),
                Some(piece) => {
                    if piece.color != position.player {
                        moves.push(Move::new(from, to, None));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Push a pawn move, expanding it into every promotion when it reaches the last rank.
fn push_pawn_move(from: Square, to: Square, moves: &mut MoveList) {
    if to.rank_u8() == 0 || to.rank_u8() == 7 {
        for promotion in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to, Some(promotion)));
        }
    } else {
        moves.push(Move::new(from, to, None));
    }
}

fn pawn_moves(position: &Position, from: Square, moves: &mut MoveList) {
    let player = position.player;
    let dir = player.pawn_direction();

    // Pushes.
    if let Some(single) = from.offset(0, dir) {
        if position.board[single].is_none() {
            push_pawn_move(from, single, moves);

            let start_rank = match player {
                Color::White => 1,
                Color::Black => 6,
            };
            if from.rank_u8() == start_rank {
                if let Some(double) = single.offset(0, dir) {
                    if position.board[double].is_none() {
                        moves.push(Move::new(from, double, None));
                    }
                }
            }
        }
    }

    // Captures, en passant included.
    for file_delta in [-1, 1] {
        if let Some(to) = from.offset(file_delta, dir) {
            match position.board[to] {
                Some(piece) if piece.color != player => push_pawn_move(from, to, moves),
                None if position.en_passant == Some(to) => moves.push(Move::new(from, to, None)),
                _ => (),
            }
        }
    }
}

/// Castling requires the right, an empty path between king and rook,
/// and that the king neither starts on, passes over, nor lands on an attacked square.
fn castling_moves(position: &Position, moves: &mut MoveList) {
    let player = position.player;
    let (king_side, queen_side, king_from) = match player {
        Color::White => (Castling::W_KING, Castling::W_QUEEN, E1),
        Color::Black => (Castling::B_KING, Castling::B_QUEEN, E8),
    };
    let king = Some(Piece::new(player, King));
    let rook = Some(Piece::new(player, Rook));

    if position.board[king_from] != king || position.castling.is_none() {
        return;
    }
    let enemy = !player;
    let board = &position.board;
    let empty = |square: Square| board[square].is_none();
    let safe = |square: Square| !is_attacked(board, square, enemy);

    if !safe(king_from) {
        return;
    }

    let square = |file_delta: i8| king_from.offset(file_delta, 0);

    if position.castling.has(king_side) {
        if let (Some(f), Some(g), Some(h)) = (square(1), square(2), square(3)) {
            if board[h] == rook && empty(f) && empty(g) && safe(f) && safe(g) {
                moves.push(Move::new(king_from, g, None));
            }
        }
    }
    if position.castling.has(queen_side) {
        if let (Some(d), Some(c), Some(b), Some(a)) = (square(-1), square(-2), square(-3), square(-4))
        {
            if board[a] == rook && empty(d) && empty(c) && empty(b) && safe(d) && safe(c) {
                moves.push(Move::new(king_from, c, None));
            }
        }
    }
}
