//! Static Evaluation Functions.
//!
//! Scores are absolute: White is the maxing player and Black is the minning player,
//! so a centipawn score of +10 is winning for White, while -10 is winning for Black.

use crate::boardrepr::Mailbox;
use crate::coretypes::{Color, Cp, CpKind, PieceKind, SquareIndexable, NUM_SQUARES};
use crate::coretypes::{Color::*, PieceKind::*};
use crate::oracle::RulesOracle;

impl PieceKind {
    /// Default, independent value per piece.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            Pawn => 100, // 100 Centipawn == 1 Pawn
            Knight => 320,
            Bishop => 330,
            Rook => 500,
            Queen => 900,
            King => 20_000,
        })
    }

    /// Positional bonus table of this piece kind, from White's point of view.
    const fn table(&self) -> &'static [CpKind; NUM_SQUARES] {
        match self {
            Pawn => &PAWN_TABLE,
            Knight => &KNIGHT_TABLE,
            Bishop => &BISHOP_TABLE,
            Rook => &ROOK_TABLE,
            Queen => &QUEEN_TABLE,
            King => &KING_TABLE,
        }
    }
}

// Evaluation Constants
pub const MOBILITY_CP: Cp = Cp(5);

/// The parts of a non-terminal static evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Breakdown {
    pub material: Cp,
    pub piece_square: Cp,
    pub mobility: Cp,
}

impl Breakdown {
    pub fn total(&self) -> Cp {
        self.material + self.piece_square + self.mobility
    }
}

/// If the game is over, return a score representing a checkmate for White/Black, or a draw.
/// Checkmate is strictly bad for the player to move.
pub fn terminal<R: RulesOracle + ?Sized>(oracle: &R) -> Option<Cp> {
    if oracle.is_checkmate() {
        Some(match oracle.side_to_move() {
            White => -Cp::CHECKMATE,
            Black => Cp::CHECKMATE,
        })
    } else if oracle.is_draw() {
        Some(Cp::DRAW)
    } else {
        None
    }
}

/// Primary evaluate function for engine.
/// Terminal positions score as mate or draw, anything else is statically evaluated.
pub fn evaluate<R: RulesOracle + ?Sized>(oracle: &R) -> Cp {
    match terminal(oracle) {
        Some(score) => score,
        None => breakdown(oracle).total(),
    }
}

/// Static evaluation of a position split into its heuristics, ignoring terminal status.
pub fn breakdown<R: RulesOracle + ?Sized>(oracle: &R) -> Breakdown {
    let board = oracle.board_snapshot();
    Breakdown {
        material: material(&board),
        piece_square: piece_square_lookup(&board),
        mobility: mobility(oracle),
    }
}

/// Returns relative strength difference of pieces on board.
/// A positive value is an advantage for white, 0 is even, negative is advantage for black.
pub fn material(board: &Mailbox) -> Cp {
    board
        .pieces()
        .map(|(_, piece)| piece.piece_kind.centipawns() * piece.color.sign())
        .fold(Cp::default(), |acc, value| acc + value)
}

/// Returns value from looking up each piece square in precalculated tables.
/// Black pieces read the table with ranks mirrored.
pub fn piece_square_lookup(board: &Mailbox) -> Cp {
    board
        .pieces()
        .map(|(square, piece)| {
            let table = piece.piece_kind.table();
            match piece.color {
                White => Cp(table[square.idx()]),
                Black => -Cp(table[square.flip_rank().idx()]),
            }
        })
        .fold(Cp::default(), |acc, value| acc + value)
}

/// Number of legal moves of the player to move, in favor of that player.
/// The opponent's moves are not counted.
pub fn mobility<R: RulesOracle + ?Sized>(oracle: &R) -> Cp {
    let num_moves = oracle.legal_moves().len() as CpKind;
    MOBILITY_CP * (num_moves * oracle.side_to_move().sign())
}

/// Score of a side to move from `color`'s point of view, for display.
pub fn relative(score: Cp, color: Color) -> Cp {
    score * color.sign()
}

// Piece Square Tables
// Orientation:
// A1, B1, C1, D1, ...,
// ...             ...,
// A8, B8, C8, D8, ...,

/// Pawn square values
/// Push center pawns, reward advancing, penalize leaving D2/E2 home late.
#[rustfmt::skip]
static PAWN_TABLE: [CpKind; NUM_SQUARES] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// Knight square values
/// Encourage central squares, penalize edge squares.
#[rustfmt::skip]
static KNIGHT_TABLE: [CpKind; NUM_SQUARES] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

/// Bishop square values
/// Avoid corners and borders
#[rustfmt::skip]
static BISHOP_TABLE: [CpKind; NUM_SQUARES] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

/// Rook square values
/// Centralize on the back rank, occupy the 7th.
#[rustfmt::skip]
static ROOK_TABLE: [CpKind; NUM_SQUARES] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

/// Queen square values
#[rustfmt::skip]
static QUEEN_TABLE: [CpKind; NUM_SQUARES] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   5,   0, -10,
    -10,   5,   5,   5,   5,   5,   5, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

/// King square values
/// Keep king in corner, in pawn shelter.
#[rustfmt::skip]
static KING_TABLE: [CpKind; NUM_SQUARES] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];
