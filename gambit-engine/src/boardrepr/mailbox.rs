//! A [mailbox](https://www.chessprogramming.org/Mailbox) is a square-centric
//! representation of a chess board.
//!
//! A Mailbox is an array of size Files x Ranks where each index may contain a
//! chess piece or be empty. It is the board snapshot the evaluator reads.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use crate::coretypes::{Color, Piece, PieceKind, Square, SquareIndexable};
use crate::coretypes::{NUM_FILES, NUM_RANKS, NUM_SQUARES};

/// Classic 8x8 square board representation of Chess board.
/// Index starts at A1.
/// A1 = idx 0
/// B1 = idx 1
/// A2 = idx 8
/// H8 = idx 63
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Mailbox {
    board: [Option<Piece>; Self::SIZE],
}

impl Mailbox {
    pub const FILES: usize = NUM_FILES;
    pub const RANKS: usize = NUM_RANKS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Creates an empty Mailbox, where all squares are None.
    pub const fn new() -> Self {
        Mailbox {
            board: [None; Mailbox::SIZE],
        }
    }

    /// Create Mailbox with pieces arranged in starting chess position.
    pub fn start_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; NUM_FILES] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut mb = Self::new();

        for (file, piece_kind) in BACK_RANK.into_iter().enumerate() {
            mb.board[file] = Some(Piece::new(Color::White, piece_kind));
            mb.board[file + NUM_FILES] = Some(Piece::new(Color::White, Pawn));
            mb.board[file + 6 * NUM_FILES] = Some(Piece::new(Color::Black, Pawn));
            mb.board[file + 7 * NUM_FILES] = Some(Piece::new(Color::Black, piece_kind));
        }

        mb
    }

    pub fn board(&self) -> &[Option<Piece>; Self::SIZE] {
        &self.board
    }

    /// Iterate over every occupied square and its piece, starting from A1.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(move |square| self[square].map(|piece| (square, piece)))
    }

    /// Returns the board as an 8x8 grid, `grid[rank][file]`, with rank 0 being White's side.
    pub fn grid(&self) -> [[Option<Piece>; NUM_FILES]; NUM_RANKS] {
        let mut grid = [[None; NUM_FILES]; NUM_RANKS];
        for (idx, maybe_piece) in self.board.iter().enumerate() {
            grid[idx / NUM_FILES][idx % NUM_FILES] = *maybe_piece;
        }
        grid
    }

    /// Returns the square of a player's king, if that player has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
    }

    /// Number of pieces of a given color and kind on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.board.iter().filter(|&&p| p == Some(piece)).count()
    }

    /// Mirrors the board vertically and swaps the color of every piece.
    pub fn color_flip(&self) -> Self {
        let mut flipped = Self::new();
        for (square, piece) in self.pieces() {
            flipped[square.flip_rank()] = Some(Piece::new(!piece.color, piece.piece_kind));
        }
        flipped
    }

    /// Returns pretty-printed chess board representation of Self.
    /// The chess board has borders and file/rank indicators.
    pub fn pretty(&self) -> String {
        const RANK_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(626);

        pretty.push_str(RANK_SEP);
        for rank in (0..Self::RANKS).rev() {
            pretty.push_str("| ");

            for file in 0..Self::FILES {
                pretty.push(match self[rank * Self::FILES + file] {
                    Some(piece) => char::from(piece),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&(rank + 1).to_string());
            pretty.push('\n');
            pretty.push_str(RANK_SEP);
        }
        pretty.push_str("  a   b   c   d   e   f   g   h\n");

        pretty
    }
}

/// Be careful with accessing with usize, as usize value out of bounds will panic.
impl Index<usize> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.board[idx]
    }
}

impl IndexMut<usize> for Mailbox {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.board[idx]
    }
}

impl Index<Square> for Mailbox {
    type Output = Option<Piece>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.idx()]
    }
}

impl IndexMut<Square> for Mailbox {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.board[square.idx()]
    }
}

/// Default value is that of a standard starting chess position.
impl Default for Mailbox {
    fn default() -> Self {
        Mailbox::start_position()
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn start_position_layout() {
        let mb = Mailbox::start_position();
        assert_eq!(mb[E1], Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(mb[D8], Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(mb[G7], Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(mb[E4], None);
        assert_eq!(mb.pieces().count(), 32);
        assert_eq!(mb.king_square(Color::Black), Some(E8));
    }

    #[test]
    fn grid_rows_start_from_white() {
        let grid = Mailbox::start_position().grid();
        assert_eq!(grid[0][0], Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(grid[7][4], Some(Piece::new(Color::Black, PieceKind::King)));
        assert!(grid[3].iter().all(Option::is_none));
    }

    #[test]
    fn start_position_is_its_own_color_flip() {
        let mb = Mailbox::start_position();
        assert_eq!(mb.color_flip(), mb);
    }

    #[test]
    fn display_start_position_mailbox() {
        let mb = Mailbox::start_position();
        let pretty = mb.pretty();
        assert!(pretty.starts_with(
            "+---+---+---+---+---+---+---+---+\n| r | n | b | q | k | b | n | r | 8"
        ));
        assert!(pretty.ends_with("  a   b   c   d   e   f   g   h\n"));
    }
}
