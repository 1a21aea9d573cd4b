//! Zobrist Hashing
//!
//! Positions within a game are keyed by their Zobrist hash to detect threefold repetition.

use std::collections::HashSet;
use std::ops::Index;
use std::sync::OnceLock;

use rand::prelude::*;

use crate::coretypes::{Castling, Color, File, Piece, SquareIndexable};
use crate::coretypes::{NUM_FILES, NUM_PIECE_KINDS, NUM_SQUARES};
use crate::position::Position;

/// HashKind is an alias for the underlying type of a Zobrist Hash.
pub type HashKind = u64;

/// Seed of the process wide table. Hashes are reproducible from run to run.
const GLOBAL_SEED: u64 = 0x5EED_CAFE_F00D_2718;

/// ZobristTable contains unique, pseudo-randomly generated values
/// used for calculating Zobrist Hash of a chess position.
///
/// Each Piece gets a unique number for each square.
/// A single side to move gets a unique number.
/// Each possible combination of castling rights gets a unique number.
/// Each possible file for En-Passant gets a unique number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZobristTable {
    piece_hash: [[HashKind; NUM_SQUARES]; NUM_PIECE_KINDS],
    ep_hash: [HashKind; NUM_FILES],
    castling_hash: [HashKind; Castling::ENUMERATIONS],
    player_hash: HashKind,
}

impl ZobristTable {
    const TOGGLE_PLAYER: Color = Color::Black;

    /// The table shared by every `Game` in the process.
    pub fn global() -> &'static ZobristTable {
        static TABLE: OnceLock<ZobristTable> = OnceLock::new();
        TABLE.get_or_init(|| ZobristTable::with_seed(GLOBAL_SEED))
    }

    /// Returns a new ZobristTable with unique values generated from seeded rng.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        // Each value used must be unique.
        let mut used_values = HashSet::new();
        let mut unique = move || loop {
            let value: HashKind = rng.gen();
            if used_values.insert(value) {
                break value;
            }
        };

        let mut piece_hash = [[HashKind::default(); NUM_SQUARES]; NUM_PIECE_KINDS];
        let mut ep_hash = [HashKind::default(); NUM_FILES];
        let mut castling_hash = [HashKind::default(); Castling::ENUMERATIONS];

        for item in piece_hash
            .iter_mut()
            .flatten()
            .chain(ep_hash.iter_mut())
            .chain(castling_hash.iter_mut())
        {
            *item = unique();
        }
        let player_hash = unique();

        Self {
            piece_hash,
            ep_hash,
            castling_hash,
            player_hash,
        }
    }

    /// Generate the hash of a position in context of this ZobristTable.
    /// The en passant file is hashed only when a capture there is actually possible,
    /// so positions differing only in a dead en passant square are equal.
    pub fn generate_hash(&self, position: &Position) -> HashKind {
        let mut hash = HashKind::default();

        for (square, piece) in position.board().pieces() {
            hash ^= self[(piece, square)];
        }

        if let Some(ep_square) = position.en_passant() {
            if position.is_en_passant_capturable() {
                hash ^= self[ep_square.file()];
            }
        }

        hash ^= self[position.castling()];

        if position.player() == ZobristTable::TOGGLE_PLAYER {
            hash ^= self.player_hash;
        }

        hash
    }
}

/// Get the hash of a piece on a square.
impl<I: SquareIndexable> Index<(Piece, I)> for ZobristTable {
    type Output = HashKind;
    fn index(&self, (piece, square): (Piece, I)) -> &Self::Output {
        &self.piece_hash[piece.idx()][square.idx()]
    }
}

/// Get the hash of an en passant file.
impl Index<File> for ZobristTable {
    type Output = HashKind;
    fn index(&self, file: File) -> &Self::Output {
        &self.ep_hash[file as usize]
    }
}

/// Get the hash of a set of castling rights.
impl Index<Castling> for ZobristTable {
    type Output = HashKind;
    fn index(&self, castling: Castling) -> &Self::Output {
        &self.castling_hash[castling.bits() as usize]
    }
}
