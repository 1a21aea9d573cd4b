//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of nodes at a specific depth.

use std::ops::{Add, AddAssign};

use crate::coretypes::{Move, PlyKind};
use crate::error;
use crate::oracle::RulesOracle;
use crate::search::MoveGuard;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

// Count the number of nodes at a certain depth.
// This ignores higher terminal nodes.
// In other words, it counts the number of paths to the given depth.
pub fn perft<R: RulesOracle + ?Sized>(oracle: &mut R, ply: PlyKind) -> error::Result<PerftInfo> {
    if ply == 0 {
        // Ever only 1 position at 0 ply.
        return Ok(PerftInfo::new(1));
    }
    perft_recurse(oracle, ply)
}

/// Perft split by root move, in move generation order.
pub fn divide<R: RulesOracle + ?Sized>(
    oracle: &mut R,
    ply: PlyKind,
) -> error::Result<Vec<(Move, PerftInfo)>> {
    if ply == 0 {
        return Ok(Vec::new());
    }
    let mut split = Vec::new();
    for legal_move in oracle.legal_moves() {
        let mut guard = MoveGuard::apply(oracle, legal_move)?;
        split.push((legal_move, perft(&mut *guard, ply - 1)?));
    }
    Ok(split)
}

/// Ply must be non-zero.
fn perft_recurse<R: RulesOracle + ?Sized>(oracle: &mut R, ply: PlyKind) -> error::Result<PerftInfo> {
    debug_assert_ne!(ply, 0);
    let legal_moves = oracle.legal_moves();
    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        return Ok(PerftInfo::new(legal_moves.len() as u64));
    }

    let mut perft_info = PerftInfo::new(0);
    for legal_move in legal_moves {
        let mut guard = MoveGuard::apply(oracle, legal_move)?;
        perft_info += perft_recurse(&mut *guard, ply - 1)?;
    }
    Ok(perft_info)
}
