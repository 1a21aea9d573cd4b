//! Scoped move application.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::coretypes::Move;
use crate::error;
use crate::oracle::RulesOracle;

/// A move applied to an oracle for as long as the guard lives.
/// Dropping the guard takes the move back, on every exit path of the scope
/// holding it: normal flow, `break`, early `return`, and `?` propagation.
///
/// The guard derefs to the oracle, so the search below the move runs through it.
pub struct MoveGuard<'a, R: RulesOracle + ?Sized> {
    oracle: &'a mut R,
    move_: Move,
}

impl<'a, R: RulesOracle + ?Sized> MoveGuard<'a, R> {
    /// Apply `move_` to `oracle`. If the oracle rejects it, nothing is applied
    /// and no guard is created, so nothing will be undone.
    pub fn apply(oracle: &'a mut R, move_: Move) -> error::Result<Self> {
        if let Err(err) = oracle.apply_move(move_) {
            trace!(%move_, %err, "oracle rejected move");
            return Err(err);
        }
        Ok(Self { oracle, move_ })
    }

    pub fn move_(&self) -> Move {
        self.move_
    }
}

impl<R: RulesOracle + ?Sized> Deref for MoveGuard<'_, R> {
    type Target = R;
    fn deref(&self) -> &Self::Target {
        self.oracle
    }
}

impl<R: RulesOracle + ?Sized> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.oracle
    }
}

impl<R: RulesOracle + ?Sized> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        let undone = self.oracle.undo_last_move();
        debug_assert_eq!(undone, Some(self.move_), "guarded moves must unwind in stack order");
    }
}
