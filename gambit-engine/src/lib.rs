//! Gambit Engine
//!
//! A chess rules oracle, a static evaluator, and a minimax searcher with alpha-beta pruning.
//!
//! The searcher and evaluator only see chess through the [`RulesOracle`] trait,
//! which [`Game`] implements.

pub mod boardrepr;
pub mod coretypes;
pub mod engine;
pub mod error;
pub mod eval;
pub mod fen;
pub mod game;
pub(crate) mod movegen;
pub mod movelist;
pub mod notation;
pub mod oracle;
pub mod perft;
pub mod position;
pub mod search;
pub mod zobrist;

pub use boardrepr::Mailbox;
pub use engine::{Engine, EngineBuilder, GameStatus};
pub use fen::Fen;
pub use game::Game;
pub use oracle::RulesOracle;
pub use position::Position;
pub use search::{best_move, SearchResult};
