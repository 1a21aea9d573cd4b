//! Search Properties
//!
//! Properties every search must hold regardless of position:
//! pruning never changes the result, and the searched state is always restored.

use gambit_engine::coretypes::{Color, Color::*, Cp, Move, PlyKind};
use gambit_engine::error;
use gambit_engine::eval::evaluate;
use gambit_engine::fen::Fen;
use gambit_engine::movelist::MoveList;
use gambit_engine::search::{alpha_beta, best_move, minimax, search, SearchStats};
use gambit_engine::*;

const POSITIONS: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
    "6k1/5ppp/8/8/8/8/8/R5K1 b - - 0 1",
];

/// Delegates to a Game while recording how the searcher drives it.
struct Recording {
    game: Game,
    applied: usize,
    undone: usize,
    deepest: usize,
}

impl Recording {
    fn new(game: Game) -> Self {
        Self {
            game,
            applied: 0,
            undone: 0,
            deepest: 0,
        }
    }
}

impl RulesOracle for Recording {
    fn legal_moves(&self) -> MoveList {
        self.game.legal_moves()
    }
    fn apply_move(&mut self, move_: Move) -> error::Result<()> {
        self.game.apply_move(move_)?;
        self.applied += 1;
        self.deepest = self.deepest.max(self.applied - self.undone);
        Ok(())
    }
    fn undo_last_move(&mut self) -> Option<Move> {
        let undone = self.game.undo_last_move();
        if undone.is_some() {
            self.undone += 1;
        }
        undone
    }
    fn is_checkmate(&self) -> bool {
        self.game.is_checkmate()
    }
    fn is_stalemate(&self) -> bool {
        self.game.is_stalemate()
    }
    fn is_threefold_repetition(&self) -> bool {
        RulesOracle::is_threefold_repetition(&self.game)
    }
    fn is_insufficient_material(&self) -> bool {
        self.game.is_insufficient_material()
    }
    fn is_draw(&self) -> bool {
        self.game.is_draw()
    }
    fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }
    fn board_snapshot(&self) -> Mailbox {
        self.game.board_snapshot()
    }
    fn notation(&self, move_: Move) -> error::Result<String> {
        self.game.notation(move_)
    }
}

fn maximizing(game: &Game) -> bool {
    game.side_to_move() == White
}

fn depth_for(fen: &str) -> PlyKind {
    // Keep exhaustive minimax cheap on the busy positions.
    match fen.len() > 60 {
        true => 2,
        false => 3,
    }
}

#[test]
fn pruning_never_changes_result() {
    for fen in POSITIONS {
        let mut game = Game::parse_fen(fen).unwrap();
        let max = maximizing(&game);
        for depth in 0..=depth_for(fen) {
            let mut ab_stats = SearchStats::default();
            let mut mm_stats = SearchStats::default();
            let pruned = alpha_beta(&mut game, depth, Cp::MIN, Cp::MAX, max, &mut ab_stats).unwrap();
            let exhaustive = minimax(&mut game, depth, max, &mut mm_stats).unwrap();

            assert_eq!(pruned, exhaustive, "{fen} depth {depth}");
            assert!(ab_stats.nodes <= mm_stats.nodes);
            assert_eq!(mm_stats.cutoffs, 0);
        }
    }
}

#[test]
fn search_restores_game() {
    for fen in POSITIONS {
        let mut game = Game::parse_fen(fen).unwrap();
        let before = game.clone();
        let player = game.side_to_move();
        for depth in 0..=depth_for(fen) {
            search(&mut game, depth, player).unwrap();
            assert_eq!(game, before, "{fen} depth {depth}");
            assert_eq!(game.to_fen(), before.to_fen());
        }
    }
}

#[test]
fn applies_and_undoes_in_pairs() {
    let mut oracle = Recording::new(Game::start_position());
    let result = search(&mut oracle, 3, White).unwrap();
    assert!(result.best_move.is_some());
    assert!(oracle.applied > 0);
    assert_eq!(oracle.applied, oracle.undone);
    assert_eq!(oracle.deepest, 3);
    assert_eq!(oracle.game, Game::start_position());
}

#[test]
fn depth_zero_is_evaluation() {
    for fen in POSITIONS {
        let mut game = Game::parse_fen(fen).unwrap();
        let player = game.side_to_move();
        let result = search(&mut game, 0, player).unwrap();
        assert_eq!(result.score, evaluate(&game));
        assert_eq!(result.best_move, None);
        assert_eq!(result.san, None);
        assert_eq!(result.nodes, 1);
    }
}

#[test]
fn start_position_depth_one() {
    let mut game = Game::start_position();
    let legal: Vec<String> = game
        .legal_moves_verbose()
        .into_iter()
        .map(|detail| detail.san)
        .collect();
    assert_eq!(legal.len(), 20);

    let chosen = best_move(&mut game, 1, White).unwrap().unwrap();
    assert!(legal.contains(&chosen));
}

#[test]
fn back_rank_mates_through_best_move() {
    let mut game = Game::parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    assert_eq!(best_move(&mut game, 1, White).unwrap().as_deref(), Some("Ra8#"));

    let mut game = Game::parse_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    assert_eq!(best_move(&mut game, 1, Black).unwrap().as_deref(), Some("Ra1#"));
}

#[test]
fn ties_keep_the_earlier_move() {
    // Ra8 and Rb8 both mate, a1a8 is generated first.
    let mut game = Game::parse_fen("7k/8/6K1/8/8/8/8/RR6 w - - 0 1").unwrap();
    let mut stats = SearchStats::default();
    let (score, chosen) = alpha_beta(&mut game, 1, Cp::MIN, Cp::MAX, true, &mut stats).unwrap();
    assert_eq!(score, Cp::CHECKMATE);
    assert_eq!(chosen.map(|move_| move_.to_string()).as_deref(), Some("a1a8"));
}
