//! Engine struct acts as a simplified API for the various parts of the Gambit engine.

use std::fmt::{self, Display};

use tracing::debug;

use crate::coretypes::{Color, Move, PlyKind, MAX_DEPTH};
use crate::error::{self, ErrorKind};
use crate::game::Game;
use crate::oracle::RulesOracle;
use crate::search::{self, SearchResult};

/// The state of a game, from the rules' point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl GameStatus {
    pub fn of(game: &Game) -> Self {
        let position = game.position();
        if position.is_checkmate() {
            GameStatus::Checkmate {
                winner: !position.player(),
            }
        } else if position.is_stalemate() {
            GameStatus::Stalemate
        } else if position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if game.is_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if game.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "game in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::InsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
        }
    }
}

/// EngineBuilder allows for parameters of an Engine to be set and built once.
///
/// Default values:
///
/// * `game`: Starting chess position
/// * `depth`: 3
/// * `computer`: Black
/// * `debug`: false
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EngineBuilder {
    game: Game,
    depth: PlyKind,
    computer: Option<Color>,
    debug: bool,
}

impl EngineBuilder {
    pub const DEFAULT_DEPTH: PlyKind = 3;

    /// Create a new default EngineBuilder.
    pub fn new() -> Self {
        Self {
            game: Game::start_position(),
            depth: Self::DEFAULT_DEPTH,
            computer: Some(Color::Black),
            debug: false,
        }
    }

    /// Create and return a new Engine.
    /// Fails if the requested depth is deeper than `MAX_DEPTH`.
    pub fn build(&self) -> error::Result<Engine> {
        check_depth(self.depth)?;
        Ok(Engine {
            game: self.game.clone(),
            depth: self.depth,
            computer: self.computer,
            debug: self.debug,
        })
    }

    /// Set the Engine's initial game state.
    pub fn game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Set the depth in plies of every search.
    pub fn depth(mut self, depth: PlyKind) -> Self {
        self.depth = depth;
        self
    }

    /// Set the color the engine plays, or None to only ever search on request.
    pub fn computer(mut self, computer: Option<Color>) -> Self {
        self.computer = computer;
        self
    }

    /// Set whether the engine begins in debug mode.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_depth(depth: PlyKind) -> error::Result<()> {
    match depth <= MAX_DEPTH {
        true => Ok(()),
        false => Err((
            ErrorKind::EngineDepthExceeded,
            format!("{depth} is deeper than the maximum {MAX_DEPTH}"),
        )
            .into()),
    }
}

/// Engine holds a game in progress, the user's side and the computer's side of it.
/// Searches are blocking and always complete at the configured depth.
#[derive(Debug, Clone)]
pub struct Engine {
    game: Game,
    depth: PlyKind,
    computer: Option<Color>,
    debug: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            game: Game::start_position(),
            depth: EngineBuilder::DEFAULT_DEPTH,
            computer: Some(Color::Black),
            debug: false,
        }
    }

    /// Returns reference to current game of engine.
    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn depth(&self) -> PlyKind {
        self.depth
    }
    pub fn computer(&self) -> Option<Color> {
        self.computer
    }
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Set the game or position to play from.
    pub fn set_game<T: Into<Game>>(&mut self, game: T) {
        self.game = game.into();
    }

    pub fn set_depth(&mut self, depth: PlyKind) -> error::Result<()> {
        check_depth(depth)?;
        self.depth = depth;
        Ok(())
    }

    pub fn set_computer(&mut self, computer: Option<Color>) {
        self.computer = computer;
    }

    /// Update the engine's debug parameter.
    pub fn set_debug(&mut self, new_debug: bool) {
        self.debug = new_debug;
    }

    /// Start over from the standard start position.
    pub fn new_game(&mut self) {
        self.game = Game::start_position();
    }

    /// Play a user move in SAN or coordinate notation. Returns the move's SAN.
    pub fn play(&mut self, text: &str) -> error::Result<String> {
        let status = self.status();
        if status.is_over() {
            return Err((ErrorKind::GameOver, status).into());
        }
        let move_ = crate::notation::parse_move(self.game.position(), text)?;
        let san = self.game.notation(move_)?;
        self.game.play(move_)?;
        Ok(san)
    }

    /// Take back one ply.
    pub fn undo(&mut self) -> error::Result<Move> {
        self.game.undo()
    }

    /// Search the current game for the player to move without playing the result.
    pub fn think(&mut self) -> error::Result<SearchResult> {
        let player = self.game.side_to_move();
        let result = search::search(&mut self.game, self.depth, player)?;
        if self.debug {
            debug!("\n{result}");
        }
        Ok(result)
    }

    /// If it is the computer's turn, search and play its move.
    /// Returns None when the computer is not to move.
    pub fn reply(&mut self) -> error::Result<Option<SearchResult>> {
        if self.computer != Some(self.game.side_to_move()) {
            return Ok(None);
        }
        let status = self.status();
        if status.is_over() {
            return Err((ErrorKind::GameOver, status).into());
        }

        let result = self.think()?;
        if let Some(move_) = result.best_move {
            self.game.play(move_)?;
        }
        Ok(Some(result))
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.game)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
