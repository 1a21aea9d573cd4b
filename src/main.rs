//! Gambit, terminal chess against a minimax alpha-beta engine.

mod cli;

use std::error::Error;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gambit_engine::coretypes::{Color, PlyKind};
use gambit_engine::eval;
use gambit_engine::fen::{Fen, START_FEN};
use gambit_engine::perft;
use gambit_engine::{EngineBuilder, Game};

#[derive(Parser)]
#[command(name = "gambit", version, about = "Terminal chess against a minimax alpha-beta engine")]
struct Args {
    /// Log every search at debug level. RUST_LOG overrides this.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game against the computer.
    Play {
        /// Search depth in plies.
        #[arg(short, long, default_value_t = EngineBuilder::DEFAULT_DEPTH)]
        depth: PlyKind,
        /// Color the computer plays.
        #[arg(short, long, value_enum, default_value_t = Side::Black)]
        computer: Side,
        /// Position to start from.
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
    /// Print the best move for a position.
    Bestmove {
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = EngineBuilder::DEFAULT_DEPTH)]
        depth: PlyKind,
    },
    /// Print the static evaluation of a position.
    Eval {
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
    },
    /// Count leaf nodes of the legal move tree, split by root move.
    Perft {
        #[arg(short, long, default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = 3)]
        depth: PlyKind,
    },
}

/// The computer's side of the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Side {
    White,
    Black,
    None,
}

impl From<Side> for Option<Color> {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Some(Color::White),
            Side::Black => Some(Color::Black),
            Side::None => None,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = match debug {
        true => "debug",
        false => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let command = args.command.unwrap_or(Command::Play {
        depth: EngineBuilder::DEFAULT_DEPTH,
        computer: Side::Black,
        fen: START_FEN.to_string(),
    });

    match command {
        Command::Play {
            depth,
            computer,
            fen,
        } => {
            let engine = EngineBuilder::new()
                .game(Game::parse_fen(&fen)?)
                .depth(depth)
                .computer(computer.into())
                .debug(args.debug)
                .build()?;
            cli::run(engine)?;
        }

        Command::Bestmove { fen, depth } => {
            let mut engine = EngineBuilder::new()
                .game(Game::parse_fen(&fen)?)
                .depth(depth)
                .debug(args.debug)
                .build()?;
            println!("thinking...");
            let result = engine.think()?;
            match (&result.best_move, &result.san) {
                (Some(move_), Some(san)) => println!("bestmove {move_} ({san})"),
                _ => println!("bestmove none"),
            }
            println!("score {}", result.score);
            if args.debug {
                print!("{result}");
            }
        }

        Command::Eval { fen } => {
            let game = Game::parse_fen(&fen)?;
            let parts = eval::breakdown(&game);
            println!("material     : {}", parts.material);
            println!("piece square : {}", parts.piece_square);
            println!("mobility     : {}", parts.mobility);
            println!("evaluation   : {}", eval::evaluate(&game));
        }

        Command::Perft { fen, depth } => {
            let mut game = Game::parse_fen(&fen)?;
            let total = perft::perft(&mut game, depth)?;
            for (move_, info) in perft::divide(&mut game, depth)? {
                println!("{move_}: {}", info.nodes);
            }
            println!("\nNodes searched: {}", total.nodes);
        }
    }

    Ok(())
}
