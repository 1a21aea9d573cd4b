//! Interactive terminal game against the engine.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use gambit_engine::eval::evaluate;
use gambit_engine::movelist::display;
use gambit_engine::{Engine, RulesOracle};

enum InputKind<'a> {
    Exit,
    Newgame,
    Help,
    Undo,
    Board,
    Moves,
    Empty,
    GameMove(&'a str),
}

impl<'a> From<&'a str> for InputKind<'a> {
    fn from(s: &'a str) -> Self {
        match s.trim() {
            "exit" | "quit" => Self::Exit,
            "newgame" | "ng" => Self::Newgame,
            "help" => Self::Help,
            "undo" => Self::Undo,
            "board" => Self::Board,
            "moves" => Self::Moves,
            "" => Self::Empty,
            text => Self::GameMove(text),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("newgame | ng => Begin a new game.");
    println!("undo => Take back your last move, and the computer's reply.");
    println!("board => Print the board.");
    println!("moves => List your legal moves.");
    println!("help => Print this help text.");
    println!("exit => End the game.");
    println!("\nTo make a move, enter it in SAN or coordinate form.");
    println!("Examples: Nf3, exd5, O-O, e7e8q");
}

fn print_board(engine: &Engine) {
    println!("{}", engine.game());
    println!("Static cp: {}", evaluate(engine.game()));
}

/// Let the computer move for as long as it is its turn.
fn computer_turns(engine: &mut Engine) -> io::Result<()> {
    while engine.computer() == Some(engine.game().side_to_move()) && !engine.status().is_over() {
        println!("thinking...");
        io::stdout().flush()?;
        match engine.reply() {
            Ok(Some(result)) => {
                let san = result.san.as_deref().unwrap_or("none");
                println!("Computer plays {san} (score {})", result.score);
                print_board(engine);
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "computer reply failed");
                println!("Computer could not move: {err}");
                break;
            }
        }
    }
    let status = engine.status();
    if status.is_over() {
        println!("Game over: {status}. Enter newgame, undo or exit.");
    }
    Ok(())
}

/// Run the read-eval-print loop until the user exits or input ends.
pub fn run(mut engine: Engine) -> io::Result<()> {
    println!("Gambit {}\n", env!("CARGO_PKG_VERSION"));
    println!("Type help for a list of commands.\n");
    print_board(&engine);
    computer_turns(&mut engine)?;

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match InputKind::from(input.as_str()) {
            InputKind::Exit => break,
            InputKind::Empty => continue,
            InputKind::Help => print_help(),
            InputKind::Board => print_board(&engine),
            InputKind::Moves => {
                let sans: Vec<String> = engine
                    .game()
                    .legal_moves_verbose()
                    .into_iter()
                    .map(|detail| detail.san)
                    .collect();
                println!("{}", sans.join(" "));
            }
            InputKind::Newgame => {
                engine.new_game();
                println!("Starting new game...");
                print_board(&engine);
                computer_turns(&mut engine)?;
            }
            InputKind::Undo => {
                // Undo the computer's reply too, returning to the user's turn.
                let mut undone = Vec::new();
                while let Ok(move_) = engine.undo() {
                    undone.push(move_);
                    if engine.computer() != Some(engine.game().side_to_move()) {
                        break;
                    }
                }
                match undone.is_empty() {
                    true => println!("No move to undo."),
                    false => println!("Undo {}.", display(&undone)),
                }
                print_board(&engine);
            }
            InputKind::GameMove(text) => match engine.play(text) {
                Ok(san) => {
                    println!("You play {san}");
                    print_board(&engine);
                    computer_turns(&mut engine)?;
                }
                Err(err) => {
                    debug!(input = text, %err, "rejected move");
                    println!("{err}. No action taken.");
                }
            },
        }
    }

    Ok(())
}
