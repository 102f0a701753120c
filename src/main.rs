//! Terminal front-end for Enhanced Tic-Tac-Toe
//!
//! Thin driver over the game core: prints the board with power-up markers,
//! routes typed coordinates through the rule engine, and lets the AI
//! engine answer. Board cells show `X` (you), `O` (engine), `#` (blocked);
//! empty cells with a token show `b`/`s`/`w`.

use std::io::{self, BufRead, Write};

use clap::Parser;
use log::info;

use tictactoe::{AIEngine, Game, Outcome, Personality, Pos, PowerUp, Side, BOARD_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine personality: balanced, aggressive, defensive, random, learning
    #[arg(long, default_value = "balanced")]
    personality: String,

    /// Seed for power-up placement and the RANDOM personality
    #[arg(long)]
    seed: Option<u64>,

    /// Print the last search trace as JSON after every engine move
    #[arg(long)]
    trace: bool,

    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let level = if args.quiet {
        log::Level::Warn
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).expect("logger init");

    let personality: Personality = match args.personality.parse() {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    info!("personality {personality:?}, seed {seed}");

    let mut game = Game::with_seed(seed);
    let mut engine = AIEngine::with_seed(seed);

    println!("Enhanced Tic-Tac-Toe: you are X. Enter moves as 'row col' (0-2),");
    println!("'n' for a new game, 'q' to quit. Tokens: b=block s=swap w=wild.");
    print_board(&game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => {
                game.reset();
                engine.reset();
                println!("New game.");
                print_board(&game);
                continue;
            }
            _ => {}
        }

        let Some(pos) = parse_pos(input) else {
            println!("Expected 'row col' with values 0-{}.", BOARD_SIZE - 1);
            continue;
        };

        if let Err(err) = game.play_human(pos) {
            println!("Move rejected: {err}");
            continue;
        }

        if game.pending_swap().is_some() {
            println!("Swap selected at {pos}; now pick an occupied cell.");
            print_board(&game);
            continue;
        }

        print_board(&game);
        if announce_if_over(&game) {
            continue;
        }

        // Wildcard keeps the turn with the human
        if game.turn() != Side::Engine {
            println!("Your turn again.");
            continue;
        }

        let result = engine.select_move_with_stats(game.board_mut(), personality);
        match result.best_move {
            Some(engine_pos) => {
                info!(
                    "engine plays {engine_pos} via {:?} (score {}, {} nodes)",
                    result.kind, result.score, result.nodes
                );
                if let Err(err) = game.apply_engine_move(engine_pos) {
                    // The engine only returns legal moves; reaching this is a defect
                    eprintln!("engine move rejected: {err}");
                    break;
                }
            }
            None => {
                // No legal moves maps to a draw
                println!("No moves left: draw.");
                continue;
            }
        }

        if args.trace {
            dump_trace(&engine)?;
        }

        print_board(&game);
        announce_if_over(&game);
    }

    Ok(())
}

fn parse_pos(input: &str) -> Option<Pos> {
    let mut parts = input.split_whitespace();
    let row: i32 = parts.next()?.parse().ok()?;
    let col: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !Pos::is_valid(row, col) {
        return None;
    }
    Some(Pos::new(row as u8, col as u8))
}

fn print_board(game: &Game) {
    println!("  0 1 2");
    for row in 0..BOARD_SIZE {
        print!("{row} ");
        for col in 0..BOARD_SIZE {
            let pos = Pos::new(row as u8, col as u8);
            let shown = match game.powerups().get(pos) {
                Some(PowerUp::Block) => 'b',
                Some(PowerUp::Swap) => 's',
                Some(PowerUp::Wildcard) => 'w',
                None => game.board().get(pos).to_char(),
            };
            print!("{shown} ");
        }
        println!();
    }
}

fn announce_if_over(game: &Game) -> bool {
    match game.outcome() {
        Outcome::Ongoing => false,
        Outcome::HumanWin => {
            println!("You win!");
            true
        }
        Outcome::EngineWin => {
            println!("Engine wins.");
            true
        }
        Outcome::Draw => {
            println!("Draw.");
            true
        }
    }
}

fn dump_trace(engine: &AIEngine) -> io::Result<()> {
    let json = serde_json::to_string(engine.trace().nodes()).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "trace: {json}")?;
    writeln!(stdout, "pruned: {:?}", engine.pruned_ids())?;
    writeln!(stdout, "eval: {}", engine.last_eval())?;
    Ok(())
}
