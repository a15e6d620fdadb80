use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, Write};
use tileshift::engine::{Difficulty, Game, GamePhase, MoveResult, GRID_CELLS};
use tileshift::input::{InputAdapter, InputEvent};
use tileshift::solver;
use tileshift::timer::TickTimer;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Shuffle difficulty: easy (10), medium (30) or hard (100) walk moves
    #[clap(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seed for the shuffle walk; uses OS entropy when omitted
    #[clap(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut game = Game::new();
    let mut adapter = InputAdapter::new();
    game.start(args.difficulty, &mut rng);
    let mut timer = TickTimer::start();
    let mut last_move: Option<usize> = None;

    println!("Welcome to Tileshift! Slide the tiles back into order.");

    loop {
        println!("---------------------");
        println!("Moves: {}  Time: {}s", game.move_count(), timer.seconds());
        println!("{}", game.grid().to_string_with_highlight(last_move));

        if game.phase() == GamePhase::Solved {
            print!("Enter 'n' for a new game or 'q' to quit: ");
        } else {
            print!("Enter a cell (0-8) to slide, 'h' for a hint, 'n' for a new game, 'q' to quit: ");
        }
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }
        let trimmed = input.trim();

        match trimmed {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "n" => {
                timer.stop();
                game.start(args.difficulty, &mut rng);
                timer = TickTimer::start();
                last_move = None;
                continue;
            }
            "h" => {
                match solver::solve(game.grid()) {
                    Some(solution) if !solution.moves.is_empty() => {
                        println!(
                            "Hint: slide cell {} ({} optimal moves remain).",
                            solution.moves[0],
                            solution.moves.len()
                        );
                    }
                    _ => println!("Nothing left to solve."),
                }
                continue;
            }
            _ => {}
        }

        let index = match trimmed.parse::<usize>() {
            Ok(index) if index < GRID_CELLS => index,
            _ => {
                println!("Invalid input: enter a cell number between 0 and 8, 'h', 'n' or 'q'.");
                continue;
            }
        };

        if game.phase() == GamePhase::Solved {
            println!("The puzzle is already solved; enter 'n' for a new game.");
            continue;
        }

        let empty_before = game.grid().empty_index();
        if let Some(intent) = adapter.translate(InputEvent::Click { index }, empty_before) {
            match game.attempt_move(intent.source) {
                MoveResult::Moved => {
                    last_move = Some(empty_before);
                }
                MoveResult::Solved => {
                    last_move = Some(empty_before);
                    timer.stop();
                    println!();
                    println!("---------------------");
                    println!("🎉 SOLVED! 🎉");
                    println!("Moves: {}", game.move_count());
                    println!("Time: {}s", timer.seconds());
                    println!("---------------------");
                }
                MoveResult::Rejected => {
                    println!(
                        "Invalid move: cell {} is not next to the empty cell.",
                        index
                    );
                }
            }
        }
    }
}
