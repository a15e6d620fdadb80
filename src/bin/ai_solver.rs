use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tileshift::engine::{cell_col, cell_row, Difficulty, Grid};
use tileshift::solver;
use tileshift::utils::grid_from_str_array;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Shuffle depth preset used when scrambling a fresh grid
    #[clap(short, long, value_enum, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,

    /// Seed for the scramble walk
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Path to a board file (three rows of '1'-'8' and '.'); scrambles a
    /// fresh grid when omitted
    board_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf) -> Result<Grid, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    grid_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let grid = match &args.board_file {
        Some(path) => match read_board_file(path) {
            Ok(grid) => {
                println!("Loaded board from {}\n", path.display());
                grid
            }
            Err(message) => {
                eprintln!("{}", message);
                process::exit(2);
            }
        },
        None => {
            println!(
                "Scrambled a fresh grid ({} walk moves, seed {})\n",
                args.difficulty.shuffle_moves(),
                args.seed
            );
            Grid::shuffled_with_seed(args.seed, args.difficulty.shuffle_moves())
        }
    };

    println!("Initial grid:\n{}\n", grid);
    println!("Searching for an optimal solution...\n");

    match solver::solve(&grid) {
        Some(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}):", solution.moves.len());
            if solution.moves.is_empty() {
                println!("  Already solved.");
            } else {
                for (i, &index) in solution.moves.iter().enumerate() {
                    println!(
                        "  Move {}: slide cell {} (row {}, col {})",
                        i + 1,
                        index,
                        cell_row(index),
                        cell_col(index)
                    );
                }
            }

            let mut replay = grid.clone();
            for &index in &solution.moves {
                replay.slide(index);
            }
            println!("\nFinal grid:\n{}\n", replay);
            println!("Search nodes expanded: {}", solution.nodes_expanded);
        }
        None => {
            eprintln!("This permutation is not reachable by legal moves; no solution exists.");
            process::exit(1);
        }
    }
}
