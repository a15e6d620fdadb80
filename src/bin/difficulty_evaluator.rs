use tileshift::engine::{Difficulty, Grid};
use tileshift::heuristics::{manhattan_distance, misplaced_tiles, solve_lower_bound};
use tileshift::solver;

const TRIALS_PER_DIFFICULTY: usize = 20;
const START_SEED: u64 = 0;

struct DifficultySummary {
    difficulty: Difficulty,
    avg_optimal: f64,
    max_optimal: usize,
    avg_lower_bound: f64,
    avg_misplaced: f64,
    total_nodes: u64,
}

fn average(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn main() {
    env_logger::init();

    let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    println!(
        "Evaluating {} seeded scrambles per difficulty...",
        TRIALS_PER_DIFFICULTY
    );

    let mut summaries = Vec::new();

    for difficulty in difficulties {
        let walk_moves = difficulty.shuffle_moves();
        println!("\nDifficulty: {} ({} walk moves)", difficulty, walk_moves);

        let mut optimal_lengths = Vec::new();
        let mut lower_bounds = Vec::new();
        let mut misplaced_counts = Vec::new();
        let mut total_nodes = 0u64;

        for trial in 0..TRIALS_PER_DIFFICULTY {
            let seed = START_SEED + trial as u64;
            let grid = Grid::shuffled_with_seed(seed, walk_moves);

            let solution = match solver::solve(&grid) {
                Some(solution) => solution,
                None => {
                    eprintln!(
                        "Warning: scramble (seed {}) reported unsolvable. The shuffle walk guarantees solvability; this should not happen.",
                        seed
                    );
                    continue;
                }
            };

            println!(
                "  Seed {:<3} optimal {:<3} bound {:<3} manhattan {:<3} misplaced {}",
                seed,
                solution.moves.len(),
                solve_lower_bound(&grid),
                manhattan_distance(&grid),
                misplaced_tiles(&grid)
            );

            optimal_lengths.push(solution.moves.len());
            lower_bounds.push(solve_lower_bound(&grid) as usize);
            misplaced_counts.push(misplaced_tiles(&grid) as usize);
            total_nodes += solution.nodes_expanded;
        }

        summaries.push(DifficultySummary {
            difficulty,
            avg_optimal: average(&optimal_lengths),
            max_optimal: optimal_lengths.iter().copied().max().unwrap_or(0),
            avg_lower_bound: average(&lower_bounds),
            avg_misplaced: average(&misplaced_counts),
            total_nodes,
        });
    }

    println!("\n--- Evaluation Complete ---");
    println!("Scrambles per difficulty: {}", TRIALS_PER_DIFFICULTY);
    println!("\n--- Averages ---");

    for summary in summaries {
        println!(
            "Difficulty {:<8}: avg optimal = {:.2}, max optimal = {}, avg bound = {:.2}, avg misplaced = {:.2}, search nodes = {}",
            summary.difficulty.to_string(),
            summary.avg_optimal,
            summary.max_optimal,
            summary.avg_lower_bound,
            summary.avg_misplaced,
            summary.total_nodes
        );
    }
}
