//! Optimal solver for the 3x3 sliding-tile puzzle.
//!
//! Iterative-deepening A* over the legal-move graph, driven by the
//! admissible bound from [`crate::heuristics`]. An 8-puzzle optimum never
//! exceeds 31 moves, so the deepening loop terminates for every solvable
//! grid.

use crate::engine::{neighbors, Grid};
use crate::heuristics::solve_lower_bound;
use log::trace;

/// A shortest move sequence for one grid.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Cell indices to slide, in order. Each index is adjacent to the
    /// empty cell at its turn; applying them all yields the solved grid.
    pub moves: Vec<usize>,
    /// Search nodes expanded while finding the sequence.
    pub nodes_expanded: u64,
}

/// Finds a shortest solution for `grid`.
///
/// # Returns
/// `Some(Solution)` with an optimal (possibly empty) move sequence, or
/// `None` when the permutation is not reachable by legal moves.
pub fn solve(grid: &Grid) -> Option<Solution> {
    if !grid.is_solvable() {
        return None;
    }

    let mut bound = solve_lower_bound(grid);
    let mut path = Vec::new();
    let mut nodes_expanded = 0;
    loop {
        match search(grid, 0, bound, None, &mut path, &mut nodes_expanded) {
            Ok(()) => {
                return Some(Solution {
                    moves: path,
                    nodes_expanded,
                })
            }
            Err(next_bound) => {
                debug_assert!(next_bound > bound, "deepening bound must grow");
                trace!("deepening bound {} -> {}", bound, next_bound);
                bound = next_bound;
            }
        }
    }
}

/// Depth-first probe below `bound`. On success `path` holds the solution;
/// on failure returns the smallest estimate that exceeded the bound.
fn search(
    grid: &Grid,
    cost: u32,
    bound: u32,
    prev_empty: Option<usize>,
    path: &mut Vec<usize>,
    nodes_expanded: &mut u64,
) -> Result<(), u32> {
    let estimate = cost + solve_lower_bound(grid);
    if estimate > bound {
        return Err(estimate);
    }
    if grid.is_solved() {
        return Ok(());
    }

    *nodes_expanded += 1;
    let mut min_exceeded = u32::MAX;
    let empty = grid.empty_index();
    for candidate in neighbors(empty) {
        // Sliding the tile back where it just came from cannot be part of
        // a shortest sequence.
        if prev_empty == Some(candidate) {
            continue;
        }

        let mut next = grid.clone();
        let moved = next.slide(candidate);
        debug_assert!(moved);

        path.push(candidate);
        match search(&next, cost + 1, bound, Some(empty), path, nodes_expanded) {
            Ok(()) => return Ok(()),
            Err(exceeded) => min_exceeded = min_exceeded.min(exceeded),
        }
        path.pop();
    }

    Err(min_exceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    #[test]
    fn test_solved_grid_needs_no_moves() {
        let solution = solve(&Grid::solved()).unwrap();
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn test_single_move_solution() {
        let grid = grid_from_str_array(&["123", "456", "7.8"]).unwrap();
        let solution = solve(&grid).unwrap();
        assert_eq!(solution.moves, vec![8]);
    }

    #[test]
    fn test_two_move_solution() {
        let grid = grid_from_str_array(&["12.", "453", "786"]).unwrap();
        let solution = solve(&grid).unwrap();
        assert_eq!(solution.moves, vec![5, 8]);
    }

    #[test]
    fn test_unsolvable_permutation_returns_none() {
        let grid = grid_from_str_array(&["213", "456", "78."]).unwrap();
        assert!(solve(&grid).is_none());
    }

    #[test]
    fn test_scrambles_solve_within_walk_length() {
        // A scramble of n legal moves is undoable in n moves, so an
        // optimal solution can never be longer. Each move is a single
        // transposition, so the optimal length also matches the walk
        // length modulo 2.
        let walk = 30;
        for seed in 0..10 {
            let grid = Grid::shuffled_with_seed(seed, walk);
            let solution = solve(&grid).expect("walk scrambles are always solvable");
            assert!(solution.moves.len() <= walk as usize, "seed {}", seed);
            assert_eq!(
                solution.moves.len() % 2,
                walk as usize % 2,
                "seed {}",
                seed
            );

            let mut replay = grid.clone();
            for &index in &solution.moves {
                assert!(replay.slide(index), "illegal move in solution (seed {})", seed);
            }
            assert!(replay.is_solved(), "seed {}", seed);
        }
    }
}
