//! Lower-bound estimates for the sliding-tile solver.
//!
//! Each estimate never overestimates the number of remaining moves, so all
//! of them are safe to drive the IDA* search in [`crate::solver`].
//! `solve_lower_bound` is the bound the solver actually uses; the
//! individual estimates are also reported by the `difficulty_evaluator`
//! binary to characterise scrambles.

use crate::engine::{cell_col, cell_row, Grid, GRID_CELLS, GRID_SIDE};

/// Counts non-blank tiles that are not on their solved cell.
///
/// The weakest of the estimates, useful as a quick scramble measure: each
/// misplaced tile needs at least one move.
pub fn misplaced_tiles(grid: &Grid) -> u32 {
    let mut count = 0;
    for index in 0..GRID_CELLS {
        let tile = grid.tile(index);
        if !tile.is_blank() && tile.home_index() != index {
            count += 1;
        }
    }
    count
}

/// Sums, over all non-blank tiles, the row plus column distance from the
/// tile's current cell to its solved cell.
///
/// Every move slides exactly one tile one step, so the total can shrink by
/// at most one per move.
pub fn manhattan_distance(grid: &Grid) -> u32 {
    let mut distance = 0;
    for index in 0..GRID_CELLS {
        let tile = grid.tile(index);
        if tile.is_blank() {
            continue;
        }
        let home = tile.home_index();
        distance += cell_row(index).abs_diff(cell_row(home)) as u32;
        distance += cell_col(index).abs_diff(cell_col(home)) as u32;
    }
    distance
}

/// Counts linear conflicts: pairs of tiles sitting in their home row (or
/// home column) in reversed relative order.
///
/// Two such tiles cannot pass each other inside the line, so one of them
/// must leave and re-enter it, costing at least two moves beyond their
/// Manhattan distance.
pub fn linear_conflicts(grid: &Grid) -> u32 {
    let mut conflicts = 0;

    for line in 0..GRID_SIDE {
        // Row conflicts.
        let mut max_seen: Option<usize> = None;
        for col in 0..GRID_SIDE {
            let tile = grid.tile(line * GRID_SIDE + col);
            if tile.is_blank() || cell_row(tile.home_index()) != line {
                continue;
            }
            match max_seen {
                Some(prev) if tile.home_index() < prev => conflicts += 1,
                _ => max_seen = Some(tile.home_index()),
            }
        }

        // Column conflicts.
        let mut max_seen: Option<usize> = None;
        for row in 0..GRID_SIDE {
            let tile = grid.tile(row * GRID_SIDE + line);
            if tile.is_blank() || cell_col(tile.home_index()) != line {
                continue;
            }
            match max_seen {
                Some(prev) if tile.home_index() < prev => conflicts += 1,
                _ => max_seen = Some(tile.home_index()),
            }
        }
    }

    conflicts
}

/// The admissible lower bound used by the solver: Manhattan distance plus
/// two moves per linear conflict.
pub fn solve_lower_bound(grid: &Grid) -> u32 {
    manhattan_distance(grid) + 2 * linear_conflicts(grid)
}
