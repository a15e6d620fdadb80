//! Core game engine for the sliding-tile puzzle.
//!
//! This module defines the game's fundamental components:
//! - `TileId`: Identifies the source-image slice a tile displays, including
//!   the blank slice that marks the empty cell.
//! - `Grid`: Represents the 3x3 board and includes methods for move
//!   legality, sliding, shuffling, solvability and win detection.
//! - `Game`: Manages one play session, including the move counter, the
//!   selected difficulty and the phase machine (unstarted, active, solved).

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Number of columns (and rows) of the board. The puzzle is always 3x3.
pub const GRID_SIDE: usize = 3;

/// Total number of cells on the board.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Identity of a source-image slice.
///
/// Ids `0..=7` are the visible slices; id 8 is the blank slice, and the
/// cell holding it is the empty cell. In the solved configuration tile `n`
/// sits on cell `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(u8);

impl TileId {
    /// The blank slice. Exactly one cell holds it at all times.
    pub const BLANK: TileId = TileId((GRID_CELLS - 1) as u8);

    /// Creates a tile id from a raw slice number.
    ///
    /// # Returns
    /// `Some(TileId)` for slice numbers in `0..9`, `None` otherwise.
    pub fn new(id: u8) -> Option<TileId> {
        if (id as usize) < GRID_CELLS {
            Some(TileId(id))
        } else {
            None
        }
    }

    /// Index of the cell this tile occupies in the solved configuration.
    pub fn home_index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the blank slice.
    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }

    /// Background-image offsets, in percent, of the slice this tile
    /// displays. The rendering collaborator positions the shared source
    /// image by these offsets. The blank slice has no image region.
    pub fn slice_origin(self) -> Option<(u32, u32)> {
        if self.is_blank() {
            return None;
        }
        let x = (self.0 as u32 % GRID_SIDE as u32) * 100;
        let y = (self.0 as u32 / GRID_SIDE as u32) * 100;
        Some((x, y))
    }

    /// Converts the tile to its character representation.
    ///
    /// This is used for text-based display and parsing of grids.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileshift::engine::TileId;
    /// assert_eq!(TileId::new(0).unwrap().to_char(), '1');
    /// assert_eq!(TileId::BLANK.to_char(), '.');
    /// ```
    pub fn to_char(self) -> char {
        if self.is_blank() {
            '.'
        } else {
            (b'1' + self.0) as char
        }
    }

    /// Parses a tile from its character representation, the inverse of
    /// [`TileId::to_char`]. Returns `None` for unrecognized characters.
    pub fn from_char(ch: char) -> Option<TileId> {
        match ch {
            '.' => Some(Self::BLANK),
            '1'..='8' => Some(TileId(ch as u8 - b'1')),
            _ => None,
        }
    }
}

/// Row of a cell index on the board.
pub fn cell_row(index: usize) -> usize {
    index / GRID_SIDE
}

/// Column of a cell index on the board.
pub fn cell_col(index: usize) -> usize {
    index % GRID_SIDE
}

/// Returns true iff the two cell indices share an edge on the board.
///
/// Interpreted as (row, col) coordinates, exactly one axis differs by
/// exactly one step (Manhattan distance 1). Diagonal neighbours and a cell
/// paired with itself never count. Out-of-bounds indices are never
/// adjacent to anything.
pub fn is_adjacent(a: usize, b: usize) -> bool {
    if a >= GRID_CELLS || b >= GRID_CELLS {
        return false;
    }
    let dr = cell_row(a).abs_diff(cell_row(b));
    let dc = cell_col(a).abs_diff(cell_col(b));
    dr + dc == 1
}

/// Iterates over the in-bounds edge neighbours of a cell index.
///
/// Candidates are the four offset cells (left, right, above, below); the
/// adjacency check filters out both out-of-bounds offsets and the row wrap
/// of the +-1 offsets at the board's left and right edges. Every cell on a
/// 3x3 board has at least two neighbours.
pub fn neighbors(index: usize) -> impl Iterator<Item = usize> {
    const OFFSETS: [isize; 4] = [-(GRID_SIDE as isize), -1, 1, GRID_SIDE as isize];
    OFFSETS.into_iter().filter_map(move |delta| {
        let candidate = index as isize + delta;
        if candidate >= 0 && (candidate as usize) < GRID_CELLS && is_adjacent(index, candidate as usize)
        {
            Some(candidate as usize)
        } else {
            None
        }
    })
}

/// Represents the 3x3 board as a permutation of the nine tile ids.
///
/// The position of the blank tile is cached in `empty`; whether a cell is
/// the empty cell is derived by comparing its index against that cache, so
/// there is no per-cell flag that could drift out of sync.
///
/// # Examples
/// ```
/// use tileshift::engine::Grid;
/// let mut grid = Grid::solved();
/// assert!(grid.is_solved());
/// assert!(grid.slide(5));
/// assert_eq!(grid.empty_index(), 5);
/// assert!(!grid.is_solved());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [TileId; GRID_CELLS],
    empty: usize,
}

impl Grid {
    /// Creates the solved configuration: tile `n` on cell `n`, blank at the
    /// bottom-right corner.
    pub fn solved() -> Self {
        let mut cells = [TileId::BLANK; GRID_CELLS];
        for (index, cell) in cells.iter_mut().enumerate() {
            *cell = TileId(index as u8);
        }
        Grid {
            cells,
            empty: GRID_CELLS - 1,
        }
    }

    /// Creates a grid from an explicit cell assignment.
    ///
    /// # Returns
    /// `Some(Grid)` when the nine cells form a permutation of all nine tile
    /// ids (every tile exactly once, hence exactly one blank), `None`
    /// otherwise.
    pub fn from_cells(cells: [TileId; GRID_CELLS]) -> Option<Grid> {
        let mut seen = [false; GRID_CELLS];
        for tile in &cells {
            if seen[tile.home_index()] {
                return None;
            }
            seen[tile.home_index()] = true;
        }
        let empty = cells.iter().position(|tile| tile.is_blank())?;
        Some(Grid { cells, empty })
    }

    /// Returns the tile at the given cell index.
    ///
    /// # Panics
    /// Panics if `index` is outside `0..9`.
    pub fn tile(&self, index: usize) -> TileId {
        self.cells[index]
    }

    /// Index of the cell currently holding the blank tile.
    pub fn empty_index(&self) -> usize {
        self.empty
    }

    /// Returns true iff `index` is the empty cell.
    pub fn is_empty_cell(&self, index: usize) -> bool {
        index == self.empty
    }

    /// Attempts to slide the tile at `index` into the empty cell.
    ///
    /// The operation is a no-op unless `index` is edge-adjacent to the
    /// empty cell. On success the two cells swap content and the empty
    /// cache moves to `index`.
    ///
    /// # Returns
    /// `true` if the tile was moved, `false` if the move was rejected.
    pub fn slide(&mut self, index: usize) -> bool {
        if !is_adjacent(index, self.empty) {
            return false;
        }
        self.cells.swap(index, self.empty);
        self.empty = index;
        debug_assert!(self.cells[self.empty].is_blank());
        true
    }

    /// Permutes the grid with a random walk of `moves` legal slides.
    ///
    /// Each step picks uniformly among the edge neighbours of the current
    /// empty cell and slides that tile. Because only legal moves are used,
    /// the resulting configuration is always reachable from the starting
    /// one; a uniform permutation shuffle would not have that property,
    /// since only half of all tile permutations can be reached by sliding.
    pub fn shuffle(&mut self, rng: &mut impl Rng, moves: u32) {
        for _ in 0..moves {
            let candidates: Vec<usize> = neighbors(self.empty).collect();
            debug_assert!(
                !candidates.is_empty(),
                "every cell on a 3x3 board has at least two neighbours"
            );
            let pick = candidates[rng.gen_range(0..candidates.len())];
            let moved = self.slide(pick);
            debug_assert!(moved);
        }
        debug!("shuffled {} moves, empty cell now at {}", moves, self.empty);
    }

    /// Creates a grid scrambled from the solved configuration by a seeded
    /// random walk. The same seed and walk length always produce the same
    /// grid, which keeps scrambles reproducible across runs.
    pub fn shuffled_with_seed(seed: u64, moves: u32) -> Grid {
        let mut grid = Grid::solved();
        let mut rng = SmallRng::seed_from_u64(seed);
        grid.shuffle(&mut rng, moves);
        grid
    }

    /// Returns true iff every tile sits on its solved cell.
    ///
    /// Checking all nine cells covers the blank as well: when tiles `0..=7`
    /// are home, the blank can only be on cell 8.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(index, tile)| tile.home_index() == index)
    }

    /// Returns true iff the configuration can be solved by legal slides.
    ///
    /// On an odd-width board a configuration is reachable from the solved
    /// one exactly when the number of tile inversions is even. Grids
    /// produced by [`Grid::shuffle`] always pass; hand-written grids (for
    /// instance from a board file) may not.
    pub fn is_solvable(&self) -> bool {
        let mut inversions = 0;
        for i in 0..GRID_CELLS {
            if self.cells[i].is_blank() {
                continue;
            }
            for j in i + 1..GRID_CELLS {
                if !self.cells[j].is_blank()
                    && self.cells[j].home_index() < self.cells[i].home_index()
                {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 0
    }

    /// Generates an ANSI rendering of the board for terminal play.
    ///
    /// Tiles are coloured by the source-image row of their slice, the
    /// empty cell is drawn on a dark background, and `pos`, when given, is
    /// rendered reversed (used to highlight the last moved tile).
    pub fn to_string_with_highlight(&self, pos: Option<usize>) -> String {
        let mut output = String::new();
        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let index = row * GRID_SIDE + col;
                let tile = self.cells[index];
                let color_code = match tile.slice_origin() {
                    Some((_, 0)) => "44",
                    Some((_, 100)) => "45",
                    Some(_) => "46",
                    None => "40",
                };
                let content = if self.is_empty_cell(index) {
                    "   ".to_string()
                } else {
                    format!(" {} ", tile.to_char())
                };
                if pos == Some(index) {
                    output.push_str(&format!("\x1b[1;7;{}m{}\x1b[m", color_code, content));
                } else {
                    output.push_str(&format!("\x1b[1;{}m{}\x1b[m", color_code, content));
                }
            }
            if row < GRID_SIDE - 1 {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Grid {
    /// Formats the grid as three rows of tile characters, e.g.
    /// `123\n456\n78.` for the solved configuration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                write!(f, "{}", self.cells[row * GRID_SIDE + col].to_char())?;
            }
            if row < GRID_SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Shuffle presets selectable once per game start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of random legal moves the shuffle walk applies.
    pub fn shuffle_moves(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 30,
            Difficulty::Hard => 100,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", s)
    }
}

/// Phase of a play session.
///
/// `start` shuffles synchronously, so a session is never observable
/// mid-shuffle; it goes straight from its previous phase to `Active`.
/// `Solved` is terminal until the next `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Unstarted,
    Active,
    Solved,
}

/// Outcome of [`Game::attempt_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The tile was slid into the empty cell.
    Moved,
    /// The tile was slid into the empty cell and the grid is now solved.
    Solved,
    /// The move was ignored; nothing changed.
    Rejected,
}

/// Manages the state and progression of one play session.
///
/// This struct owns the grid, the selected difficulty, the move counter
/// and the phase machine. A fresh session starts `Unstarted` with a solved
/// grid; `start` shuffles and activates it, and solving freezes it until
/// the next `start`.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use tileshift::engine::{Difficulty, Game, GamePhase};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut game = Game::new();
/// game.start(Difficulty::Easy, &mut rng);
/// assert_eq!(game.phase(), GamePhase::Active);
/// assert_eq!(game.move_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    difficulty: Difficulty,
    phase: GamePhase,
    move_count: u32,
}

impl Game {
    /// Creates an unstarted session holding the solved grid.
    pub fn new() -> Self {
        Game {
            grid: Grid::solved(),
            difficulty: Difficulty::Medium,
            phase: GamePhase::Unstarted,
            move_count: 0,
        }
    }

    /// Creates an active session over a specific grid.
    ///
    /// Used by tests and the solver binaries to play out a known
    /// configuration without shuffling.
    pub fn with_grid(grid: Grid) -> Self {
        Game {
            grid,
            difficulty: Difficulty::Medium,
            phase: GamePhase::Active,
            move_count: 0,
        }
    }

    /// Starts a new game: resets the move counter, reshuffles a solved
    /// grid with the difficulty's walk length and enters `Active`.
    ///
    /// Any previous session state is discarded, including a terminal
    /// `Solved` phase.
    pub fn start(&mut self, difficulty: Difficulty, rng: &mut impl Rng) {
        let mut grid = Grid::solved();
        grid.shuffle(rng, difficulty.shuffle_moves());
        self.grid = grid;
        self.difficulty = difficulty;
        self.move_count = 0;
        self.phase = GamePhase::Active;
        debug!("new game started ({})", difficulty);
    }

    /// Returns an immutable reference to the current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the current phase of the session.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the number of accepted moves this game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns the difficulty the current game was started with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Processes a request to slide the tile at `index` into the grid.
    ///
    /// The request is rejected, leaving the grid, the empty cache and the
    /// move counter untouched, unless the session is `Active`, `index` is
    /// in bounds and the cell is edge-adjacent to the empty cell. An
    /// accepted move swaps the two cells, increments the move counter by
    /// one and runs the win check.
    pub fn attempt_move(&mut self, index: usize) -> MoveResult {
        if self.phase != GamePhase::Active || index >= GRID_CELLS {
            return MoveResult::Rejected;
        }
        if !self.grid.slide(index) {
            return MoveResult::Rejected;
        }
        self.move_count += 1;
        debug!("move {} accepted: cell {} into the empty slot", self.move_count, index);
        if self.grid.is_solved() {
            self.phase = GamePhase::Solved;
            debug!("solved in {} moves", self.move_count);
            MoveResult::Solved
        } else {
            MoveResult::Moved
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    #[test]
    fn test_solved_grid_layout() {
        let grid = Grid::solved();
        for index in 0..GRID_CELLS {
            assert_eq!(grid.tile(index).home_index(), index);
        }
        assert_eq!(grid.empty_index(), 8);
        assert!(grid.is_empty_cell(8));
        assert!(!grid.is_empty_cell(0));
        assert!(grid.is_solved());
    }

    #[test]
    fn test_adjacency_matches_manhattan_distance() {
        for a in 0..GRID_CELLS {
            for b in 0..GRID_CELLS {
                let dr = cell_row(a).abs_diff(cell_row(b));
                let dc = cell_col(a).abs_diff(cell_col(b));
                let expected = (dr == 1 && dc == 0) || (dr == 0 && dc == 1);
                assert_eq!(is_adjacent(a, b), expected, "pair ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_neighbors_center_corner_edge() {
        let mut center: Vec<usize> = neighbors(4).collect();
        center.sort_unstable();
        assert_eq!(center, vec![1, 3, 5, 7]);

        let mut corner: Vec<usize> = neighbors(0).collect();
        corner.sort_unstable();
        assert_eq!(corner, vec![1, 3]);

        // Cell 5 ends a row; index 6 starts the next one and must not leak
        // in through the +1 offset.
        let mut edge: Vec<usize> = neighbors(5).collect();
        edge.sort_unstable();
        assert_eq!(edge, vec![2, 4, 8]);
    }

    #[test]
    fn test_tile_slice_origins() {
        assert_eq!(TileId::new(0).unwrap().slice_origin(), Some((0, 0)));
        assert_eq!(TileId::new(5).unwrap().slice_origin(), Some((200, 100)));
        assert_eq!(TileId::new(7).unwrap().slice_origin(), Some((100, 200)));
        assert_eq!(TileId::BLANK.slice_origin(), None);
    }

    #[test]
    fn test_tile_char_round_trip() {
        for id in 0..GRID_CELLS as u8 {
            let tile = TileId::new(id).unwrap();
            assert_eq!(TileId::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(TileId::from_char('9'), None);
        assert_eq!(TileId::from_char('x'), None);
        assert_eq!(TileId::new(9), None);
    }

    #[test]
    fn test_slide_rejects_non_adjacent() {
        let mut grid = Grid::solved();
        let before = grid.clone();
        assert!(!grid.slide(0)); // far corner
        assert!(!grid.slide(4)); // diagonal neighbour of the empty cell
        assert!(!grid.slide(8)); // the empty cell itself
        assert!(!grid.slide(12)); // out of bounds
        assert_eq!(grid, before);
    }

    #[test]
    fn test_slide_swaps_and_updates_empty() {
        let mut grid = Grid::solved();
        assert!(grid.slide(5));
        assert_eq!(grid.empty_index(), 5);
        assert!(grid.is_empty_cell(5));
        assert_eq!(grid.tile(8), TileId::new(5).unwrap());
        assert!(!grid.is_solved());
    }

    #[test]
    fn test_from_cells_rejects_duplicates() {
        let mut cells = [TileId::BLANK; GRID_CELLS];
        for (index, cell) in cells.iter_mut().enumerate() {
            *cell = TileId::new(index as u8).unwrap();
        }
        assert!(Grid::from_cells(cells).is_some());

        cells[0] = TileId::new(1).unwrap(); // tile 1 now appears twice
        assert!(Grid::from_cells(cells).is_none());
    }

    #[test]
    fn test_shuffle_walk_stays_solvable() {
        for seed in 0..10 {
            let grid = Grid::shuffled_with_seed(seed, 100);
            assert!(grid.is_solvable(), "seed {}", seed);
        }
    }

    #[test]
    fn test_shuffle_zero_moves_is_solved() {
        assert!(Grid::shuffled_with_seed(7, 0).is_solved());
    }

    #[test]
    fn test_shuffle_deterministic_for_seed() {
        assert_eq!(
            Grid::shuffled_with_seed(42, 30),
            Grid::shuffled_with_seed(42, 30)
        );
    }

    #[test]
    fn test_single_transposition_is_unsolvable() {
        let grid = grid_from_str_array(&["213", "456", "78."]).unwrap();
        assert!(!grid.is_solvable());
    }

    #[test]
    fn test_game_rejects_moves_before_start() {
        let mut game = Game::new();
        assert_eq!(game.phase(), GamePhase::Unstarted);
        assert_eq!(game.attempt_move(5), MoveResult::Rejected);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_game_start_resets_counters() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut game = Game::new();
        game.start(Difficulty::Easy, &mut rng);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.difficulty(), Difficulty::Easy);

        let target = neighbors(game.grid().empty_index()).next().unwrap();
        assert_ne!(game.attempt_move(target), MoveResult::Rejected);
        assert_eq!(game.move_count(), 1);

        game.start(Difficulty::Hard, &mut rng);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_accepted_move_solves_the_grid() {
        let grid = grid_from_str_array(&["123", "456", "7.8"]).unwrap();
        let mut game = Game::with_grid(grid);
        assert_eq!(game.attempt_move(8), MoveResult::Solved);
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.phase(), GamePhase::Solved);
        assert!(game.grid().is_solved());

        // Terminal until the next start.
        assert_eq!(game.attempt_move(7), MoveResult::Rejected);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let grid = grid_from_str_array(&["123", "456", "7.8"]).unwrap();
        let mut game = Game::with_grid(grid.clone());
        assert_eq!(game.attempt_move(0), MoveResult::Rejected);
        assert_eq!(game.attempt_move(9), MoveResult::Rejected);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_inverse_walk_returns_to_solved() {
        // A scripted 10-move walk from the solved grid. Undoing it in
        // reverse order must restore the solved configuration and count
        // exactly 10 accepted moves. None of the intermediate states is
        // solved, so the session stays active throughout the replay.
        let slides = [5, 2, 1, 0, 3, 4, 7, 6, 3, 4];
        let mut grid = Grid::solved();
        let mut undo_stack = Vec::new();
        for &index in &slides {
            undo_stack.push(grid.empty_index());
            assert!(grid.slide(index));
        }
        assert!(!grid.is_solved());

        let mut game = Game::with_grid(grid);
        while let Some(target) = undo_stack.pop() {
            assert_ne!(game.attempt_move(target), MoveResult::Rejected);
        }
        assert_eq!(game.phase(), GamePhase::Solved);
        assert!(game.grid().is_solved());
        assert_eq!(game.move_count(), 10);
    }

    #[test]
    fn test_difficulty_shuffle_moves() {
        assert_eq!(Difficulty::Easy.shuffle_moves(), 10);
        assert_eq!(Difficulty::Medium.shuffle_moves(), 30);
        assert_eq!(Difficulty::Hard.shuffle_moves(), 100);
    }
}
