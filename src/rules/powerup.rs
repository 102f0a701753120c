//! Power-up tokens and their distribution
//!
//! Power-ups are a human-only affordance: a token sits on an empty cell
//! until a human action resolves it, at which point it is consumed. The
//! automated player never triggers one, so the search engine ignores the
//! token grid entirely.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, BOARD_SIZE};

/// Number of tokens scattered per new game
pub const POWERUP_COUNT: usize = 2;

/// One-time special action tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    /// Permanently remove a cell from play
    Block,
    /// Exchange the token's cell with an occupied cell
    Swap,
    /// Place a mark and keep the turn
    Wildcard,
}

impl PowerUp {
    const ALL: [PowerUp; 3] = [PowerUp::Block, PowerUp::Swap, PowerUp::Wildcard];
}

/// Grid of optional tokens parallel to the board.
///
/// Invariant: a token only occupies a cell that is empty on the board; once
/// the cell's mark becomes non-empty the token there is dead and must be
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpGrid {
    tokens: [[Option<PowerUp>; BOARD_SIZE]; BOARD_SIZE],
}

impl PowerUpGrid {
    pub fn new() -> Self {
        Self {
            tokens: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Token at position, if any
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<PowerUp> {
        self.tokens[pos.row as usize][pos.col as usize]
    }

    /// Remove and return the token at position
    #[inline]
    pub fn take(&mut self, pos: Pos) -> Option<PowerUp> {
        self.tokens[pos.row as usize][pos.col as usize].take()
    }

    /// Clear all tokens
    pub fn reset(&mut self) {
        self.tokens = [[None; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Number of tokens currently on the grid
    pub fn count(&self) -> usize {
        self.tokens
            .iter()
            .flatten()
            .filter(|t| t.is_some())
            .count()
    }

    /// Scatter a fresh set of tokens over the board's empty cells.
    ///
    /// Clears any existing tokens, then places [`POWERUP_COUNT`] tokens of
    /// uniformly random kinds at positions sampled without replacement from
    /// the cells that are empty on `board`.
    pub fn scatter(&mut self, board: &Board, rng: &mut impl Rng) {
        self.reset();

        let mut available = board.legal_moves();
        for _ in 0..POWERUP_COUNT.min(available.len()) {
            let idx = rng.random_range(0..available.len());
            let pos = available.swap_remove(idx);
            let kind = *PowerUp::ALL
                .choose(rng)
                .expect("power-up kind list is non-empty");
            self.tokens[pos.row as usize][pos.col as usize] = Some(kind);
        }
    }
}

impl Default for PowerUpGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_places_exactly_two() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::new();
        let mut grid = PowerUpGrid::new();

        grid.scatter(&board, &mut rng);
        assert_eq!(grid.count(), POWERUP_COUNT);
    }

    #[test]
    fn test_scatter_only_on_empty_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new();
        // Fill everything except two cells
        for idx in 0..7 {
            board.place_mark(Pos::from_index(idx), Side::Human);
        }

        let mut grid = PowerUpGrid::new();
        grid.scatter(&board, &mut rng);

        assert_eq!(grid.count(), 2);
        assert!(grid.get(Pos::from_index(7)).is_some());
        assert!(grid.get(Pos::from_index(8)).is_some());
    }

    #[test]
    fn test_scatter_caps_at_available_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new();
        for idx in 0..8 {
            board.place_mark(Pos::from_index(idx), Side::Engine);
        }

        let mut grid = PowerUpGrid::new();
        grid.scatter(&board, &mut rng);
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn test_take_consumes() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::new();
        let mut grid = PowerUpGrid::new();
        grid.scatter(&board, &mut rng);

        let pos = (0..9)
            .map(Pos::from_index)
            .find(|&p| grid.get(p).is_some())
            .unwrap();
        assert!(grid.take(pos).is_some());
        assert!(grid.get(pos).is_none());
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn test_seeded_scatter_is_deterministic() {
        let board = Board::new();
        let mut a = PowerUpGrid::new();
        let mut b = PowerUpGrid::new();

        a.scatter(&board, &mut StdRng::seed_from_u64(99));
        b.scatter(&board, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
