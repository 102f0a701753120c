//! Heuristic evaluation for non-terminal positions
//!
//! Used only at the search depth cutoff. Scores the board from the engine's
//! perspective by summing a per-line score over every row, column, and both
//! diagonals, plus a flat bonus for holding the center.

use crate::board::{Board, Cell, Pos, BOARD_SIZE};
use crate::rules::all_lines;

/// Flat bonus/penalty for occupying the center cell
const CENTER_BONUS: i32 = 2;

/// Evaluate the board from the engine's perspective.
///
/// Positive scores favor the engine, negative scores favor the human.
/// Each line contributes the square of the engine's mark count when the
/// human has no mark in it (and the mirrored negative square for the
/// human); mixed lines, all-empty lines, and lines touching a blocked cell
/// contribute nothing.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0;

    for line in &all_lines() {
        score += evaluate_line(board, line);
    }

    let center = Pos::new((BOARD_SIZE / 2) as u8, (BOARD_SIZE / 2) as u8);
    match board.get(center) {
        Cell::Engine => score += CENTER_BONUS,
        Cell::Human => score -= CENTER_BONUS,
        Cell::Empty | Cell::Blocked => {}
    }

    score
}

/// Score a single line.
fn evaluate_line(board: &Board, line: &[Pos; BOARD_SIZE]) -> i32 {
    let mut engine = 0i32;
    let mut human = 0i32;

    for &pos in line {
        match board.get(pos) {
            Cell::Engine => engine += 1,
            Cell::Human => human += 1,
            Cell::Empty => {}
            // A blocked cell makes the line unwinnable for either side
            Cell::Blocked => return 0,
        }
    }

    if human == 0 && engine > 0 {
        engine * engine // Square to emphasize near-complete lines
    } else if engine == 0 && human > 0 {
        -human * human
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn test_empty_board_is_neutral() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_center_mark() {
        let mut board = Board::new();
        board.place_mark(Pos::new(1, 1), Side::Engine);
        // Four lines through the center score 1 each, plus the center bonus
        assert_eq!(evaluate(&board), 4 + CENTER_BONUS);

        let mut board = Board::new();
        board.place_mark(Pos::new(1, 1), Side::Human);
        assert_eq!(evaluate(&board), -(4 + CENTER_BONUS));
    }

    #[test]
    fn test_near_complete_line_scores_squared() {
        let mut board = Board::new();
        board.place_mark(Pos::new(0, 0), Side::Engine);
        board.place_mark(Pos::new(0, 1), Side::Engine);
        // Row 0 scores 4; column 0, column 1, and the main diagonal score 1 each
        assert_eq!(evaluate(&board), 4 + 1 + 1 + 1);
    }

    #[test]
    fn test_mixed_line_is_dead() {
        let mut board = Board::new();
        board.place_mark(Pos::new(0, 0), Side::Engine);
        board.place_mark(Pos::new(0, 2), Side::Human);
        // Row 0 is mixed; remaining contributions cancel out symmetrically:
        // engine corner (col 0 + main diag) vs human corner (col 2 + anti diag)
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn test_blocked_line_scores_zero() {
        let mut board = Board::new();
        board.place_mark(Pos::new(0, 0), Side::Engine);
        board.block(Pos::new(0, 1));
        // Row 0 is vetoed; column 0 and the main diagonal still count
        assert_eq!(evaluate(&board), 2);
    }
}
