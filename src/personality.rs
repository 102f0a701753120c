//! Engine personalities
//!
//! A personality is a closed policy bundle that modulates search depth,
//! move ordering, and randomization. Each variant is dispatched through a
//! single [`Profile`] record rather than conditionals scattered across the
//! search, so every personality's contract stays independently testable.

use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Pos, BOARD_SIZE};
use crate::rules::lines_through;

/// Probability shared by the RANDOM personality's two independent coin
/// flips: the top-level escape hatch and the in-tree order shuffle.
const RANDOM_CHANCE: f64 = 0.2;

/// Defensive-priority score for a move that denies a one-from-victory line
const BLOCKING_PRIORITY: i32 = 10;

/// Named engine behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    /// Standard minimax with alpha-beta
    Balanced,
    /// Prefers center/corner moves and never plays reactive blocks
    Aggressive,
    /// Explores blocking moves first
    Defensive,
    /// Occasionally plays (and orders) moves at random
    Random,
    /// Searches one ply deeper than the rest
    Learning,
}

/// How the maximizing side orders child moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrdering {
    /// Plain row-major order
    Plain,
    /// Center and corner moves first (stable among ties)
    CenterFirst,
    /// Descending defensive priority (stable among ties)
    DefenseFirst,
    /// Shuffled with probability [`RANDOM_CHANCE`], plain otherwise
    Shuffled,
}

/// Per-personality strategy record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Extra plies added to the fixed search depth
    pub depth_bonus: u8,
    /// Probability of bypassing all tactical reasoning at move selection
    pub escape_chance: f64,
    /// Whether the immediate-block check runs before the full search
    pub blocks_threats: bool,
    /// Child ordering used on the maximizing side
    pub ordering: MoveOrdering,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::Balanced,
        Personality::Aggressive,
        Personality::Defensive,
        Personality::Random,
        Personality::Learning,
    ];

    /// The strategy table entry for this personality
    #[must_use]
    pub fn profile(self) -> Profile {
        match self {
            Personality::Balanced => Profile {
                depth_bonus: 0,
                escape_chance: 0.0,
                blocks_threats: true,
                ordering: MoveOrdering::Plain,
            },
            Personality::Aggressive => Profile {
                depth_bonus: 0,
                escape_chance: 0.0,
                blocks_threats: false,
                ordering: MoveOrdering::CenterFirst,
            },
            Personality::Defensive => Profile {
                depth_bonus: 0,
                escape_chance: 0.0,
                blocks_threats: true,
                ordering: MoveOrdering::DefenseFirst,
            },
            Personality::Random => Profile {
                depth_bonus: 0,
                escape_chance: RANDOM_CHANCE,
                blocks_threats: true,
                ordering: MoveOrdering::Shuffled,
            },
            Personality::Learning => Profile {
                depth_bonus: 1,
                escape_chance: 0.0,
                blocks_threats: true,
                ordering: MoveOrdering::Plain,
            },
        }
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(Personality::Balanced),
            "aggressive" => Ok(Personality::Aggressive),
            "defensive" => Ok(Personality::Defensive),
            "random" => Ok(Personality::Random),
            "learning" => Ok(Personality::Learning),
            other => Err(format!(
                "unknown personality '{other}' (expected balanced, aggressive, defensive, random, or learning)"
            )),
        }
    }
}

/// Reorder candidate moves in place for the maximizing side.
///
/// Only the maximizing (engine) side reorders; the minimizing side always
/// explores in plain row-major order. All sorts are stable so equal-priority
/// moves keep their row-major relative order.
pub fn order_moves(moves: &mut [Pos], board: &Board, ordering: MoveOrdering, rng: &mut impl Rng) {
    match ordering {
        MoveOrdering::Plain => {}
        MoveOrdering::CenterFirst => {
            moves.sort_by_key(|m| if m.is_center() || m.is_corner() { 0 } else { 1 });
        }
        MoveOrdering::DefenseFirst => {
            moves.sort_by_key(|&m| -defensive_priority(board, m));
        }
        MoveOrdering::Shuffled => {
            if rng.random_bool(RANDOM_CHANCE) {
                moves.shuffle(rng);
            }
        }
    }
}

/// Defensive priority of a candidate move.
///
/// Scores [`BLOCKING_PRIORITY`] when placing the HUMAN mark on the cell
/// would bring some line to one move from victory: the line contains no
/// blocked cell and no engine mark, and after the hypothetical placement
/// holds all but one of its cells as human marks. Everything else scores 0.
#[must_use]
pub fn defensive_priority(board: &Board, pos: Pos) -> i32 {
    for line in lines_through(pos) {
        let mut human = 0usize;
        let mut dead = false;

        for &cell_pos in &line {
            match board.get(cell_pos) {
                Cell::Human => human += 1,
                Cell::Empty => {}
                Cell::Engine | Cell::Blocked => {
                    dead = true;
                    break;
                }
            }
        }

        // pos itself is empty, so the hypothetical mark brings the line to
        // BOARD_SIZE - 1 human marks with exactly one empty cell left
        if !dead && human == BOARD_SIZE - 2 {
            return BLOCKING_PRIORITY;
        }
    }
    0
}
