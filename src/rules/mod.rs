//! Game rules for Enhanced Tic-Tac-Toe
//!
//! This module implements the rule set:
//! - Winning-line enumeration and scan order
//! - Win/draw detection with blocked-cell vetoes
//! - Power-up tokens (block, swap, wildcard) and their distribution

pub mod lines;
pub mod powerup;
pub mod win;

// Re-exports for convenient access
pub use lines::{all_lines, lines_through, LINE_COUNT};
pub use powerup::{PowerUp, PowerUpGrid, POWERUP_COUNT};
pub use win::{evaluate_outcome, winning_line, Outcome};
