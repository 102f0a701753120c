//! Error types for rejected game commands
//!
//! User input (cell coordinates) is untrusted, so illegal commands are
//! rejected without mutating any state. None of these are fatal; the
//! caller reports them and waits for the next input.

use thiserror::Error;

use crate::board::Pos;
use crate::rules::PowerUp;

/// A game command that could not be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("cell {pos} is not empty")]
    CellOccupied { pos: Pos },

    #[error("cell {pos} does not hold a {expected:?} power-up")]
    MissingPowerUp { pos: Pos, expected: PowerUp },

    #[error("swap target {pos} must be an occupied cell")]
    SwapTargetEmpty { pos: Pos },

    #[error("no swap selection is pending")]
    NoPendingSwap,

    #[error("a swap selection is already pending at {pos}")]
    SwapAlreadyPending { pos: Pos },

    #[error("game is already over")]
    GameOver,
}
