//! Rule engine: turn ownership, move history, and power-up resolution
//!
//! [`Game`] owns the board and the power-up grid and is the only path
//! through which real moves mutate them (the search engine speculates on
//! the board directly, but always restores it). Commands validate first
//! and mutate second, so a rejected command leaves every piece of state
//! untouched.
//!
//! Power-ups are resolved by human actions only:
//! - **Block** marks a cell permanently unusable and consumes the turn
//! - **Swap** is a two-step selection: pick the token cell, then an
//!   occupied cell to exchange it with; consumes the turn
//! - **Wildcard** places the human mark and keeps the turn, the one
//!   action that does not hand control to the engine

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Side};
use crate::error::RuleError;
use crate::rules::{evaluate_outcome, Outcome, PowerUp, PowerUpGrid};

/// One entry of the move history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayedMove {
    /// A plain mark placement
    Mark { pos: Pos, side: Side },
    /// A cell permanently blocked by the Block power-up
    Block { pos: Pos },
    /// Two cells exchanged by the Swap power-up
    Swap { from: Pos, to: Pos },
    /// A human mark placed via the Wildcard power-up (turn retained)
    Wildcard { pos: Pos },
}

/// A full game: board, power-ups, turn ownership, and history
pub struct Game {
    board: Board,
    powerups: PowerUpGrid,
    turn: Side,
    history: Vec<PlayedMove>,
    pending_swap: Option<Pos>,
    rng: StdRng,
}

impl Game {
    /// New game with randomly scattered power-ups
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// New game with a fixed seed, for reproducible power-up placement
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(),
            powerups: PowerUpGrid::new(),
            turn: Side::Human,
            history: Vec::new(),
            pending_swap: None,
            rng: StdRng::seed_from_u64(seed),
        };
        game.powerups.scatter(&game.board, &mut game.rng);
        game
    }

    /// Clear board, power-ups, history, and pending selections, then
    /// redistribute a fresh set of power-ups. The human moves first.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Side::Human;
        self.history.clear();
        self.pending_swap = None;
        self.powerups.scatter(&self.board, &mut self.rng);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for the search engine's in-place speculation.
    ///
    /// While a search is running the board is transient state; only the
    /// pre- and post-search snapshots are authoritative.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn powerups(&self) -> &PowerUpGrid {
        &self.powerups
    }

    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Cell selected as the first half of a swap, if any
    #[inline]
    pub fn pending_swap(&self) -> Option<Pos> {
        self.pending_swap
    }

    /// Current outcome, recomputed from board contents on every call
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        evaluate_outcome(&self.board)
    }

    /// All empty cells in row-major order
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Pos> {
        self.board.legal_moves()
    }

    /// Place a side's mark on an empty cell.
    ///
    /// Clears any power-up token at the cell and hands the turn to the
    /// other side.
    pub fn apply_mark(&mut self, pos: Pos, side: Side) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        if !self.board.is_empty(pos) {
            return Err(RuleError::CellOccupied { pos });
        }

        self.board.place_mark(pos, side);
        self.powerups.take(pos);
        self.history.push(PlayedMove::Mark { pos, side });
        self.turn = side.opponent();
        Ok(())
    }

    /// Resolve a Block token: the cell becomes permanently unusable and
    /// the human's turn is consumed.
    pub fn apply_block(&mut self, pos: Pos) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        self.ensure_token(pos, PowerUp::Block)?;

        self.powerups.take(pos);
        self.board.block(pos);
        self.history.push(PlayedMove::Block { pos });
        self.turn = Side::Engine;
        Ok(())
    }

    /// First half of a swap: select the token cell.
    ///
    /// Consumes the token immediately (matching the interactive flow) and
    /// parks the selection until an occupied cell is chosen.
    pub fn begin_swap(&mut self, pos: Pos) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        if let Some(pending) = self.pending_swap {
            return Err(RuleError::SwapAlreadyPending { pos: pending });
        }
        self.ensure_token(pos, PowerUp::Swap)?;

        self.powerups.take(pos);
        self.pending_swap = Some(pos);
        Ok(())
    }

    /// Second half of a swap: exchange the pending cell with an occupied
    /// one and consume the turn.
    pub fn complete_swap(&mut self, target: Pos) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        let from = self.pending_swap.ok_or(RuleError::NoPendingSwap)?;
        if self.board.is_empty(target) {
            return Err(RuleError::SwapTargetEmpty { pos: target });
        }

        self.board.swap(from, target);
        self.history.push(PlayedMove::Swap { from, to: target });
        self.pending_swap = None;
        self.turn = Side::Engine;
        Ok(())
    }

    /// One-shot swap of the token cell `a` with the occupied cell `b`.
    ///
    /// Unlike the interactive two-step flow, validation happens up front:
    /// a failed call consumes nothing.
    pub fn apply_swap(&mut self, a: Pos, b: Pos) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        self.ensure_token(a, PowerUp::Swap)?;
        if self.board.is_empty(b) {
            return Err(RuleError::SwapTargetEmpty { pos: b });
        }

        self.powerups.take(a);
        self.board.swap(a, b);
        self.history.push(PlayedMove::Swap { from: a, to: b });
        self.turn = Side::Engine;
        Ok(())
    }

    /// Resolve a Wildcard token: place the human mark and keep the turn.
    pub fn apply_wildcard(&mut self, pos: Pos) -> Result<(), RuleError> {
        self.ensure_ongoing()?;
        self.ensure_token(pos, PowerUp::Wildcard)?;

        self.powerups.take(pos);
        self.board.place_mark(pos, Side::Human);
        self.history.push(PlayedMove::Wildcard { pos });
        // Turn stays with the human
        Ok(())
    }

    /// Single-entry dispatch for a human's cell selection.
    ///
    /// Completes a pending swap if one is in progress; otherwise triggers
    /// whatever token sits on the cell; otherwise places a plain mark.
    pub fn play_human(&mut self, pos: Pos) -> Result<(), RuleError> {
        if self.pending_swap.is_some() {
            return self.complete_swap(pos);
        }
        match self.powerups.get(pos) {
            Some(PowerUp::Block) => self.apply_block(pos),
            Some(PowerUp::Swap) => self.begin_swap(pos),
            Some(PowerUp::Wildcard) => self.apply_wildcard(pos),
            None => self.apply_mark(pos, Side::Human),
        }
    }

    /// Place the engine's mark (its selected move) and return the turn to
    /// the human.
    pub fn apply_engine_move(&mut self, pos: Pos) -> Result<(), RuleError> {
        self.apply_mark(pos, Side::Engine)
    }

    fn ensure_ongoing(&self) -> Result<(), RuleError> {
        if self.outcome().is_over() {
            return Err(RuleError::GameOver);
        }
        Ok(())
    }

    fn ensure_token(&self, pos: Pos, expected: PowerUp) -> Result<(), RuleError> {
        if !self.board.is_empty(pos) {
            return Err(RuleError::CellOccupied { pos });
        }
        if self.powerups.get(pos) != Some(expected) {
            return Err(RuleError::MissingPowerUp { pos, expected });
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
