//! Main AI engine integrating the search components
//!
//! The engine selects moves through a fixed priority ladder, each step
//! short-circuiting the rest:
//!
//! 1. **Random escape**: the RANDOM personality sometimes skips all
//!    tactical reasoning and plays a uniformly random legal move
//! 2. **Immediate win**: any move that wins on the spot is played
//! 3. **Immediate block**: any move the human could win with next turn is
//!    occupied instead (skipped by the AGGRESSIVE personality)
//! 4. **Alpha-beta**: full minimax search with a transposition table
//!
//! The ladder order is a design invariant: win > block > search, even
//! though a stronger engine would fold the first two into the search.
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Board, Personality, Pos, Side};
//!
//! let mut engine = AIEngine::with_seed(42);
//! let mut board = Board::new();
//! board.place_mark(Pos::new(1, 1), Side::Human);
//!
//! if let Some(pos) = engine.select_move(&mut board, Personality::Balanced) {
//!     board.place_mark(pos, Side::Engine);
//! }
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Side};
use crate::personality::Personality;
use crate::rules::{evaluate_outcome, Outcome};
use crate::search::{NodeId, SearchTrace, Searcher};

/// Which ladder step produced the selected move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// RANDOM personality bypassed tactical reasoning
    RandomEscape,
    /// A move that wins on the spot
    ImmediateWin,
    /// Denial of the human's one-move win
    Block,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move selection with search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the move (root search score; 0 for short-circuit steps)
    pub score: i32,
    /// Ladder step that found the move
    pub kind: SearchKind,
    /// Number of search nodes visited
    pub nodes: u64,
}

impl MoveResult {
    fn random_escape(pos: Pos) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            kind: SearchKind::RandomEscape,
            nodes: 0,
        }
    }

    fn immediate_win(pos: Pos) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            kind: SearchKind::ImmediateWin,
            nodes: 0,
        }
    }

    fn block(pos: Pos) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            kind: SearchKind::Block,
            nodes: 0,
        }
    }

    fn from_search(best_move: Option<Pos>, score: i32, nodes: u64) -> Self {
        Self {
            best_move,
            score,
            kind: SearchKind::AlphaBeta,
            nodes,
        }
    }

    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            kind: SearchKind::AlphaBeta,
            nodes: 0,
        }
    }
}

/// Move-selection engine for the automated player.
///
/// Owns the searcher (transposition table + trace) and the random number
/// generator feeding the RANDOM personality. All search state is scoped to
/// one `select_move` call; the trace and evaluation snapshots always
/// describe the most recent selection.
pub struct AIEngine {
    searcher: Searcher,
    rng: StdRng,
    last_eval: i32,
}

impl AIEngine {
    /// Create an engine with a randomly seeded generator
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// Create an engine with a fixed seed, for reproducible behavior
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            searcher: Searcher::new(),
            rng: StdRng::seed_from_u64(seed),
            last_eval: 0,
        }
    }

    /// Select a move for the engine side.
    ///
    /// Returns `None` when no legal move exists; the caller must treat
    /// that as an immediate draw. See [`select_move_with_stats`] for the
    /// full result.
    ///
    /// [`select_move_with_stats`]: AIEngine::select_move_with_stats
    #[must_use]
    pub fn select_move(&mut self, board: &mut Board, personality: Personality) -> Option<Pos> {
        self.select_move_with_stats(board, personality).best_move
    }

    /// Select a move and report which ladder step produced it.
    ///
    /// Mutates the board speculatively during lookahead and restores it
    /// before returning; callers must not observe the board concurrently.
    #[must_use]
    pub fn select_move_with_stats(
        &mut self,
        board: &mut Board,
        personality: Personality,
    ) -> MoveResult {
        // Per-call state: trace, pruned ids, transposition table, last eval
        self.searcher.reset();
        self.last_eval = 0;

        let moves = board.legal_moves();
        if moves.is_empty() {
            return MoveResult::no_move();
        }

        let profile = personality.profile();

        if profile.escape_chance > 0.0 && self.rng.random_bool(profile.escape_chance) {
            let pos = *moves
                .choose(&mut self.rng)
                .expect("moves checked non-empty above");
            debug!("random escape: playing {pos}");
            return MoveResult::random_escape(pos);
        }

        if let Some(pos) = self.find_winning_move(board, &moves) {
            debug!("immediate win at {pos}");
            return MoveResult::immediate_win(pos);
        }

        if profile.blocks_threats {
            if let Some(pos) = self.find_blocking_move(board, &moves) {
                debug!("blocking human win at {pos}");
                return MoveResult::block(pos);
            }
        }

        let (best_move, score) = self.searcher.search_root(board, personality, &mut self.rng);
        self.last_eval = score;
        debug!(
            "alpha-beta selected {best_move:?} (score {score}, {} nodes)",
            self.searcher.nodes()
        );
        MoveResult::from_search(best_move, score, self.searcher.nodes())
    }

    /// First move, in row-major order, that wins for the engine on the spot
    fn find_winning_move(&self, board: &mut Board, moves: &[Pos]) -> Option<Pos> {
        for &pos in moves {
            board.place_mark(pos, Side::Engine);
            let wins = evaluate_outcome(board) == Outcome::EngineWin;
            board.clear(pos);
            if wins {
                return Some(pos);
            }
        }
        None
    }

    /// First move, in row-major order, the human could win with next turn
    fn find_blocking_move(&self, board: &mut Board, moves: &[Pos]) -> Option<Pos> {
        for &pos in moves {
            board.place_mark(pos, Side::Human);
            let wins = evaluate_outcome(board) == Outcome::HumanWin;
            board.clear(pos);
            if wins {
                return Some(pos);
            }
        }
        None
    }

    /// Clear all engine state (trace, table, last evaluation)
    pub fn reset(&mut self) {
        self.searcher.reset();
        self.last_eval = 0;
    }

    /// Trace of the last selection's search, for display only
    #[must_use]
    pub fn trace(&self) -> &SearchTrace {
        self.searcher.trace()
    }

    /// Ids of nodes pruned during the last selection
    #[must_use]
    pub fn pruned_ids(&self) -> &[NodeId] {
        self.searcher.trace().pruned_ids()
    }

    /// Root score of the last full search (0 when a short-circuit step or
    /// no search produced the move)
    #[must_use]
    pub fn last_eval(&self) -> i32 {
        self.last_eval
    }

    /// Toggle the transposition table (performance only)
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.searcher.set_cache_enabled(enabled);
    }

    /// Toggle search tracing (no-op, no-cost path when disabled)
    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.searcher.set_trace_enabled(enabled);
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
