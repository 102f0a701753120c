//! Enhanced Tic-Tac-Toe game core and AI engine
//!
//! A 3x3 tic-tac-toe variant with power-up cells, played against a
//! minimax opponent:
//! - **Block** tokens permanently remove a cell from play; a blocked cell
//!   vetoes every line through it
//! - **Swap** tokens exchange the token's cell with any occupied cell
//! - **Wildcard** tokens place a mark and keep the turn
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: grid representation with make/unmake primitives
//! - [`rules`]: win/draw detection and power-up distribution
//! - [`game`]: rule engine (turns, history, power-up resolution)
//! - [`eval`]: static evaluation for depth-limited positions
//! - [`search`]: alpha-beta minimax with transposition table and trace
//! - [`personality`]: behavioral policies modulating the search
//! - [`engine`]: move selection integrating all components
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{AIEngine, Game, Outcome, Personality, Pos};
//!
//! let mut game = Game::with_seed(7);
//! let mut engine = AIEngine::with_seed(7);
//!
//! // Human plays the center (or triggers whatever token sits there)
//! game.play_human(Pos::new(1, 1)).unwrap();
//!
//! // Engine responds while the game is ongoing and it holds the turn
//! if game.outcome() == Outcome::Ongoing {
//!     if let Some(pos) = engine.select_move(game.board_mut(), Personality::Balanced) {
//!         game.apply_engine_move(pos).unwrap();
//!     }
//! }
//! ```
//!
//! # Move Selection Priority
//!
//! The engine follows this ladder, each step short-circuiting the rest:
//! 1. Random escape (RANDOM personality only, probability 0.2)
//! 2. Immediate winning move
//! 3. Immediate block of the human's win (skipped by AGGRESSIVE)
//! 4. Alpha-beta search with personality-driven ordering and depth

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod personality;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, Side, BOARD_SIZE, TOTAL_CELLS};
pub use engine::{AIEngine, MoveResult, SearchKind};
pub use error::RuleError;
pub use game::{Game, PlayedMove};
pub use personality::{Personality, Profile};
pub use rules::{Outcome, PowerUp, POWERUP_COUNT};
pub use search::{SearchTrace, TraceNode, SEARCH_DEPTH};
