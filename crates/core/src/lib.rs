//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game: piece shapes and
//! rotation, the playfield grid, scoring and the session state machine.
//! It has no dependencies on terminal or I/O code, so the same seed always
//! produces the same game.
//!
//! # Module Structure
//!
//! - [`grid`]: configurable playfield with collision checks and row clearing
//! - [`pieces`]: the seven shapes, their four rotations and wall kicks
//! - [`rng`]: uniform piece selection behind a swappable random source
//! - [`scoring`]: line scores, level progression and drop intervals
//! - [`session`]: lifecycle, gravity timer, commands and lock handling
//! - [`snapshot`]: read-only session copy for renderers
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::Session;
//! use falling_blocks_types::{GameAction, SessionState};
//!
//! let mut session = Session::new(12345);
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.state(), SessionState::Running);
//! assert!(session.take_last_event().is_some());
//! ```
//!
//! # Timing
//!
//! Gravity is a millisecond accumulator. Call
//! [`Session::advance`](session::Session::advance) every frame with the
//! elapsed time; the piece falls one row once the accumulator passes the
//! level's drop interval (1000ms at level 1, 100ms from level 10 on).

pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use falling_blocks_types as types;

// Re-export commonly used types for convenience
pub use grid::Grid;
pub use pieces::{get_shape, kick_offsets, try_rotate, Piece, Shape};
pub use rng::{KindSequence, RandomSource, SimpleRng};
pub use scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, Snapshot};
