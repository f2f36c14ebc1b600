//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Whether an
//! action is legal in the current session state is decided by the engine,
//! not here.

pub mod map;

pub use falling_blocks_types as types;

pub use map::{handle_key_event, should_quit};
