//! Falling Blocks (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, integration tests
//! and benches can use `falling_blocks::{core,input,term,types}`.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;
