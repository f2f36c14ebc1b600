//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. Sessions are
//! drawn into a plain framebuffer ([`GameView`], pure and testable) which
//! [`TerminalRenderer`] then diffs and flushes through crossterm.
//!
//! Grid cells are drawn 2 columns wide by default to keep blocks square on
//! typical terminal fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
