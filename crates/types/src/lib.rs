//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield defaults to the standard size and can be configured at
//! construction time through [`GridSize`]:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Drop Intervals by Level
//!
//! Gravity increases with level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 3 | 800ms |
//! | ... | ... |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{GameAction, GridSize, PieceKind};
//!
//! // Parse from string (case-insensitive)
//! let parsed: PieceKind = "t".parse().unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert!("x".parse::<PieceKind>().is_err());
//!
//! // Parse game action
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Grid dimensions
//! let size = GridSize::default();
//! assert_eq!((size.width, size.height), (10, 20));
//! ```

use std::fmt;

/// Default grid width in cells (10 columns)
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Largest accepted grid dimension.
pub const MAX_GRID_DIM: u16 = 255;

/// Number of rows at the top of the grid that end the game when occupied.
pub const OVERFLOW_ROWS: u16 = 2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lines needed per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 9 = Level 10+
pub const DROP_INTERVALS: [u32; 10] = [1000, 900, 800, 700, 600, 500, 400, 300, 200, 100];

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Kick offsets tried, in order, when an I piece rotation collides.
pub const I_KICKS: [(i16, i16); 5] = [(1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1)];

/// Kick offsets tried, in order, for every other piece kind.
pub const STANDARD_KICKS: [(i16, i16); 3] = [(1, 0), (-1, 0), (0, -1)];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in shape-table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Look up a kind by its shape-table index.
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Ok(PieceKind::I));
    /// assert!(PieceKind::from_index(7).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self, InvalidKindError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| InvalidKindError::new(index.to_string()))
    }

    /// Index into the shape table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

impl std::str::FromStr for PieceKind {
    type Err = InvalidKindError;

    /// Parse piece kind from a one-letter tag (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Ok(PieceKind::I),
            "O" => Ok(PieceKind::O),
            "T" => Ok(PieceKind::T),
            "S" => Ok(PieceKind::S),
            "Z" => Ok(PieceKind::Z),
            "J" => Ok(PieceKind::J),
            "L" => Ok(PieceKind::L),
            _ => Err(InvalidKindError::new(s)),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit display color carried by locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Session lifecycle states.
///
/// `Ended` is terminal: only a fresh start leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Ended,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "notStarted",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Ended => "ended",
        }
    }
}

/// Outcome of the most recent lock, consumed by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Rows removed by this lock (0-4)
    pub lines_cleared: u32,
    /// Points awarded for those rows
    pub score_delta: u32,
    /// Whether the level changed
    pub level_up: bool,
    /// Whether the lock ended the game
    pub game_over: bool,
}

/// Game actions that can be applied to a session
///
/// Each action maps to one session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it has landed
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new game (from any state)
    Start,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use falling_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" | "drop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "start" | "restart" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
        }
    }
}

/// Grid dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Validate and build a grid size.
    pub fn new(width: u16, height: u16) -> Result<Self, GridSizeError> {
        if width == 0 || height == 0 || width > MAX_GRID_DIM || height > MAX_GRID_DIM {
            return Err(GridSizeError::OutOfRange { width, height });
        }
        Ok(Self { width, height })
    }

    /// Read `FALLING_BLOCKS_WIDTH` / `FALLING_BLOCKS_HEIGHT`.
    ///
    /// Unset variables fall back to the defaults; values that are set but do
    /// not parse are reported rather than ignored.
    pub fn from_env() -> Result<Self, GridSizeError> {
        let width = env_dim("FALLING_BLOCKS_WIDTH", DEFAULT_GRID_WIDTH)?;
        let height = env_dim("FALLING_BLOCKS_HEIGHT", DEFAULT_GRID_HEIGHT)?;
        Self::new(width, height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

fn env_dim(name: &'static str, default: u16) -> Result<u16, GridSizeError> {
    match std::env::var(name) {
        Ok(raw) => {
            let trimmed = raw.trim();
            trimmed.parse().map_err(|_| GridSizeError::Unparsable {
                var: name,
                value: trimmed.to_string(),
            })
        }
        Err(_) => Ok(default),
    }
}

/// An unrecognised piece tag was requested.
///
/// The kind set is closed, so this always indicates a caller bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKindError {
    tag: String,
}

impl InvalidKindError {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for InvalidKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid piece kind: {:?}", self.tag)
    }
}

impl std::error::Error for InvalidKindError {}

/// Rejected grid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSizeError {
    OutOfRange { width: u16, height: u16 },
    Unparsable { var: &'static str, value: String },
}

impl fmt::Display for GridSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridSizeError::OutOfRange { width, height } => write!(
                f,
                "grid size {}x{} out of range (1..={} per side)",
                width, height, MAX_GRID_DIM
            ),
            GridSizeError::Unparsable { var, value } => {
                write!(f, "{}: not a grid dimension: {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for GridSizeError {}
