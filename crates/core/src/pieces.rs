//! Pieces module - tetromino shape table and per-instance piece state
//!
//! Every kind has four hand-authored rotation matrices (4x4 for I, 2x2 for O,
//! 3x3 for the rest) and one display color. The table is `static` data built
//! at compile time and indexed by [`PieceKind`].

use arrayvec::ArrayVec;

use crate::types::{Color, InvalidKindError, PieceKind, I_KICKS, STANDARD_KICKS};

/// Offset of a single filled cell relative to the matrix's top-left corner
pub type CellOffset = (i16, i16);

/// One rotation state of a piece: a square boolean matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[bool; 4]; 4],
}

impl Shape {
    /// Matrix column count (4, 3 or 2). Used to center pieces at spawn.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at (dx, dy) is filled. Out of range is empty.
    pub fn is_filled(&self, dx: i16, dy: i16) -> bool {
        let n = self.size as i16;
        if dx < 0 || dy < 0 || dx >= n || dy >= n {
            return false;
        }
        self.rows[dy as usize][dx as usize]
    }

    /// Filled cell offsets in row-major order.
    pub fn cells(&self) -> ArrayVec<CellOffset, 4> {
        let n = self.size as usize;
        (0..n)
            .flat_map(|dy| (0..n).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| self.rows[dy][dx])
            .take(4)
            .map(|(dx, dy)| (dx as i16, dy as i16))
            .collect()
    }
}

/// Four rotation states plus the kind's color.
#[derive(Debug)]
pub struct ShapeSet {
    pub rotations: [Shape; 4],
    pub color: Color,
}

const fn m4(src: [[u8; 4]; 4]) -> Shape {
    let mut rows = [[false; 4]; 4];
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            rows[y][x] = src[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape { size: 4, rows }
}

const fn m3(src: [[u8; 3]; 3]) -> Shape {
    let mut rows = [[false; 4]; 4];
    let mut y = 0;
    while y < 3 {
        let mut x = 0;
        while x < 3 {
            rows[y][x] = src[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape { size: 3, rows }
}

const fn m2(src: [[u8; 2]; 2]) -> Shape {
    let mut rows = [[false; 4]; 4];
    let mut y = 0;
    while y < 2 {
        let mut x = 0;
        while x < 2 {
            rows[y][x] = src[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape { size: 2, rows }
}

const O_SQUARE: Shape = m2([[1, 1], [1, 1]]);

/// Shape table, indexed by `PieceKind::index()`.
static SHAPES: [ShapeSet; 7] = [
    // I
    ShapeSet {
        rotations: [
            m4([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            m4([[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
            m4([[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
            m4([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
        ],
        color: Color::from_hex(0x00f0f0),
    },
    // O
    ShapeSet {
        rotations: [O_SQUARE, O_SQUARE, O_SQUARE, O_SQUARE],
        color: Color::from_hex(0xf0f000),
    },
    // T
    ShapeSet {
        rotations: [
            m3([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            m3([[0, 1, 0], [0, 1, 1], [0, 1, 0]]),
            m3([[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
            m3([[0, 1, 0], [1, 1, 0], [0, 1, 0]]),
        ],
        color: Color::from_hex(0xa000f0),
    },
    // S
    ShapeSet {
        rotations: [
            m3([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            m3([[0, 1, 0], [0, 1, 1], [0, 0, 1]]),
            m3([[0, 0, 0], [0, 1, 1], [1, 1, 0]]),
            m3([[1, 0, 0], [1, 1, 0], [0, 1, 0]]),
        ],
        color: Color::from_hex(0x00f000),
    },
    // Z
    ShapeSet {
        rotations: [
            m3([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
            m3([[0, 0, 1], [0, 1, 1], [0, 1, 0]]),
            m3([[0, 0, 0], [1, 1, 0], [0, 1, 1]]),
            m3([[0, 1, 0], [1, 1, 0], [1, 0, 0]]),
        ],
        color: Color::from_hex(0xf00000),
    },
    // J
    ShapeSet {
        rotations: [
            m3([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            m3([[0, 1, 1], [0, 1, 0], [0, 1, 0]]),
            m3([[0, 0, 0], [1, 1, 1], [0, 0, 1]]),
            m3([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
        ],
        color: Color::from_hex(0x0000f0),
    },
    // L
    ShapeSet {
        rotations: [
            m3([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            m3([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
            m3([[0, 0, 0], [1, 1, 1], [1, 0, 0]]),
            m3([[1, 1, 0], [0, 1, 0], [0, 1, 0]]),
        ],
        color: Color::from_hex(0xf0a000),
    },
];

/// Shape set (rotations and color) for a piece kind
pub fn shape_set(kind: PieceKind) -> &'static ShapeSet {
    &SHAPES[kind.index()]
}

/// Get the shape for a piece kind and rotation index (taken mod 4)
pub fn get_shape(kind: PieceKind, rotation: u8) -> &'static Shape {
    &shape_set(kind).rotations[(rotation % 4) as usize]
}

/// Display color for a piece kind
pub fn color_of(kind: PieceKind) -> Color {
    shape_set(kind).color
}

/// Ordered wall-kick offsets tried after a colliding rotation
pub fn kick_offsets(kind: PieceKind) -> &'static [(i16, i16)] {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &STANDARD_KICKS,
    }
}

/// Rotate `piece` clockwise, falling back to its kind's kick offsets.
///
/// `is_valid(piece, x, y)` reports whether the rotated piece fits with its
/// anchor at (x, y). The unkicked position is tried first, then each kick in
/// order; the first fit wins and its offset is returned. If nothing fits the
/// piece is restored to its original rotation and position and `None` is
/// returned.
pub fn try_rotate(
    piece: &mut Piece,
    is_valid: impl Fn(&Piece, i16, i16) -> bool,
) -> Option<(i16, i16)> {
    let original = piece.rotation;
    piece.rotate_cw();

    let (x, y) = piece.position();
    if is_valid(&*piece, x, y) {
        return Some((0, 0));
    }

    for &(dx, dy) in kick_offsets(piece.kind) {
        if is_valid(&*piece, x + dx, y + dy) {
            piece.set_position(x + dx, y + dy);
            return Some((dx, dy));
        }
    }

    piece.rotation = original;
    None
}

/// A piece instance: immutable kind, mutable rotation and anchor position.
///
/// The anchor `(x, y)` is the grid column/row of the shape matrix's top-left
/// corner. Rotation is a pure local state change; legality against a grid is
/// checked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: u8,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Create a piece at rotation 0, anchored at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: 0,
            y: 0,
        }
    }

    /// Create a piece from a one-letter kind tag.
    pub fn from_tag(tag: &str) -> Result<Self, InvalidKindError> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Rotation state in `0..4`
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn color(&self) -> Color {
        color_of(self.kind)
    }

    /// Shape matrix for the current rotation
    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = (self.rotation + 1) % 4;
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = (self.rotation + 3) % 4;
    }

    /// Absolute grid coordinates of the filled cells at the stored position
    pub fn cells(&self) -> ArrayVec<(i16, i16), 4> {
        self.shape()
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
