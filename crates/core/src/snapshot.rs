use crate::pieces::Piece;
use crate::types::{Cell, Color, PieceKind, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
    pub color: Color,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
            color: value.color(),
        }
    }
}

impl ActiveSnapshot {
    /// Absolute grid coordinates of the piece's cells, with the given row
    /// substituted for `y` (pass `self.y` for the piece itself).
    pub fn cells_at(&self, y: i16) -> impl Iterator<Item = (i16, i16)> {
        let x = self.x;
        crate::pieces::get_shape(self.kind, self.rotation)
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Read-only copy of everything a renderer needs.
///
/// Reused across frames via [`Session::snapshot_into`](crate::Session::snapshot_into)
/// so the cell buffer is only allocated once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major cells, `width * height` long
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub on_deck: Option<PieceKind>,
    pub ghost_y: Option<i16>,
    pub state: SessionState,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl Snapshot {
    pub fn cell(&self, x: u16, y: u16) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}
