//! Grid module - the playfield occupancy matrix
//!
//! The grid is `width` x `height` cells, each empty or holding the color of the
//! piece that locked there. Storage is a flat row-major vector sized once at
//! construction; nothing reallocates afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the top.

use crate::pieces::Piece;
use crate::types::{Cell, GridSize, MAX_GRID_DIM, OVERFLOW_ROWS};

/// The playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid of the given size
    pub fn with_size(size: GridSize) -> Self {
        Self::new(size.width, size.height)
    }

    /// Create an empty grid, clamping each dimension to `1..=MAX_GRID_DIM`.
    ///
    /// Use [`GridSize::new`] first when the dimensions come from outside.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.clamp(1, MAX_GRID_DIM);
        let height = height.clamp(1, MAX_GRID_DIM);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells, left to right. Empty slice when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u16) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Would `piece`, anchored at (x, y), fit?
    ///
    /// Cells left/right of the grid or below the floor fail. Cells above the
    /// top row are accepted so pieces can hang partly above the visible area.
    pub fn is_placement_valid(&self, piece: &Piece, x: i16, y: i16) -> bool {
        piece.shape().cells().iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px as u16 >= self.width || (py >= 0 && py as u16 >= self.height) {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Write the piece's color into the grid at its stored position.
    ///
    /// Cells outside the grid (including above the top) are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            self.set(x, y, Some(color));
        }
    }

    /// Remove every full row, shifting the rows above down.
    ///
    /// Single bottom-to-top pass: non-full rows are copied down to a write
    /// cursor, then the vacated top rows are blanked. Returns the number of
    /// rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            let read_y = read_y as usize;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// True when any of the top overflow rows holds a locked cell.
    pub fn is_overflowed(&self) -> bool {
        (0..OVERFLOW_ROWS.min(self.height)).any(|y| self.row(y).iter().any(|cell| cell.is_some()))
    }

    /// Empty every cell; dimensions are unchanged.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::with_size(GridSize::default())
    }
}
