//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, ActiveSnapshot, Snapshot};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{Color, PieceKind, SessionState};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner of the bordered well in framebuffer coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of a game session.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Framebuffer size needed for the bordered well of `snap`.
    pub fn frame_size(&self, snap: &Snapshot) -> (u16, u16) {
        let w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        (w, h)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            GlyphStyle::new(Rgb::new(80, 80, 90), WELL_BG),
        );
        self.draw_border(fb, frame, GlyphStyle::default());

        // Locked cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, frame, x as i16, y as i16, color),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|_| self.show_ghost) {
                let ghost = GlyphStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                for (x, y) in active.cells_at(ghost_y) {
                    if in_bounds(snap, x, y) {
                        self.fill_cell_rect(fb, frame, x as u16, y as u16, '░', ghost);
                    }
                }
            }
            self.draw_active(fb, frame, snap, &active);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.state {
            SessionState::NotStarted => self.draw_overlay_text(fb, frame, 0, "PRESS ENTER"),
            SessionState::Paused => self.draw_overlay_text(fb, frame, 0, "PAUSED"),
            SessionState::Ended => {
                self.draw_overlay_text(fb, frame, 0, "GAME OVER");
                self.draw_overlay_number(fb, frame, 1, snap.score);
            }
            SessionState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: GlyphStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = GlyphStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_active(&self, fb: &mut FrameBuffer, frame: Frame, snap: &Snapshot, active: &ActiveSnapshot) {
        for (x, y) in active.cells_at(active.y) {
            // Rows above the top of the well are not drawn.
            if in_bounds(snap, x, y) {
                self.draw_block(fb, frame, x, y, active.color);
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i16, y: i16, color: Color) {
        let style = GlyphStyle::new(color.into(), WELL_BG).bold();
        self.fill_cell_rect(fb, frame, x as u16, y as u16, BLOCK, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: GlyphStyle,
    ) {
        let px = frame.x.saturating_add(1).saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = GlyphStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.on_deck {
            Some(kind) => self.draw_preview(fb, panel_x, y, kind),
            None => fb.put_str(panel_x, y, "-", value),
        }
    }

    /// Draw the on-deck shape in its spawn rotation as a small matrix.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = get_shape(kind, 0);
        let style = GlyphStyle::new(crate::core::pieces::color_of(kind).into(), PANEL_BG).bold();
        for (dx, dy) in shape.cells() {
            let px = x.saturating_add((dx as u16).saturating_mul(self.cell_w));
            let py = y.saturating_add(dy as u16);
            fb.fill_rect(px, py, self.cell_w, 1, BLOCK, style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, line: u16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = GlyphStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }

    fn draw_overlay_number(&self, fb: &mut FrameBuffer, frame: Frame, line: u16, value: u32) {
        let digits = value.checked_ilog10().unwrap_or(0) as u16 + 1;
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
        let x = frame.x.saturating_add(frame.w.saturating_sub(digits) / 2);
        let style = GlyphStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_u32(x, mid_y, value, style);
    }
}

fn in_bounds(snap: &Snapshot, x: i16, y: i16) -> bool {
    x >= 0 && y >= 0 && (x as u16) < snap.width && (y as u16) < snap.height
}
