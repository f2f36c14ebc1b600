//! Session module - the game state machine
//!
//! A session owns the grid, the active and on-deck pieces, the counters and
//! the lifecycle state. Every command is synchronous and runs to completion;
//! commands that are illegal in the current state are silent no-ops.
//!
//! Gravity is driven externally: call [`Session::advance`] with the elapsed
//! milliseconds once per frame.

use crate::grid::Grid;
use crate::pieces::{try_rotate, Piece};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::types::{GameAction, GridSize, LockEvent, SessionState};

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SimpleRng> {
    grid: Grid,
    active: Option<Piece>,
    on_deck: Option<Piece>,
    rng: R,
    state: SessionState,
    score: u32,
    level: u32,
    lines: u32,
    drop_accumulator_ms: u32,
    drop_interval_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Session<SimpleRng> {
    /// Create a session on the default 10x20 grid with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(GridSize::default(), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Create a session with an explicit grid size and random source
    pub fn with_rng(size: GridSize, rng: R) -> Self {
        Self {
            grid: Grid::with_size(size),
            active: None,
            on_deck: None,
            rng,
            state: SessionState::NotStarted,
            score: 0,
            level: 1,
            lines: 0,
            drop_accumulator_ms: 0,
            drop_interval_ms: get_drop_interval_ms(1),
            last_event: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn on_deck(&self) -> Option<&Piece> {
        self.on_deck.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Start (or restart) the game.
    ///
    /// Valid from every state: clears the grid and counters, deals the first
    /// on-deck piece and spawns.
    pub fn start(&mut self) {
        self.grid.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_accumulator_ms = 0;
        self.drop_interval_ms = get_drop_interval_ms(1);
        self.last_event = None;
        self.active = None;
        self.on_deck = Some(Piece::new(self.rng.next_kind()));
        self.state = SessionState::Running;
        self.spawn_piece();
    }

    /// Toggle between Running and Paused. No-op in any other state.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            _ => return false,
        };
        true
    }

    fn end_game(&mut self) {
        self.state = SessionState::Ended;
    }

    /// Promote the on-deck piece, deal a new one and center it at the top.
    ///
    /// Returns false (and ends the game) when the spawn position collides.
    fn spawn_piece(&mut self) -> bool {
        let mut piece = match self.on_deck.take() {
            Some(piece) => piece,
            None => Piece::new(self.rng.next_kind()),
        };
        self.on_deck = Some(Piece::new(self.rng.next_kind()));

        let columns = piece.shape().size() as i16;
        let x = (self.grid.width() as i16 - columns).div_euclid(2);
        piece.set_position(x, 0);
        self.active = Some(piece);

        if !self.grid.is_placement_valid(&piece, x, 0) {
            self.end_game();
            return false;
        }
        true
    }

    /// Try to shift the active piece by (dx, dy)
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let (x, y) = (active.x + dx, active.y + dy);
        if self.grid.is_placement_valid(active, x, y) {
            active.set_position(x, y);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Returns true when the piece moved; false when it locked or the session
    /// is not running. Resets the auto-drop accumulator either way.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() || self.active.is_none() {
            return false;
        }
        self.drop_accumulator_ms = 0;
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Drop the active piece to its resting row and lock it.
    ///
    /// Returns the number of rows fallen, or `None` when not running.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_running() || self.active.is_none() {
            return None;
        }
        self.drop_accumulator_ms = 0;

        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_piece();
        Some(distance)
    }

    /// Rotate clockwise with wall kicks; fully reverted if nothing fits.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let grid = &self.grid;
        try_rotate(active, |piece, x, y| grid.is_placement_valid(piece, x, y)).is_some()
    }

    /// Feed elapsed time into the auto-drop timer.
    ///
    /// Once the accumulated time exceeds the drop interval, exactly one soft
    /// drop happens and the accumulator restarts from zero; long frames do not
    /// catch up with extra drops. Returns whether a drop happened.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(elapsed_ms);
        if self.drop_accumulator_ms > self.drop_interval_ms {
            self.soft_drop();
            self.drop_accumulator_ms = 0;
            return true;
        }
        false
    }

    /// Commit the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        self.grid.lock(&active);
        let cleared = self.grid.clear_completed_rows();

        let mut event = LockEvent {
            lines_cleared: cleared as u32,
            ..LockEvent::default()
        };

        if cleared > 0 {
            event.score_delta = calculate_line_score(cleared, self.level);
            self.score = self.score.saturating_add(event.score_delta);
            self.lines += cleared as u32;

            let level = level_for_lines(self.lines);
            if level != self.level {
                self.level = level;
                self.drop_interval_ms = get_drop_interval_ms(level);
                event.level_up = true;
            }
        }

        self.spawn_piece();
        if self.grid.is_overflowed() {
            self.end_game();
        }

        event.game_over = self.state == SessionState::Ended;
        self.last_event = Some(event);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would come to rest on after a hard drop
    pub fn ghost_y(&self) -> Option<i16> {
        let active = self.active.as_ref()?;
        let mut y = active.y;
        while self.grid.is_placement_valid(active, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Apply a game action, returning whether it had any effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => {
                let was_running = self.is_running();
                self.soft_drop();
                was_running
            }
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            // A live game is never wiped by a stray keypress; `start` restarts explicitly.
            GameAction::Start => match self.state {
                SessionState::NotStarted | SessionState::Ended => {
                    self.start();
                    true
                }
                SessionState::Running | SessionState::Paused => false,
            },
        }
    }

    pub fn snapshot_into(&self, out: &mut Snapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.on_deck = self.on_deck.as_ref().map(|p| p.kind());
        out.ghost_y = self.ghost_y();
        out.state = self.state;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
