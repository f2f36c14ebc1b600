//! Terminal falling-blocks runner.
//!
//! Reads the grid size from `FALLING_BLOCKS_WIDTH` / `FALLING_BLOCKS_HEIGHT`
//! and an optional RNG seed from `FALLING_BLOCKS_SEED`, then runs a fixed
//! 16ms loop: poll keys until the next tick, feed elapsed time to the
//! session, draw.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use falling_blocks::core::{Session, SimpleRng, Snapshot};
use falling_blocks::input::{handle_key_event, should_quit};
use falling_blocks::term::{FrameBuffer, GameView, TerminalRenderer};
use falling_blocks::types::{GridSize, TICK_MS};

const SEED_VAR: &str = "FALLING_BLOCKS_SEED";

fn main() -> Result<()> {
    let size = GridSize::from_env().context("invalid grid size")?;
    let seed = seed_from_env()?;
    let session = Session::with_rng(size, SimpleRng::new(seed));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn seed_from_env() -> Result<u32> {
    match std::env::var(SEED_VAR) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{SEED_VAR} must be a u32, got {raw:?}")),
        Err(_) => {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1);
            Ok(nanos)
        }
    }
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = GameView::default();
    let mut snap = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let viewport = TerminalRenderer::viewport()?;
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
