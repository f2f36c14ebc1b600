//! Session tests - lifecycle, gravity, scoring and game over through the
//! public command surface

use crossterm::event::{KeyCode, KeyEvent};
use falling_blocks::core::{KindSequence, Session};
use falling_blocks::input::handle_key_event;
use falling_blocks::types::{GameAction, GridSize, PieceKind, SessionState};

fn session_with(width: u16, height: u16, kinds: &[PieceKind]) -> Session<KindSequence> {
    let size = GridSize::new(width, height).unwrap();
    Session::with_rng(size, KindSequence::new(kinds.iter().copied()))
}

/// Rotate an I piece upright and slide it so its bar sits in `column`.
fn place_vertical_i(session: &mut Session<KindSequence>, column: i16) {
    assert_eq!(session.active().unwrap().kind(), PieceKind::I);
    assert!(session.rotate());
    // Rotation 1 draws the bar in matrix column 2.
    while session.active().unwrap().x + 2 > column {
        assert!(session.move_left());
    }
    while session.active().unwrap().x + 2 < column {
        assert!(session.move_right());
    }
}

#[test]
fn test_lifecycle() {
    let mut session = Session::new(12345);
    assert_eq!(session.state(), SessionState::NotStarted);
    assert!(session.active().is_none());

    session.start();
    assert_eq!(session.state(), SessionState::Running);
    assert!(session.active().is_some());
    assert!(session.on_deck().is_some());

    assert!(session.apply_action(GameAction::Pause));
    assert_eq!(session.state(), SessionState::Paused);
    assert!(session.apply_action(GameAction::Pause));
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Session::new(99);
    let mut b = Session::new(99);
    a.start();
    b.start();
    for _ in 0..30 {
        a.hard_drop();
        b.hard_drop();
        assert_eq!(a.active(), b.active());
        assert_eq!(a.grid(), b.grid());
    }
}

#[test]
fn test_fresh_hard_drop_lands_on_floor() {
    let mut session = session_with(10, 20, &[PieceKind::O]);
    session.start();
    assert_eq!(session.hard_drop(), Some(18));

    let grid = session.grid();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert!(grid.is_occupied(x, y), "({x}, {y})");
    }
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_advance_applies_gravity() {
    let mut session = session_with(10, 20, &[PieceKind::T]);
    session.start();
    assert!(!session.advance(1000));
    assert_eq!(session.active().unwrap().y, 0);
    assert!(session.advance(16));
    assert_eq!(session.active().unwrap().y, 1);
    assert_eq!(session.drop_accumulator_ms(), 0);
}

#[test]
fn test_completing_row_clears_and_scores() {
    // A horizontal I fills a four-wide row exactly.
    let mut session = session_with(4, 20, &[PieceKind::I]);
    session.start();
    assert_eq!(session.active().unwrap().position(), (0, 0));

    session.hard_drop();
    assert_eq!(session.lines(), 1);
    assert_eq!(session.score(), 100);
    assert!(session.grid().cells().iter().all(|c| c.is_none()));

    let event = session.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.score_delta, 100);
}

#[test]
fn test_level_progression_and_speed() {
    let mut session = session_with(4, 20, &[PieceKind::I]);
    session.start();

    let mut last_interval = session.drop_interval_ms();
    assert_eq!(last_interval, 1000);

    for cleared in 1..=120u32 {
        session.hard_drop();
        assert_eq!(session.lines(), cleared);
        assert_eq!(session.level(), cleared / 10 + 1);

        let interval = session.drop_interval_ms();
        let event = session.take_last_event().unwrap();
        if cleared % 10 == 0 && cleared <= 90 {
            assert!(event.level_up);
            assert!(interval < last_interval, "speed must increase at {cleared} lines");
        } else if cleared % 10 != 0 {
            assert!(!event.level_up);
            assert_eq!(interval, last_interval);
        }
        last_interval = interval;
    }

    assert_eq!(session.level(), 13);
    assert_eq!(session.drop_interval_ms(), 100);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn test_scoring_at_level_three() {
    // Twenty single clears to reach level 3, then a single, a double and a
    // four-row clear.
    let mut kinds = vec![PieceKind::I; 21];
    kinds.extend([PieceKind::O, PieceKind::O]);
    kinds.extend([PieceKind::I; 4]);
    let mut session = session_with(4, 20, &kinds);
    session.start();

    for _ in 0..20 {
        session.hard_drop();
    }
    assert_eq!(session.level(), 3);
    let base = session.score();

    // Single.
    session.hard_drop();
    assert_eq!(session.score() - base, 300);

    // Double: two squares side by side.
    let before = session.score();
    while session.move_left() {}
    session.hard_drop();
    while session.move_right() {}
    session.hard_drop();
    assert_eq!(session.score() - before, 900);

    // Four rows: four upright bars.
    let before = session.score();
    for column in 0..4 {
        place_vertical_i(&mut session, column);
        session.hard_drop();
    }
    assert_eq!(session.score() - before, 2400);
    assert_eq!(session.lines(), 27);
}

#[test]
fn test_i_kick_at_right_wall() {
    let mut session = session_with(10, 20, &[PieceKind::I]);
    session.start();
    place_vertical_i(&mut session, 9);
    session.soft_drop();
    session.soft_drop();
    let (x, y) = session.active().unwrap().position();
    assert_eq!(x, 7);

    // Horizontal rotation overhangs by one; (+1, 0) fails, (-1, 0) fits.
    assert!(session.rotate());
    let active = session.active().copied().unwrap();
    assert_eq!(active.rotation(), 2);
    assert_eq!(active.position(), (6, y));
}

#[test]
fn test_i_kick_at_left_wall() {
    let mut session = session_with(10, 20, &[PieceKind::I]);
    session.start();
    place_vertical_i(&mut session, 0);
    session.soft_drop();
    let (x, y) = session.active().unwrap().position();
    assert_eq!(x, -2);

    // Only (+2, 0) clears the wall.
    assert!(session.rotate());
    assert_eq!(session.active().unwrap().position(), (0, y));
}

#[test]
fn test_repeated_hard_drops_end_the_game() {
    let mut session = session_with(10, 20, &[PieceKind::O]);
    session.start();

    let mut drops = 0;
    while session.state() == SessionState::Running {
        session.hard_drop();
        drops += 1;
        assert!(drops <= 10, "game should end once the stack reaches the top");
    }
    assert_eq!(session.state(), SessionState::Ended);
    assert!(session.take_last_event().unwrap().game_over);

    let grid = session.grid().clone();
    let score = session.score();
    let active = session.active().copied();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Pause,
    ] {
        assert!(!session.apply_action(action), "{} after game over", action.as_str());
    }
    assert!(!session.advance(5_000));
    assert_eq!(session.grid(), &grid);
    assert_eq!(session.score(), score);
    assert_eq!(session.active().copied(), active);
    assert_eq!(session.state(), SessionState::Ended);
}

#[test]
fn test_start_keys_do_not_wipe_live_game() {
    let mut session = session_with(4, 20, &[PieceKind::I]);
    let enter = handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
    assert!(session.apply_action(enter));
    session.hard_drop();
    session.hard_drop();
    assert_eq!((session.score(), session.lines()), (200, 2));
    let grid = session.grid().clone();

    for code in [KeyCode::Char('r'), KeyCode::Enter] {
        let action = handle_key_event(KeyEvent::from(code)).unwrap();
        assert!(!session.apply_action(action));
        assert_eq!(session.state(), SessionState::Running);
    }

    session.toggle_pause();
    let restart = handle_key_event(KeyEvent::from(KeyCode::Char('r'))).unwrap();
    assert!(!session.apply_action(restart));
    assert_eq!(session.state(), SessionState::Paused);

    assert_eq!((session.score(), session.lines()), (200, 2));
    assert_eq!(session.grid(), &grid);
}

#[test]
fn test_restart_after_game_over() {
    let mut session = session_with(10, 20, &[PieceKind::O]);
    session.start();
    while session.state() == SessionState::Running {
        session.hard_drop();
    }

    assert!(session.apply_action(GameAction::Start));
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.level(), 1);
    assert!(session.grid().cells().iter().all(|c| c.is_none()));
    assert!(session.take_last_event().is_none());
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut session = session_with(6, 8, &[PieceKind::T, PieceKind::S]);
    session.start();
    let mut snap = session.snapshot();
    assert_eq!(snap.cells.len(), 48);

    session.hard_drop();
    session.snapshot_into(&mut snap);
    assert_eq!(snap.cells.len(), 48);
    assert_eq!(snap.active.unwrap().kind, PieceKind::S);
    assert_eq!(snap.on_deck, Some(PieceKind::T));
    assert_eq!(snap.cells.iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn test_oversized_grid_literal_is_clamped() {
    let size = GridSize {
        width: 40_000,
        height: 20,
    };
    let mut session = Session::with_rng(size, KindSequence::repeat(PieceKind::O));
    session.start();

    assert_eq!(session.grid().width(), 255);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.active().unwrap().position(), ((255 - 2) / 2, 0));
}
