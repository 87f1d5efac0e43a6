//! Integration tests - engine driven through commands, keys and listeners

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};

use blockfall::core::{EngineConfig, EngineEvent, GameEngine, ScriptedSource};
use blockfall::input::{handle_key_event, InputContext};
use blockfall::store::HighScores;
use blockfall::types::{Command, HighScoreEntry, PieceKind, RunStats};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn o_engine() -> GameEngine<ScriptedSource> {
    GameEngine::with_source(ScriptedSource::new([PieceKind::O]), EngineConfig::default())
        .with_clock(day)
}

fn apply_n(engine: &mut GameEngine<ScriptedSource>, command: Command, n: usize) {
    for _ in 0..n {
        assert!(engine.apply(command), "{:?}", command);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut engine = GameEngine::new(12345);
    assert!(!engine.is_running());

    engine.start();
    assert!(engine.is_running());
    assert!(engine.active().is_some());
    assert!(engine.next_piece().is_some());
    assert!(!engine.is_game_over());
    assert!(!engine.is_paused());
}

#[test]
fn test_two_line_clear_by_commands() {
    let mut engine = o_engine();
    engine.start();

    // Five O pieces side by side fill the bottom two rows.
    for (command, steps) in [
        (Command::MoveLeft, 4),
        (Command::MoveLeft, 2),
        (Command::MoveLeft, 0),
        (Command::MoveRight, 2),
        (Command::MoveRight, 4),
    ] {
        apply_n(&mut engine, command, steps);
        assert!(engine.apply(Command::HardDrop));
    }

    assert_eq!(
        engine.stats(),
        RunStats {
            score: 5 * 18 * 2 + 100,
            level: 1,
            lines: 2
        }
    );
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert!(engine.is_running());
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut engine = o_engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    engine.subscribe(move |e: &EngineEvent| sink.borrow_mut().push(e.clone()));
    engine.start();

    // Each O stacks two rows higher in the middle columns.
    for i in 0..10 {
        assert!(engine.is_running(), "ended early at piece {}", i);
        assert!(engine.apply(Command::HardDrop));
    }
    assert!(!engine.is_running());
    assert!(engine.is_game_over());

    let expected = HighScoreEntry {
        score: (0..10).map(|n| 2 * (18 - 2 * n)).sum(),
        level: 1,
        lines: 0,
        date: day(),
    };
    assert_eq!(expected.score, 180);

    let events = events.borrow();
    let game_overs: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::GameOver(entry) => Some(entry.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(game_overs, vec![expected.clone()]);
    assert_eq!(
        events.last(),
        Some(&EngineEvent::StatsChanged(expected.stats()))
    );

    // Nothing moves any more.
    let board = engine.board().clone();
    assert!(!engine.apply(Command::MoveLeft));
    assert!(!engine.apply(Command::HardDrop));
    engine.update(60_000);
    assert_eq!(engine.board(), &board);
}

#[test]
fn test_game_over_listener_feeds_high_scores() {
    let table = Rc::new(RefCell::new(HighScores::new()));
    let ranks = Rc::new(RefCell::new(Vec::new()));

    let mut engine = o_engine();
    let (t, r) = (Rc::clone(&table), Rc::clone(&ranks));
    engine.subscribe(move |e: &EngineEvent| {
        if let EngineEvent::GameOver(entry) = e {
            r.borrow_mut().push(t.borrow_mut().record(entry.clone()));
        }
    });

    for _ in 0..2 {
        engine.start();
        while engine.is_running() {
            engine.apply(Command::HardDrop);
        }
    }

    assert_eq!(*ranks.borrow(), vec![Some(1), Some(2)]);
    assert_eq!(table.borrow().len(), 2);
    assert_eq!(table.borrow().best().unwrap().score, 180);
}

#[test]
fn test_keys_drive_engine() {
    let mut engine = o_engine();
    let press = |engine: &mut GameEngine<ScriptedSource>, code: KeyCode| {
        let ctx = InputContext::new(engine.is_running(), engine.is_paused());
        handle_key_event(KeyEvent::from(code), ctx).map(|cmd| engine.apply(cmd))
    };

    assert_eq!(press(&mut engine, KeyCode::Enter), Some(true));
    assert!(engine.is_running());

    assert_eq!(press(&mut engine, KeyCode::Left), Some(true));
    assert_eq!(engine.active().unwrap().x, 3);

    assert_eq!(press(&mut engine, KeyCode::Char('p')), Some(true));
    assert!(engine.is_paused());
    // Space resumes instead of dropping while paused.
    assert_eq!(press(&mut engine, KeyCode::Char(' ')), Some(true));
    assert!(!engine.is_paused());
    assert_eq!(engine.stats().score, 0);

    assert_eq!(press(&mut engine, KeyCode::Char(' ')), Some(true));
    assert_eq!(engine.stats().score, 36);
    // Enter does nothing mid-game.
    assert_eq!(press(&mut engine, KeyCode::Enter), None);
}

#[test]
fn test_gravity_over_many_frames() {
    let mut engine = o_engine();
    engine.start();

    // 16ms frames: one row per 63 frames at level 1 (1008ms >= 1000ms).
    for _ in 0..63 {
        engine.update(16);
    }
    assert_eq!(engine.active().unwrap().y, 1);

    // Long enough to fall to the floor and lock.
    for _ in 0..(63 * 19) {
        engine.update(16);
    }
    assert!(engine.board().is_occupied(4, 19));
    assert_eq!(engine.stats().score, 0);
}

#[test]
fn test_starting_level_sets_initial_speed() {
    let mut engine =
        GameEngine::with_source(ScriptedSource::new([PieceKind::T]), EngineConfig::new(4));
    engine.start();
    assert_eq!(engine.stats().level, 4);
    assert_eq!(engine.drop_interval_ms(), 700);

    engine.set_starting_level(1);
    assert_eq!(engine.stats().level, 4);
    engine.start();
    assert_eq!(engine.drop_interval_ms(), 1000);
}
