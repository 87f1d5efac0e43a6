//! Blockfall terminal runner (default binary).
//!
//! Drives the engine from a fixed-budget host loop: poll terminal input until
//! the frame budget runs out, feed commands to the engine, advance gravity by
//! the measured elapsed time, then diff-render the next frame.

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{EngineEvent, GameEngine};
use blockfall::input::{handle_key_event, should_quit, InputContext};
use blockfall::store::{HighScores, Settings};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;
use blockfall::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a file logger when `BLOCKFALL_LOG_PATH` is set.
///
/// Stdout belongs to the game screen, so without a path nothing is logged.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let settings = Settings::load(&config.settings_path());
    let high_scores = Rc::new(RefCell::new(HighScores::load(&config.high_scores_path())));

    let starting_level = config.starting_level.unwrap_or(settings.starting_level);
    info!(
        data_dir = %config.data_dir.display(),
        seed = config.seed,
        starting_level,
        "blockfall starting"
    );

    let mut engine = GameEngine::new(config.seed);
    engine.set_starting_level(starting_level);

    let table = Rc::clone(&high_scores);
    let scores_path = config.high_scores_path();
    engine.subscribe(move |event: &EngineEvent| {
        if let EngineEvent::GameOver(entry) = event {
            let mut table = table.borrow_mut();
            let rank = table.record(entry.clone());
            info!(target: "store", score = entry.score, rank = ?rank, "high score recorded");
            if let Err(e) = table.save(&scores_path) {
                warn!(target: "store", error = %e, "failed to save high scores");
            }
        }
    });

    engine.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = engine.snapshot();
        view.render_into(&snap, high_scores.borrow().entries(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    let ctx = InputContext::new(engine.is_running(), engine.is_paused());
                    if let Some(command) = handle_key_event(key, ctx) {
                        engine.apply(command);
                    }
                }
                Event::FocusLost => {
                    if engine.is_running() && !engine.is_paused() {
                        engine.pause();
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame_duration {
            last_frame = Instant::now();
            engine.update(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }
    }
}
