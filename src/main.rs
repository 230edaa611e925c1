//! Terminal runner (default binary).
//!
//! Fixed-timestep frame loop: render, poll input until the next tick, then
//! advance the session by the ticks that elapsed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info};

use blockfall::config::{config_path, Config};
use blockfall::core::GameSession;
use blockfall::input::{should_quit, KeyTracker};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    logging::init(&config.log)?;

    if let Some(err) = load_error {
        error!("{err}; continuing with default configuration");
    }
    info!(
        "starting blockfall: {}x{} board at {} fps (config {})",
        config.board.width,
        config.board.height,
        config.timing.fps,
        config_path().display()
    );

    let mut session =
        GameSession::new(config.session_settings()).context("failed to create the playfield")?;

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to set up the terminal")?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("game loop failed: {err:#}");
    }
    info!("exiting after {} locked pieces", session.pieces_locked());
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession, config: &Config) -> Result<()> {
    let view = GameView::new(config.view.cell_width, config.view.cell_height)
        .with_grid_lines(config.view.grid_lines);
    let mut input = KeyTracker::new()
        .with_release_timeout_ms(config.timing.key_release_timeout_ms)
        .with_auto_release(!term.reports_key_release());
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_secs(1) / config.timing.fps;
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(session, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    input.handle_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            // Catch up at most one second after a stall.
            let behind = (elapsed.as_nanos() / tick_duration.as_nanos()).min(u32::MAX as u128) as u32;
            let ticks = behind.min(config.timing.fps);
            if behind > ticks {
                last_tick = Instant::now();
            } else {
                last_tick += tick_duration * ticks;
            }

            session.tick(&input, ticks);
            input.end_frame();
            input.advance((tick_duration * ticks).as_millis() as u32);
        }
    }
}
