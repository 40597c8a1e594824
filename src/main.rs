//! Terminal gems runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).
//!
//! The frame loop owns all timing: it advances the animator, reports sprite
//! arrivals back to the engine, ticks the engine and the stage countdown,
//! and drains engine events into the display and the score.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_gems::core::{BoardEngine, BoardEvent, StageScore};
use tui_gems::input::{handle_key_event, should_quit, SwipeTracker};
use tui_gems::term::{Animator, BoardView, FrameBuffer, Hud, TerminalRenderer, Viewport};
use tui_gems::types::{Cell, HostAction, TICK_MS};

mod config;

use config::GameConfig;

fn main() -> Result<()> {
    // Load before raw mode so config warnings stay visible.
    let config = GameConfig::load();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut engine = BoardEngine::new(config.board, seed);
    let mut animator = Animator::new();
    let mut score = StageScore::new(config.stage_duration_ms);
    let mut tracker = SwipeTracker::new();
    let view = BoardView::new(config.cell_w, config.cell_h);

    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = Cell::new(config.board.width / 2, config.board.height / 2);
    let mut paused = false;

    // Seed the display with the initial population.
    for event in engine.drain_events() {
        animator.apply(event);
    }

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let hud = Hud {
            score: &score,
            phase: engine.phase_label(),
            paused,
            cursor: Some(cursor),
        };
        view.render_into(&engine.snapshot(), &animator, &hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            HostAction::Reset => {
                                engine.reset();
                                score.reset();
                                tracker.cancel();
                                paused = false;
                            }
                            _ if score.game_over() => {}
                            HostAction::Pause => paused = !paused,
                            _ if paused => {}
                            HostAction::Cursor(dir) => {
                                if let Some(next) =
                                    cursor.neighbor(dir, engine.width(), engine.height())
                                {
                                    cursor = next;
                                }
                            }
                            HostAction::Swipe(dir) => {
                                engine.swipe(cursor, dir);
                            }
                        }
                    }
                }
                Event::Mouse(mouse) if !paused && !score.game_over() => {
                    let layout = view.layout(engine.width(), engine.height(), viewport);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            if let Some(cell) = layout.cell_at(mouse.column, mouse.row) {
                                let (ux, uy) = layout.board_units(mouse.column, mouse.row);
                                tracker.press(cell, ux, uy);
                                cursor = cell;
                            }
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            let (ux, uy) = layout.board_units(mouse.column, mouse.row);
                            if let Some((cell, angle)) = tracker.release(ux, uy) {
                                engine.swipe_angle(cell, angle);
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if !paused && !score.game_over() {
                for id in animator.tick(TICK_MS) {
                    engine.notify_arrived(id);
                }
                engine.tick(TICK_MS);
                for event in engine.drain_events() {
                    if let BoardEvent::Resolved { destroyed } = event {
                        score.on_resolved(destroyed);
                    }
                    animator.apply(event);
                }
                score.tick(TICK_MS);
            }
        }
    }
}
