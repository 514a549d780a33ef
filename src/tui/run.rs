//! TUI effects boundary: event loop and terminal lifecycle.
//!
//! This is the only module that touches the real terminal. It wires the
//! pure layers (state, update, view) to crossterm and ratatui, and hands
//! the config file to the controller as its persistence sink.
//!
//! There are no background producers, so the loop blocks on
//! `crossterm::event::read` directly.

use std::io;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{Config, ConfigFile};

use super::state::{App, AppEvent, Viewport};
use super::update::handle_event;
use super::view::render;

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT TRANSLATION
// ============================================================================

/// Translate a crossterm event into an app event.
///
/// Only key presses count; release and repeat reports (sent by terminals
/// with enhanced keyboard support) are dropped so a key never fires twice.
/// Mouse, focus and paste events are ignored.
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// Settings changes are written to `file` as they happen. Terminal errors
/// end the loop; the terminal is restored either way.
pub fn run(config: Config, file: ConfigFile) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, config, file);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    mut file: ConfigFile,
) -> io::Result<()> {
    let mut app = App::new(config);
    app.config_path = Some(file.path().to_path_buf());

    let (width, height) = crossterm::terminal::size()?;
    app.viewport = Viewport { width, height };
    tracing::debug!(width, height, "tui started");

    loop {
        // Render
        terminal.draw(|frame| render(&app, frame))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Block on the next terminal event
        if let Some(event) = translate(event::read()?) {
            handle_event(&mut app, event, &mut file);
        }
    }

    tracing::debug!("tui exited");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
