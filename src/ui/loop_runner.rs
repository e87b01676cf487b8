//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background load results, and a periodic tick.

use crate::app::{App, AppEvent};
use crate::news::NewsRepository;
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::helpers::spawn_news_load;
use super::input::handle_input;
use super::render::render;

/// Number of frames in the loading spinner animation.
pub(super) const SPINNER_FRAMES: usize = 10;

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI until the user quits.
///
/// Kicks off the initial load, then uses `tokio::select!` over:
/// - **Terminal input**: key presses from crossterm's async event stream
/// - **Background tasks**: `AppEvent::NewsLoaded` from the load task
/// - **Periodic tick**: 100ms timer for the spinner and status expiry
///
/// A panic hook restores the terminal before the loop itself unwinds.
pub async fn run(app: &mut App, repository: NewsRepository) -> Result<()> {
    // Background task panics are caught and reported as load errors; only a
    // panic on the loop's own thread tears the terminal down.
    let loop_thread = thread::current().id();
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if panicked_on(loop_thread) {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        original_hook(panic_info);
    }));

    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(8);

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;

    spawn_news_load(app, &repository, &event_tx);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        match handle_input(app, key, &repository, &event_tx) {
                            Action::Quit => break,
                            Action::Continue => {}
                        }
                    }
                    Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Terminal input error");
                        break;
                    }
                    None => break,
                }
            }

            Some(event) = event_rx.recv() => {
                app.handle_event(event);
            }

            _ = tick_interval.tick() => {
                handle_tick(app);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

fn panicked_on(loop_thread: ThreadId) -> bool {
    thread::current().id() == loop_thread
}

fn handle_tick(app: &mut App) {
    if app.is_loading() {
        app.spinner_frame = (app.spinner_frame + 1) % SPINNER_FRAMES;
        app.needs_redraw = true;
    }
    if app.clear_expired_status() {
        app.needs_redraw = true;
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
