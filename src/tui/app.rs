//! Terminal lifecycle and the dashboard event loop.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::TidelapseError;
use crate::replay::chart::{ChartSpec, PlaybackEvent};

use super::chart::ChartState;
use super::ui;

/// How long one redraw cycle waits for keyboard input. Matches the replay
/// cadence so fresh points appear within a frame of being emitted.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Runs the dashboard until the user quits.
///
/// The receiver side of the playback channel feeds the chart; the sender
/// side lives with the player task. Once the final frame arrives the chart
/// stays on screen, static, until `q`, `Esc` or `Ctrl+C`.
pub async fn run(
    spec: ChartSpec,
    mut rx: UnboundedReceiver<PlaybackEvent>,
) -> Result<(), TidelapseError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, spec, &mut rx);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    spec: ChartSpec,
    rx: &mut UnboundedReceiver<PlaybackEvent>,
) -> Result<(), TidelapseError> {
    let mut state = ChartState::new(spec);
    loop {
        drain_events(&mut state, rx);
        terminal.draw(|f| ui::draw(f, &state))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_quit(&key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Folds every event already queued into the chart state without waiting.
/// A closed channel just means the player is done sending.
fn drain_events(state: &mut ChartState, rx: &mut UnboundedReceiver<PlaybackEvent>) {
    while let Ok(event) = rx.try_recv() {
        state.apply(event);
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
