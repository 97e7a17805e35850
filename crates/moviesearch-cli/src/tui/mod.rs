//! Movie browser TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Fetches run as tokio tasks
//! and report back over a channel, so the screen keeps redrawing while a
//! request is in flight.

/// Browser state types.
pub mod state;
mod toast;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use moviesearch_api::tmdb::MovieApi;
use moviesearch_core::{FetchOutcome, QueryKey, fetch_page};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::state::{BrowserState, Focus};
use crate::config::UiConfig;

/// Redraw and toast-expiry interval.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the movie browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser<A>(api: Arc<A>, ui: &UiConfig) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    let mut state = BrowserState::new(ui);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, api).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    api: Arc<A>,
) -> Result<()>
where
    A: MovieApi + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    loop {
        state.tick(Instant::now());
        let mut layout = state::GridLayout::default();
        terminal
            .draw(|frame| {
                layout = ui::draw(frame, state);
            })
            .context("failed to draw TUI")?;
        state.set_grid_layout(layout);

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Ok(());
                };
                if let Event::Key(key) = event.context("failed to read event")?
                    && key.kind == KeyEventKind::Press
                {
                    let now = Instant::now();
                    match handle_key(state, key, now) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Fetch(keys) => spawn_fetches(&api, &tx, keys),
                    }
                }
            }
            Some(outcome) = rx.recv() => {
                let keys = state.on_fetch(outcome, Instant::now());
                spawn_fetches(&api, &tx, keys);
            }
            _ = ticker.tick() => {}
        }
    }
}

/// Result of handling one key press.
enum KeyAction {
    /// Leave the browser.
    Quit,
    /// Keys to fetch (possibly none).
    Fetch(Vec<QueryKey>),
}

/// Routes a key press to the overlay or the focused component.
fn handle_key(state: &mut BrowserState, key: KeyEvent, now: Instant) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if state.view().overlay.is_some() {
        return handle_overlay_input(state, key.code, now);
    }
    match state.focus {
        Focus::Search => handle_search_input(state, key.code, now),
        Focus::Grid => handle_grid_input(state, key.code, now),
        Focus::Pagination => handle_pagination_input(state, key.code, now),
    }
}

/// Handles key input while the detail overlay is open.
fn handle_overlay_input(state: &mut BrowserState, key: KeyCode, now: Instant) -> KeyAction {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            KeyAction::Fetch(state.close_overlay(now))
        }
        KeyCode::Char('o') => {
            open_movie_page(state);
            KeyAction::Fetch(Vec::new())
        }
        _ => KeyAction::Fetch(Vec::new()),
    }
}

/// Handles key input in the search field.
fn handle_search_input(state: &mut BrowserState, key: KeyCode, now: Instant) -> KeyAction {
    match key {
        KeyCode::Enter => return KeyAction::Fetch(state.submit_search(now)),
        KeyCode::Esc => {
            state.search_bar.clear();
            state.focus = Focus::Grid;
        }
        KeyCode::Tab => state.cycle_focus(),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Char(c) => state.type_char(c),
        _ => {}
    }
    KeyAction::Fetch(Vec::new())
}

/// Handles key input in the result grid.
fn handle_grid_input(state: &mut BrowserState, key: KeyCode, now: Instant) -> KeyAction {
    let keys = match key {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => {
            state.move_grid(-1, 0);
            Vec::new()
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.move_grid(1, 0);
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_grid(0, -1);
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_grid(0, 1);
            Vec::new()
        }
        KeyCode::Enter => state.open_selected(now),
        KeyCode::Char('[') => state.previous_page(now),
        KeyCode::Char(']') => state.next_page(now),
        KeyCode::Char('r') => state.refresh(now),
        KeyCode::Char('/') => {
            state.focus_search();
            Vec::new()
        }
        KeyCode::Tab => {
            state.cycle_focus();
            Vec::new()
        }
        _ => Vec::new(),
    };
    KeyAction::Fetch(keys)
}

/// Handles key input in the page strip.
fn handle_pagination_input(state: &mut BrowserState, key: KeyCode, now: Instant) -> KeyAction {
    let keys = match key {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('h') => {
            state.move_page_cursor(false);
            Vec::new()
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.move_page_cursor(true);
            Vec::new()
        }
        KeyCode::Home => {
            state.jump_page_cursor(false);
            Vec::new()
        }
        KeyCode::End => {
            state.jump_page_cursor(true);
            Vec::new()
        }
        KeyCode::Enter => state.confirm_page(now),
        KeyCode::Char('[') => state.previous_page(now),
        KeyCode::Char(']') => state.next_page(now),
        KeyCode::Char('r') => state.refresh(now),
        KeyCode::Char('/') => {
            state.focus_search();
            Vec::new()
        }
        KeyCode::Tab => {
            state.cycle_focus();
            Vec::new()
        }
        _ => Vec::new(),
    };
    KeyAction::Fetch(keys)
}

/// Starts one background fetch per key.
fn spawn_fetches<A>(api: &Arc<A>, tx: &mpsc::UnboundedSender<FetchOutcome>, keys: Vec<QueryKey>)
where
    A: MovieApi + Sync + 'static,
{
    for key in keys {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_page(api.as_ref(), key).await;
            // Receiver is gone only when the browser has exited.
            let _ = tx.send(outcome);
        });
    }
}

/// Opens the TMDB page of the movie in the overlay.
fn open_movie_page(state: &BrowserState) {
    let Some(url) = state.overlay_url() else {
        return;
    };
    if let Err(e) = open::that(&url) {
        tracing::warn!(url, error = %e, "failed to open browser");
    }
}
