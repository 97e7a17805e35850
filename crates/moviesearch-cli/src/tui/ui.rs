//! TUI rendering logic for the movie browser.

use moviesearch_api::tmdb::{Movie, image_url};
use moviesearch_core::{PageItem, PaginationView, Phase, View};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{BrowserState, Focus, GridLayout};

/// Width of one grid cell including borders.
const CELL_WIDTH: u16 = 30;
/// Height of one grid cell including borders.
const CELL_HEIGHT: u16 = 5;
/// Image sizes used for the overlay links.
const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "w1280";

/// Formats a number with thousands separators (e.g. 169940 -> "169,940").
#[allow(clippy::arithmetic_side_effects)]
fn fmt_num(n: u32) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Draws the browser UI. Returns the grid geometry for cursor movement.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState) -> GridLayout {
    let view = state.view();
    let pagination_height = if view.pagination.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // search bar + status
            Constraint::Min(CELL_HEIGHT),          // results
            Constraint::Length(pagination_height), // page strip
            Constraint::Length(3),                 // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, &view);
    let layout = draw_body(frame, chunks[1], state, &view);
    if let Some(pagination) = &view.pagination {
        draw_pagination(frame, chunks[2], state, pagination);
    }
    draw_footer(frame, chunks[3], state, &view);

    if let Some(movie) = view.overlay {
        draw_overlay(frame, frame.area(), movie);
    }
    draw_toasts(frame, frame.area(), state);

    layout
}

/// Draws the search field and the result summary.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState, view: &View<'_>) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let searching = state.focus == Focus::Search;
    let mut text = String::from(state.search_bar.text());
    if searching {
        text.push('_');
    }
    let search = Paragraph::new(text).style(focus_style(searching)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search movies: / ")
            .border_style(focus_style(searching)),
    );
    frame.render_widget(search, header_chunks[0]);

    let summary = if view.query.is_empty() {
        String::new()
    } else {
        let mut line = format!(
            "\"{}\"  page {}/{}  {} results",
            view.query,
            view.page,
            view.total_pages.max(1),
            fmt_num(view.total_results),
        );
        if view.is_stale {
            line.push_str("  updating\u{2026}");
        }
        line
    };
    let status = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Powered by TMDB "),
    );
    frame.render_widget(status, header_chunks[1]);
}

/// Draws whichever of loader, error, hint, or grid the phase calls for.
fn draw_body(frame: &mut Frame, area: Rect, state: &BrowserState, view: &View<'_>) -> GridLayout {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .border_style(focus_style(state.focus == Focus::Grid));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = match view.phase {
        Phase::Idle => Some(Line::from("Type a title and press Enter to search.")),
        Phase::Loading => Some(Line::from(Span::styled(
            "Loading\u{2026}",
            Style::default().fg(Color::Yellow),
        ))),
        Phase::Error => view
            .error
            .map(|message| Line::from(Span::styled(message, Style::default().fg(Color::Red)))),
        Phase::Empty => Some(Line::from("No movies found.")),
        Phase::Populated => None,
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(message).alignment(Alignment::Center);
        frame.render_widget(paragraph, centered_line(inner));
        return GridLayout::default();
    }

    draw_grid(frame, inner, state, view.movies, view.is_stale)
}

/// Draws the movie cards row by row, starting at the scrolled row.
#[allow(clippy::arithmetic_side_effects)]
fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    movies: &[Movie],
    stale: bool,
) -> GridLayout {
    let columns = (area.width / CELL_WIDTH).max(1);
    let rows = (area.height / CELL_HEIGHT).max(1);
    let layout = GridLayout {
        columns: usize::from(columns),
        rows: usize::from(rows),
    };
    let cell_width = area.width / columns;

    let first = state.grid_scroll() * layout.columns;
    let visible = movies.iter().enumerate().skip(first);
    for (offset, (index, movie)) in visible.take(layout.columns * layout.rows).enumerate() {
        let Ok(offset) = u16::try_from(offset) else {
            break;
        };
        let cell = Rect {
            x: area.x + (offset % columns) * cell_width,
            y: area.y + (offset / columns) * CELL_HEIGHT,
            width: cell_width,
            height: CELL_HEIGHT,
        };
        let focused = state.focus == Focus::Grid && index == state.grid_cursor();
        draw_cell(frame, cell.intersection(area), movie, focused, stale);
    }

    layout
}

fn draw_cell(frame: &mut Frame, area: Rect, movie: &Movie, focused: bool, stale: bool) {
    let mut style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    if stale {
        style = style.add_modifier(Modifier::DIM);
    }

    let year = movie
        .release_year()
        .map_or_else(|| String::from("----"), |y| y.to_string());
    let lines = vec![
        Line::from(Span::styled(movie.title.clone(), style)),
        Line::from(format!("{year}  \u{2605} {:.1}", movie.vote_average)),
        Line::from(Span::styled(
            if movie.poster_path.is_some() {
                "poster"
            } else {
                "no poster"
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );
    frame.render_widget(card, area);
}

/// Draws the page strip with previous/next arrows and breaks.
fn draw_pagination(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    pagination: &PaginationView,
) {
    let active = state.focus == Focus::Pagination;
    let dim = Style::default().fg(Color::DarkGray);
    let arrow = |enabled: bool| if enabled { Style::default() } else { dim };

    let mut spans = vec![Span::styled(
        "\u{2190} ",
        arrow(pagination.previous().is_some()),
    )];
    for item in &pagination.items {
        match *item {
            PageItem::Page(index) => {
                let label = format!(" {} ", index.saturating_add(1));
                let mut style = Style::default();
                if index == pagination.selected {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                if active && index == state.page_cursor() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(label, style));
            }
            PageItem::Break => spans.push(Span::styled(" \u{2026} ", dim)),
        }
    }
    spans.push(Span::styled(" \u{2192}", arrow(pagination.next().is_some())));

    let strip = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pages ")
                .border_style(focus_style(active)),
        );
    frame.render_widget(strip, area);
}

/// Draws the detail overlay centered over everything else.
fn draw_overlay(frame: &mut Frame, area: Rect, movie: &Movie) {
    let popup = centered_rect(area, 70, 60);
    frame.render_widget(Clear, popup);

    let released = movie
        .released_on()
        .map_or_else(|| String::from("unknown"), |d| d.format("%B %-d, %Y").to_string());
    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Released: {released}  Rating: {:.1}",
            movie.vote_average
        )),
        Line::from(""),
    ];
    if movie.overview.is_empty() {
        lines.push(Line::from(Span::styled(
            "No overview available.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(movie.overview.clone()));
    }
    lines.push(Line::from(""));
    let images = [
        ("Poster", movie.poster_path.as_deref(), POSTER_SIZE),
        ("Backdrop", movie.backdrop_path.as_deref(), BACKDROP_SIZE),
    ];
    for (label, path, size) in images {
        if let Some(path) = path {
            lines.push(Line::from(Span::styled(
                format!("{label}: {}", image_url(path, size)),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(detail, popup);
}

/// Draws toasts stacked in the top-right corner.
#[allow(clippy::arithmetic_side_effects)]
fn draw_toasts(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let width = area.width.min(40);
    for (row, toast) in (0_u16..).zip(state.toasts.iter()) {
        let rect = Rect {
            x: area.x + area.width - width,
            y: area.y + row * 3,
            width,
            height: 3,
        }
        .intersection(area);
        if rect.is_empty() {
            break;
        }
        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(toast.notification.message()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(paragraph, rect);
    }
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState, view: &View<'_>) {
    let help_text = if view.overlay.is_some() {
        "Esc/Enter/q: close  o: open on TMDB"
    } else {
        match state.focus {
            Focus::Search => "Type to search | Enter: search | Tab: results | Esc: cancel",
            Focus::Grid => {
                "\u{2190}\u{2191}\u{2193}\u{2192}/hjkl: move  Enter: details  [ ]: page  r: refresh  /: search  Tab: pages  q: quit"
            }
            Focus::Pagination => {
                "\u{2190}\u{2192}: page  Home/End: first/last  Enter: go  Tab: search  q: quit"
            }
        }
    };

    let footer = Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Single line vertically centered in `area`.
const fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y.saturating_add(area.height / 2),
        width: area.width,
        height: if area.height > 0 { 1 } else { 0 },
    }
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
#[allow(clippy::indexing_slicing)]
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100_u16.saturating_sub(percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100_u16.saturating_sub(percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100_u16.saturating_sub(percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
