use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use super::{help_overlay, reader_view, theme, util};
use crate::app::App;

/// Widest the text column gets, in cells.
pub const MAX_PAGE_WIDTH: u16 = 72;

/// Screen regions of the reader, all within the centered text column
/// except the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReaderAreas {
    pub date: Rect,
    pub page: Rect,
    pub footer: Rect,
    pub status: Rect,
}

pub fn reader_areas(area: Rect) -> ReaderAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top margin
            Constraint::Length(2), // Date indicator
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Page
            Constraint::Length(2), // Footer
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    ReaderAreas {
        date: column(rows[1]),
        page: column(rows[3]),
        footer: column(rows[4]),
        status: rows[5],
    }
}

/// Horizontally centered column no wider than `MAX_PAGE_WIDTH`, with a
/// margin on narrow terminals.
fn column(area: Rect) -> Rect {
    let margin = if area.width > MAX_PAGE_WIDTH + 4 { 0 } else { 2 };
    let width = area
        .width
        .saturating_sub(margin * 2)
        .min(MAX_PAGE_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Center a `width` x `height` box in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1]);

    horiz[1]
}

pub fn draw_layout(f: &mut Frame, app: &App) {
    let area = f.area();

    if let Some(message) = app.fatal {
        draw_message(f, area, message, theme::FATAL);
        return;
    }

    let areas = reader_areas(area);
    match app.reading {
        Some(ref reading) => reader_view::draw_reader(f, &areas, app, reading),
        None => draw_message(f, area, "O P E N I N G . . .", theme::LOADING),
    }

    draw_status_bar(f, areas.status, app);

    // Help overlay (on top of everything)
    if app.show_help {
        help_overlay::draw_help(f, area);
    }
}

/// A single centered line on an otherwise empty screen.
fn draw_message(f: &mut Frame, area: Rect, message: &str, style: ratatui::style::Style) {
    f.render_widget(Clear, area);
    let row = centered_rect(area.width, 1, area);
    let p = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .alignment(Alignment::Center);
    f.render_widget(p, row);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" ?", theme::HINT_KEY),
        Span::styled(" help  ", theme::HINT_DESC),
        Span::styled("j/k", theme::HINT_KEY),
        Span::styled(" scroll  ", theme::HINT_DESC),
        Span::styled("q", theme::HINT_KEY),
        Span::styled(" quit  ", theme::HINT_DESC),
    ];

    if app.using_fallback {
        spans.push(Span::styled(
            " book unavailable, showing placeholder text ",
            theme::STATUS_WARNING,
        ));
    } else if let Some(date) = app.pinned_date {
        spans.push(Span::styled(
            format!(" pinned to {} ", date.format("%Y-%m-%d")),
            theme::STATUS_BAR,
        ));
    }

    // Drop trailing hints that do not fit.
    let mut used = 0usize;
    let mut fitted = Vec::new();
    for span in spans {
        let w = span.width();
        if used + w > area.width as usize {
            let room = (area.width as usize).saturating_sub(used);
            let text = util::truncate_width(&span.content, room).to_string();
            fitted.push(Span::styled(text, span.style));
            break;
        }
        used += w;
        fitted.push(span);
    }

    let bar = Paragraph::new(Line::from(fitted)).style(theme::STATUS_BAR);
    f.render_widget(bar, area);
}
