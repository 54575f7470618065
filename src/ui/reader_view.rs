use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{LineGauge, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::layout::ReaderAreas;
use super::{theme, util};
use crate::app::App;
use crate::model::reading::Reading;
use crate::model::span::Span as TextSpan;

pub fn draw_reader(f: &mut Frame, areas: &ReaderAreas, app: &App, reading: &Reading) {
    draw_date(f, areas.date, reading);
    draw_page(f, areas.page, app, reading);
    draw_footer(f, areas.footer, app, reading);
}

/// Month and day of month, top right.
fn draw_date(f: &mut Frame, area: Rect, reading: &Reading) {
    let lines = vec![
        Line::from(Span::styled(
            util::letter_space(reading.month_name()),
            theme::DATE_MONTH,
        )),
        Line::from(Span::styled(
            reading.day_of_month().to_string(),
            theme::DATE_DAY,
        )),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Right);
    f.render_widget(p, area);
}

fn styled_span(span: &TextSpan) -> Span<'_> {
    match span {
        TextSpan::Plain(t) => Span::raw(t.as_str()),
        TextSpan::Italic(t) => Span::styled(t.as_str(), theme::TEXT_ITALIC),
        TextSpan::Bold(t) => Span::styled(t.as_str(), theme::TEXT_BOLD),
    }
}

/// The page as display lines: one per paragraph, blank lines between.
/// With `drop_cap`, the first letter of the page gets its own style.
pub fn page_lines(reading: &Reading, drop_cap: bool) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for (i, paragraph) in reading.paragraphs.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let mut spans: Vec<Span> = paragraph.iter().map(styled_span).collect();

        if drop_cap && i == 0 {
            if let Some(first) = paragraph.first() {
                let text = first.text().trim_start();
                if let Some(cap) = text.chars().next() {
                    let rest = &text[cap.len_utf8()..];
                    let rest_style = spans[0].style;
                    spans[0] = Span::styled(cap.to_string(), theme::DROP_CAP);
                    if !rest.is_empty() {
                        spans.insert(1, Span::styled(rest, rest_style));
                    }
                }
            }
        }

        lines.push(Line::from(spans));
    }
    lines
}

/// Rows the lines occupy when word-wrapped to `width`.
pub fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            wrapped_rows(&text, width)
        })
        .sum()
}

/// Greedy word wrap, breaking words longer than the width.
fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let w = word.width();
        if current > 0 && current + 1 + w <= width {
            current += 1 + w;
            continue;
        }
        if current > 0 {
            rows += 1;
        }
        rows += w.saturating_sub(1) / width;
        current = match w % width {
            0 if w > 0 => width,
            r => r,
        };
    }
    rows
}

fn draw_page(f: &mut Frame, area: Rect, app: &App, reading: &Reading) {
    let lines = page_lines(reading, app.drop_cap);
    let max_scroll = wrapped_height(&lines, area.width).saturating_sub(area.height as usize);
    let scroll = app.scroll.min(max_scroll).min(u16::MAX as usize) as u16;

    let p = Paragraph::new(lines)
        .style(theme::TEXT)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

/// Rule, then title, progress gauge, and "day / total".
fn draw_footer(f: &mut Frame, area: Rect, app: &App, reading: &Reading) {
    if area.height < 2 {
        return;
    }
    let rule = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Span::styled(rule, theme::FOOTER_RULE)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let row = Rect::new(area.x, area.y + 1, area.width, 1);
    let title = app.title.to_uppercase();
    let folio = reading.folio();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(title.width() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(folio.width() as u16 + 2),
        ])
        .split(row);

    f.render_widget(Paragraph::new(Span::styled(title, theme::FOOTER)), cols[0]);

    let ratio = reading.progress_ratio();
    let gauge = LineGauge::default()
        .filled_style(theme::GAUGE_FILLED)
        .unfilled_style(theme::GAUGE_UNFILLED)
        .label(Span::styled(format!("{:>3.0}%", ratio * 100.0), theme::FOOTER))
        .ratio(ratio);
    f.render_widget(gauge, cols[1]);

    f.render_widget(
        Paragraph::new(Span::styled(folio, theme::FOOTER)).alignment(Alignment::Right),
        cols[2],
    );
}
