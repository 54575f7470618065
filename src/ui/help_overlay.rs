use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::{layout, theme};

const BINDINGS: [(&str, &str); 7] = [
    ("j/k or Up/Down", "Scroll one line"),
    ("PgDn / Space", "Scroll one screen down"),
    ("PgUp", "Scroll one screen up"),
    ("g / Home", "Jump to top"),
    ("G / End", "Jump to bottom"),
    ("?", "Toggle this help"),
    ("q / Esc / Ctrl+C", "Quit"),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    let height = BINDINGS.len() as u16 + 6;
    let popup_area = layout::centered_rect(48u16.min(area.width.saturating_sub(4)), height, area);

    // Clear background
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(" Keybindings", theme::HELP_TITLE)),
        Line::from(""),
    ];

    for (key, desc) in &BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:20}", key), theme::HELP_KEY),
            Span::styled(*desc, theme::HELP_DESC),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  The page changes at midnight UTC.",
        theme::HELP_DESC,
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER_ACTIVE);

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, popup_area);
}
