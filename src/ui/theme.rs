use ratatui::style::{Color, Modifier, Style};

// Date indicator
pub const DATE_MONTH: Style = Style::new().fg(Color::DarkGray);
pub const DATE_DAY: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::BOLD);

// Page text
pub const TEXT: Style = Style::new().fg(Color::White);
pub const TEXT_ITALIC: Style = Style::new().add_modifier(Modifier::ITALIC);
pub const TEXT_BOLD: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DROP_CAP: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

// Footer / folio
pub const FOOTER: Style = Style::new().fg(Color::DarkGray);
pub const FOOTER_RULE: Style = Style::new().fg(Color::DarkGray);
pub const GAUGE_FILLED: Style = Style::new().fg(Color::Gray);
pub const GAUGE_UNFILLED: Style = Style::new().fg(Color::DarkGray);

// Loading / failure
pub const LOADING: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::ITALIC);
pub const FATAL: Style = Style::new().fg(Color::Red).add_modifier(Modifier::ITALIC);

// Status bar
pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
pub const STATUS_WARNING: Style = Style::new().fg(Color::Yellow).bg(Color::DarkGray);

// Footer hints
pub const HINT_KEY: Style = Style::new().fg(Color::Yellow).bg(Color::DarkGray);
pub const HINT_DESC: Style = Style::new().fg(Color::Gray).bg(Color::DarkGray);

// Help overlay
pub const HELP_TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HELP_KEY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
pub const HELP_DESC: Style = Style::new().fg(Color::White);
pub const BORDER_ACTIVE: Style = Style::new().fg(Color::Cyan);
