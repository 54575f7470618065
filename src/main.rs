mod app;
mod config;
mod data;
mod error;
mod event;
mod logging;
mod model;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use crossterm::event::{self as ct_event, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::app::App;
use crate::config::ReaderConfig;
use crate::data::{calendar, segments};
use crate::data::segments::Source;
use crate::event::AppEvent;
use crate::logging::LogTarget;
use crate::model::reading::Reading;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio - one page of a book per day, in the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Book location: an http(s) URL or a path to a JSON array of strings
    #[arg(long, global = true)]
    source: Option<String>,

    /// Config file [default: .folio.toml in the current directory]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show the page for this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the day's page to stdout and exit
    Print {
        /// Disable italic/bold escape codes
        #[arg(long)]
        no_ansi: bool,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD form", s))
}

/// Settings resolved from the command line over the config file.
struct ReaderOptions {
    source: Source,
    timeout: Duration,
    pinned_date: Option<NaiveDate>,
}

impl ReaderOptions {
    fn resolve(cli: &Cli, config: &ReaderConfig) -> Self {
        let location = cli.source.as_deref().unwrap_or_else(|| config.source());
        Self {
            source: Source::parse(location),
            timeout: config.fetch_timeout(),
            pinned_date: cli.date,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Some(Command::Print { no_ansi }) => {
            if let Some(notice) = logging::init(cli.verbose, LogTarget::Stderr) {
                eprintln!("warning: {notice}");
            }
            let config = config::load_reader_config(cli.config.as_deref(), &cwd);
            let options = ReaderOptions::resolve(&cli, &config);
            run_print(&config, &options, !no_ansi)
        }
        None => {
            let log_path = config::folio_home().join("folio.log");
            let log_notice = logging::init(cli.verbose, LogTarget::File(&log_path));
            let config = config::load_reader_config(cli.config.as_deref(), &cwd);
            let options = ReaderOptions::resolve(&cli, &config);
            let result = run_tui(&config, options);
            // Reported after the terminal is restored so it stays visible.
            if let Some(notice) = log_notice {
                eprintln!("warning: {notice}");
            }
            result
        }
    }
}

fn run_print(config: &ReaderConfig, options: &ReaderOptions, ansi: bool) -> Result<()> {
    let book = segments::fetch_segments(&options.source, options.timeout);
    let date = options.pinned_date.unwrap_or_else(calendar::today_utc);
    let reading = Reading::for_date(&book, date);

    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ui::plain::write_reading(&mut out, &reading, config.title(), width, ansi)?;
    out.flush()?;
    Ok(())
}

fn run_tui(config: &ReaderConfig, options: ReaderOptions) -> Result<()> {
    info!(
        source = %options.source,
        day = calendar::day_of_year_utc(chrono::Utc::now()),
        "starting reader"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, config, options);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "reader exited with an error");
        eprintln!("Error: {}", e);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ReaderConfig,
    options: ReaderOptions,
) -> Result<()> {
    let mut app = App::new(config, options.pinned_date, calendar::today_utc());

    // The loader reports through the channel; the loop keeps drawing meanwhile.
    let (tx, rx) = mpsc::channel::<AppEvent>();
    segments::spawn_fetch(options.source, options.timeout, tx);

    let tick_rate = config.tick_rate();
    let mut last_tick = Instant::now();

    loop {
        // Draw only when dirty
        if app.dirty {
            let size = terminal.size()?;
            app.set_viewport(Rect::new(0, 0, size.width, size.height));
            terminal.draw(|f| ui::draw(f, &app))?;
            app.dirty = false;
        }

        // Handle events
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if ct_event::poll(timeout)? {
            match ct_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut app, key);
                    app.mark_dirty();
                }
                Event::Resize(..) => app.mark_dirty(),
                _ => {}
            }
        }

        // Book loader
        if app.is_loading() {
            match rx.try_recv() {
                Ok(AppEvent::SegmentsLoaded(book)) => {
                    app.handle_segments_loaded(book);
                    app.mark_dirty();
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    app.fail_init("book loader stopped without a result");
                    app.mark_dirty();
                }
            }
        }

        // Tick
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.on_tick();
        }

        if app.should_quit {
            debug!("quit requested");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keybindings (always active)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.jump_top(),
        KeyCode::Char('G') | KeyCode::End => app.jump_bottom(),
        _ => {}
    }
}
