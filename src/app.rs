use std::time::{Duration, Instant};

use chrono::NaiveDate;
use ratatui::layout::Rect;
use tracing::{error, info};

use crate::config::ReaderConfig;
use crate::data::calendar;
use crate::model::reading::Reading;
use crate::model::segment::SegmentList;
use crate::ui::{layout, reader_view};

/// The single message shown when setup fails.
pub const FATAL_MESSAGE: &str = "The book could not be opened.";

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub dirty: bool,

    // Config
    pub title: String,
    pub drop_cap: bool,
    pub day_check_interval: Duration,

    // Book
    pub segments: Option<SegmentList>,
    pub using_fallback: bool,
    pub reading: Option<Reading>,
    /// Fixed date from `--date`; disables rollover.
    pub pinned_date: Option<NaiveDate>,
    pub today: NaiveDate,
    pub last_day_check: Instant,
    pub fatal: Option<&'static str>,

    // Page view
    pub scroll: usize,
    pub viewport: Rect,
}

impl App {
    pub fn new(config: &ReaderConfig, pinned_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            dirty: true,
            title: config.title().to_string(),
            drop_cap: config.drop_cap(),
            day_check_interval: config.day_check_interval(),
            segments: None,
            using_fallback: false,
            reading: None,
            pinned_date,
            today: pinned_date.unwrap_or(today),
            last_day_check: Instant::now(),
            fatal: None,
            scroll: 0,
            viewport: Rect::default(),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_loading(&self) -> bool {
        self.segments.is_none() && self.fatal.is_none()
    }

    /// Take ownership of the loaded book and build the page for the current date.
    pub fn handle_segments_loaded(&mut self, segments: SegmentList) {
        self.using_fallback = segments.is_fallback();
        self.reading = Some(Reading::for_date(&segments, self.today));
        self.segments = Some(segments);
        self.scroll = 0;
        if let Some(ref reading) = self.reading {
            info!(
                day = reading.day_of_year,
                index = reading.index,
                total = reading.total_days,
                "showing page"
            );
        }
    }

    /// Setup failed: log once and show only the static message.
    pub fn fail_init(&mut self, reason: &str) {
        error!(reason, "failed to open the book");
        self.fatal = Some(FATAL_MESSAGE);
        self.reading = None;
    }

    /// Rebuild the page in place if the UTC date moved. Returns whether it did.
    pub fn check_day(&mut self, today: NaiveDate) -> bool {
        if self.pinned_date.is_some() || today == self.today {
            return false;
        }
        info!(from = %self.today, to = %today, "day changed");
        self.today = today;
        if let Some(ref segments) = self.segments {
            self.reading = Some(Reading::for_date(segments, today));
        }
        self.scroll = 0;
        true
    }

    /// Periodic work from the event loop tick.
    pub fn on_tick(&mut self) {
        if self.last_day_check.elapsed() >= self.day_check_interval {
            self.last_day_check = Instant::now();
            if self.check_day(calendar::today_utc()) {
                self.mark_dirty();
            }
        }
    }

    // --- Scrolling ---

    /// Terminal size changed (or first draw).
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn max_scroll(&self) -> usize {
        let Some(ref reading) = self.reading else {
            return 0;
        };
        let page = layout::reader_areas(self.viewport).page;
        let lines = reader_view::page_lines(reading, self.drop_cap);
        reader_view::wrapped_height(&lines, page.width).saturating_sub(page.height as usize)
    }

    fn page_height(&self) -> usize {
        (layout::reader_areas(self.viewport).page.height as usize).max(1)
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_height().saturating_sub(1).max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_height().saturating_sub(1).max(1));
    }

    pub fn jump_top(&mut self) {
        self.scroll = 0;
    }

    pub fn jump_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::span::Span;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book(pages: &[&str]) -> SegmentList {
        SegmentList::new(pages.iter().map(|p| p.to_string()).collect()).unwrap()
    }

    fn first_text(app: &App) -> String {
        app.reading.as_ref().unwrap().paragraphs[0][0].text().to_string()
    }

    #[test]
    fn loads_into_the_page_for_today() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 2));
        assert!(app.is_loading());

        app.handle_segments_loaded(book(&["one", "two", "three"]));
        assert!(!app.is_loading());
        assert!(!app.using_fallback);
        assert_eq!(first_text(&app), "two");
    }

    #[test]
    fn fallback_book_is_flagged() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 5, 5));
        app.handle_segments_loaded(SegmentList::fallback());
        assert!(app.using_fallback);
    }

    #[test]
    fn day_rollover_rebuilds_the_page_in_place() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 1));
        app.handle_segments_loaded(book(&["one", "two", "three"]));
        app.scroll = 3;

        assert!(!app.check_day(date(2023, 1, 1)));
        assert_eq!(first_text(&app), "one");

        assert!(app.check_day(date(2023, 1, 2)));
        assert_eq!(first_text(&app), "two");
        assert_eq!(app.scroll, 0);
        assert_eq!(app.reading.as_ref().unwrap().day_of_year, 2);
    }

    #[test]
    fn rollover_into_a_new_year_starts_the_book_again() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 12, 31));
        app.handle_segments_loaded(SegmentList::new(vec!["x".into(); 365]).unwrap());
        assert_eq!(app.reading.as_ref().unwrap().index, 364);

        assert!(app.check_day(date(2024, 1, 1)));
        assert_eq!(app.reading.as_ref().unwrap().index, 0);
    }

    #[test]
    fn pinned_date_never_rolls_over() {
        let pinned = date(2023, 3, 3);
        let mut app = App::new(&ReaderConfig::default(), Some(pinned), date(2023, 9, 9));
        assert_eq!(app.today, pinned);
        app.handle_segments_loaded(book(&["a", "b", "c"]));

        assert!(!app.check_day(date(2023, 9, 10)));
        assert_eq!(app.today, pinned);
    }

    #[test]
    fn day_change_before_load_is_remembered() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 1));
        assert!(app.check_day(date(2023, 1, 3)));
        assert!(app.reading.is_none());

        app.handle_segments_loaded(book(&["one", "two", "three"]));
        assert_eq!(first_text(&app), "three");
    }

    #[test]
    fn fatal_init_shows_only_the_static_message() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 1));
        app.fail_init("loader thread exited");
        assert_eq!(app.fatal, Some(FATAL_MESSAGE));
        assert!(app.reading.is_none());
        assert!(!app.is_loading());
    }

    #[test]
    fn scrolling_is_clamped_to_the_page() {
        let long: String = (0..60).map(|i| format!("Paragraph {i}\n")).collect();
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 1));
        app.handle_segments_loaded(book(&[long.as_str()]));
        app.set_viewport(Rect::new(0, 0, 80, 24));

        let max = app.max_scroll();
        assert!(max > 0);

        app.scroll_up(5);
        assert_eq!(app.scroll, 0);

        app.jump_bottom();
        assert_eq!(app.scroll, max);
        app.scroll_down(10);
        assert_eq!(app.scroll, max);

        app.page_up();
        assert!(app.scroll < max);
        app.jump_top();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn short_page_does_not_scroll() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2023, 1, 1));
        app.handle_segments_loaded(book(&["short"]));
        app.set_viewport(Rect::new(0, 0, 80, 24));
        app.page_down();
        assert_eq!(app.scroll, 0);
        assert_eq!(
            app.reading.as_ref().unwrap().paragraphs,
            vec![vec![Span::Plain("short".into())]]
        );
    }

    #[test]
    fn tick_checks_the_day_only_once_the_interval_has_passed() {
        let mut app = App::new(&ReaderConfig::default(), None, date(2000, 1, 1));
        app.handle_segments_loaded(book(&["one", "two"]));
        app.dirty = false;

        app.on_tick();
        assert_eq!(app.today, date(2000, 1, 1));
        assert!(!app.dirty);

        app.day_check_interval = Duration::ZERO;
        app.on_tick();
        assert_eq!(app.today, calendar::today_utc());
        assert!(app.dirty);
    }
}
