use chrono::{Datelike, NaiveDate};

use crate::data::{calendar, formatter};
use crate::model::segment::SegmentList;
use crate::model::span::FormattedParagraph;

/// Shown when the selected day's segment has no text.
pub const SILENT_PAGE: &str = "The pages are silent today.";

/// The formatted page for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub total_days: usize,
    /// Zero-based index of the segment shown.
    pub index: usize,
    pub paragraphs: Vec<FormattedParagraph>,
}

impl Reading {
    pub fn for_date(segments: &SegmentList, date: NaiveDate) -> Self {
        let day_of_year = calendar::day_of_year(date);
        let index = calendar::select_index(i64::from(day_of_year), segments.len());
        let text = segments
            .get(index)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(SILENT_PAGE);

        Self {
            date,
            day_of_year,
            total_days: segments.len(),
            index,
            paragraphs: formatter::format_segment(text),
        }
    }

    pub fn month_name(&self) -> &'static str {
        calendar::month_name(self.date)
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Progress through the book, clamped for display.
    pub fn progress_ratio(&self) -> f64 {
        (calendar::progress_percentage(self.day_of_year, self.total_days) / 100.0).clamp(0.0, 1.0)
    }

    /// Footer counter, e.g. "12 / 365".
    pub fn folio(&self) -> String {
        format!("{} / {}", self.day_of_year, self.total_days)
    }
}
