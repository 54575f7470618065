//! Paragraph splitting and inline emphasis for a day's segment.
//!
//! Segments use the Project Gutenberg plain-text conventions: `_word_` for
//! italics and `=word=` for bold. Markers never nest; a marker character
//! inside a run is part of that run's text.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::span::{FormattedParagraph, Span};

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"_[^_]+_|=+[^=]+=").expect("marker pattern is valid"))
}

/// Split a segment into paragraphs, one per line. Blank lines are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split('\n')
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Render the inline markers of one paragraph into spans.
pub fn format_inline(paragraph: &str) -> FormattedParagraph {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in marker_regex().find_iter(paragraph) {
        if m.start() > last {
            spans.push(Span::Plain(paragraph[last..m.start()].to_string()));
        }
        let run = m.as_str();
        // Delimiters are single ASCII bytes.
        let inner = run[1..run.len() - 1].to_string();
        if run.starts_with('_') {
            spans.push(Span::Italic(inner));
        } else {
            spans.push(Span::Bold(inner));
        }
        last = m.end();
    }

    if last < paragraph.len() {
        spans.push(Span::Plain(paragraph[last..].to_string()));
    }
    spans
}

/// Split and format a whole segment.
pub fn format_segment(text: &str) -> Vec<FormattedParagraph> {
    split_paragraphs(text)
        .iter()
        .map(|p| format_inline(p))
        .collect()
}
