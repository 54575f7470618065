//! One-shot rendering of a page to a writer, for `folio print`.

use std::borrow::Cow;
use std::io::{self, Write};

use crossterm::style::{style, Stylize};
use unicode_width::UnicodeWidthStr;

use super::layout::MAX_PAGE_WIDTH;
use super::util;
use crate::model::reading::Reading;
use crate::model::span::Span;

/// Narrowest column the header and footer are laid out for.
const MIN_WIDTH: usize = 20;

/// Write the date, the page and the folio footer. Paragraphs are left to the
/// terminal to wrap; `width` only positions the header and footer.
pub fn write_reading<W: Write>(
    out: &mut W,
    reading: &Reading,
    title: &str,
    width: usize,
    ansi: bool,
) -> io::Result<()> {
    let width = width.clamp(MIN_WIDTH, MAX_PAGE_WIDTH as usize);

    let month = util::letter_space(reading.month_name());
    let day = reading.day_of_month().to_string();
    writeln!(out, "{}{}", pad(width, month.width()), paint(&month, ansi, Emphasis::Dim))?;
    writeln!(out, "{}{}", pad(width, day.width()), paint(&day, ansi, Emphasis::Bold))?;
    writeln!(out)?;

    for (i, paragraph) in reading.paragraphs.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        for span in paragraph {
            match span {
                Span::Plain(t) => write!(out, "{}", strip_controls(t))?,
                Span::Italic(t) => {
                    write!(out, "{}", paint(&strip_controls(t), ansi, Emphasis::Italic))?
                }
                Span::Bold(t) => write!(out, "{}", paint(&strip_controls(t), ansi, Emphasis::Bold))?,
            }
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", paint(&"─".repeat(width), ansi, Emphasis::Dim))?;
    let title = util::truncate_width(&strip_controls(title), width / 2).to_uppercase();
    let folio = reading.folio();
    let gap = width.saturating_sub(title.width() + folio.width()).max(1);
    writeln!(
        out,
        "{}{}{}",
        paint(&title, ansi, Emphasis::Dim),
        " ".repeat(gap),
        paint(&folio, ansi, Emphasis::Dim)
    )?;
    Ok(())
}

enum Emphasis {
    Italic,
    Bold,
    Dim,
}

fn paint(text: &str, ansi: bool, emphasis: Emphasis) -> String {
    if !ansi {
        return text.to_string();
    }
    match emphasis {
        Emphasis::Italic => style(text).italic().to_string(),
        Emphasis::Bold => style(text).bold().to_string(),
        Emphasis::Dim => style(text).dim().to_string(),
    }
}

/// Book text comes from outside; escape sequences in it must not reach the
/// terminal.
fn strip_controls(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(text.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn pad(width: usize, used: usize) -> String {
    " ".repeat(width.saturating_sub(used))
}
