/// One run of inline text with its emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Italic(String),
    Bold(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(t) | Span::Italic(t) | Span::Bold(t) => t,
        }
    }
}

/// A paragraph after inline formatting, in reading order.
pub type FormattedParagraph = Vec<Span>;
