/// Text shown for every day when the book itself cannot be loaded.
pub const PLACEHOLDER_SEGMENT: &str = "This is a placeholder for the book content. \
The actual text would be loaded from chunks.json here.";

/// Length of the placeholder book.
pub const FALLBACK_DAYS: usize = 365;

/// Ordered daily segments of the book. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentList {
    segments: Vec<String>,
}

impl SegmentList {
    /// Returns `None` for an empty list, since day selection wraps modulo the length.
    pub fn new(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// The placeholder book substituted when the source is unavailable.
    pub fn fallback() -> Self {
        Self {
            segments: vec![PLACEHOLDER_SEGMENT.to_string(); FALLBACK_DAYS],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Segment at a zero-based index, as produced by `calendar::select_index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn is_fallback(&self) -> bool {
        self.segments.len() == FALLBACK_DAYS && self.iter().all(|s| s == PLACEHOLDER_SEGMENT)
    }
}
