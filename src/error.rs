use thiserror::Error;

/// Why the book could not be read from its source.
///
/// Never surfaced to the reader: `segments::fetch_segments` logs it and
/// substitutes the placeholder book.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("book is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("book has no segments")]
    Empty,
}
