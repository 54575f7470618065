use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::event::AppEvent;
use crate::model::segment::SegmentList;

/// Where the book's daily segments come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched; anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the book, substituting the placeholder book on any failure.
pub fn fetch_segments(source: &Source, timeout: Duration) -> SegmentList {
    match try_fetch(source, timeout) {
        Ok(segments) => {
            info!(source = %source, segments = segments.len(), "book loaded");
            segments
        }
        Err(e) => {
            warn!(source = %source, error = %e, "book unavailable, using placeholder text");
            SegmentList::fallback()
        }
    }
}

/// Load the book, reporting why it could not be read.
pub fn try_fetch(source: &Source, timeout: Duration) -> Result<SegmentList, SourceError> {
    let body = match source {
        Source::Url(url) => fetch_url(url, timeout)?,
        Source::File(path) => std::fs::read(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?,
    };
    parse_segments(&body)
}

/// Parse a JSON array of strings. Contents are taken verbatim.
pub fn parse_segments(body: &[u8]) -> Result<SegmentList, SourceError> {
    let segments: Vec<String> = serde_json::from_slice(body)?;
    SegmentList::new(segments).ok_or(SourceError::Empty)
}

fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>, SourceError> {
    debug!(url, timeout_secs = timeout.as_secs(), "fetching book");

    let http_err = |e| SourceError::Http {
        url: url.to_string(),
        source: e,
    };

    let client = Client::builder().timeout(timeout).build().map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;

    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes().map_err(http_err)?;
    Ok(body.to_vec())
}

/// Load the book on a background thread. Exactly one `SegmentsLoaded` event is
/// sent unless the thread dies first.
pub fn spawn_fetch(source: Source, timeout: Duration, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let segments = fetch_segments(&source, timeout);
        let _ = tx.send(AppEvent::SegmentsLoaded(segments));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::segment::PLACEHOLDER_SEGMENT;
    use std::io::Write;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            Source::parse("https://example.org/chunks.json"),
            Source::Url("https://example.org/chunks.json".to_string())
        );
        assert_eq!(
            Source::parse("HTTP://example.org/a"),
            Source::Url("HTTP://example.org/a".to_string())
        );
        assert_eq!(
            Source::parse("books/chunks.json"),
            Source::File(PathBuf::from("books/chunks.json"))
        );
    }

    #[test]
    fn successful_fetch_returns_segments_verbatim() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/chunks.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["Day _one_", "", "Day =three="]"#)
            .create();

        let source = Source::Url(format!("{}/chunks.json", server.url()));
        let segments = fetch_segments(&source, TIMEOUT);

        mock.assert();
        let got: Vec<&str> = segments.iter().collect();
        assert_eq!(got, vec!["Day _one_", "", "Day =three="]);
    }

    #[test]
    fn server_error_falls_back_to_placeholders() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/chunks.json")
            .with_status(500)
            .with_body("boom")
            .create();

        let source = Source::Url(format!("{}/chunks.json", server.url()));
        assert!(matches!(
            try_fetch(&source, TIMEOUT),
            Err(SourceError::Status { status: 500, .. })
        ));

        let segments = fetch_segments(&source, TIMEOUT);
        assert_eq!(segments.len(), 365);
        assert!(segments.iter().all(|s| s == PLACEHOLDER_SEGMENT));
    }

    #[test]
    fn malformed_payload_falls_back_to_placeholders() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/chunks.json")
            .with_status(200)
            .with_body(r#"{"not": "an array"}"#)
            .create();

        let source = Source::Url(format!("{}/chunks.json", server.url()));
        assert!(matches!(
            try_fetch(&source, TIMEOUT),
            Err(SourceError::Parse(_))
        ));
        assert!(fetch_segments(&source, TIMEOUT).is_fallback());
    }

    #[test]
    fn unreachable_host_falls_back_to_placeholders() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let source = Source::Url("http://127.0.0.1:9/chunks.json".to_string());
        let segments = fetch_segments(&source, Duration::from_secs(2));
        assert_eq!(segments.len(), 365);
        assert!(segments.is_fallback());
    }

    #[test]
    fn reads_segments_from_a_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["first", "second"]"#).unwrap();

        let source = Source::File(file.path().to_path_buf());
        let segments = try_fetch(&source, TIMEOUT).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments.get(1), Some("second"));
    }

    #[test]
    fn missing_file_falls_back_to_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::File(dir.path().join("missing.json"));
        assert!(matches!(
            try_fetch(&source, TIMEOUT),
            Err(SourceError::Io { .. })
        ));
        assert!(fetch_segments(&source, TIMEOUT).is_fallback());
    }

    #[test]
    fn empty_array_is_treated_as_unavailable() {
        assert!(matches!(parse_segments(b"[]"), Err(SourceError::Empty)));
    }

    #[test]
    fn non_string_elements_are_rejected() {
        assert!(matches!(
            parse_segments(b"[1, 2, 3]"),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn spawned_fetch_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");
        std::fs::write(&path, r#"["only day"]"#).unwrap();

        let (tx, rx) = mpsc::channel();
        spawn_fetch(Source::File(path), TIMEOUT, tx);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::SegmentsLoaded(segments) => assert_eq!(segments.get(0), Some("only day")),
        }
        // The sender is dropped once the thread finishes.
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
