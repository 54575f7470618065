use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log output goes. The interactive reader owns the terminal, so it
/// logs to a file; `print` mode logs to stderr.
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
}

/// Filter directive for a `-v` count.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("folio={level}")
}

/// Initialize tracing. `RUST_LOG` overrides the verbosity flag if set.
///
/// Never fails: if the log file cannot be opened, output is discarded and the
/// reason is returned so the caller can report it once the terminal is free.
pub fn init(verbosity: u8, target: LogTarget<'_>) -> Option<String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let (writer, ansi, notice) = match target {
        LogTarget::File(path) => match open_log_file(path) {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false, None),
            Err(e) => (
                BoxMakeWriter::new(io::sink),
                false,
                Some(format!("logging disabled: {e:#}")),
            ),
        },
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), true, None),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init();

    match (notice, installed) {
        (Some(notice), _) => Some(notice),
        (None, Err(e)) => Some(format!("logging disabled: installing log subscriber: {e}")),
        (None, Ok(())) => None,
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
