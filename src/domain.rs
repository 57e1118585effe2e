use std::fmt;
use std::io::Error;

use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

use crate::record::Record;

pub const DEFAULT_URL: &str = "https://hivelab.org/static/students.json";
pub const TABLE_BODY_ID: &str = "hw2table";
pub const FILTER_BOX_ID: &str = "filterBox";
pub const DEFAULT_LOG_FILE: &str = "~/.stv.log";

pub const HEADER: [&str; 6] = ["Name", "GPA", "GRE V", "GRE Q", "Essay", "Recom"];

pub const HELP_TEXT: &str = "\
Type to filter rows. Space separates terms,
a row stays visible if it contains any term.

Up/Down         Scroll one row
PgUp/PgDown     Scroll one page
Home/End        Move search cursor
Left/Right      Move search cursor
Backspace/Del   Edit search text
F1              Toggle this help
Esc / Ctrl-C    Quit";

#[derive(Debug)]
pub enum StvError {
    IoError(Error),
    HttpError(reqwest::Error),
    Status(u16),
    ParseError(serde_json::Error),
    TargetNotFound(String),
    InvalidConfig(String),
}

impl fmt::Display for StvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StvError::IoError(e) => write!(f, "io error: {e}"),
            StvError::HttpError(e) => write!(f, "request failed: {e}"),
            StvError::Status(code) => write!(f, "server answered with status {code}"),
            StvError::ParseError(e) => write!(f, "malformed payload: {e}"),
            StvError::TargetNotFound(id) => write!(f, "target not found: #{id}"),
            StvError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for StvError {}

impl From<Error> for StvError {
    fn from(err: Error) -> Self {
        StvError::IoError(err)
    }
}

impl From<reqwest::Error> for StvError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => StvError::Status(status.as_u16()),
            None => StvError::HttpError(err),
        }
    }
}

impl From<serde_json::Error> for StvError {
    fn from(err: serde_json::Error) -> Self {
        StvError::ParseError(err)
    }
}

/// What happens when the single fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ErrorPolicy {
    /// No rows, no message. Only the log file knows.
    #[default]
    Silent,
    /// Show the failure in the status line.
    Report,
}

#[derive(Debug, Clone, Setters)]
pub struct ViewerConfig {
    pub url: String,
    pub timeout: Option<u64>,
    pub error_policy: ErrorPolicy,
    pub event_poll_time: u64,
    pub max_column_width: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: None,
            error_policy: ErrorPolicy::Silent,
            event_poll_time: 100,
            max_column_width: 40,
        }
    }
}

#[derive(Debug)]
pub enum Message {
    Quit,
    Help,
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    Resize(usize, usize),
    Keystroke(KeyEvent),
    Loaded(Result<Vec<Record>, StvError>, u128),
}
