use clap::Parser;

use crate::domain::{DEFAULT_LOG_FILE, DEFAULT_URL, ErrorPolicy, ViewerConfig};

/// Browse and filter student records fetched from a JSON endpoint.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Endpoint returning a JSON array of student records
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Request timeout in seconds, none by default
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show a failed fetch in the status line instead of staying silent
    #[arg(long)]
    pub report_errors: bool,

    /// Log file location
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    /// Print the table as HTML and exit, no UI
    #[arg(long)]
    pub print: bool,

    /// Filter query applied before printing
    #[arg(long, requires = "print")]
    pub query: Option<String>,

    /// Event poll time in ms
    #[arg(long, default_value_t = 100)]
    pub poll: u64,
}

impl Args {
    pub fn config(&self) -> ViewerConfig {
        let policy = if self.report_errors {
            ErrorPolicy::Report
        } else {
            ErrorPolicy::Silent
        };
        ViewerConfig::default()
            .url(self.url.clone())
            .timeout(self.timeout)
            .error_policy(policy)
            .event_poll_time(self.poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["stv"]).unwrap();
        let cfg = args.config();
        assert_eq!(cfg.url, DEFAULT_URL);
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.error_policy, ErrorPolicy::Silent);
        assert_eq!(cfg.event_poll_time, 100);
        assert!(!args.print);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "stv",
            "--url",
            "http://localhost:8000/s.json",
            "--timeout",
            "3",
            "--report-errors",
            "--print",
            "--query",
            "Alice Bob",
        ])
        .unwrap();
        let cfg = args.config();
        assert_eq!(cfg.url, "http://localhost:8000/s.json");
        assert_eq!(cfg.timeout, Some(3));
        assert_eq!(cfg.error_policy, ErrorPolicy::Report);
        assert_eq!(args.query.as_deref(), Some("Alice Bob"));
    }

    #[test]
    fn query_needs_print() {
        assert!(Args::try_parse_from(["stv", "--query", "x"]).is_err());
    }
}
