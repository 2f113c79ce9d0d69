use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::client::REQUEST_TIMEOUT;
use crate::ui::expense_list::DEFAULT_PAGE_SIZE;

/// Terminal client for tracking expenses against the expense REST API.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base URL of the REST API, without the `/api` suffix.
    #[arg(long, env = "EXPENSE_TRACKER_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// File the log is appended to. The terminal itself is taken by the UI.
    #[arg(long, default_value = "expense-tracker.log")]
    pub log_file: PathBuf,

    /// How many expenses to request for one month.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Seconds to wait for the API before a request fails.
    #[arg(long, default_value_t = REQUEST_TIMEOUT.as_secs())]
    pub request_timeout: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "expense-tracker",
            "--api-url",
            "https://money.example.com",
            "--page-size",
            "50",
        ])
        .unwrap();

        assert_eq!(config.api_url, "https://money.example.com");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.log_file, PathBuf::from("expense-tracker.log"));
        assert_eq!(config.request_timeout(), REQUEST_TIMEOUT);
    }

    #[test]
    fn request_timeout_is_configurable() {
        let config =
            Config::try_parse_from(["expense-tracker", "--request-timeout", "3"]).unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_non_numeric_page_size() {
        assert!(Config::try_parse_from(["expense-tracker", "--page-size", "lots"]).is_err());
    }
}
