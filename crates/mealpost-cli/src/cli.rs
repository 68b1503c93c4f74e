//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use mealpost_core::domain::DateQuery;
use mealpost_core::impls::DEFAULT_CACHE_FILE;

const EXAMPLES: &str = "\
Examples:
  # Crawl and cache only (no sending)
  mealpost --crawl-only

  # Use the cache if available, otherwise crawl and send
  mealpost --webhook-env-var KAKAOWORK_WEBHOOK_URL_HAMBAROOM

  # Send directly with a webhook URL
  mealpost --webhook-url https://open.kakaowork.com/v1/webhooks/...

  # Look up a past date (scans deeper into the feed)
  mealpost --date 2024-03-04 --crawl-only";

/// Send the menu image posted on a feed to a KakaoWork webhook.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mealpost", version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Feed account to read the menu from.
    #[arg(long, env = "TARGET_INSTAGRAM_ID")]
    pub username: Option<String>,

    /// Webhook URL to use directly.
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Name of the environment variable holding the webhook URL.
    #[arg(long, value_name = "ENV_VAR_NAME")]
    pub webhook_env_var: Option<String>,

    /// [DEPRECATED] Room number selecting KAKAOWORK_WEBHOOK_URL_<N> (0 means unset). Use --webhook-env-var.
    #[arg(long, value_name = "N")]
    pub room: Option<u32>,

    /// Only crawl and save to the cache, do not send.
    #[arg(long)]
    pub crawl_only: bool,

    /// Crawl even if a cache entry exists.
    #[arg(long)]
    pub no_cache: bool,

    /// Cache file path.
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Target date (YYYY-MM-DD, UTC+9). Defaults to today.
    #[arg(long)]
    pub date: Option<DateQuery>,

    /// Number of recent posts to scan. Defaults to 5, or 20 for past dates.
    #[arg(long)]
    pub scan_limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "mealpost",
            "--username",
            "menu_account",
            "--webhook-env-var",
            "HOOK",
            "--crawl-only",
            "--no-cache",
            "--cache-file",
            "state/cache.json",
            "--date",
            "2024-03-04",
            "--scan-limit",
            "12",
        ])
        .unwrap();

        assert_eq!(cli.username.as_deref(), Some("menu_account"));
        assert_eq!(cli.webhook_env_var.as_deref(), Some("HOOK"));
        assert!(cli.crawl_only);
        assert!(cli.no_cache);
        assert_eq!(cli.cache_file, PathBuf::from("state/cache.json"));
        assert_eq!(cli.date, DateQuery::from_ymd(2024, 3, 4));
        assert_eq!(cli.scan_limit, Some(12));
    }

    #[test]
    fn cache_file_has_a_default() {
        let cli = Cli::try_parse_from(["mealpost", "--username", "a"]).unwrap();
        assert_eq!(cli.cache_file, PathBuf::from(DEFAULT_CACHE_FILE));
        assert!(!cli.crawl_only);
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["mealpost", "--date", "03/04/2024"]).is_err());
    }
}
