use std::path::PathBuf;
use std::time::Duration;

pub const INDEX_URL: &str = "https://en.wikipedia.org/wiki/List_of_Emily_Dickinson_poems";
pub const OUTPUT_FILE: &str = "emily-dickinson.json";
pub const USER_AGENT: &str = "dickinson/0.1 (poem catalog scraper)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one catalog run.
///
/// The defaults reproduce the canonical run: the Wikipedia list page,
/// one detail page at a time, written to `emily-dickinson.json`.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub index_url: String,
    pub output_path: PathBuf,
    /// Maximum number of detail pages in flight. Values below 1 are treated as 1.
    pub concurrency: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            index_url: INDEX_URL.to_string(),
            output_path: PathBuf::from(OUTPUT_FILE),
            concurrency: 1,
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.index_url, INDEX_URL);
        assert_eq!(config.output_path, PathBuf::from("emily-dickinson.json"));
        assert_eq!(config.effective_concurrency(), 1);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_zero_concurrency_is_sequential() {
        let config = ScrapeConfig {
            concurrency: 0,
            ..ScrapeConfig::default()
        };
        assert_eq!(config.effective_concurrency(), 1);
    }
}
