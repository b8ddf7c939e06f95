// config.rs
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "https://api.rightmove.co.uk/api/sale/find";

/// Stride between paging indexes, and the divisor for the page count.
pub const RESULTS_PER_PAGE: u32 = 25;

/// Upper bound on pages fetched per run, whatever the API reports.
pub const MAX_PAGES: u32 = 20;

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: Url,
    pub results_per_page: u32,
    pub max_pages: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            // constant, always parses
            base_url: Url::parse(BASE_URL).expect("BASE_URL is a valid url"),
            results_per_page: RESULTS_PER_PAGE,
            max_pages: MAX_PAGES,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pages needed to cover `total` results, before the `max_pages` cap.
    pub fn pages_for(&self, total: u64) -> u64 {
        let per_page = u64::from(self.results_per_page.max(1));
        total.div_ceil(per_page)
    }

    /// Pages a run will actually request.
    pub fn capped_pages(&self, required: u64) -> u64 {
        required.min(u64::from(self.max_pages))
    }
}
