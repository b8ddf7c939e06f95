pub mod models;
mod scraper;
mod scraper_error;
pub mod transport;

pub use scraper::{RunOutcome, RunSummary, SearchRunner, SkippedPage};
pub use scraper_error::ScraperError;
pub use transport::Transport;
