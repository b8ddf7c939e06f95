pub mod config;
pub mod domain;
pub mod errors;
pub mod report;
pub mod scraper;
pub mod templates;

#[cfg(test)]
mod tests;
