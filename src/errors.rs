// errors.rs
use thiserror::Error;

/// Errors raised at the search-specification boundary. These are the only
/// failures surfaced to the caller; everything that goes wrong during a run is
/// a `ScraperError` and is absorbed by the runner.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Invalid search specification: {0}")]
    InvalidSpecification(String),
}
