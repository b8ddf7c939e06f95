pub mod histogram;

pub use histogram::{days_posted_histogram, price_histogram, Histogram};
