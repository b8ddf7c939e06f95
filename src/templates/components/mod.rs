pub mod card;

pub use card::{card, histogram_card};
