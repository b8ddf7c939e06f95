pub mod listing;
pub mod location;
pub mod search;
pub mod table;

pub use listing::Listing;
pub use location::LocationRegistry;
pub use search::SearchSpec;
pub use table::ListingTable;
