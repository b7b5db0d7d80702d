pub mod listing;
pub mod partition;

pub use listing::{ListingRecord, LISTING_COLUMNS};
pub use partition::Partition;
