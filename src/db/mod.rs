pub mod connection;
pub mod imports;
pub mod listings;

pub use connection::{init_db, Database};
