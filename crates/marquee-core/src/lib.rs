pub mod store;
pub mod time;
pub mod watchlist;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use time::convert_minutes_to_time;
pub use watchlist::{AddOutcome, WatchlistStore};
