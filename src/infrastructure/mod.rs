pub mod core;
pub mod feed;
pub mod mock;
pub mod observability;
pub mod repositories;

pub use feed::HttpRoundFeed;
pub use repositories::InMemoryRoundStore;
