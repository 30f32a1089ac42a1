pub mod client;
pub mod correlation;
pub mod envelope;

pub use client::{FeedEndpoint, HttpRoundFeed};
pub use correlation::{FeedCommands, correlate};
pub use envelope::{FeedEnvelope, FeedEvent};
