pub mod feed_health;
pub mod silence;

pub use feed_health::{FeedHealth, FeedHealthRegistry, FeedStatus};
pub use silence::SilenceDetector;
