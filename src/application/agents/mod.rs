// Long-running feed polling tasks
pub mod poller;

pub use poller::{FeedPollerAgent, PollerConfig};
