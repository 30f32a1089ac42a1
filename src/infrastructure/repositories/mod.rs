pub mod in_memory;

pub use in_memory::{CombinedHistory, InMemoryRoundStore, VariantSnapshot, combined_history};
