// Long-running feed pollers
pub mod agents;

// Feed health and liveness
pub mod monitoring;

// Outcome classifiers and the voting ensemble
pub mod prediction;

// Per-round dedup, prediction and commit
pub mod round_processor;

// System orchestrator
pub mod system;
