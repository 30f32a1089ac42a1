// Dice game model: outcomes, rounds, bounded history
pub mod game;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
