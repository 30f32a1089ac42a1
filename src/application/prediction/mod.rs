pub mod classifiers;
pub mod ensemble;

pub use classifiers::{OutcomeClassifier, default_classifiers};
pub use ensemble::{HybridEnsemble, Prediction};
