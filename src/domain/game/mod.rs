pub mod history;
pub mod outcome;
pub mod round;
pub mod state;
pub mod variant;

pub use history::{HISTORY_CAPACITY, RoundHistory};
pub use outcome::Outcome;
pub use round::{Dice, FeedRound, RoundDigest, RoundId, RoundResult};
pub use state::VariantState;
pub use variant::Variant;
