use serde::{Deserialize, Serialize};
use std::fmt;

/// Sums at or below this value are "Xỉu" (Low); anything above is "Tài" (High).
pub const LOW_SUM_CEILING: u8 = 10;

/// Binary result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Tài")]
    High,
    #[serde(rename = "Xỉu")]
    Low,
}

impl Outcome {
    pub fn from_sum(sum: u8) -> Self {
        if sum <= LOW_SUM_CEILING {
            Outcome::Low
        } else {
            Outcome::High
        }
    }

    /// Outcome of a round from its three die values.
    pub fn from_dice(d1: u8, d2: u8, d3: u8) -> Self {
        let sum = u16::from(d1) + u16::from(d2) + u16::from(d3);
        if sum <= u16::from(LOW_SUM_CEILING) {
            Outcome::Low
        } else {
            Outcome::High
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Outcome::High => Outcome::Low,
            Outcome::Low => Outcome::High,
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Outcome::High)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::High => write!(f, "Tài"),
            Outcome::Low => write!(f, "Xỉu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_dice() {
        assert_eq!(Outcome::from_dice(3, 3, 4), Outcome::Low);
        assert_eq!(Outcome::from_dice(4, 4, 4), Outcome::High);
        assert_eq!(Outcome::from_dice(1, 1, 1), Outcome::Low);
        assert_eq!(Outcome::from_dice(6, 6, 6), Outcome::High);
    }

    #[test]
    fn test_from_dice_out_of_range_does_not_overflow() {
        assert_eq!(Outcome::from_dice(255, 255, 255), Outcome::High);
        assert_eq!(Outcome::from_dice(0, 0, 10), Outcome::Low);
        assert_eq!(Outcome::from_dice(0, 0, 11), Outcome::High);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(Outcome::from_sum(10), Outcome::Low);
        assert_eq!(Outcome::from_sum(11), Outcome::High);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Outcome::High.opposite(), Outcome::Low);
        assert_eq!(Outcome::Low.opposite(), Outcome::High);
    }

    #[test]
    fn test_serializes_with_vietnamese_labels() {
        let json = serde_json::to_string(&[Outcome::High, Outcome::Low]).unwrap();
        assert_eq!(json, r#"["Tài","Xỉu"]"#);
    }
}
