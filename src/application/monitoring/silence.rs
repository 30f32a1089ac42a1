use crate::domain::game::Variant;
use std::time::{Duration, Instant};
use tracing::debug;

/// Flags a variant whose feed keeps answering without producing new rounds.
///
/// The clock starts at construction, so a feed that never yields a round is
/// reported silent once the threshold passes.
pub struct SilenceDetector {
    variant: Variant,
    threshold: Duration,
    reference: Instant,
    rounds_seen: u64,
}

impl SilenceDetector {
    pub fn new(variant: Variant, threshold: Duration) -> Self {
        Self {
            variant,
            threshold,
            reference: Instant::now(),
            rounds_seen: 0,
        }
    }

    pub fn record_round(&mut self) {
        self.reference = Instant::now();
        self.rounds_seen += 1;
    }

    pub fn rounds_seen(&self) -> u64 {
        self.rounds_seen
    }

    pub fn quiet_for(&self) -> Duration {
        self.reference.elapsed()
    }

    pub fn is_silent(&self) -> bool {
        let quiet = self.quiet_for();
        if quiet <= self.threshold {
            return false;
        }
        debug!(
            "SilenceDetector[{}]: no new round for {:?} ({} seen so far)",
            self.variant, quiet, self.rounds_seen
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fresh_detector_is_not_silent() {
        let mut detector = SilenceDetector::new(Variant::Plain, Duration::from_secs(1));
        assert!(!detector.is_silent());
        detector.record_round();
        assert!(!detector.is_silent());
        assert_eq!(detector.rounds_seen(), 1);
    }

    #[test]
    fn test_quiet_feed_turns_silent_and_recovers() {
        let mut detector = SilenceDetector::new(Variant::Digest, Duration::from_millis(10));
        thread::sleep(Duration::from_millis(20));
        assert!(detector.is_silent());
        assert!(detector.quiet_for() >= Duration::from_millis(10));

        detector.record_round();
        assert!(!detector.is_silent());
    }
}
