//! Ambiguity detector: decides whether a ranking is confident enough to show
//! without external arbitration.

use serde::Serialize;

use crate::ranker::RankedJob;

pub const CONFIDENCE_FLOOR: f64 = 0.78;
pub const TOP_TWO_MIN_GAP: f64 = 0.02;
pub const TOP_THREE_MIN_GAP: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityReason {
    LowConfidence,
    NarrowTopTwoGap,
    NarrowTopThreeGap,
}

/// Every rule the ranking trips. Empty means confident; lists shorter than two
/// are always confident.
pub fn assess(ranked: &[RankedJob]) -> Vec<AmbiguityReason> {
    let mut reasons = Vec::new();
    let [first, second, rest @ ..] = ranked else {
        return reasons;
    };

    if first.score < CONFIDENCE_FLOOR {
        reasons.push(AmbiguityReason::LowConfidence);
    }
    if first.score - second.score < TOP_TWO_MIN_GAP {
        reasons.push(AmbiguityReason::NarrowTopTwoGap);
    }
    if let Some(third) = rest.first() {
        if first.score - third.score < TOP_THREE_MIN_GAP {
            reasons.push(AmbiguityReason::NarrowTopThreeGap);
        }
    }

    reasons
}

pub fn is_ambiguous(ranked: &[RankedJob]) -> bool {
    !assess(ranked).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(scores: &[f64]) -> Vec<RankedJob> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| RankedJob::new(format!("job {i}"), s))
            .collect()
    }

    #[test]
    fn test_narrow_top_two_gap_is_ambiguous() {
        let list = ranked(&[0.5, 0.49]);
        assert!(is_ambiguous(&list));
        assert!(assess(&list).contains(&AmbiguityReason::NarrowTopTwoGap));
    }

    #[test]
    fn test_narrow_top_three_gap_is_ambiguous() {
        // Unsorted on purpose: rank 3 sits closer to rank 1 than rank 2 does.
        let list = ranked(&[0.95, 0.80, 0.93]);
        assert_eq!(assess(&list), vec![AmbiguityReason::NarrowTopThreeGap]);
    }

    #[test]
    fn test_clear_winner_is_not_ambiguous() {
        assert!(!is_ambiguous(&ranked(&[0.95, 0.70, 0.10])));
    }

    #[test]
    fn test_low_confidence_is_ambiguous() {
        assert_eq!(assess(&ranked(&[0.70, 0.20])), vec![AmbiguityReason::LowConfidence]);
    }

    #[test]
    fn test_short_lists_are_never_ambiguous() {
        assert!(!is_ambiguous(&[]));
        assert!(!is_ambiguous(&ranked(&[0.1])));
    }
}
