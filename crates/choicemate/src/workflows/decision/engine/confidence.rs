use super::super::domain::{Confidence, OptionScore};

pub const HIGH_CONFIDENCE_GAP: f64 = 12.0;
pub const MEDIUM_CONFIDENCE_GAP: f64 = 6.0;

/// Classifies the lead of the top option over the runner-up. Expects ranked input.
pub fn confidence_from_gap(ranked: &[OptionScore]) -> Confidence {
    let (first, second) = match ranked {
        [first, second, ..] => (first, second),
        _ => return Confidence::High,
    };

    let gap = first.score - second.score;
    if gap >= HIGH_CONFIDENCE_GAP {
        Confidence::High
    } else if gap >= MEDIUM_CONFIDENCE_GAP {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
