use super::super::domain::{Dimension, DimensionValues, OptionScore, Polarity, Ratings, Weights};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;
pub const SCORE_MAX: f64 = 100.0;

/// Weights after clamping and normalization; the four values sum to 1.
pub type NormalizedWeights = DimensionValues<f64>;

pub(crate) fn clamp_rating(value: f64) -> f64 {
    if value.is_nan() {
        return RATING_MIN;
    }
    value.clamp(RATING_MIN, RATING_MAX)
}

/// Rounds half to even, so 3.125 becomes 3.12.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Clamps each weight to [1, 5] and divides by the clamped total.
pub fn normalize_weights(raw: &Weights) -> NormalizedWeights {
    let clamped = raw.map(|_, value| clamp_rating(value));
    let total: f64 = clamped.iter().map(|(_, value)| value).sum();

    // Unreachable while the clamp floor is 1.0; kept so a future floor of zero cannot divide by zero.
    if total <= 0.0 {
        return NormalizedWeights::from_fn(|_| 1.0 / Dimension::ALL.len() as f64);
    }

    clamped.map(|_, value| value / total)
}

/// Maps a rating onto 0..=100 where higher is always better.
pub fn utility(dimension: Dimension, rating: f64) -> f64 {
    let rating = clamp_rating(rating);
    let adjusted = match dimension.polarity() {
        Polarity::Positive => rating,
        Polarity::Negative => RATING_MAX + RATING_MIN - rating,
    };
    (adjusted - RATING_MIN) / (RATING_MAX - RATING_MIN) * SCORE_MAX
}

/// Returns the total score and the per-dimension contributions, both rounded to two places.
pub fn score(ratings: &Ratings, weights: &NormalizedWeights) -> (f64, DimensionValues<f64>) {
    let contributions = ratings.map(|dimension, rating| {
        round_to(weights.get(dimension) * utility(dimension, rating), 2)
    });
    let sum: f64 = contributions.iter().map(|(_, value)| value).sum();
    // Rounded contributions can overshoot by a cent, e.g. three thirds of 50.
    let total = round_to(sum, 2).clamp(0.0, SCORE_MAX);
    (total, contributions)
}

/// Orders entries by score, highest first. Ties keep their input order.
pub fn rank(per_option: &mut [OptionScore]) {
    per_option.sort_by(|left, right| right.score.total_cmp(&left.score));
}
