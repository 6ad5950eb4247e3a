//! Elo-style skill rating.
//!
//! A single scalar estimate of learner skill on a 400-1600 scale, updated
//! from each answer with a logistic expectation and an adaptive K-factor
//! that shrinks as the estimate becomes reliable.

use crate::types::{RatingLevel, MAX_RATING, MIN_RATING};

/// Ascending level table. Lower bounds are inclusive; the last entry in
/// `LEVEL_BOUNDS` is the scale ceiling used for progress interpolation.
const LEVELS: [RatingLevel; 6] = [
    RatingLevel { name: "Seedling", emoji: "\u{1F331}", min_rating: 0 },
    RatingLevel { name: "Sprout", emoji: "\u{1F33F}", min_rating: 700 },
    RatingLevel { name: "Bloom", emoji: "\u{1F338}", min_rating: 850 },
    RatingLevel { name: "Tree", emoji: "\u{1F333}", min_rating: 1000 },
    RatingLevel { name: "Star", emoji: "\u{2B50}", min_rating: 1150 },
    RatingLevel { name: "Rainbow", emoji: "\u{1F308}", min_rating: 1300 },
];

const LEVEL_BOUNDS: [i32; 7] = [0, 700, 850, 1000, 1150, 1300, 1600];

/// Probability of the learner answering correctly, from the rating gap.
/// Equal rating and difficulty give exactly 0.5; a 200-point advantage
/// gives roughly 0.76.
pub fn expected_score(rating: i32, question_difficulty: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((question_difficulty - rating) as f64 / 400.0))
}

/// K-factor schedule: volatile while the estimate is fresh, stable once
/// enough answers have accumulated.
pub fn k_factor(response_count: u32) -> f64 {
    if response_count < 30 {
        32.0
    } else if response_count < 100 {
        24.0
    } else {
        16.0
    }
}

/// Standard Elo update, rounded to an integer. Beating a hard question
/// (low expectation) moves the rating more than beating an easy one; the
/// formula carries that on its own, so no special-casing here.
pub fn update_rating(current: i32, expected: f64, actual: u8, k: f64) -> i32 {
    (current as f64 + k * (actual as f64 - expected)).round() as i32
}

/// Re-applied after every update so drift can never leave the scale.
pub fn clamp_rating(rating: i32) -> i32 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

/// Level band for a rating. Lower bound inclusive, upper exclusive.
pub fn rating_level(rating: i32) -> RatingLevel {
    LEVELS
        .iter()
        .rev()
        .find(|level| rating >= level.min_rating)
        .copied()
        .unwrap_or(LEVELS[0])
}

/// Percent progress through the current level band, 0-100. 100 once the
/// top level is reached.
pub fn level_progress(rating: i32) -> u8 {
    for i in 0..LEVEL_BOUNDS.len() - 1 {
        if rating < LEVEL_BOUNDS[i + 1] {
            let range = (LEVEL_BOUNDS[i + 1] - LEVEL_BOUNDS[i]) as f64;
            let progress = (rating - LEVEL_BOUNDS[i]) as f64;
            return ((progress / range) * 100.0).round() as u8;
        }
    }
    100
}

/// Lower bound of the next level up, if any.
pub fn next_level_threshold(rating: i32) -> Option<i32> {
    LEVELS
        .iter()
        .map(|level| level.min_rating)
        .find(|&min| min > rating)
}

/// Difficulty that would give the learner the requested success
/// probability. Inverse of [`expected_score`]: solving
/// `E = 1 / (1 + 10^((D - R) / 400))` for `D`.
pub fn target_difficulty(rating: i32, target_success_rate: f64) -> i32 {
    let rate = target_success_rate.clamp(0.01, 0.99);
    let exponent = (1.0 / rate - 1.0).log10();
    (rating as f64 + 400.0 * exponent).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_score_symmetry() {
        for rating in [400, 600, 1000, 1600] {
            assert!((expected_score(rating, rating) - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_expected_score_200_point_gap() {
        let ahead = expected_score(1000, 800);
        let behind = expected_score(800, 1000);
        assert!((ahead - 0.76).abs() < 0.01);
        assert!((behind - 0.24).abs() < 0.01);
        assert!((ahead + behind - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_k_factor_steps() {
        assert_eq!(k_factor(0), 32.0);
        assert_eq!(k_factor(29), 32.0);
        assert_eq!(k_factor(30), 24.0);
        assert_eq!(k_factor(99), 24.0);
        assert_eq!(k_factor(100), 16.0);
        assert_eq!(k_factor(10_000), 16.0);
    }

    #[test]
    fn test_update_monotonic() {
        let expected = expected_score(800, 900);
        assert!(update_rating(800, expected, 1, 32.0) >= 800);
        assert!(update_rating(800, expected, 0, 32.0) <= 800);
    }

    #[test]
    fn test_harder_questions_move_rating_more() {
        let easy = expected_score(1000, 700);
        let hard = expected_score(1000, 1300);

        let gain_hard = update_rating(1000, hard, 1, 32.0) - 1000;
        let gain_easy = update_rating(1000, easy, 1, 32.0) - 1000;
        assert!(gain_hard > gain_easy);

        let loss_easy = 1000 - update_rating(1000, easy, 0, 32.0);
        let loss_hard = 1000 - update_rating(1000, hard, 0, 32.0);
        assert!(loss_easy > loss_hard);
    }

    #[test]
    fn test_clamp_idempotent() {
        for rating in [-500, 0, 400, 1000, 1600, 2500] {
            let once = clamp_rating(rating);
            assert_eq!(clamp_rating(once), once);
            assert!((MIN_RATING..=MAX_RATING).contains(&once));
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(rating_level(600).name, "Seedling");
        assert_eq!(rating_level(699).name, "Seedling");
        assert_eq!(rating_level(700).name, "Sprout");
        assert_eq!(rating_level(850).name, "Bloom");
        assert_eq!(rating_level(1000).name, "Tree");
        assert_eq!(rating_level(1150).name, "Star");
        assert_eq!(rating_level(1299).name, "Star");
        assert_eq!(rating_level(1300).name, "Rainbow");
        assert_eq!(rating_level(1600).name, "Rainbow");
    }

    #[test]
    fn test_level_progress_interpolates() {
        assert_eq!(level_progress(700), 0);
        assert_eq!(level_progress(775), 50);
        assert_eq!(level_progress(1600), 100);
        assert!(level_progress(600) > 80); // 600 of the 0-700 band
    }

    #[test]
    fn test_next_level_threshold() {
        assert_eq!(next_level_threshold(600), Some(700));
        assert_eq!(next_level_threshold(1200), Some(1300));
        assert_eq!(next_level_threshold(1300), None);
    }

    #[test]
    fn test_target_difficulty_inverts_expectation() {
        // 50% target is the learner's own rating.
        assert!((target_difficulty(800, 0.5) - 800).abs() <= 1);
        // 76% target sits about 200 points below.
        let easier = target_difficulty(1000, 0.76);
        assert!((easier - 800).abs() <= 10);
        // 24% target sits about 200 points above.
        let harder = target_difficulty(800, 0.24);
        assert!((harder - 1000).abs() <= 10);
    }

    #[test]
    fn test_worked_example_first_answer() {
        // Learner at 800, no history, difficulty-800 question answered
        // correctly: k=32, expected=0.5, rating moves to 816.
        let expected = expected_score(800, 800);
        let k = k_factor(0);
        let updated = clamp_rating(update_rating(800, expected, 1, k));
        assert_eq!(updated, 816);
    }
}
