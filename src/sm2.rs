//! Simplified SM-2 spaced repetition.
//!
//! One review state per subtopic: interval in days, ease factor, and a run
//! of consecutive successful repetitions. Quality 0-5 is derived from
//! correctness plus response latency rather than self-report. Intervals are
//! capped at 30 days; the ease factor never drops below 1.3.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const INITIAL_EASE: f64 = 2.5;
const MIN_EASE: f64 = 1.3;
const MAX_INTERVAL_DAYS: i64 = 30;

/// Quality at or above this counts as a successful recall.
const SUCCESS_QUALITY: u8 = 3;

/// Latency cutoffs for grading a correct answer.
const FAST_RESPONSE_MS: i64 = 3000;
const SLOW_RESPONSE_MS: i64 = 8000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Days until the next review, 1-30.
    pub interval: i64,
    pub ease_factor: f64,
    /// Consecutive successful reviews; resets to 0 on failure.
    pub repetitions: u32,
    pub next_review: DateTime<Utc>,
}

impl ReviewState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            interval: 1,
            ease_factor: INITIAL_EASE,
            repetitions: 0,
            next_review: now,
        }
    }

    /// Due the moment `now` reaches `next_review`, inclusive.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review
    }

    /// Whole days until due; negative when overdue.
    pub fn days_until_due(&self, now: DateTime<Utc>) -> i64 {
        let millis = (self.next_review - now).num_milliseconds() as f64;
        (millis / (1000.0 * 60.0 * 60.0 * 24.0)).round() as i64
    }
}

/// Map an answer outcome to an SM-2 quality score.
///
/// Incorrect is always 1. Correct is graded by latency: under 3s is an easy
/// recall (5), under 8s normal (4), anything slower effortful (3). Without
/// timing, correct defaults to 4. A negative latency can only come from a
/// broken clock upstream and is treated as instantaneous rather than
/// rejected.
pub fn quality_from_outcome(is_correct: bool, response_time_ms: Option<i64>) -> u8 {
    if !is_correct {
        return 1;
    }
    match response_time_ms {
        Some(ms) if ms < FAST_RESPONSE_MS => 5,
        Some(ms) if ms < SLOW_RESPONSE_MS => 4,
        Some(_) => 3,
        None => 4,
    }
}

/// Advance the schedule after a review.
///
/// Success grows the interval through the classic 1, 6, round(interval x
/// ease) progression and extends the streak; failure resets both. The ease
/// factor is adjusted on every outcome via the standard SM-2 rule and
/// floored at [`MIN_EASE`].
pub fn update(state: &ReviewState, quality: u8, now: DateTime<Utc>) -> ReviewState {
    let quality = quality.min(5);
    let mut interval = state.interval;
    let mut repetitions = state.repetitions;

    if quality >= SUCCESS_QUALITY {
        interval = match repetitions {
            0 => 1,
            1 => 6,
            _ => (state.interval as f64 * state.ease_factor).round() as i64,
        };
        repetitions += 1;
    } else {
        repetitions = 0;
        interval = 1;
    }

    let q = quality as f64;
    let ease_factor =
        (state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE);

    interval = interval.min(MAX_INTERVAL_DAYS);

    ReviewState {
        interval,
        ease_factor,
        repetitions,
        next_review: now + Duration::days(interval),
    }
}
