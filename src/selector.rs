//! Question selection policy.
//!
//! Combines the review schedule, the mastery map, the current world theme,
//! and the learner rating into one next-question decision. Four strategies
//! (due-for-review, weak-subtopic, world-theme, random) are weighted per
//! session mode and walked against a single random roll; every band falls
//! through to the terminal random strategy, so selection always produces a
//! question as long as the pool is non-empty. The chosen strategy is
//! reported back as a [`SelectionReason`] for the transparency badge.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;

use crate::mastery::{MasteryStatus, SubtopicMastery};
use crate::sm2::ReviewState;
use crate::types::{
    DifficultyLabel, Question, SelectionReason, SessionMode, Topic, ONBOARDING_RESPONSES,
};

/// Hard band around the effective rating; applied identically by every
/// strategy.
const RATING_BAND: i32 = 200;

/// How many of the most recent question ids are excluded from selection.
const RECENCY_WINDOW: usize = 5;

/// Extra difficulty pressure in challenge mode, applied to the band filter
/// only.
const CHALLENGE_OFFSET: i32 = 100;

/// Difficulty targets for the daily-challenge triple, as offsets from the
/// learner rating: warm-up, at-level, stretch.
const DAILY_TARGET_OFFSETS: [i32; 3] = [-100, 0, 50];

/// Shortlist size per daily-challenge target.
const DAILY_SHORTLIST: usize = 3;

/// Strategy mix per session mode: (due-review, weak-subtopic, world-theme).
/// Whatever is left of the unit interval lands in the terminal random band.
fn mode_weights(mode: SessionMode) -> (f64, f64, f64) {
    match mode {
        SessionMode::Adventure => (0.4, 0.3, 0.2),
        SessionMode::Practice => (0.2, 0.7, 0.0),
        SessionMode::Review => (0.7, 0.2, 0.0),
        SessionMode::Challenge => (0.4, 0.3, 0.2),
    }
}

/// Fixed world-to-topic theming: Forest, Garden, Rainbow, Ocean, Sky Castle.
pub fn world_topics(world: u32) -> &'static [Topic] {
    match world {
        1 => &[Topic::Number],
        2 => &[Topic::Calculation],
        3 => &[Topic::Geometry],
        4 => &[Topic::Measure],
        5 => &[Topic::Data],
        _ => &[Topic::Number],
    }
}

/// Everything the selector reads; assembled fresh before each pick and
/// never mutated by it.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    pub student_rating: i32,
    pub current_world: u32,
    pub mastery_map: &'a HashMap<String, SubtopicMastery>,
    pub review_map: &'a HashMap<String, ReviewState>,
    pub recent_question_ids: &'a [String],
    pub session_mode: SessionMode,
    pub total_responses: u32,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QuestionSelection {
    pub question: Question,
    pub reason: SelectionReason,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The content catalog handed us nothing. A configuration problem in
    /// the host, surfaced explicitly instead of panicking.
    #[error("question pool is empty")]
    EmptyPool,
}

/// Pick the next question.
///
/// The most recent [`RECENCY_WINDOW`] answered ids are filtered out first;
/// if that empties the pool the recency filter is abandoned entirely so
/// repetition can never block progress. During onboarding (fewer than
/// [`ONBOARDING_RESPONSES`] answers) the pick stays near the tentative
/// rating and is tagged accordingly.
pub fn select_next_question<R: Rng + ?Sized>(
    pool: &[Question],
    ctx: &SelectionContext<'_>,
    rng: &mut R,
) -> Result<QuestionSelection, SelectError> {
    if pool.is_empty() {
        return Err(SelectError::EmptyPool);
    }

    let recent_start = ctx.recent_question_ids.len().saturating_sub(RECENCY_WINDOW);
    let recent = &ctx.recent_question_ids[recent_start..];
    let available: Vec<&Question> = pool
        .iter()
        .filter(|q| !recent.contains(&q.id))
        .collect();

    // Everything is recent: fall back to the unfiltered pool.
    if available.is_empty() {
        let question = pool[rng.random_range(0..pool.len())].clone();
        return Ok(QuestionSelection {
            question,
            reason: SelectionReason::Random,
        });
    }

    let effective_rating = match ctx.session_mode {
        SessionMode::Challenge => ctx.student_rating + CHALLENGE_OFFSET,
        _ => ctx.student_rating,
    };

    if ctx.total_responses < ONBOARDING_RESPONSES {
        let question = pick_in_band_or_any(&available, effective_rating, rng);
        return Ok(QuestionSelection {
            question,
            reason: SelectionReason::Onboarding,
        });
    }

    let (w_due, w_weak, w_world) = mode_weights(ctx.session_mode);
    let roll: f64 = rng.random();
    let mut cumulative = 0.0;

    cumulative += w_due;
    if roll < cumulative {
        let due: Vec<&Question> = available
            .iter()
            .copied()
            .filter(|q| {
                ctx.review_map
                    .get(&q.subtopic)
                    .is_some_and(|state| state.is_due(ctx.now))
                    && in_rating_band(q.difficulty, effective_rating)
            })
            .collect();
        if let Some(question) = pick_uniform(&due, rng) {
            return Ok(QuestionSelection {
                question,
                reason: SelectionReason::Review,
            });
        }
    }

    cumulative += w_weak;
    if roll < cumulative {
        if let Some(subtopic) = weakest_subtopic(ctx.mastery_map) {
            let matches: Vec<&Question> = available
                .iter()
                .copied()
                .filter(|q| {
                    q.subtopic == subtopic && in_rating_band(q.difficulty, effective_rating)
                })
                .collect();
            if let Some(question) = pick_uniform(&matches, rng) {
                return Ok(QuestionSelection {
                    question,
                    reason: SelectionReason::Weak,
                });
            }
        }
    }

    cumulative += w_world;
    if roll < cumulative {
        let topics = world_topics(ctx.current_world);
        let themed: Vec<&Question> = available
            .iter()
            .copied()
            .filter(|q| {
                topics.contains(&q.topic) && in_rating_band(q.difficulty, effective_rating)
            })
            .collect();
        if let Some(question) = pick_uniform(&themed, rng) {
            return Ok(QuestionSelection {
                question,
                reason: SelectionReason::World,
            });
        }
    }

    // Terminal band: also the fallback for every strategy above.
    let question = pick_in_band_or_any(&available, effective_rating, rng);
    Ok(QuestionSelection {
        question,
        reason: SelectionReason::Random,
    })
}

/// Deterministic daily-challenge triple at escalating difficulty targets.
///
/// For each target the three unused questions closest to it form a
/// shortlist and one is drawn at random, so the set stays calibrated but
/// varies day to day. A thin pool is padded with random unused questions
/// until three are assembled or the pool runs out.
pub fn select_daily_challenge_questions<R: Rng + ?Sized>(
    pool: &[Question],
    rating: i32,
    rng: &mut R,
) -> Vec<Question> {
    let mut picked: Vec<Question> = Vec::with_capacity(DAILY_TARGET_OFFSETS.len());

    for offset in DAILY_TARGET_OFFSETS {
        let target = rating + offset;
        let mut candidates: Vec<&Question> = pool
            .iter()
            .filter(|q| !picked.iter().any(|p| p.id == q.id))
            .collect();
        candidates.sort_by_key(|q| (q.difficulty - target).abs());
        candidates.truncate(DAILY_SHORTLIST);

        if let Some(question) = pick_uniform(&candidates, rng) {
            picked.push(question);
        }
    }

    // Pad from whatever is left if the shortlists came up short.
    while picked.len() < DAILY_TARGET_OFFSETS.len() {
        let remaining: Vec<&Question> = pool
            .iter()
            .filter(|q| !picked.iter().any(|p| p.id == q.id))
            .collect();
        match pick_uniform(&remaining, rng) {
            Some(question) => picked.push(question),
            None => break,
        }
    }

    picked
}

/// Presentation tag for a question relative to the learner's real rating.
pub fn difficulty_label(question_difficulty: i32, student_rating: i32) -> DifficultyLabel {
    let delta = question_difficulty - student_rating;
    if delta < -100 {
        DifficultyLabel::Warmup
    } else if delta < 50 {
        DifficultyLabel::Practice
    } else if delta < 150 {
        DifficultyLabel::Challenge
    } else {
        DifficultyLabel::Boss
    }
}

fn in_rating_band(question_difficulty: i32, effective_rating: i32) -> bool {
    (question_difficulty - effective_rating).abs() <= RATING_BAND
}

/// Lowest-scoring non-mastered subtopic; ties break by name so the choice
/// is stable across map iteration orders.
fn weakest_subtopic(mastery_map: &HashMap<String, SubtopicMastery>) -> Option<String> {
    mastery_map
        .values()
        .filter(|entry| entry.status != MasteryStatus::Mastered)
        .min_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.subtopic.cmp(&b.subtopic))
        })
        .map(|entry| entry.subtopic.clone())
}

fn pick_uniform<R: Rng + ?Sized>(candidates: &[&Question], rng: &mut R) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())].clone())
}

fn pick_in_band_or_any<R: Rng + ?Sized>(
    available: &[&Question],
    effective_rating: i32,
    rng: &mut R,
) -> Question {
    let in_band: Vec<&Question> = available
        .iter()
        .copied()
        .filter(|q| in_rating_band(q.difficulty, effective_rating))
        .collect();
    if let Some(question) = pick_uniform(&in_band, rng) {
        return question;
    }
    available[rng.random_range(0..available.len())].clone()
}
