//! Learning session state container.
//!
//! Owns the rating scalar, the mastery and review maps, and the recency
//! window, and drives all three updates off one pre-event snapshot per
//! answer. Notable transitions come back as values so the host can route
//! them to its own UI, audio, and reward systems; this module has no
//! notion of any of those. The host serializes [`PersistedLearningState`]
//! for continuity across sessions.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::mastery::{self, MasteryStatus, SubtopicMastery};
use crate::rating;
use crate::selector::{self, QuestionSelection, SelectError, SelectionContext};
use crate::sm2::{self, ReviewState};
use crate::types::{
    Question, RatingLevel, SessionMode, Topic, INITIAL_RATING, ONBOARDING_RESPONSES,
};

/// Recent question ids kept in state; the selector filters on the last 5.
const RECENT_IDS_KEPT: usize = 10;

/// Rating snapshots kept for trend display.
const RATING_HISTORY_KEPT: usize = 20;

/// Streak lengths that produce a milestone event, fired exactly once each
/// as the streak passes through them.
const STREAK_MILESTONES: [u32; 2] = [5, 10];

/// Rough average rating gain per correct answer, used for the
/// answers-to-next-level estimate.
const POINTS_PER_CORRECT: f64 = 2.0;

/// Minimum rating to enter each world; world 1 is always open.
fn world_unlock_rating(world: u32) -> Option<i32> {
    match world {
        1 => Some(0),
        2 => Some(750),
        3 => Some(850),
        4 => Some(950),
        5 => Some(1050),
        _ => None,
    }
}

/// A state transition the host may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LearningEvent {
    /// A subtopic crossed from not-mastered to mastered.
    MasteryAchieved { subtopic: String },
    /// The correct-answer streak hit a milestone length.
    StreakMilestone { count: u32 },
    /// Enough answers have accumulated to stop showing the calibrating
    /// indicator.
    OnboardingComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSnapshot {
    pub rating: i32,
    pub timestamp: DateTime<Utc>,
}

/// Review-map entry in its serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub subtopic: String,
    pub state: ReviewState,
}

/// Everything the host must store to resume a learner later. Maps are
/// flattened to arrays; timestamps stay typed end to end so due/overdue
/// comparisons survive the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLearningState {
    pub student_rating: i32,
    pub total_responses: u32,
    pub current_world: u32,
    pub rating_history: Vec<RatingSnapshot>,
    pub mastery_entries: Vec<SubtopicMastery>,
    pub review_entries: Vec<ReviewEntry>,
    pub recent_question_ids: Vec<String>,
    pub best_streak: u32,
    pub onboarding_complete: bool,
}

/// Per-subtopic score movement within the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicDelta {
    pub subtopic: String,
    pub delta: f64,
}

/// Per-subtopic miss count within the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicMisses {
    pub subtopic: String,
    pub wrong_count: u32,
}

/// Rating display info for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub progress: u8,
}

#[derive(Debug, Clone)]
pub struct LearningSession {
    student_rating: i32,
    total_responses: u32,
    current_world: u32,
    rating_history: Vec<RatingSnapshot>,
    mastery_map: HashMap<String, SubtopicMastery>,
    review_map: HashMap<String, ReviewState>,
    recent_question_ids: Vec<String>,
    session_correct: u32,
    session_total: u32,
    streak_count: u32,
    best_streak: u32,
    session_mode: SessionMode,
    onboarding_complete: bool,
    last_mastered_subtopic: Option<String>,
    session_masteries: Vec<String>,
    session_improved: Vec<SubtopicDelta>,
    session_weakest: Vec<SubtopicMisses>,
}

impl Default for LearningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningSession {
    pub fn new() -> Self {
        Self {
            student_rating: INITIAL_RATING,
            total_responses: 0,
            current_world: 1,
            rating_history: Vec::new(),
            mastery_map: HashMap::new(),
            review_map: HashMap::new(),
            recent_question_ids: Vec::new(),
            session_correct: 0,
            session_total: 0,
            streak_count: 0,
            best_streak: 0,
            session_mode: SessionMode::Adventure,
            onboarding_complete: false,
            last_mastered_subtopic: None,
            session_masteries: Vec::new(),
            session_improved: Vec::new(),
            session_weakest: Vec::new(),
        }
    }

    /// Record one answer against the current snapshot.
    pub fn record_answer(
        &mut self,
        question: &Question,
        is_correct: bool,
        response_time_ms: Option<i64>,
    ) -> Vec<LearningEvent> {
        self.record_answer_at(question, is_correct, response_time_ms, Utc::now())
    }

    /// Same as [`record_answer`](Self::record_answer) with the clock passed
    /// in. Rating, mastery, and review updates all read the pre-event
    /// snapshot; none depends on another's post-update value.
    pub fn record_answer_at(
        &mut self,
        question: &Question,
        is_correct: bool,
        response_time_ms: Option<i64>,
        now: DateTime<Utc>,
    ) -> Vec<LearningEvent> {
        let mut events = Vec::new();

        // Elo rating.
        let expected = rating::expected_score(self.student_rating, question.difficulty);
        let k = rating::k_factor(self.total_responses);
        let actual = if is_correct { 1 } else { 0 };
        let new_rating =
            rating::clamp_rating(rating::update_rating(self.student_rating, expected, actual, k));
        debug!(
            subtopic = %question.subtopic,
            correct = is_correct,
            rating = new_rating,
            delta = new_rating - self.student_rating,
            "answer recorded"
        );

        // Mastery for this subtopic.
        let entry = self
            .mastery_map
            .entry(question.subtopic.clone())
            .or_insert_with(|| SubtopicMastery::new(question.subtopic.clone(), question.topic));
        let prev_status = entry.status;
        let prev_score = entry.score;
        entry.record_attempt(is_correct, now);
        let new_score = entry.score;

        if prev_status != MasteryStatus::Mastered && entry.status == MasteryStatus::Mastered {
            info!(subtopic = %question.subtopic, "subtopic mastered");
            self.last_mastered_subtopic = Some(question.subtopic.clone());
            self.session_masteries.push(question.subtopic.clone());
            events.push(LearningEvent::MasteryAchieved {
                subtopic: question.subtopic.clone(),
            });
        }

        let delta = new_score - prev_score;
        if let Some(improved) = self
            .session_improved
            .iter_mut()
            .find(|entry| entry.subtopic == question.subtopic)
        {
            improved.delta += delta;
        } else if delta != 0.0 {
            self.session_improved.push(SubtopicDelta {
                subtopic: question.subtopic.clone(),
                delta,
            });
        }

        if !is_correct {
            if let Some(missed) = self
                .session_weakest
                .iter_mut()
                .find(|entry| entry.subtopic == question.subtopic)
            {
                missed.wrong_count += 1;
            } else {
                self.session_weakest.push(SubtopicMisses {
                    subtopic: question.subtopic.clone(),
                    wrong_count: 1,
                });
            }
        }

        // Review schedule for this subtopic.
        let quality = sm2::quality_from_outcome(is_correct, response_time_ms);
        let review = self
            .review_map
            .entry(question.subtopic.clone())
            .or_insert_with(|| ReviewState::new(now));
        *review = sm2::update(review, quality, now);

        // Recency window.
        self.recent_question_ids.push(question.id.clone());
        if self.recent_question_ids.len() > RECENT_IDS_KEPT {
            let overflow = self.recent_question_ids.len() - RECENT_IDS_KEPT;
            self.recent_question_ids.drain(..overflow);
        }

        // Streak, fired exactly at the milestone lengths.
        self.streak_count = if is_correct { self.streak_count + 1 } else { 0 };
        self.best_streak = self.best_streak.max(self.streak_count);
        if STREAK_MILESTONES.contains(&self.streak_count) {
            events.push(LearningEvent::StreakMilestone {
                count: self.streak_count,
            });
        }

        self.student_rating = new_rating;
        self.total_responses += 1;
        self.rating_history.push(RatingSnapshot {
            rating: new_rating,
            timestamp: now,
        });
        if self.rating_history.len() > RATING_HISTORY_KEPT {
            let overflow = self.rating_history.len() - RATING_HISTORY_KEPT;
            self.rating_history.drain(..overflow);
        }

        self.session_total += 1;
        if is_correct {
            self.session_correct += 1;
        }

        if !self.onboarding_complete && self.total_responses >= ONBOARDING_RESPONSES {
            self.onboarding_complete = true;
            info!(responses = self.total_responses, "onboarding complete");
            events.push(LearningEvent::OnboardingComplete);
        }

        events
    }

    /// Pick the next question with the thread RNG and wall clock.
    pub fn select_question(&self, pool: &[Question]) -> Result<QuestionSelection, SelectError> {
        self.select_question_with(pool, Utc::now(), &mut rand::rng())
    }

    /// Pick the next question with an explicit clock and RNG.
    pub fn select_question_with<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<QuestionSelection, SelectError> {
        let ctx = SelectionContext {
            student_rating: self.student_rating,
            current_world: self.current_world,
            mastery_map: &self.mastery_map,
            review_map: &self.review_map,
            recent_question_ids: &self.recent_question_ids,
            session_mode: self.session_mode,
            total_responses: self.total_responses,
            now,
        };
        selector::select_next_question(pool, &ctx, rng)
    }

    /// Assemble today's three-question challenge for this learner.
    pub fn select_daily_challenge(&self, pool: &[Question]) -> Vec<Question> {
        selector::select_daily_challenge_questions(pool, self.student_rating, &mut rand::rng())
    }

    // --- presentation accessors ---

    pub fn student_rating(&self) -> i32 {
        self.student_rating
    }

    pub fn total_responses(&self) -> u32 {
        self.total_responses
    }

    pub fn current_world(&self) -> u32 {
        self.current_world
    }

    pub fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    pub fn onboarding_complete(&self) -> bool {
        self.onboarding_complete
    }

    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn session_stats(&self) -> (u32, u32) {
        (self.session_correct, self.session_total)
    }

    pub fn last_mastered_subtopic(&self) -> Option<&str> {
        self.last_mastered_subtopic.as_deref()
    }

    pub fn session_masteries(&self) -> &[String] {
        &self.session_masteries
    }

    pub fn session_improved(&self) -> &[SubtopicDelta] {
        &self.session_improved
    }

    pub fn session_weakest(&self) -> &[SubtopicMisses] {
        &self.session_weakest
    }

    pub fn mastery_map(&self) -> &HashMap<String, SubtopicMastery> {
        &self.mastery_map
    }

    pub fn review_map(&self) -> &HashMap<String, ReviewState> {
        &self.review_map
    }

    /// Level name, emoji, and percent progress for the HUD.
    pub fn rating_info(&self) -> RatingInfo {
        let RatingLevel { name, emoji, .. } = rating::rating_level(self.student_rating);
        RatingInfo {
            name,
            emoji,
            progress: rating::level_progress(self.student_rating),
        }
    }

    /// Mastery percent for one topic, 0-100.
    pub fn topic_progress(&self, topic: Topic) -> u8 {
        (mastery::topic_average(&self.mastery_map, topic) * 100.0).round() as u8
    }

    pub fn all_topic_progress(&self) -> Vec<(Topic, u8)> {
        Topic::ALL
            .iter()
            .map(|&topic| (topic, self.topic_progress(topic)))
            .collect()
    }

    /// Subtopics currently due for review.
    pub fn due_review_count(&self, now: DateTime<Utc>) -> usize {
        self.review_map
            .values()
            .filter(|state| state.is_due(now))
            .count()
    }

    /// Rating movement between the two most recent snapshots; positive
    /// means improving.
    pub fn rating_trend(&self) -> i32 {
        let n = self.rating_history.len();
        if n < 2 {
            return 0;
        }
        self.rating_history[n - 1].rating - self.rating_history[n - 2].rating
    }

    /// The three lowest-scoring subtopics actually attempted and not yet
    /// mastered.
    pub fn weak_topics(&self) -> Vec<String> {
        let mut entries: Vec<&SubtopicMastery> = self
            .mastery_map
            .values()
            .filter(|entry| entry.status != MasteryStatus::Mastered && entry.attempts > 0)
            .collect();
        entries.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.subtopic.cmp(&b.subtopic)));
        entries
            .into_iter()
            .take(3)
            .map(|entry| entry.subtopic.clone())
            .collect()
    }

    /// Rough count of correct answers needed to reach the next level; 0 at
    /// the top.
    pub fn questions_to_next_level(&self) -> u32 {
        match rating::next_level_threshold(self.student_rating) {
            Some(next) => {
                ((next - self.student_rating) as f64 / POINTS_PER_CORRECT).ceil() as u32
            }
            None => 0,
        }
    }

    // --- world progression ---

    pub fn can_unlock_world(&self, world: u32) -> bool {
        world_unlock_rating(world).is_some_and(|required| self.student_rating >= required)
    }

    /// Switch worlds; ignored when the rating has not unlocked it yet.
    pub fn set_world(&mut self, world: u32) {
        if self.can_unlock_world(world) {
            self.current_world = world;
        }
    }

    pub fn set_session_mode(&mut self, mode: SessionMode) {
        self.session_mode = mode;
    }

    // --- resets ---

    /// Clear session-scoped stats; learning progress stays.
    pub fn reset_session(&mut self) {
        self.session_correct = 0;
        self.session_total = 0;
        self.streak_count = 0;
        self.last_mastered_subtopic = None;
        self.session_masteries.clear();
        self.session_improved.clear();
        self.session_weakest.clear();
    }

    /// Wipe all progress back to a brand-new learner.
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    // --- persistence ---

    pub fn snapshot(&self) -> PersistedLearningState {
        let mut mastery_entries: Vec<SubtopicMastery> = self.mastery_map.values().cloned().collect();
        mastery_entries.sort_by(|a, b| a.subtopic.cmp(&b.subtopic));

        let mut review_entries: Vec<ReviewEntry> = self
            .review_map
            .iter()
            .map(|(subtopic, state)| ReviewEntry {
                subtopic: subtopic.clone(),
                state: state.clone(),
            })
            .collect();
        review_entries.sort_by(|a, b| a.subtopic.cmp(&b.subtopic));

        PersistedLearningState {
            student_rating: self.student_rating,
            total_responses: self.total_responses,
            current_world: self.current_world,
            rating_history: self.rating_history.clone(),
            mastery_entries,
            review_entries,
            recent_question_ids: self.recent_question_ids.clone(),
            best_streak: self.best_streak,
            onboarding_complete: self.onboarding_complete,
        }
    }

    /// Rebuild a session from persisted state. Session-scoped stats start
    /// fresh; the maps are reconstructed from their array form.
    pub fn restore(state: PersistedLearningState) -> Self {
        let mastery_map = state
            .mastery_entries
            .into_iter()
            .map(|entry| (entry.subtopic.clone(), entry))
            .collect();
        let review_map = state
            .review_entries
            .into_iter()
            .map(|entry| (entry.subtopic, entry.state))
            .collect();

        Self {
            student_rating: rating::clamp_rating(state.student_rating),
            total_responses: state.total_responses,
            current_world: state.current_world,
            rating_history: state.rating_history,
            mastery_map,
            review_map,
            recent_question_ids: state.recent_question_ids,
            best_streak: state.best_streak,
            onboarding_complete: state.onboarding_complete,
            ..Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn question(id: &str, topic: Topic, subtopic: &str, difficulty: i32) -> Question {
        Question {
            id: id.into(),
            topic,
            subtopic: subtopic.into(),
            difficulty,
            text: String::new(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index: 0,
            hint: None,
            explanation: String::new(),
        }
    }

    #[test]
    fn test_first_answer_worked_example() {
        // Rating 800, difficulty 800, correct: k=32, expected=0.5 -> 816.
        let now = Utc::now();
        let mut session = LearningSession::new();
        session.student_rating = 800;

        let q = question("q1", Topic::Number, "fractions", 800);
        session.record_answer_at(&q, true, Some(4000), now);

        assert_eq!(session.student_rating(), 816);
        assert_eq!(session.total_responses(), 1);

        let mastery = &session.mastery_map()["fractions"];
        assert!((mastery.score - 0.65).abs() < 1e-12);
        assert_eq!(mastery.status, MasteryStatus::Learning);
        assert_eq!(mastery.attempts, 1);
        assert_eq!(mastery.correct_count, 1);

        // Quality 4 at 4000ms: interval stays 1, streak starts, ease ~2.5.
        let review = &session.review_map()["fractions"];
        assert_eq!(review.interval, 1);
        assert_eq!(review.repetitions, 1);
        assert!((review.ease_factor - 2.5).abs() < 0.11);
    }

    #[test]
    fn test_mastery_event_fires_once() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let q = question("q1", Topic::Number, "fractions", 600);

        let mut mastery_events = 0;
        for i in 0..8 {
            let events =
                session.record_answer_at(&q, true, None, now + Duration::seconds(i));
            mastery_events += events
                .iter()
                .filter(|e| matches!(e, LearningEvent::MasteryAchieved { .. }))
                .count();
        }
        assert_eq!(mastery_events, 1);
        assert_eq!(session.last_mastered_subtopic(), Some("fractions"));
        assert_eq!(session.session_masteries(), ["fractions".to_string()]);
    }

    #[test]
    fn test_streak_milestones_fire_exactly_at_5_and_10() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let q = question("q1", Topic::Number, "fractions", 600);

        let mut milestones = Vec::new();
        for i in 0..12 {
            for event in session.record_answer_at(&q, true, None, now + Duration::seconds(i)) {
                if let LearningEvent::StreakMilestone { count } = event {
                    milestones.push(count);
                }
            }
        }
        assert_eq!(milestones, vec![5, 10]);
        assert_eq!(session.best_streak(), 12);

        // A miss resets the streak; climbing back to 5 fires again.
        session.record_answer_at(&q, false, None, now);
        assert_eq!(session.streak_count(), 0);
        let mut again = Vec::new();
        for i in 0..5 {
            for event in session.record_answer_at(&q, true, None, now + Duration::seconds(i)) {
                if let LearningEvent::StreakMilestone { count } = event {
                    again.push(count);
                }
            }
        }
        assert_eq!(again, vec![5]);
    }

    #[test]
    fn test_onboarding_completes_at_ten_responses() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let q = question("q1", Topic::Number, "fractions", 600);

        for i in 0..9 {
            let events = session.record_answer_at(&q, i % 2 == 0, None, now);
            assert!(!events.contains(&LearningEvent::OnboardingComplete));
            assert!(!session.onboarding_complete());
        }
        let events = session.record_answer_at(&q, true, None, now);
        assert!(events.contains(&LearningEvent::OnboardingComplete));
        assert!(session.onboarding_complete());

        // Never fires again.
        let events = session.record_answer_at(&q, true, None, now);
        assert!(!events.contains(&LearningEvent::OnboardingComplete));
    }

    #[test]
    fn test_recent_ids_window_capped_at_ten() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        for i in 0..15 {
            let q = question(&format!("q{i}"), Topic::Number, "fractions", 600);
            session.record_answer_at(&q, true, None, now);
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.recent_question_ids.len(), 10);
        assert_eq!(snapshot.recent_question_ids[0], "q5");
        assert_eq!(snapshot.recent_question_ids[9], "q14");
    }

    #[test]
    fn test_rating_trend_and_history_cap() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let easy = question("q1", Topic::Number, "fractions", 400);
        let hard = question("q2", Topic::Number, "fractions", 1400);

        assert_eq!(session.rating_trend(), 0);
        for i in 0..25 {
            session.record_answer_at(&easy, true, None, now + Duration::seconds(i));
        }
        assert!(session.rating_trend() >= 0);

        session.record_answer_at(&hard, false, None, now);
        assert!(session.rating_trend() <= 0);
        assert_eq!(session.snapshot().rating_history.len(), 20);
    }

    #[test]
    fn test_world_unlocks_follow_rating() {
        let mut session = LearningSession::new();
        assert!(session.can_unlock_world(1));
        assert!(!session.can_unlock_world(2));
        assert!(!session.can_unlock_world(6));

        session.set_world(3);
        assert_eq!(session.current_world(), 1);

        session.student_rating = 900;
        assert!(session.can_unlock_world(3));
        assert!(!session.can_unlock_world(4));
        session.set_world(3);
        assert_eq!(session.current_world(), 3);
    }

    #[test]
    fn test_weak_topics_and_progress() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let qa = question("a", Topic::Number, "fractions", 600);
        let qb = question("b", Topic::Number, "decimals", 600);

        session.record_answer_at(&qa, false, None, now);
        session.record_answer_at(&qb, true, None, now);

        assert_eq!(session.weak_topics(), vec!["fractions", "decimals"]);
        // number average = (0 + 0.65) / 2 rounded as percent
        assert_eq!(session.topic_progress(Topic::Number), 33);
        assert_eq!(session.topic_progress(Topic::Data), 0);
        assert_eq!(session.all_topic_progress().len(), 5);
    }

    #[test]
    fn test_questions_to_next_level() {
        let mut session = LearningSession::new();
        session.student_rating = 690;
        assert_eq!(session.questions_to_next_level(), 5);
        session.student_rating = 1500;
        assert_eq!(session.questions_to_next_level(), 0);
    }

    #[test]
    fn test_due_review_count() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let q = question("q1", Topic::Number, "fractions", 600);
        session.record_answer_at(&q, true, Some(1000), now);

        // Next review is a day out.
        assert_eq!(session.due_review_count(now), 0);
        assert_eq!(session.due_review_count(now + Duration::days(1)), 1);
    }

    #[test]
    fn test_reset_session_keeps_progress() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let q = question("q1", Topic::Number, "fractions", 600);
        for _ in 0..6 {
            session.record_answer_at(&q, true, None, now);
        }
        let rating_before = session.student_rating();

        session.reset_session();
        assert_eq!(session.session_stats(), (0, 0));
        assert_eq!(session.streak_count(), 0);
        assert_eq!(session.student_rating(), rating_before);
        assert!(!session.mastery_map().is_empty());

        session.reset_all();
        assert_eq!(session.student_rating(), INITIAL_RATING);
        assert_eq!(session.total_responses(), 0);
        assert!(session.mastery_map().is_empty());
        assert!(session.review_map().is_empty());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let now = Utc::now();
        let mut session = LearningSession::new();
        let qs = [
            question("q1", Topic::Number, "fractions", 700),
            question("q2", Topic::Geometry, "shapes", 850),
        ];
        for (i, q) in qs.iter().cycle().take(12).enumerate() {
            session.record_answer_at(q, i % 3 != 0, Some(2500), now + Duration::seconds(i as i64));
        }

        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: PersistedLearningState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = LearningSession::restore(decoded);
        assert_eq!(restored.student_rating(), session.student_rating());
        assert_eq!(restored.total_responses(), session.total_responses());
        assert_eq!(restored.best_streak(), session.best_streak());
        assert_eq!(restored.onboarding_complete(), session.onboarding_complete());
        assert_eq!(restored.mastery_map(), session.mastery_map());
        assert_eq!(restored.review_map(), session.review_map());
        // Session-scoped stats start over.
        assert_eq!(restored.session_stats(), (0, 0));
    }
}
