//! Per-subtopic mastery tracking.
//!
//! Each subtopic the learner has touched carries a bounded proficiency
//! score, a decaying weighted average of recent correctness: 65% weight on
//! the latest answer, 35% on everything before it. Status is always derived
//! from score and attempt count, never set directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Topic;

/// Weight of the most recent outcome in the decaying average.
const RECENT_WEIGHT: f64 = 0.65;

/// Attempts required before a subtopic can count as mastered.
const MASTERY_MIN_ATTEMPTS: u32 = 5;

/// Score required for mastery.
const MASTERY_MIN_SCORE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum MasteryStatus {
    #[default]
    NotStarted,
    Learning,
    Mastered,
}

impl MasteryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Learning => "learning",
            Self::Mastered => "mastered",
        }
    }

    /// Remediation ordering: actively-struggling subtopics come before
    /// untouched ones, which come before mastered ones.
    fn priority(&self) -> u8 {
        match self {
            Self::Learning => 0,
            Self::NotStarted => 1,
            Self::Mastered => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicMastery {
    pub subtopic: String,
    pub topic: Topic,
    /// Decaying average of correctness, 0.0-1.0.
    pub score: f64,
    pub status: MasteryStatus,
    pub attempts: u32,
    pub correct_count: u32,
    pub last_attempt: Option<DateTime<Utc>>,
}

impl SubtopicMastery {
    pub fn new(subtopic: impl Into<String>, topic: Topic) -> Self {
        Self {
            subtopic: subtopic.into(),
            topic,
            score: 0.0,
            status: MasteryStatus::NotStarted,
            attempts: 0,
            correct_count: 0,
            last_attempt: None,
        }
    }

    /// Fold one answer into the entry. Status is derived from the
    /// post-increment attempt count and the post-update score.
    pub fn record_attempt(&mut self, is_correct: bool, now: DateTime<Utc>) {
        self.score = update_score(self.score, is_correct);
        self.attempts += 1;
        if is_correct {
            self.correct_count += 1;
        }
        self.status = derive_status(self.score, self.attempts);
        self.last_attempt = Some(now);
    }
}

/// Decaying average toward the most recent outcome. Recent performance
/// dominates but history is never discarded outright.
pub fn update_score(current_score: f64, is_correct: bool) -> f64 {
    let outcome = if is_correct { 1.0 } else { 0.0 };
    outcome * RECENT_WEIGHT + current_score * (1.0 - RECENT_WEIGHT)
}

pub fn derive_status(score: f64, attempts: u32) -> MasteryStatus {
    if attempts == 0 {
        MasteryStatus::NotStarted
    } else if attempts >= MASTERY_MIN_ATTEMPTS && score >= MASTERY_MIN_SCORE {
        MasteryStatus::Mastered
    } else {
        MasteryStatus::Learning
    }
}

/// Subtopics most in need of attention, weakest first. Ordered by status
/// priority, then score ascending, then subtopic name so ties are stable.
pub fn weakest_subtopics(
    mastery_map: &HashMap<String, SubtopicMastery>,
    limit: usize,
) -> Vec<SubtopicMastery> {
    let mut entries: Vec<SubtopicMastery> = mastery_map.values().cloned().collect();
    entries.sort_by(|a, b| {
        a.status
            .priority()
            .cmp(&b.status.priority())
            .then(a.score.total_cmp(&b.score))
            .then(a.subtopic.cmp(&b.subtopic))
    });
    entries.truncate(limit);
    entries
}

/// Mean score across a topic's subtopic entries; 0.0 when the topic has
/// never been touched.
pub fn topic_average(mastery_map: &HashMap<String, SubtopicMastery>, topic: Topic) -> f64 {
    let scores: Vec<f64> = mastery_map
        .values()
        .filter(|entry| entry.topic == topic)
        .map(|entry| entry.score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
