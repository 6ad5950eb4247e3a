//! # sprout-algo - adaptive learning core
//!
//! Pure-Rust algorithms behind an adaptive math game for children: every
//! answer recalibrates a hidden skill estimate, and every next question is
//! chosen from the combination of three independent signals.
//!
//! - **Elo rating** - a single 400-1600 skill scalar with an adaptive
//!   K-factor that shrinks as the estimate stabilizes.
//! - **Mastery tracking** - a decaying average of correctness per subtopic
//!   with a derived not-started / learning / mastered status.
//! - **SM-2 scheduling** - simplified spaced repetition per subtopic,
//!   driven by correctness plus response latency.
//! - **Question selection** - a weighted-random policy over four
//!   strategies (due-for-review, weak-subtopic, world-theme, random) that
//!   reports why it picked what it picked.
//!
//! The crate is synchronous, does no I/O, and holds no global state.
//! [`LearningSession`] is the embeddable state container: the host feeds it
//! answers, asks it for questions, and persists its snapshot. Notable
//! transitions (mastery achieved, streak milestones, onboarding complete)
//! come back as plain values for the host to dispatch.
//!
//! ```rust
//! use sprout_algo::{LearningSession, Question, Topic};
//!
//! let pool = vec![Question {
//!     id: "q1".into(),
//!     topic: Topic::Number,
//!     subtopic: "fractions".into(),
//!     difficulty: 620,
//!     text: "What is 1/2 + 1/4?".into(),
//!     options: vec!["3/4".into(), "1/2".into(), "1/4".into()],
//!     correct_index: 0,
//!     hint: None,
//!     explanation: "Add the fractions".into(),
//! }];
//!
//! let mut session = LearningSession::new();
//! let picked = session.select_question(&pool).unwrap();
//! assert_eq!(picked.reason, sprout_algo::SelectionReason::Onboarding);
//!
//! let events = session.record_answer(&picked.question, true, Some(2100));
//! assert!(events.is_empty()); // no milestone on the very first answer
//! ```

pub mod mastery;
pub mod rating;
pub mod selector;
pub mod session;
pub mod sm2;
pub mod types;

pub use mastery::{MasteryStatus, SubtopicMastery};
pub use selector::{QuestionSelection, SelectError, SelectionContext};
pub use session::{
    LearningEvent, LearningSession, PersistedLearningState, RatingInfo, RatingSnapshot,
    ReviewEntry, SubtopicDelta, SubtopicMisses,
};
pub use sm2::ReviewState;
pub use types::{
    DifficultyLabel, Question, RatingLevel, SelectionReason, SessionMode, Topic, INITIAL_RATING,
    MAX_RATING, MIN_RATING, ONBOARDING_RESPONSES,
};
