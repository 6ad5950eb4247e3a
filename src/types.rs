use serde::{Deserialize, Serialize};

/// Rating a brand-new learner starts at. Deliberately below the scale
/// midpoint so the first questions come out easy.
pub const INITIAL_RATING: i32 = 600;

/// Hard bounds on the Elo scale.
pub const MIN_RATING: i32 = 400;
pub const MAX_RATING: i32 = 1600;

/// Answers needed before the learner counts as calibrated.
pub const ONBOARDING_RESPONSES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Number,
    Calculation,
    Geometry,
    Measure,
    Data,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Number,
        Topic::Calculation,
        Topic::Geometry,
        Topic::Measure,
        Topic::Data,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Calculation => "calculation",
            Self::Geometry => "geometry",
            Self::Measure => "measure",
            Self::Data => "data",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "number" => Some(Self::Number),
            "calculation" => Some(Self::Calculation),
            "geometry" => Some(Self::Geometry),
            "measure" => Some(Self::Measure),
            "data" => Some(Self::Data),
            _ => None,
        }
    }
}

/// Immutable catalog record. The content bank produces these; this crate
/// only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub topic: Topic,
    pub subtopic: String,
    /// Difficulty on the same 400-1600 Elo scale as the learner rating.
    pub difficulty: i32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SessionMode {
    #[default]
    Adventure,
    Practice,
    Review,
    Challenge,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::Practice => "practice",
            Self::Review => "review",
            Self::Challenge => "challenge",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "practice" => Self::Practice,
            "review" => Self::Review,
            "challenge" => Self::Challenge,
            _ => Self::Adventure,
        }
    }
}

/// Why the selector picked the question it picked. Surfaced to the host for
/// the transparency badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionReason {
    Review,
    Weak,
    World,
    Random,
    Onboarding,
}

impl SelectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Weak => "weak",
            Self::World => "world",
            Self::Random => "random",
            Self::Onboarding => "onboarding",
        }
    }
}

/// Presentation-only difficulty tag relative to the learner's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLabel {
    Warmup,
    Practice,
    Challenge,
    Boss,
}

impl DifficultyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Practice => "practice",
            Self::Challenge => "challenge",
            Self::Boss => "boss",
        }
    }
}

/// Display info for a rating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingLevel {
    pub name: &'static str,
    pub emoji: &'static str,
    pub min_rating: i32,
}
