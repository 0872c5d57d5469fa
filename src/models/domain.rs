use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Account role chosen at sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentee,
    Mentor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentee => "mentee",
            Role::Mentor => "mentor",
        }
    }
}

/// Personality survey questions, in scoring order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyQuestion {
    GreekLife,
    ClubInvolvement,
    Nightlife,
    AcademicFocus,
    StudyHabits,
}

impl SurveyQuestion {
    pub const ALL: [SurveyQuestion; 5] = [
        SurveyQuestion::GreekLife,
        SurveyQuestion::ClubInvolvement,
        SurveyQuestion::Nightlife,
        SurveyQuestion::AcademicFocus,
        SurveyQuestion::StudyHabits,
    ];

    /// Key under which the answer is stored in the profile document
    pub fn key(&self) -> &'static str {
        match self {
            SurveyQuestion::GreekLife => "greekLife",
            SurveyQuestion::ClubInvolvement => "clubInvolvement",
            SurveyQuestion::Nightlife => "nightlife",
            SurveyQuestion::AcademicFocus => "academicFocus",
            SurveyQuestion::StudyHabits => "studyHabits",
        }
    }
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Survey answers as stored in the profile document.
///
/// Kept as raw JSON values so that noisy data (strings, out-of-range numbers,
/// unknown keys) survives deserialization; [`Survey::answer`] decides what
/// counts as answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Survey(pub BTreeMap<String, Value>);

impl Survey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, question: SurveyQuestion, rating: u8) -> Self {
        self.0.insert(question.key().to_string(), Value::from(rating));
        self
    }

    /// Rating for a question, or `None` when it is missing or not an integer in 1..=5
    pub fn answer(&self, question: SurveyQuestion) -> Option<u8> {
        let rating = match self.0.get(question.key())? {
            Value::Number(n) => {
                let f = n.as_f64()?;
                if f.fract() != 0.0 {
                    return None;
                }
                f as i64
            }
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };

        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&rating) {
            Some(rating as u8)
        } else {
            None
        }
    }
}

/// Mentee or mentor profile document
///
/// `major` and `interests` are optional at the storage layer; scoring rejects
/// profiles that lack them. A value of the wrong JSON type reads as absent, so
/// a malformed document still reaches scoring instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default, deserialize_with = "lenient")]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub interests: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub survey: Option<Survey>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    /// First word of the display name
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

/// Decode an optional field, treating null or a value of the wrong shape as `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Mentor profile with its compatibility score for one mentee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub mentor: Profile,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Per-factor weights for the compatibility score
///
/// A zero personality weight skips the survey comparison entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub major: f64,
    pub interests: f64,
    pub personality: f64,
}

impl ScoringWeights {
    /// Major, interests and personality survey
    pub const CANONICAL: ScoringWeights = ScoringWeights {
        major: 30.0,
        interests: 45.0,
        personality: 25.0,
    };

    /// Major and interests only
    pub const SIMPLIFIED: ScoringWeights = ScoringWeights {
        major: 40.0,
        interests: 60.0,
        personality: 0.0,
    };

    pub fn uses_personality(&self) -> bool {
        self.personality > 0.0
    }

    pub fn sum(&self) -> f64 {
        self.major + self.interests + self.personality
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Named weight presets selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVariant {
    Canonical,
    Simplified,
}

impl ScoringVariant {
    pub fn weights(&self) -> ScoringWeights {
        match self {
            ScoringVariant::Canonical => ScoringWeights::CANONICAL,
            ScoringVariant::Simplified => ScoringWeights::SIMPLIFIED,
        }
    }
}

/// Forum board a post belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Social,
    Clubs,
    Academics,
    Career,
}

impl PostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Social => "social",
            PostCategory::Clubs => "clubs",
            PostCategory::Academics => "academics",
            PostCategory::Career => "career",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostCategory::Social => "Social",
            PostCategory::Clubs => "Clubs",
            PostCategory::Academics => "Academics",
            PostCategory::Career => "Career Preparation",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social" => Ok(PostCategory::Social),
            "clubs" => Ok(PostCategory::Clubs),
            "academics" => Ok(PostCategory::Academics),
            "career" => Ok(PostCategory::Career),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// A user's reaction to a forum post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Agree,
    Disagree,
}

impl FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agree" => Ok(Reaction::Agree),
            "disagree" => Ok(Reaction::Disagree),
            other => Err(format!("unknown reaction: {}", other)),
        }
    }
}

/// Forum post with aggregated reactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: uuid::Uuid,
    pub category: PostCategory,
    pub title: String,
    pub content: String,
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(rename = "authorName")]
    pub author_name: String,
    #[serde(rename = "authorEmail")]
    pub author_email: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub agrees: i64,
    pub disagrees: i64,
    /// Reaction of the user the post was loaded for, if any
    #[serde(rename = "viewerReaction")]
    pub viewer_reaction: Option<Reaction>,
}
