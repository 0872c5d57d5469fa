use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{PostCategory, Reaction, Role, Survey, SurveyQuestion};

/// Request to create an account and its profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub major: String,
    pub role: Role,
    #[serde(default)]
    pub interests: InterestsInput,
}

/// Interests as sent by clients: either a list or the comma-separated sign-up field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterestsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for InterestsInput {
    fn default() -> Self {
        InterestsInput::List(Vec::new())
    }
}

impl InterestsInput {
    /// Trimmed, non-empty interest strings in input order
    ///
    /// The legacy sign-up form stored blank entries as-is; they are dropped
    /// here since an empty string matches every mentor interest.
    pub fn into_vec(self) -> Vec<String> {
        let items: Vec<String> = match self {
            InterestsInput::List(items) => items,
            InterestsInput::Csv(raw) => raw.split(',').map(str::to_string).collect(),
        };

        items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect()
    }
}

/// Request to sign in with email and password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Personality survey answers, each on a 1-5 scale
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SurveySubmission {
    #[validate(range(min = 1, max = 5))]
    #[serde(rename = "greekLife")]
    pub greek_life: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(rename = "clubInvolvement")]
    pub club_involvement: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    pub nightlife: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(rename = "academicFocus")]
    pub academic_focus: Option<u8>,
    #[validate(range(min = 1, max = 5))]
    #[serde(rename = "studyHabits")]
    pub study_habits: Option<u8>,
}

impl SurveySubmission {
    pub fn into_survey(self) -> Survey {
        let answers = [
            (SurveyQuestion::GreekLife, self.greek_life),
            (SurveyQuestion::ClubInvolvement, self.club_involvement),
            (SurveyQuestion::Nightlife, self.nightlife),
            (SurveyQuestion::AcademicFocus, self.academic_focus),
            (SurveyQuestion::StudyHabits, self.study_habits),
        ];

        answers
            .into_iter()
            .fold(Survey::new(), |survey, (question, rating)| match rating {
                Some(r) => survey.with_answer(question, r),
                None => survey,
            })
    }
}

/// Request to find the best mentors for a mentee
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mentee_id", rename = "menteeId")]
    pub mentee_id: String,
    #[serde(alias = "top_n", rename = "topN", default)]
    pub top_n: Option<i32>,
}

/// Request to publish a forum post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "authorId")]
    pub author_id: String,
    pub category: PostCategory,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

/// Query string for listing forum posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    /// `all` or a category name
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "viewerId", default)]
    pub viewer_id: Option<String>,
}

/// Request to toggle the caller's reaction on a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    pub action: Reaction,
}
