use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Reaction, Role};

/// Response after creating an account or signing in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    /// Dashboard the client should open next
    pub dashboard: String,
}

impl AccountResponse {
    pub fn new(user_id: String, role: Role) -> Self {
        Self {
            user_id,
            role,
            dashboard: format!("{}-dashboard", role.as_str()),
        }
    }
}

/// One ranked mentor in a match response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub rank: usize,
    #[serde(flatten)]
    pub result: MatchResult,
    #[serde(rename = "contactUrl", skip_serializing_if = "Option::is_none")]
    pub contact_url: Option<String>,
}

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RankedMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Forum post as listed on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: uuid::Uuid,
    pub category: String,
    #[serde(rename = "categoryLabel")]
    pub category_label: String,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "authorName")]
    pub author_name: String,
    #[serde(rename = "authorInitials")]
    pub author_initials: String,
    #[serde(rename = "timeAgo")]
    pub time_ago: String,
    pub agrees: i64,
    pub disagrees: i64,
    #[serde(rename = "viewerReaction")]
    pub viewer_reaction: Option<Reaction>,
}

/// Response for listing forum posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsResponse {
    pub title: String,
    pub posts: Vec<PostSummary>,
}

/// Response after toggling a reaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionResponse {
    #[serde(rename = "postId")]
    pub post_id: uuid::Uuid,
    pub reaction: Option<Reaction>,
    pub agrees: i64,
    pub disagrees: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
