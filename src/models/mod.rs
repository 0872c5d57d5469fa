// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ForumPost, MatchResult, PostCategory, Profile, Reaction, Role, ScoringVariant, ScoringWeights,
    Survey, SurveyQuestion,
};
pub use requests::{
    CreateAccountRequest, CreatePostRequest, FindMatchesRequest, InterestsInput, ListPostsQuery,
    SignInRequest, SurveySubmission, ToggleReactionRequest,
};
pub use responses::{
    AccountResponse, ErrorResponse, FindMatchesResponse, HealthResponse, ListPostsResponse,
    PostSummary, RankedMatch, ReactionResponse,
};
