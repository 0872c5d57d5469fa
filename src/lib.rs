//! Mentor Match - mentor matching and forum service for the HoosHelpHoos platform
//!
//! The core of the crate is the mentor-ranking algorithm in [`core`]: a pure,
//! stateless scorer that compares a mentee with candidate mentors by major,
//! interests and an optional personality survey. The rest wires it to the
//! Appwrite document store, a PostgreSQL-backed forum and an actix-web API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, Matcher, ScoringError, DEFAULT_TOP_N};
pub use crate::models::{MatchResult, Profile, Role, ScoringWeights, Survey, SurveyQuestion};
