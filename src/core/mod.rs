// Core algorithm exports
pub mod contact;
pub mod containment;
pub mod forum;
pub mod matcher;
pub mod scoring;
pub mod survey;

pub use contact::mentorship_mailto;
pub use containment::{compare_majors, count_matched_interests, MajorMatch};
pub use forum::{filter_posts, next_reaction, CategoryFilter};
pub use matcher::{Matcher, DEFAULT_TOP_N};
pub use scoring::{calculate_match_score, score_breakdown, ScoreBreakdown, ScoringError};
pub use survey::personality_coefficient;
