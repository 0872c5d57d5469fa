use thiserror::Error;

use crate::core::{
    containment::{compare_majors, count_matched_interests},
    survey::personality_coefficient,
};
use crate::models::{Profile, ScoringWeights};

/// Highest score a mentor can reach
pub const MAX_SCORE: u8 = 100;

/// Errors raised while scoring a pair of profiles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Invalid profile {profile_id}: missing {field}")]
    InvalidProfile {
        profile_id: String,
        field: &'static str,
    },
}

/// Weighted sub-scores before rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub major: f64,
    pub interests: f64,
    pub personality: f64,
}

impl ScoreBreakdown {
    /// Rounded total, capped at [`MAX_SCORE`]
    pub fn total(&self) -> u8 {
        let sum = self.major + self.interests + self.personality;
        sum.round().clamp(0.0, MAX_SCORE as f64) as u8
    }
}

/// Calculate a match score (0-100) between a mentee and a mentor
///
/// Scoring formula:
/// score = round(
///     major_factor * weights.major +                  # exact 1.0, contained 0.5
///     matched_interests / max(n, 1) * weights.interests +
///     personality_coefficient * weights.personality  # both surveys present
/// )
pub fn calculate_match_score(
    mentee: &Profile,
    mentor: &Profile,
    weights: &ScoringWeights,
) -> Result<u8, ScoringError> {
    score_breakdown(mentee, mentor, weights).map(|b| b.total())
}

/// Compute each weighted sub-score for a mentee/mentor pair
pub fn score_breakdown(
    mentee: &Profile,
    mentor: &Profile,
    weights: &ScoringWeights,
) -> Result<ScoreBreakdown, ScoringError> {
    let (mentee_major, mentee_interests) = required_fields(mentee)?;
    let (mentor_major, mentor_interests) = required_fields(mentor)?;

    let major = compare_majors(mentee_major, mentor_major).factor() * weights.major;

    let matched = count_matched_interests(mentee_interests, mentor_interests);
    let interests =
        (matched as f64 / mentee_interests.len().max(1) as f64) * weights.interests;

    let personality = match (&mentee.survey, &mentor.survey) {
        (Some(a), Some(b)) if weights.uses_personality() => {
            personality_coefficient(a, b) * weights.personality
        }
        _ => 0.0,
    };

    Ok(ScoreBreakdown {
        major,
        interests,
        personality,
    })
}

fn required_fields(profile: &Profile) -> Result<(&str, &[String]), ScoringError> {
    let major = profile
        .major
        .as_deref()
        .ok_or_else(|| invalid(profile, "major"))?;
    let interests = profile
        .interests
        .as_deref()
        .ok_or_else(|| invalid(profile, "interests"))?;

    Ok((major, interests))
}

fn invalid(profile: &Profile, field: &'static str) -> ScoringError {
    ScoringError::InvalidProfile {
        profile_id: profile.id.clone(),
        field,
    }
}
