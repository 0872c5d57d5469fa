use crate::core::scoring::{calculate_match_score, ScoringError};
use crate::models::{MatchResult, Profile, ScoringWeights};

/// Number of mentors returned when the caller does not ask for a specific count
pub const DEFAULT_TOP_N: usize = 3;

/// Ranks candidate mentors for a mentee
///
/// Holds only the scoring weights, so it is cheap to clone into each
/// worker and safe to share between concurrent requests.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single mentor for a mentee
    pub fn score(&self, mentee: &Profile, mentor: &Profile) -> Result<u8, ScoringError> {
        calculate_match_score(mentee, mentor, &self.weights)
    }

    /// Find the `top_n` best mentors for a mentee
    ///
    /// Every mentor is scored; the first invalid profile aborts the whole
    /// call. Results are ordered by descending score and mentors with equal
    /// scores keep their input order.
    ///
    /// # Arguments
    /// * `mentee` - The profile mentors are scored against
    /// * `mentors` - Candidate mentor profiles
    /// * `top_n` - Maximum number of results; 0 yields an empty list
    pub fn find_top_matches(
        &self,
        mentee: &Profile,
        mentors: &[Profile],
        top_n: usize,
    ) -> Result<Vec<MatchResult>, ScoringError> {
        let mut scored = mentors
            .iter()
            .map(|mentor| {
                Ok::<_, ScoringError>(MatchResult {
                    match_score: self.score(mentee, mentor)?,
                    mentor: mentor.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // `sort_by` is stable, ties keep input order
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored.truncate(top_n);

        tracing::trace!(
            "Ranked {} mentors for {}, returning {}",
            mentors.len(),
            mentee.id,
            scored.len()
        );

        Ok(scored)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
