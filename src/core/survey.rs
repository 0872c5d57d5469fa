use crate::models::{Survey, SurveyQuestion};

/// Largest possible gap between two ratings on the 1-5 scale
const MAX_RATING_GAP: f64 = 4.0;

/// Coefficient used when the surveys share no answered question
pub const NEUTRAL_COEFFICIENT: f64 = 0.5;

/// Calculate personality compatibility (0-1) from two surveys
///
/// Only questions answered by both sides count. Each question contributes the
/// absolute rating gap; the total is normalized by the worst case and
/// inverted so identical answers give 1.0.
pub fn personality_coefficient(mentee: &Survey, mentor: &Survey) -> f64 {
    let (total_gap, answered) = SurveyQuestion::ALL
        .iter()
        .filter_map(|q| Some((mentee.answer(*q)?, mentor.answer(*q)?)))
        .fold((0u32, 0u32), |(total, count), (a, b)| {
            (total + a.abs_diff(b) as u32, count + 1)
        });

    if answered == 0 {
        return NEUTRAL_COEFFICIENT;
    }

    let normalized_gap = total_gap as f64 / (MAX_RATING_GAP * answered as f64);
    1.0 - normalized_gap
}
