//! Case-insensitive substring matching for majors and interests.
//!
//! Two strings are related when one contains the other after lower-casing.
//! This is deliberately loose: "art" matches "smart".

/// How two majors relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorMatch {
    Exact,
    Related,
    Unrelated,
}

impl MajorMatch {
    /// Fraction of the major weight earned
    pub fn factor(&self) -> f64 {
        match self {
            MajorMatch::Exact => 1.0,
            MajorMatch::Related => 0.5,
            MajorMatch::Unrelated => 0.0,
        }
    }
}

/// Either lower-cased string contains the other
#[inline]
pub fn is_containment_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Compare two majors
pub fn compare_majors(a: &str, b: &str) -> MajorMatch {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        MajorMatch::Exact
    } else if is_containment_match(&a, &b) {
        MajorMatch::Related
    } else {
        MajorMatch::Unrelated
    }
}

/// Count mentee interests that relate to at least one mentor interest
///
/// Duplicates on the mentee side are counted individually; extra mentor
/// interests never reduce the count.
pub fn count_matched_interests(mentee: &[String], mentor: &[String]) -> usize {
    let mentor_lower: Vec<String> = mentor.iter().map(|i| i.to_lowercase()).collect();

    mentee
        .iter()
        .map(|i| i.to_lowercase())
        .filter(|interest| {
            mentor_lower
                .iter()
                .any(|mi| is_containment_match(mi, interest))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_major_exact_ignores_case() {
        assert_eq!(compare_majors("Computer Science", "computer science"), MajorMatch::Exact);
    }

    #[test]
    fn test_major_related_either_direction() {
        assert_eq!(compare_majors("Science", "Computer Science"), MajorMatch::Related);
        assert_eq!(compare_majors("Computer Science", "SCIENCE"), MajorMatch::Related);
    }

    #[test]
    fn test_major_unrelated() {
        assert_eq!(compare_majors("History", "Chemistry"), MajorMatch::Unrelated);
        assert_eq!(MajorMatch::Unrelated.factor(), 0.0);
    }

    #[test]
    fn test_interest_containment_is_literal() {
        let mentor = strings(&["Artificial Intelligence", "Sports"]);

        assert_eq!(count_matched_interests(&strings(&["art", "music"]), &mentor), 1);
        // No acronym expansion
        assert_eq!(count_matched_interests(&strings(&["ai"]), &mentor), 0);
    }

    #[test]
    fn test_short_strings_match_inside_words() {
        let mentee = strings(&["art"]);
        let mentor = strings(&["smart cities"]);
        assert_eq!(count_matched_interests(&mentee, &mentor), 1);
    }

    #[test]
    fn test_mentor_extras_do_not_penalize() {
        let mentee = strings(&["chess"]);
        let mentor = strings(&["Chess", "rowing", "poetry", "film"]);
        assert_eq!(count_matched_interests(&mentee, &mentor), 1);
    }

    #[test]
    fn test_duplicate_mentee_interests_counted() {
        let mentee = strings(&["golf", "Golf"]);
        let mentor = strings(&["golf"]);
        assert_eq!(count_matched_interests(&mentee, &mentor), 2);
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(count_matched_interests(&[], &strings(&["golf"])), 0);
        assert_eq!(count_matched_interests(&strings(&["golf"]), &[]), 0);
    }
}
