use crate::models::Profile;

const CONTACT_SUBJECT: &str = "HoosHelpHoos - Mentorship Request";

/// Build a `mailto:` link a mentee can use to reach a matched mentor
///
/// Returns `None` when the mentor has no email address on file.
pub fn mentorship_mailto(mentor: &Profile) -> Option<String> {
    let email = mentor.email.trim();
    if email.is_empty() {
        return None;
    }

    let body = format!(
        "Hi {},\n\nI found your profile on HoosHelpHoos and would love to connect with you as a mentor!\n\nBest regards",
        mentor.name
    );

    Some(format!(
        "mailto:{}?subject={}&body={}",
        email,
        urlencoding::encode(CONTACT_SUBJECT),
        urlencoding::encode(&body)
    ))
}
