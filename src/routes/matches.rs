use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{mentorship_mailto, ScoringError};
use crate::models::{FindMatchesRequest, FindMatchesResponse, RankedMatch};
use crate::routes::{
    appwrite_error_response, error_response, load_mentor_pool, load_profile, validation_failed,
    AppState,
};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches/find", web::post().to(find_matches));
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "menteeId": "string",
///   "topN": 3
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let mentee_id = &req.mentee_id;
    let top_n = state.matching.resolve_top_n(req.top_n);

    tracing::info!("Finding matches for mentee: {}, topN: {}", mentee_id, top_n);

    let mentee = match load_profile(&state, mentee_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response("Failed to fetch mentee profile", e),
    };

    let mentors = match load_mentor_pool(&state).await {
        Ok(mentors) => mentors,
        Err(e) => return appwrite_error_response("Failed to load mentors", e),
    };

    let total_candidates = mentors.len();

    let results = match state.matcher.find_top_matches(&mentee, &mentors, top_n) {
        Ok(results) => results,
        Err(e @ ScoringError::InvalidProfile { .. }) => {
            tracing::warn!("Matching aborted for {}: {}", mentee_id, e);
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid profile", e);
        }
    };

    let matches: Vec<RankedMatch> = results
        .into_iter()
        .enumerate()
        .map(|(i, result)| RankedMatch {
            rank: i + 1,
            contact_url: mentorship_mailto(&result.mentor),
            result,
        })
        .collect();

    tracing::info!(
        "Returning {} matches for mentee {} (from {} mentors)",
        matches.len(),
        mentee_id,
        total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_candidates,
    })
}
