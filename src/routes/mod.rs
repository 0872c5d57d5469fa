// Route exports
pub mod accounts;
pub mod forum;
pub mod matches;

use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, Profile};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager, PostgresClient};

/// Application state shared across all handlers
///
/// Everything request-specific (mentee id, viewer id) travels in the request
/// itself; nothing here tracks the current user.
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(accounts::configure)
            .configure(matches::configure)
            .configure(forum::configure),
    );
}

/// Build a JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// 400 response for a request that failed validation
pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors.field_errors());
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
}

/// Fetch a profile, going through the cache
pub(crate) async fn load_profile(
    state: &AppState,
    user_id: &str,
) -> Result<Profile, AppwriteError> {
    let key = CacheKey::profile(user_id);
    if let Ok(profile) = state.cache.get::<Profile>(&key).await {
        return Ok(profile);
    }

    let profile = state.appwrite.get_profile(user_id).await?;
    if let Err(e) = state.cache.set(&key, &profile).await {
        tracing::warn!("Failed to cache profile {}: {}", user_id, e);
    }
    Ok(profile)
}

/// Fetch every mentor profile, going through the cache
pub(crate) async fn load_mentor_pool(state: &AppState) -> Result<Vec<Profile>, AppwriteError> {
    let key = CacheKey::mentor_pool();
    if let Ok(mentors) = state.cache.get::<Vec<Profile>>(&key).await {
        return Ok(mentors);
    }

    let mentors = state
        .appwrite
        .list_mentors(state.matching.mentor_page_size)
        .await?;
    if let Err(e) = state.cache.set(&key, &mentors).await {
        tracing::warn!("Failed to cache mentor pool: {}", e);
    }
    Ok(mentors)
}

/// Drop cached copies of a profile and the mentor pool after a write
pub(crate) async fn invalidate_profile(state: &AppState, user_id: &str) {
    for key in [CacheKey::profile(user_id), CacheKey::mentor_pool()] {
        if let Err(e) = state.cache.delete(&key).await {
            tracing::warn!("Failed to invalidate cache key {}: {}", key, e);
        }
    }
}

/// Map a document store error to an HTTP response
pub(crate) fn appwrite_error_response(context: &str, err: AppwriteError) -> HttpResponse {
    match err {
        AppwriteError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, context, msg),
        AppwriteError::Unauthorized => {
            error_response(StatusCode::UNAUTHORIZED, context, "Invalid email or password")
        }
        AppwriteError::Conflict(msg) => error_response(StatusCode::CONFLICT, context, msg),
        other => {
            tracing::error!("{}: {}", context, other);
            error_response(StatusCode::BAD_GATEWAY, context, other)
        }
    }
}
