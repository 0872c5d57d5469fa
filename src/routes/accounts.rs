use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AccountResponse, CreateAccountRequest, HealthResponse, Role, SignInRequest, SurveySubmission,
};
use crate::routes::{
    appwrite_error_response, error_response, invalidate_profile, load_profile, validation_failed,
    AppState,
};
use crate::services::{AppwriteError, NewProfile};

/// Configure account and profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/accounts", web::post().to(create_account))
        .route("/sessions", web::post().to(sign_in))
        .route("/profiles/{user_id}", web::get().to(get_profile))
        .route("/profiles/{user_id}/survey", web::put().to(submit_survey));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create account endpoint
///
/// POST /api/v1/accounts
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "password": "string",
///   "major": "string",
///   "role": "mentee|mentor",
///   "interests": "comma, separated" | ["list"]
/// }
/// ```
async fn create_account(
    state: web::Data<AppState>,
    req: web::Json<CreateAccountRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();

    let user_id = match state
        .appwrite
        .create_user(&req.name, &req.email, &req.password)
        .await
    {
        Ok(id) => id,
        Err(e) => return appwrite_error_response("Failed to create account", e),
    };

    let new_profile = NewProfile {
        name: req.name,
        email: req.email,
        major: req.major,
        role: req.role,
        interests: req.interests.into_vec(),
    };

    let profile = match state.appwrite.create_profile(&user_id, &new_profile).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Account {} created but profile write failed: {}", user_id, e);
            return appwrite_error_response("Failed to save profile", e);
        }
    };

    if profile.role == Role::Mentor {
        invalidate_profile(&state, &user_id).await;
    }

    tracing::info!("Created {} account {}", profile.role.as_str(), user_id);

    HttpResponse::Created().json(AccountResponse::new(user_id, profile.role))
}

/// Sign in endpoint
///
/// POST /api/v1/sessions
///
/// Resolves the account's role so the client can open the right dashboard.
async fn sign_in(
    state: web::Data<AppState>,
    req: web::Json<SignInRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let user_id = match state.appwrite.create_session(&req.email, &req.password).await {
        Ok(id) => id,
        Err(AppwriteError::Unauthorized) => {
            return error_response(StatusCode::UNAUTHORIZED, "Sign in failed", "Invalid email or password");
        }
        Err(e) => return appwrite_error_response("Sign in failed", e),
    };

    match load_profile(&state, &user_id).await {
        Ok(profile) => HttpResponse::Ok().json(AccountResponse::new(user_id, profile.role)),
        Err(AppwriteError::NotFound(_)) => error_response(
            StatusCode::NOT_FOUND,
            "Sign in failed",
            "User data not found. Please contact support.",
        ),
        Err(e) => appwrite_error_response("Sign in failed", e),
    }
}

/// Get profile endpoint
///
/// GET /api/v1/profiles/{userId}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();

    match load_profile(&state, &user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => appwrite_error_response("Failed to fetch profile", e),
    }
}

/// Submit personality survey endpoint
///
/// PUT /api/v1/profiles/{userId}/survey
///
/// Request body:
/// ```json
/// {
///   "greekLife": 1,
///   "clubInvolvement": 3,
///   "nightlife": 2,
///   "academicFocus": 5,
///   "studyHabits": 4
/// }
/// ```
async fn submit_survey(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SurveySubmission>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let user_id = path.into_inner();
    let survey = req.into_inner().into_survey();

    match state.appwrite.update_survey(&user_id, &survey).await {
        Ok(profile) => {
            invalidate_profile(&state, &user_id).await;
            tracing::info!("Stored survey for {}", user_id);
            HttpResponse::Ok().json(profile)
        }
        Err(e) => appwrite_error_response("Failed to store survey", e),
    }
}
