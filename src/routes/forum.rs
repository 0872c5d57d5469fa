use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::forum::{filter_posts, summarize, CategoryFilter};
use crate::models::{
    CreatePostRequest, ListPostsQuery, ListPostsResponse, ReactionResponse, ToggleReactionRequest,
};
use crate::routes::{
    appwrite_error_response, error_response, load_profile, validation_failed, AppState,
};
use crate::services::{NewPost, PostgresError};

/// Configure forum routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/forum/posts", web::get().to(list_posts))
        .route("/forum/posts", web::post().to(create_post))
        .route("/forum/posts/{post_id}/reactions", web::post().to(toggle_reaction));
}

/// List posts endpoint
///
/// GET /api/v1/forum/posts?category={all|social|clubs|academics|career}&search={term}&viewerId={userId}
async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> impl Responder {
    let filter = match CategoryFilter::parse(query.category.as_deref()) {
        Ok(filter) => filter,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, "Invalid category", msg),
    };

    let posts = match state.postgres.list_posts(query.viewer_id.as_deref()).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Failed to load forum posts: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load posts", e);
        }
    };

    let search = query.search.as_deref().unwrap_or_default();
    let now = chrono::Utc::now();

    let posts = filter_posts(posts, filter, search)
        .into_iter()
        .map(|post| summarize(post, now))
        .collect();

    HttpResponse::Ok().json(ListPostsResponse {
        title: filter.title().to_string(),
        posts,
    })
}

/// Create post endpoint
///
/// POST /api/v1/forum/posts
///
/// Request body:
/// ```json
/// {
///   "authorId": "string",
///   "category": "social|clubs|academics|career",
///   "title": "string",
///   "content": "string"
/// }
/// ```
async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<CreatePostRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();

    let author = match load_profile(&state, &req.author_id).await {
        Ok(profile) => profile,
        Err(e) => return appwrite_error_response("Failed to fetch author profile", e),
    };

    let new_post = NewPost {
        category: req.category,
        title: req.title,
        content: req.content,
        author_id: author.id,
        author_name: author.name,
        author_email: author.email,
    };

    match state.postgres.create_post(&new_post).await {
        Ok(post) => {
            tracing::info!("Post {} created by {}", post.id, post.author_id);
            HttpResponse::Created().json(post)
        }
        Err(e) => {
            tracing::error!("Failed to create post: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create post", e)
        }
    }
}

/// Toggle reaction endpoint
///
/// POST /api/v1/forum/posts/{postId}/reactions
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "action": "agree|disagree"
/// }
/// ```
async fn toggle_reaction(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<ToggleReactionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let post_id = path.into_inner();

    match state
        .postgres
        .toggle_reaction(post_id, &req.user_id, req.action)
        .await
    {
        Ok(tally) => HttpResponse::Ok().json(ReactionResponse {
            post_id,
            reaction: tally.reaction,
            agrees: tally.agrees,
            disagrees: tally.disagrees,
        }),
        Err(PostgresError::NotFound(msg)) => {
            error_response(StatusCode::NOT_FOUND, "Post not found", msg)
        }
        Err(e) => {
            tracing::error!("Failed to toggle reaction on {}: {}", post_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update reaction", e)
        }
    }
}
