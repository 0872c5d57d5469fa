use crate::models::{ForumPost, PostCategory, Reaction};
use crate::core::forum::next_reaction;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Fields of a new forum post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub category: PostCategory,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub author_email: String,
}

/// Reaction state of a post after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTally {
    pub reaction: Option<Reaction>,
    pub agrees: i64,
    pub disagrees: i64,
}

/// PostgreSQL client for forum posts and reactions
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new post and return it
    pub async fn create_post(&self, post: &NewPost) -> Result<ForumPost, PostgresError> {
        let query = r#"
            INSERT INTO forum_posts (id, category, title, content, author_id, author_name, author_email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING created_at
        "#;

        let id = Uuid::new_v4();
        let row = sqlx::query(query)
            .bind(id)
            .bind(post.category.as_str())
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.author_id)
            .bind(&post.author_name)
            .bind(&post.author_email)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created forum post {} in {}", id, post.category);

        Ok(ForumPost {
            id,
            category: post.category,
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id.clone(),
            author_name: post.author_name.clone(),
            author_email: post.author_email.clone(),
            created_at: row.get("created_at"),
            agrees: 0,
            disagrees: 0,
            viewer_reaction: None,
        })
    }

    /// All posts, newest first, with reaction counts and the viewer's own reaction
    pub async fn list_posts(&self, viewer_id: Option<&str>) -> Result<Vec<ForumPost>, PostgresError> {
        let query = r#"
            SELECT
                p.id, p.category, p.title, p.content,
                p.author_id, p.author_name, p.author_email, p.created_at,
                COUNT(r.user_id) FILTER (WHERE r.reaction = 'agree') AS agrees,
                COUNT(r.user_id) FILTER (WHERE r.reaction = 'disagree') AS disagrees,
                MAX(r.reaction::text) FILTER (WHERE r.user_id = $1) AS viewer_reaction
            FROM forum_posts p
            LEFT JOIN post_reactions r ON r.post_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(viewer_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(post_from_row).collect()
    }

    /// Toggle a user's reaction on a post
    ///
    /// Runs in a transaction with the user's reaction row locked so that
    /// concurrent clicks from the same user serialize.
    pub async fn toggle_reaction(
        &self,
        post_id: Uuid,
        user_id: &str,
        action: Reaction,
    ) -> Result<ReactionTally, PostgresError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT 1 FROM forum_posts WHERE id = $1 FOR SHARE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(PostgresError::NotFound(format!("Post {} not found", post_id)));
        }

        let current: Option<Reaction> = sqlx::query_scalar(
            "SELECT reaction FROM post_reactions WHERE post_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let next = next_reaction(current, action);

        match next {
            Some(reaction) => {
                sqlx::query(
                    r#"
                    INSERT INTO post_reactions (post_id, user_id, reaction, reacted_at)
                    VALUES ($1, $2, $3, NOW())
                    ON CONFLICT (post_id, user_id)
                    DO UPDATE SET reaction = EXCLUDED.reaction, reacted_at = EXCLUDED.reacted_at
                    "#,
                )
                .bind(post_id)
                .bind(user_id)
                .bind(reaction)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                sqlx::query("DELETE FROM post_reactions WHERE post_id = $1 AND user_id = $2")
                    .bind(post_id)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let counts = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE reaction = 'agree') AS agrees,
                COUNT(*) FILTER (WHERE reaction = 'disagree') AS disagrees
            FROM post_reactions
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("User {} reaction on {}: {:?} -> {:?}", user_id, post_id, current, next);

        Ok(ReactionTally {
            reaction: next,
            agrees: counts.get("agrees"),
            disagrees: counts.get("disagrees"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn post_from_row(row: &PgRow) -> Result<ForumPost, PostgresError> {
    let category: String = row.get("category");
    let viewer_reaction: Option<String> = row.get("viewer_reaction");

    Ok(ForumPost {
        id: row.get("id"),
        category: category.parse().map_err(PostgresError::InvalidData)?,
        title: row.get("title"),
        content: row.get("content"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        author_email: row.get("author_email"),
        created_at: row.get("created_at"),
        agrees: row.get("agrees"),
        disagrees: row.get("disagrees"),
        viewer_reaction: viewer_reaction
            .map(|r| r.parse())
            .transpose()
            .map_err(PostgresError::InvalidData)?,
    })
}
