use crate::models::{Profile, Role, Survey};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid credentials")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the Appwrite backend including:
/// - Creating user accounts and email sessions
/// - Reading and writing profile documents
/// - Listing mentor profiles for matching
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub users: String,
}

/// Fields written when a profile document is first created
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub major: String,
    pub role: Role,
    pub interests: Vec<String>,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn documents_url(&self) -> String {
        self.url(&format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, self.collections.users
        ))
    }

    /// Attach server credentials to a request
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// Create an auth account and return its user id
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AppwriteError> {
        let user_id = uuid::Uuid::new_v4().simple().to_string();
        let payload = json!({
            "userId": user_id,
            "email": email,
            "password": password,
            "name": name,
        });

        let response = self
            .authorized(self.client.post(self.url("/users")))
            .json(&payload)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(AppwriteError::Conflict(format!("Account already exists for {}", email)));
        }
        let json = expect_success(response, "create user").await?;

        let id = json
            .get("$id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing user $id".into()))?;

        tracing::debug!("Created user account {}", id);
        Ok(id.to_string())
    }

    /// Open an email/password session and return the authenticated user id
    pub async fn create_session(&self, email: &str, password: &str) -> Result<String, AppwriteError> {
        let response = self
            .client
            .post(self.url("/account/sessions/email"))
            .header("X-Appwrite-Project", &self.project_id)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST) {
            return Err(AppwriteError::Unauthorized);
        }
        let json = expect_success(response, "create session").await?;

        json.get("userId")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing session userId".into()))
    }

    /// Create the profile document for a freshly created user
    pub async fn create_profile(
        &self,
        user_id: &str,
        profile: &NewProfile,
    ) -> Result<Profile, AppwriteError> {
        let created_at = chrono::Utc::now();
        let payload = json!({
            "documentId": user_id,
            "data": {
                "name": profile.name,
                "email": profile.email,
                "major": profile.major,
                "role": profile.role,
                "interests": profile.interests,
                "createdAt": created_at,
            },
        });

        let response = self
            .authorized(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .await?;

        let json = expect_success(response, "create profile").await?;
        parse_profile(&json)
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, AppwriteError> {
        let url = format!("{}/{}", self.documents_url(), urlencoding::encode(user_id));

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.authorized(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Profile not found for user {}", user_id)));
        }
        let json = expect_success(response, "fetch profile").await?;
        parse_profile(&json)
    }

    /// Replace the survey stored on a profile
    pub async fn update_survey(&self, user_id: &str, survey: &Survey) -> Result<Profile, AppwriteError> {
        let url = format!("{}/{}", self.documents_url(), urlencoding::encode(user_id));

        let response = self
            .authorized(self.client.patch(&url))
            .json(&json!({ "data": { "survey": survey } }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Profile not found for user {}", user_id)));
        }
        let json = expect_success(response, "update survey").await?;
        parse_profile(&json)
    }

    /// List every profile with the mentor role
    ///
    /// Pages through the collection `page_size` documents at a time until the
    /// reported total is reached. A document that cannot be read as a profile
    /// fails the whole listing.
    pub async fn list_mentors(&self, page_size: usize) -> Result<Vec<Profile>, AppwriteError> {
        let page_size = page_size.max(1);
        let mut mentors = Vec::new();
        let mut offset = 0usize;

        loop {
            let queries = [
                json!({ "method": "equal", "attribute": "role", "values": [Role::Mentor.as_str()] }),
                json!({ "method": "limit", "values": [page_size] }),
                json!({ "method": "offset", "values": [offset] }),
            ];

            let query_string = queries
                .iter()
                .map(|q| format!("queries[]={}", urlencoding::encode(&q.to_string())))
                .collect::<Vec<_>>()
                .join("&");

            let full_url = format!("{}?{}", self.documents_url(), query_string);

            let response = self.authorized(self.client.get(&full_url)).send().await?;
            let json = expect_success(response, "list mentors").await?;

            let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0) as usize;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            for doc in documents {
                let profile = parse_profile(doc)?;
                if profile.role == Role::Mentor {
                    mentors.push(profile);
                }
            }

            offset += documents.len();
            tracing::debug!("Fetched {} of {} mentor documents", offset, total);

            if documents.is_empty() || offset >= total {
                break;
            }
        }

        Ok(mentors)
    }
}

/// Turn a non-2xx response into an error, otherwise return its JSON body
async fn expect_success(response: Response, action: &str) -> Result<Value, AppwriteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Appwrite {} failed: {} - {}", action, status, body);
        return Err(AppwriteError::ApiError(format!("Failed to {}: {}", action, status)));
    }

    Ok(response.json().await?)
}

/// Extract a profile from an Appwrite document
fn parse_profile(doc: &Value) -> Result<Profile, AppwriteError> {
    let data = doc.get("data").unwrap_or(doc);

    serde_json::from_value(data.clone())
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
}
