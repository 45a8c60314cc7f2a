//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to sign up a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to start a password reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

/// A group as shown on its feed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post as listed in feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

/// Pagination metadata accompanying every feed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One feed page. Group and author are present when the feed is scoped
/// to one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub posts: Vec<PostResponse>,
    pub page: PageMeta,
}

/// The single-post detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub author: UserResponse,
}

/// The submitted post form: text plus an optional group id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormRequest {
    pub text: String,
    #[serde(default)]
    pub group: Option<i64>,
}

/// One declared field of the authoring form, for clients that render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldResponse {
    pub name: String,
    pub kind: String,
    pub required: bool,
}

/// The authoring form as served by GET /create/ and GET /posts/{id}/edit/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub fields: Vec<FormFieldResponse>,
    /// Current values when editing an existing post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<PostFormRequest>,
}

/// Form re-display payload: the submitted values plus per-field errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInvalidResponse {
    pub values: PostFormRequest,
    pub errors: BTreeMap<String, Vec<String>>,
}
