//! Authentication handlers.

use actix_web::{HttpResponse, web};

use yatube_core::domain::User;
use yatube_shared::dto::{
    AuthResponse, LoginRequest, PasswordResetRequest, SignupRequest, UserResponse,
};

use crate::middleware::auth::{CurrentIdentity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let mut errors = Vec::new();
    if !valid_username(&req.username) {
        errors.push("Username must be non-empty and URL-safe".to_string());
    }
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push("Invalid email address".to_string());
    }
    if req.password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Check if the username or email is already taken
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = state
        .passwords
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let user = User::new(req.username, req.email, password_hash);
    let saved = state.users.create(user).await?;

    tracing::info!(username = %saved.username, "user signed up");

    // Generate token
    let token = state
        .tokens
        .generate_token(saved.id, &saved.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by username
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Generate token
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// POST /auth/logout/ - tokens are stateless, so logout is an
/// acknowledgement; the client drops the token.
pub async fn logout(identity: OptionalIdentity) -> AppResult<HttpResponse> {
    if let Some(identity) = identity.0 {
        tracing::debug!(username = %identity.username, "user logged out");
    }
    Ok(HttpResponse::NoContent().finish())
}

/// POST /auth/password_reset/ - accepts the address and always answers
/// 202; whether the account exists is never disclosed, and delivery is
/// delegated to the mail collaborator.
pub async fn password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if state.users.find_by_email(&req.email).await?.is_some() {
        tracing::info!("password reset requested for a known address");
    }

    Ok(HttpResponse::Accepted().finish())
}

/// GET /auth/me/ - the current identity. Protected route.
pub async fn me(identity: CurrentIdentity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse {
        id: identity.0.user_id,
        username: identity.0.username,
    }))
}
