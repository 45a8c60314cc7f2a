//! Authentication extractors.
//!
//! The Bearer token is the only place identity enters the system; both
//! extractors resolve it through the token service on `AppState` and
//! hand the domain an explicit `Identity`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use yatube_core::ports::{AuthError, Identity, IdentityProvider};

use crate::state::AppState;

/// Required-authentication extractor.
///
/// Use this in handlers that must not run anonymously:
/// ```ignore
/// async fn me(identity: CurrentIdentity) -> impl Responder {
///     format!("Hello, {}!", identity.0.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

/// Optional-authentication extractor - never fails, carries `None` for
/// anonymous requests. Implements the domain's `IdentityProvider` port
/// so handlers can pass it straight into the authoring service.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl IdentityProvider for OptionalIdentity {
    fn current_user(&self) -> Option<Identity> {
        self.0.clone()
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use yatube_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            _ => ErrorResponse::unauthorized(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state,
        None => {
            tracing::error!("AppState not found in app data");
            return Err(AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            )));
        }
    };

    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingAuth))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        AuthenticationError(AuthError::InvalidToken(
            "Invalid authorization header".to_string(),
        ))
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AuthenticationError(AuthError::InvalidToken(
            "Expected Bearer token".to_string(),
        ))
    })?;

    let claims = state
        .tokens
        .validate_token(token)
        .map_err(AuthenticationError)?;

    Ok(Identity {
        user_id: claims.user_id,
        username: claims.username,
    })
}

impl FromRequest for CurrentIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req).map(CurrentIdentity))
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(identity_from_request(req).ok())))
    }
}
