//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod identity;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use identity::{Identity, IdentityProvider};
pub use repository::{FeedScope, GroupRepository, PostRepository, UserRepository};
