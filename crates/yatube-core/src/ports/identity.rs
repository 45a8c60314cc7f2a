//! The authenticated identity supplied by the outer layer.

use uuid::Uuid;

/// An authenticated user reference, as seen by the domain services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

/// Supplies the identity acting on the current request, if any.
///
/// Handlers pass this in explicitly; the domain never reaches for
/// ambient session state.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<Identity>;
}
