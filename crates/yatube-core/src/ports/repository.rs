use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, NewGroup, NewPost, Post, User};
use crate::error::RepoError;

/// Which posts qualify for a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post, newest first.
    Global,
    /// Posts assigned to one group.
    Group(i64),
    /// Posts owned by one author.
    Author(Uuid),
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with a constraint error on a taken
    /// username or email.
    async fn create(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository. Creation is administrative; groups are never
/// deleted through the request surface.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create(&self, group: NewGroup) -> Result<Group, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;
}

/// Post repository.
///
/// `list` must order strictly by `pub_date` descending with descending
/// id as the tie-break, so pagination stays stable across requests.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace text and group assignment. Author and `pub_date` are
    /// immutable and must not be touched.
    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Number of posts matching the scope.
    async fn count(&self, scope: FeedScope) -> Result<u64, RepoError>;

    /// One window of the scoped, ordered feed.
    async fn list(&self, scope: FeedScope, offset: u64, limit: u64)
    -> Result<Vec<Post>, RepoError>;
}
