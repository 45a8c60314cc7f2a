//! PostgreSQL repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use yatube_core::domain::{Group, NewGroup, NewPost, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{FeedScope, GroupRepository, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn constraint_or_query(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// First character of the local part plus the domain; the rest never
/// reaches the logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let mut chars = local.chars();
            match chars.next() {
                Some(first) if chars.next().is_some() => format!("{first}***{domain}"),
                _ => format!("***{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(self.db.as_ref()).await.map_err(constraint_or_query)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL group repository.
pub struct PostgresGroupRepository {
    db: Arc<DbConn>,
}

impl PostgresGroupRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn create(&self, new_group: NewGroup) -> Result<Group, RepoError> {
        let active: group::ActiveModel = new_group.into();
        let model = active.insert(self.db.as_ref()).await.map_err(constraint_or_query)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    fn scoped(scope: FeedScope) -> Select<PostEntity> {
        let select = PostEntity::find();
        match scope {
            FeedScope::Global => select,
            FeedScope::Group(group_id) => select.filter(post::Column::GroupId.eq(group_id)),
            FeedScope::Author(author_id) => select.filter(post::Column::AuthorId.eq(author_id)),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(self.db.as_ref()).await.map_err(query_err)?;
        Ok(model.into())
    }

    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        // Only text and group change; author and pub_date stay as stored.
        let mut active = model.into_active_model();
        active.text = Set(text);
        active.group_id = Set(group_id);

        let updated = active.update(self.db.as_ref()).await.map_err(query_err)?;
        Ok(updated.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn count(&self, scope: FeedScope) -> Result<u64, RepoError> {
        Self::scoped(scope).count(self.db.as_ref()).await.map_err(query_err)
    }

    async fn list(
        &self,
        scope: FeedScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let models = Self::scoped(scope)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_masking_keeps_only_the_first_char() {
        assert_eq!(mask_email("freemirror@example.com"), "f***@example.com");
        assert_eq!(mask_email("f@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn email_masking_splits_on_char_boundaries() {
        assert_eq!(mask_email("йцук@example.com"), "й***@example.com");
        assert_eq!(mask_email("й@example.com"), "***@example.com");
    }
}
