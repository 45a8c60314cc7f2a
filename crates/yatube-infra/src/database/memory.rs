//! In-memory repositories - used as fallback when the database is not
//! configured, and by tests.
//!
//! Note: data is lost on process restart.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Group, NewGroup, NewPost, Post, User};
use yatube_core::error::RepoError;
use yatube_core::ports::{FeedScope, GroupRepository, PostRepository, UserRepository};

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    groups: RwLock<Vec<Group>>,
    next_id: AtomicI64,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryGroupRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn create(&self, new_group: NewGroup) -> Result<Group, RepoError> {
        let mut groups = self.groups.write().await;
        if groups.iter().any(|g| g.slug == new_group.slug) {
            return Err(RepoError::Constraint("slug already taken".to_string()));
        }
        let group = Group {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: new_group.title,
            slug: new_group.slug,
            description: new_group.description,
        };
        groups.push(group.clone());
        Ok(group)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|g| g.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|g| g.slug == slug).cloned())
    }
}

/// In-memory post repository. Feed ordering matches the Postgres
/// implementation: `pub_date` descending, id descending on ties.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn matches_scope(post: &Post, scope: FeedScope) -> bool {
        match scope {
            FeedScope::Global => true,
            FeedScope::Group(group_id) => post.group_id == Some(group_id),
            FeedScope::Author(author_id) => post.author_id == author_id,
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            text: new_post.text,
            pub_date: new_post.pub_date,
            author_id: new_post.author_id,
            group_id: new_post.group_id,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.text = text;
        post.group_id = group_id;
        Ok(post.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self, scope: FeedScope) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| Self::matches_scope(p, scope)).count() as u64)
    }

    async fn list(
        &self,
        scope: FeedScope,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let mut matching: Vec<Post> = posts
            .iter()
            .filter(|p| Self::matches_scope(p, scope))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;

    fn new_post(text: &str, author_id: Uuid, group_id: Option<i64>) -> NewPost {
        NewPost {
            text: text.to_string(),
            pub_date: Utc::now(),
            author_id,
            group_id,
        }
    }

    #[tokio::test]
    async fn posts_come_back_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let base = Utc::now();

        for (i, offset) in [1i64, 2, 3].iter().enumerate() {
            repo.create(NewPost {
                text: format!("post {}", i + 1),
                pub_date: base + TimeDelta::seconds(*offset),
                author_id: author,
                group_id: None,
            })
            .await
            .unwrap();
        }

        let feed = repo.list(FeedScope::Global, 0, 10).await.unwrap();
        let texts: Vec<&str> = feed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["post 3", "post 2", "post 1"]);
    }

    #[tokio::test]
    async fn equal_timestamps_fall_back_to_insertion_order() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let moment = Utc::now();

        for text in ["first", "second"] {
            repo.create(NewPost {
                text: text.to_string(),
                pub_date: moment,
                author_id: author,
                group_id: None,
            })
            .await
            .unwrap();
        }

        let feed = repo.list(FeedScope::Global, 0, 10).await.unwrap();
        assert_eq!(feed[0].text, "second");
        assert_eq!(feed[1].text, "first");
    }

    #[tokio::test]
    async fn group_scopes_are_disjoint() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();

        repo.create(new_post("weather talk", author, Some(1)))
            .await
            .unwrap();
        repo.create(new_post("ungrouped", author, None))
            .await
            .unwrap();

        let other_group = repo.list(FeedScope::Group(2), 0, 10).await.unwrap();
        assert!(other_group.is_empty());
        assert_eq!(repo.count(FeedScope::Group(2)).await.unwrap(), 0);

        let weather = repo.list(FeedScope::Group(1), 0, 10).await.unwrap();
        assert_eq!(weather.len(), 1);
        assert_eq!(weather[0].text, "weather talk");
    }

    #[tokio::test]
    async fn update_keeps_author_and_pub_date() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();

        let created = repo.create(new_post("before", author, None)).await.unwrap();
        let updated = repo
            .update_content(created.id, "after".to_string(), Some(5))
            .await
            .unwrap();

        assert_eq!(updated.text, "after");
        assert_eq!(updated.group_id, Some(5));
        assert_eq!(updated.author_id, created.author_id);
        assert_eq!(updated.pub_date, created.pub_date);
    }

    #[tokio::test]
    async fn username_and_slug_are_unique() {
        let users = InMemoryUserRepository::new();
        users
            .create(User::new(
                "freemirror".to_string(),
                "freemirror@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .unwrap();
        let err = users
            .create(User::new(
                "freemirror".to_string(),
                "other@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let groups = InMemoryGroupRepository::new();
        groups
            .create(NewGroup {
                title: "Weather".to_string(),
                slug: "weather".to_string(),
                description: "Weather talk".to_string(),
            })
            .await
            .unwrap();
        let err = groups
            .create(NewGroup {
                title: "Winds".to_string(),
                slug: "weather".to_string(),
                description: "Same slug".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }
}
