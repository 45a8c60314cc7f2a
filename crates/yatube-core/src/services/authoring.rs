//! Post authoring - creation and editing, gated by identity.
//!
//! Authorization never surfaces as an error page: anonymous creation is
//! redirected to login, and a non-author edit attempt is redirected to
//! the post detail view without mutating anything.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{GroupRepository, Identity, IdentityProvider, PostRepository};
use crate::services::schema;

/// Login page posts link back to after authentication.
pub const LOGIN_PATH: &str = "/auth/login/";

/// The create-post form location, used as the `next` target.
pub const CREATE_PATH: &str = "/create/";

/// Redirect to login, carrying the page the caller was after.
pub fn login_redirect(next: &str) -> String {
    format!("{LOGIN_PATH}?next={next}")
}

/// Canonical location of a post's detail view.
pub fn post_detail_path(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

/// Canonical location of an author's profile feed.
pub fn profile_path(username: &str) -> String {
    format!("/profile/{username}/")
}

/// Outcome of an authorization check, interpreted by the presentation
/// layer: proceed, bounce elsewhere, or refuse outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Allowed,
    RedirectTo(String),
    Rejected(String),
}

/// Creating a post requires an authenticated identity; anonymous
/// callers are sent to login with a return path.
pub fn authorize_create(identity: Option<&Identity>) -> AuthResult {
    match identity {
        Some(_) => AuthResult::Allowed,
        None => AuthResult::RedirectTo(login_redirect(CREATE_PATH)),
    }
}

/// Editing requires the acting identity to be the post's author; anyone
/// else is bounced to the detail view.
pub fn authorize_edit(identity: Option<&Identity>, post: &Post) -> AuthResult {
    match identity {
        Some(id) if id.user_id == post.author_id => AuthResult::Allowed,
        _ => AuthResult::RedirectTo(post_detail_path(post.id)),
    }
}

/// The submitted post form.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub text: String,
    pub group_id: Option<i64>,
}

/// Field-level validation failures, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// What the authoring service tells the presentation layer to do next.
#[derive(Debug, Clone)]
pub enum AuthoringOutcome {
    /// Persisted; follow the redirect to the canonical location.
    Saved { post: Post, redirect: String },
    /// Validation failed; re-display the form with these errors.
    Invalid { errors: FormErrors },
    /// Not allowed; bounce silently to the redirect target.
    Denied { redirect: String },
}

/// Validates and persists post creation and edits.
#[derive(Clone)]
pub struct AuthoringService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
}

impl AuthoringService {
    pub fn new(posts: Arc<dyn PostRepository>, groups: Arc<dyn GroupRepository>) -> Self {
        Self { posts, groups }
    }

    /// Create a post owned by the acting identity. On success the
    /// caller is redirected to the author's profile feed.
    pub async fn create(
        &self,
        requester: &dyn IdentityProvider,
        input: PostInput,
    ) -> Result<AuthoringOutcome, DomainError> {
        let identity = requester.current_user();
        match authorize_create(identity.as_ref()) {
            AuthResult::Allowed => {}
            AuthResult::RedirectTo(redirect) => {
                return Ok(AuthoringOutcome::Denied { redirect });
            }
            AuthResult::Rejected(reason) => return Err(DomainError::Validation(reason)),
        }
        let Some(author) = identity else {
            return Err(DomainError::Internal(
                "create allowed without an identity".to_string(),
            ));
        };

        let errors = self.validate(&input).await?;
        if !errors.is_empty() {
            return Ok(AuthoringOutcome::Invalid { errors });
        }

        let post = self
            .posts
            .create(NewPost {
                text: input.text,
                pub_date: Utc::now(),
                author_id: author.user_id,
                group_id: input.group_id,
            })
            .await?;

        Ok(AuthoringOutcome::Saved {
            redirect: profile_path(&author.username),
            post,
        })
    }

    /// Edit an existing post's text and group. Author and `pub_date`
    /// stay untouched. On success the caller is redirected to the post
    /// detail view.
    pub async fn edit(
        &self,
        requester: &dyn IdentityProvider,
        post_id: i64,
        input: PostInput,
    ) -> Result<AuthoringOutcome, DomainError> {
        let Some(post) = self.posts.find_by_id(post_id).await? else {
            return Err(DomainError::NotFound {
                entity_type: "post",
            });
        };

        let identity = requester.current_user();
        match authorize_edit(identity.as_ref(), &post) {
            AuthResult::Allowed => {}
            AuthResult::RedirectTo(redirect) => {
                return Ok(AuthoringOutcome::Denied { redirect });
            }
            AuthResult::Rejected(reason) => return Err(DomainError::Validation(reason)),
        }

        let errors = self.validate(&input).await?;
        if !errors.is_empty() {
            return Ok(AuthoringOutcome::Invalid { errors });
        }

        let updated = self
            .posts
            .update_content(post_id, input.text, input.group_id)
            .await?;

        Ok(AuthoringOutcome::Saved {
            redirect: post_detail_path(updated.id),
            post: updated,
        })
    }

    /// Run the declared form schema over the input, plus the referential
    /// check the schema itself cannot express.
    async fn validate(&self, input: &PostInput) -> Result<FormErrors, DomainError> {
        let mut errors = FormErrors::default();

        for field in schema::post_form() {
            if field.name == "text" {
                if let Some(message) = (field.validate)(&input.text) {
                    errors.add(field.name, message);
                }
            }
        }

        if let Some(group_id) = input.group_id {
            if self.groups.find_by_id(group_id).await?.is_none() {
                errors.add("group", "Select a valid group.");
            }
        }

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Group, NewGroup};
    use crate::error::RepoError;
    use crate::ports::FeedScope;

    struct MemPosts {
        posts: Mutex<Vec<Post>>,
    }

    impl MemPosts {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                posts: Mutex::new(Vec::new()),
            })
        }

        fn len(&self) -> usize {
            self.posts.lock().unwrap().len()
        }

        fn get(&self, id: i64) -> Option<Post> {
            self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
        }
    }

    #[async_trait]
    impl PostRepository for MemPosts {
        async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            let post = Post {
                id: posts.len() as i64 + 1,
                text: post.text,
                pub_date: post.pub_date,
                author_id: post.author_id,
                group_id: post.group_id,
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
            let mut posts = self.posts.lock().unwrap();
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            post.text = text;
            post.group_id = group_id;
            Ok(post.clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            Ok(self.get(id))
        }

        async fn count(&self, _scope: FeedScope) -> Result<u64, RepoError> {
            Ok(self.len() as u64)
        }

        async fn list(
            &self,
            _scope: FeedScope,
            _offset: u64,
            _limit: u64,
        ) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }
    }

    struct MemGroups(Vec<Group>);

    #[async_trait]
    impl GroupRepository for MemGroups {
        async fn create(&self, _group: NewGroup) -> Result<Group, RepoError> {
            unimplemented!("fixture is pre-seeded")
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Group>, RepoError> {
            Ok(self.0.iter().find(|g| g.id == id).cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
            Ok(self.0.iter().find(|g| g.slug == slug).cloned())
        }
    }

    struct AsUser(Option<Identity>);

    impl IdentityProvider for AsUser {
        fn current_user(&self) -> Option<Identity> {
            self.0.clone()
        }
    }

    fn alice() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
        }
    }

    fn service_with(posts: Arc<MemPosts>) -> AuthoringService {
        let groups = Arc::new(MemGroups(vec![Group {
            id: 1,
            title: "Weather".to_string(),
            slug: "weather".to_string(),
            description: "Weather talk".to_string(),
        }]));
        AuthoringService::new(posts, groups)
    }

    #[tokio::test]
    async fn anonymous_create_is_redirected_to_login() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());

        let outcome = service
            .create(
                &AsUser(None),
                PostInput {
                    text: "hello".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Denied { redirect } => {
                assert_eq!(redirect, "/auth/login/?next=/create/");
            }
            other => panic!("expected Denied, got {other:?}"),
        }
        assert_eq!(posts.len(), 0);
    }

    #[tokio::test]
    async fn blank_text_is_a_form_error_not_a_failure() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());

        let outcome = service
            .create(
                &AsUser(Some(alice())),
                PostInput {
                    text: "   ".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Invalid { errors } => {
                let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
                assert_eq!(fields, vec!["text"]);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(posts.len(), 0);
    }

    #[tokio::test]
    async fn create_stamps_author_and_redirects_to_profile() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());
        let author = alice();

        let outcome = service
            .create(
                &AsUser(Some(author.clone())),
                PostInput {
                    text: "first post".to_string(),
                    group_id: Some(1),
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Saved { post, redirect } => {
                assert_eq!(redirect, "/profile/alice/");
                assert_eq!(post.author_id, author.user_id);
                assert_eq!(post.group_id, Some(1));
            }
            other => panic!("expected Saved, got {other:?}"),
        }
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn unknown_group_is_a_form_error() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());

        let outcome = service
            .create(
                &AsUser(Some(alice())),
                PostInput {
                    text: "hello".to_string(),
                    group_id: Some(42),
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Invalid { errors } => {
                assert!(errors.iter().any(|(f, _)| f == "group"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(posts.len(), 0);
    }

    #[tokio::test]
    async fn non_author_edit_is_a_silent_redirect() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());
        let author = alice();

        service
            .create(
                &AsUser(Some(author)),
                PostInput {
                    text: "original".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap();

        let stranger = Identity {
            user_id: Uuid::new_v4(),
            username: "mallory".to_string(),
        };
        let outcome = service
            .edit(
                &AsUser(Some(stranger)),
                1,
                PostInput {
                    text: "hijacked".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Denied { redirect } => assert_eq!(redirect, "/posts/1/"),
            other => panic!("expected Denied, got {other:?}"),
        }
        assert_eq!(posts.get(1).unwrap().text, "original");
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn author_edit_replaces_text_and_keeps_pub_date() {
        let posts = MemPosts::new();
        let service = service_with(posts.clone());
        let author = alice();

        service
            .create(
                &AsUser(Some(author.clone())),
                PostInput {
                    text: "original".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap();
        let before = posts.get(1).unwrap();

        let outcome = service
            .edit(
                &AsUser(Some(author)),
                1,
                PostInput {
                    text: "revised".to_string(),
                    group_id: Some(1),
                },
            )
            .await
            .unwrap();

        match outcome {
            AuthoringOutcome::Saved { post, redirect } => {
                assert_eq!(redirect, "/posts/1/");
                assert_eq!(post.text, "revised");
                assert_eq!(post.pub_date, before.pub_date);
                assert_eq!(post.author_id, before.author_id);
            }
            other => panic!("expected Saved, got {other:?}"),
        }
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn editing_a_missing_post_is_not_found() {
        let service = service_with(MemPosts::new());

        let err = service
            .edit(
                &AsUser(Some(alice())),
                404,
                PostInput {
                    text: "whatever".to_string(),
                    group_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
