use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a single blog entry.
///
/// `pub_date` is stamped once at creation and never updated; `author_id`
/// is immutable for the lifetime of the post. Ids come from an
/// auto-increment sequence, which makes descending id a stable
/// insertion-order tie-break when feeds sort by `pub_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<i64>,
}

impl Post {
    /// Short excerpt used when a post shows up in logs.
    pub fn preview(&self) -> &str {
        match self.text.char_indices().nth(15) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// A post not yet persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_text() {
        let post = Post {
            id: 1,
            text: "a rather long post body that keeps going".to_string(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            group_id: None,
        };
        assert_eq!(post.preview(), "a rather long p");
    }

    #[test]
    fn preview_keeps_short_text_whole() {
        let post = Post {
            id: 1,
            text: "short".to_string(),
            pub_date: Utc::now(),
            author_id: Uuid::new_v4(),
            group_id: None,
        };
        assert_eq!(post.preview(), "short");
    }
}
