use serde::{Deserialize, Serialize};

/// Group entity - a topical collection posts can be assigned to.
///
/// Groups are created administratively and never deleted in normal
/// operation; the slug is the unique, URL-safe handle a group feed is
/// addressed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A group not yet persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}
