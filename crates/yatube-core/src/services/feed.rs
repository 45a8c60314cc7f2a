//! Feed assembly - one ordered, paginated window of posts per scope.

use std::sync::Arc;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{FeedScope, PostRepository};
use crate::services::pagination::{PAGE_SIZE, Page, locate};

/// Produces one page of posts for a scope (global / group / author).
///
/// Ordering is the repository's contract: `pub_date` descending, id
/// descending on ties. The assembler only does the page math.
#[derive(Clone)]
pub struct FeedAssembler {
    posts: Arc<dyn PostRepository>,
    page_size: u64,
}

impl FeedAssembler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            page_size: PAGE_SIZE,
        }
    }

    /// Assemble the requested page. Out-of-range page numbers clamp to
    /// the nearest valid page rather than failing.
    pub async fn page(&self, scope: FeedScope, requested: u64) -> Result<Page<Post>, DomainError> {
        let total_items = self.posts.count(scope).await?;
        let bounds = locate(total_items, self.page_size, requested);

        let items = self.posts.list(scope, bounds.offset, bounds.limit).await?;

        Ok(Page {
            items,
            number: bounds.number,
            total_pages: bounds.total_pages,
            total_items,
        })
    }
}
