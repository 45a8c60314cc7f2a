//! Feed handlers - global, group and profile listings.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::ports::FeedScope;
use yatube_shared::dto::{FeedResponse, GroupResponse};

use crate::handlers::{page_meta, post_dto, user_dto};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    page: Option<String>,
}

/// A bad page value is treated as page 1; out-of-range numbers are
/// clamped downstream. Feed pages never hard-fail on pagination input.
fn requested_page(query: &FeedQuery) -> u64 {
    query
        .page
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1)
}

/// GET / - the global feed, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .feed
        .page(FeedScope::Global, requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        group: None,
        author: None,
        page: page_meta(&page),
        posts: page.items.into_iter().map(post_dto).collect(),
    }))
}

/// GET /group/{slug}/ - one group's feed.
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{slug}' not found")))?;

    let page = state
        .feed
        .page(FeedScope::Group(group.id), requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        group: Some(GroupResponse {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }),
        author: None,
        page: page_meta(&page),
        posts: page.items.into_iter().map(post_dto).collect(),
    }))
}

/// GET /profile/{username}/ - one author's feed.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    let page = state
        .feed
        .page(FeedScope::Author(user.id), requested_page(&query))
        .await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        group: None,
        author: Some(user_dto(&user)),
        page: page_meta(&page),
        posts: page.items.into_iter().map(post_dto).collect(),
    }))
}
