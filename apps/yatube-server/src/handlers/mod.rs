//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod posts;


use actix_web::{HttpResponse, http::header, web};

use yatube_core::domain::{Post, User};
use yatube_core::services::Page;
use yatube_shared::dto::{PageMeta, PostResponse, UserResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/signup/", web::post().to(auth::signup))
                .route("/login/", web::post().to(auth::login))
                .route("/logout/", web::post().to(auth::logout))
                .route("/password_reset/", web::post().to(auth::password_reset))
                .route("/me/", web::get().to(auth::me)),
        )
        // Feeds
        .route("/", web::get().to(feed::index))
        .route("/group/{slug}/", web::get().to(feed::group_posts))
        .route("/profile/{username}/", web::get().to(feed::profile))
        // Authoring
        .route("/create/", web::get().to(posts::create_form))
        .route("/create/", web::post().to(posts::create_post))
        .route("/posts/{id}/", web::get().to(posts::post_detail))
        .route("/posts/{id}/edit/", web::get().to(posts::edit_form))
        .route("/posts/{id}/edit/", web::post().to(posts::edit_post));
}

/// 302 to the given location, the JSON-API rendition of the original
/// application's redirect flows.
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn post_dto(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        text: post.text,
        pub_date: post.pub_date,
        author_id: post.author_id,
        group_id: post.group_id,
    }
}

pub(crate) fn user_dto(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
    }
}

pub(crate) fn page_meta(page: &Page<Post>) -> PageMeta {
    PageMeta {
        number: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_previous: page.has_previous(),
        has_next: page.has_next(),
    }
}
