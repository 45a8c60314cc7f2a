//! Domain services - the request-time logic behind the HTTP surface.

mod authoring;
mod feed;
mod pagination;
mod schema;

pub use authoring::{
    AuthResult, AuthoringOutcome, AuthoringService, FormErrors, PostInput, authorize_create,
    authorize_edit, login_redirect, post_detail_path, profile_path,
};
pub use feed::FeedAssembler;
pub use pagination::{PAGE_SIZE, Page, PageBounds, locate, total_pages};
pub use schema::{FieldKind, FieldSpec, post_form};
