//! Post detail and authoring handlers.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};

use yatube_core::services::{
    AuthResult, AuthoringOutcome, FormErrors, PostInput, authorize_create, authorize_edit,
    post_form,
};
use yatube_shared::dto::{
    FormFieldResponse, FormInvalidResponse, PostDetailResponse, PostFormRequest, PostFormResponse,
};

use crate::handlers::{post_dto, redirect_to, user_dto};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("author of post {id} is missing")))?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        author: user_dto(&author),
        post: post_dto(post),
    }))
}

/// GET /create/ - the authoring form; anonymous callers are redirected
/// to login with a return path.
pub async fn create_form(identity: OptionalIdentity) -> AppResult<HttpResponse> {
    match authorize_create(identity.0.as_ref()) {
        AuthResult::Allowed => Ok(HttpResponse::Ok().json(form_response(None))),
        AuthResult::RedirectTo(path) => Ok(redirect_to(&path)),
        AuthResult::Rejected(reason) => Err(AppError::BadRequest(reason)),
    }
}

/// POST /create/
pub async fn create_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let input = PostInput {
        text: form.text.clone(),
        group_id: form.group,
    };

    let outcome = state.authoring.create(&identity, input).await?;
    Ok(render_outcome(form, outcome))
}

/// GET /posts/{id}/edit/ - the edit form; non-authors are bounced to
/// the post detail view.
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

    match authorize_edit(identity.0.as_ref(), &post) {
        AuthResult::Allowed => Ok(HttpResponse::Ok().json(form_response(Some(PostFormRequest {
            text: post.text,
            group: post.group_id,
        })))),
        AuthResult::RedirectTo(path) => Ok(redirect_to(&path)),
        AuthResult::Rejected(reason) => Err(AppError::BadRequest(reason)),
    }
}

/// POST /posts/{id}/edit/
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
    body: web::Json<PostFormRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = body.into_inner();
    let input = PostInput {
        text: form.text.clone(),
        group_id: form.group,
    };

    let outcome = state.authoring.edit(&identity, id, input).await?;
    Ok(render_outcome(form, outcome))
}

/// Interpret the authoring service's decision: follow the redirect on
/// success or denial, re-display the form on validation failure.
fn render_outcome(form: PostFormRequest, outcome: AuthoringOutcome) -> HttpResponse {
    match outcome {
        AuthoringOutcome::Saved { post, redirect } => {
            tracing::info!(post_id = post.id, preview = post.preview(), "post saved");
            redirect_to(&redirect)
        }
        AuthoringOutcome::Denied { redirect } => redirect_to(&redirect),
        AuthoringOutcome::Invalid { errors } => HttpResponse::UnprocessableEntity()
            .json(FormInvalidResponse {
                values: form,
                errors: collect_errors(&errors),
            }),
    }
}

fn collect_errors(errors: &FormErrors) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, message) in errors.iter() {
        map.entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }
    map
}

fn form_response(values: Option<PostFormRequest>) -> PostFormResponse {
    PostFormResponse {
        fields: post_form()
            .iter()
            .map(|field| FormFieldResponse {
                name: field.name.to_string(),
                kind: field.kind.as_str().to_string(),
                required: field.required,
            })
            .collect(),
        values,
    }
}
