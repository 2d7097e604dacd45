//! Post handlers - list, write, read, remove and update.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;

use scribe_core::DomainError;
use scribe_core::domain::{Page, Post, PostId};
use scribe_core::validation::validate_post;
use scribe_shared::dto::PostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Response header carrying the number of the last page.
pub const LAST_PAGE_HEADER: &str = "Last-Page";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_hex(),
        title: post.title,
        body: post.body,
        tags: post.tags,
        published_date: post.published_date,
    }
}

fn not_found(id: PostId) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id: id.to_string(),
    }
    .into()
}

/// GET /api/posts?page=N
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::parse(query.page.as_deref())?;

    let posts = state.posts.find_page(page.skip(), page.limit()).await?;
    let total = state.posts.count().await?;

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| to_response(post).summarized())
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header((LAST_PAGE_HEADER, Page::last_page(total).to_string()))
        .json(body))
}

/// POST /api/posts
pub async fn write(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let draft = validate_post(&payload)?;

    let post = state.posts.insert(Post::new(draft)).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn read(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id: PostId = path.parse()?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn remove(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id: PostId = path.parse()?;

    state.posts.delete_by_id(id).await?;
    tracing::info!(post_id = %id, "Post removed");

    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /api/posts/{id} - replaces title, body and tags.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let id: PostId = path.parse()?;
    let draft = validate_post(&payload)?;

    let post = state
        .posts
        .update_by_id(id, draft)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(post)))
}
