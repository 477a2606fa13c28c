// /blog-posts - article endpoints

use super::error::{parse_id, parse_limit, ApiError, OrInternal};
use super::AppState;
use crate::entities::{BlogPost, BlogPostPatch, NewBlogPost};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::instrument;

const INVALID_ID: &str = "Invalid blog post ID";
const NOT_FOUND: &str = "Blog post not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blog_posts).post(create_blog_post))
        .route("/category/:category", get(blog_posts_by_category))
        .route("/featured", get(featured_blog_posts))
        .route("/featured/:limit", get(featured_blog_posts))
        .route(
            "/:id",
            get(get_blog_post).put(update_blog_post).delete(delete_blog_post),
        )
}

async fn list_blog_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state
        .storage
        .get_all_blog_posts()
        .or_internal("Failed to fetch blog posts")?;
    Ok(Json(posts))
}

async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .get_blog_post(id)
        .or_internal("Failed to fetch blog post")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// Category is free text: an unknown category is an empty list, not an error
async fn blog_posts_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state
        .storage
        .get_blog_posts_by_category(&category)
        .or_internal("Failed to fetch blog posts by category")?;
    Ok(Json(posts))
}

async fn featured_blog_posts(
    State(state): State<AppState>,
    limit: Option<Path<String>>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let limit = parse_limit(limit.as_ref().map(|Path(raw)| raw.as_str()))?;

    let posts = state
        .storage
        .get_featured_blog_posts(limit)
        .or_internal("Failed to fetch featured blog posts")?;
    Ok(Json(posts))
}

#[instrument(skip_all)]
async fn create_blog_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let Json(input) = payload?;
    let new = NewBlogPost::from_json(&input)?;

    let post = state
        .storage
        .create_blog_post(new)
        .or_internal("Failed to create blog post")?;
    tracing::info!(id = post.id, "blog post published");
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state, payload))]
async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_id(&id, INVALID_ID)?;
    let Json(input) = payload?;
    let patch = BlogPostPatch::from_json(&input)?;
    let Some(id) = id else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .update_blog_post(id, patch)
        .or_internal("Failed to update blog post")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

#[instrument(skip(state))]
async fn delete_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    match state
        .storage
        .delete_blog_post(id)
        .or_internal("Failed to delete blog post")?
    {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(ApiError::NotFound(NOT_FOUND)),
    }
}
