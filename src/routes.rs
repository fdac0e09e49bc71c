use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::{
    AppState,
    entities::{content, review},
    error::{AppError, AppResult},
    models::{
        ContentDetail, ContentListQuery, ContentWithStats, CreateReviewRequest, NewContent,
        ReviewListQuery, ReviewWithContent, SearchQuery, UpdateReviewRequest, validate_rating,
    },
};

pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<NewContent>>> {
    let query = q.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query is required".to_string()));
    }
    Ok(Json(state.tmdb.search(query).await?))
}

pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<NewContent>>> {
    let query = q.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query is required".to_string()));
    }
    Ok(Json(state.books.search(query).await?))
}

pub async fn create_content(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewContent>,
) -> AppResult<Json<content::Model>> {
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    let created = state.store.insert_content(&body).await?;
    tracing::info!(id = created.id, kind = %created.kind, title = %created.title, "content created");
    Ok(Json(created))
}

pub async fn list_contents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentListQuery>,
) -> AppResult<Json<Vec<ContentWithStats>>> {
    Ok(Json(state.store.list_contents(&query).await?))
}

pub async fn content_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<ContentDetail>> {
    let detail = state.store.content_detail(id).await?.ok_or(AppError::NotFound("content"))?;
    Ok(Json(detail))
}

pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.store.delete_content(id).await? {
        return Err(AppError::NotFound("content"));
    }
    tracing::info!(id, "content deleted");
    Ok(Json(json!({ "message": "content deleted" })))
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    let (Some(content_id), Some(rating)) = (body.content_id, body.rating) else {
        return Err(AppError::Validation("content_id and rating are required".to_string()));
    };
    validate_rating(rating)?;

    let created = state
        .store
        .insert_review(content_id, rating, body.one_liner, body.detailed_review)
        .await?;
    tracing::info!(id = created.id, content_id, rating, "review created");
    Ok(Json(created))
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<Json<Vec<ReviewWithContent>>> {
    Ok(Json(state.store.list_reviews(&query).await?))
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    let Some(rating) = body.rating else {
        return Err(AppError::Validation("rating is required".to_string()));
    };
    validate_rating(rating)?;

    let updated = state
        .store
        .update_review(id, rating, body.one_liner, body.detailed_review)
        .await?
        .ok_or(AppError::NotFound("review"))?;
    Ok(Json(updated))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.store.delete_review(id).await? {
        return Err(AppError::NotFound("review"));
    }
    tracing::info!(id, "review deleted");
    Ok(Json(json!({ "message": "review deleted" })))
}
