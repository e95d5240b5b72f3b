use crate::{
    error::AppError,
    models::{Comment, NewComment},
    routes::parse_id,
    storage::ContentStore,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

pub async fn list_comments(
    State(store): State<Arc<dyn ContentStore>>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let post_id = parse_id(&post_id)?;
    let comments = store.comments(post_id).await?;
    Ok(Json(comments))
}

pub async fn add_comment(
    State(store): State<Arc<dyn ContentStore>>,
    Path(post_id): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let post_id = parse_id(&post_id)?;
    let Json(new) =
        payload.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

    let comment = store.add_comment(post_id, new).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[derive(Deserialize)]
pub struct RemoveCommentParams {
    #[serde(rename = "commentId")]
    comment_id: Option<String>,
}

pub async fn remove_comment(
    State(store): State<Arc<dyn ContentStore>>,
    Path(post_id): Path<String>,
    Query(params): Query<RemoveCommentParams>,
) -> Result<StatusCode, AppError> {
    let post_id = parse_id(&post_id)?;
    let comment_id = params
        .comment_id
        .as_deref()
        .ok_or_else(|| AppError::invalid_input("commentId query parameter is required"))?;
    let comment_id = parse_id(comment_id)?;

    store.remove_comment(post_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
