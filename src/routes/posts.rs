use crate::{
    error::AppError,
    models::{Post, PostFields},
    routes::parse_id,
    storage::ContentStore,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn create_post(
    State(store): State<Arc<dyn ContentStore>>,
    payload: Result<Json<PostFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let Json(fields) =
        payload.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

    let post = store.create_post(fields).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_posts(
    State(store): State<Arc<dyn ContentStore>>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = store.list_posts().await?;
    Ok(Json(posts))
}

pub async fn get_one_post(
    State(store): State<Arc<dyn ContentStore>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id)?;
    let post = store.get_post(id).await?;
    Ok(Json(post))
}

pub async fn update_post(
    State(store): State<Arc<dyn ContentStore>>,
    Path(id): Path<String>,
    payload: Result<Json<PostFields>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&id)?;
    let Json(fields) =
        payload.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

    let post = store.update_post(id, fields).await?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(store): State<Arc<dyn ContentStore>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;
    store.delete_post(id).await?;
    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
