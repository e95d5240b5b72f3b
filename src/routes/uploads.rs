use crate::{error::AppError, uploads::UploadManager};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Multipart upload, field `image`. The stored path in the response is
/// served by `get_upload`.
pub async fn upload_image(
    State(uploads): State<UploadManager>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::invalid_input("image field must carry a filename"))?;
        let data = field.bytes().await?;

        let stored = uploads.store(&original_name, &data).await?;
        return Ok(Json(json!({ "location": format!("/api/uploads/{stored}") })));
    }

    Err(AppError::invalid_input("multipart field `image` is required"))
}

/// Always answers 200; failures are reported in the body. Post rows
/// referencing the file are not touched.
pub async fn delete_image(
    State(uploads): State<UploadManager>,
    Path(filename): Path<String>,
) -> Json<Value> {
    match uploads.delete(&filename).await {
        Ok(()) => Json(json!({ "success": true, "message": "File deleted successfully" })),
        Err(e) => {
            tracing::warn!("failed to delete upload {filename}: {e}");
            Json(json!({ "success": false, "message": "Failed to delete file" }))
        }
    }
}

pub async fn list_uploads(
    State(uploads): State<UploadManager>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = uploads.list().await?;
    Ok(Json(names))
}

pub async fn get_upload(
    State(uploads): State<UploadManager>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = uploads.read(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
