pub mod comments;
pub mod posts;
pub mod reference;
pub mod uploads;

use crate::AppState;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::uploads::MAX_UPLOAD_BYTES;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/posts", post_routes())
        .nest("/api/comments", comment_routes())
        .merge(upload_routes())
        .merge(reference_routes())
        .fallback(fallback)
        .with_state(state)
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::get_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_one_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        // Post bodies can carry inlined images, so the default 2 MB body
        // limit is far too small here.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}

pub fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/{post_id}",
        get(comments::list_comments)
            .post(comments::add_comment)
            .delete(comments::remove_comment),
    )
}

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/upload-image",
            // Leave headroom over the cap for multipart framing; the exact
            // 5 MiB check happens before anything is written.
            post(uploads::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024)),
        )
        .route("/api/delete-image/{filename}", delete(uploads::delete_image))
        .route("/api/uploads", get(uploads::list_uploads))
        .route("/api/uploads/{filename}", get(uploads::get_upload))
}

pub fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/api/social-media-links", get(reference::social_media_links))
        .route("/api/site-icons", get(reference::site_icons))
}

/// Unmatched routes serve the SPA shell when one is configured, otherwise a
/// plain 404.
async fn fallback(State(config): State<AppConfig>) -> Response {
    if let Some(index) = &config.spa_index {
        match tokio::fs::read_to_string(index).await {
            Ok(html) => return Html(html).into_response(),
            Err(e) => tracing::warn!("could not read SPA shell: {e}"),
        }
    }
    (StatusCode::NOT_FOUND, "Page Not Found").into_response()
}

/// Path identities must be positive integers.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid_input(format!("Invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("1024").unwrap(), 1024);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("abc").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }
}
