use crate::error::AppError;
use crate::models::{Comment, NewComment, Post, PostFields};
use crate::storage::ContentStore;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// In-memory store for demos and tests. State lives behind one async lock;
/// identities are handed out from simple counters and are never reused.
pub struct MemoryStore {
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    next_post_id: i64,
    next_comment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                posts: Vec::new(),
                comments: Vec::new(),
                next_post_id: 1,
                next_comment_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn create_post(&self, fields: PostFields) -> Result<Post, AppError> {
        if fields.is_empty() {
            return Err(AppError::invalid_input(
                "post payload must contain at least one field",
            ));
        }

        let mut state = self.inner.write().await;
        let id = state.next_post_id;
        state.next_post_id += 1;

        let post = Post {
            id,
            title: fields.title,
            content: fields.content,
            image_location: fields.image_location,
            views: fields.views.unwrap_or(0),
            created_at: Utc::now(),
            image_id: fields.image_id,
        };
        state.posts.push(post.clone());

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.inner.read().await.posts.clone())
    }

    async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.inner
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update_post(&self, id: i64, fields: PostFields) -> Result<Post, AppError> {
        if fields.is_empty() {
            return Err(AppError::invalid_input(
                "update payload must contain at least one field",
            ));
        }

        let mut state = self.inner.write().await;
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(v) = fields.title {
            post.title = Some(v);
        }
        if let Some(v) = fields.content {
            post.content = Some(v);
        }
        if let Some(v) = fields.image_location {
            post.image_location = Some(v);
        }
        if let Some(v) = fields.image_id {
            post.image_id = Some(v);
        }
        if let Some(v) = fields.views {
            post.views = v;
        }

        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.inner.write().await;
        state.posts.retain(|p| p.id != id);
        state.comments.retain(|c| c.post_id != id);
        Ok(())
    }

    async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let state = self.inner.read().await;
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(AppError::NotFound);
        }
        Ok(state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn add_comment(&self, post_id: i64, new: NewComment) -> Result<Comment, AppError> {
        let mut state = self.inner.write().await;
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(AppError::NotFound);
        }

        let id = state.next_comment_id;
        state.next_comment_id += 1;

        let comment = Comment {
            id,
            post_id,
            author: new.author,
            content: new.content,
            created_at: Utc::now(),
        };
        state.comments.push(comment.clone());

        Ok(comment)
    }

    async fn remove_comment(&self, post_id: i64, comment_id: i64) -> Result<(), AppError> {
        let mut state = self.inner.write().await;
        if !state.posts.iter().any(|p| p.id == post_id) {
            return Err(AppError::NotFound);
        }
        state
            .comments
            .retain(|c| !(c.post_id == post_id && c.id == comment_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: Option<&str>, content: Option<&str>) -> PostFields {
        PostFields {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_positive_identity_and_keeps_fields() {
        let store = MemoryStore::new();
        let post = store
            .create_post(fields(Some("A"), Some("B")))
            .await
            .unwrap();

        assert!(post.id > 0);
        assert_eq!(post.title.as_deref(), Some("A"));
        assert_eq!(post.content.as_deref(), Some("B"));
        assert_eq!(post.views, 0);
    }

    #[tokio::test]
    async fn create_rejects_empty_payload() {
        let store = MemoryStore::new();
        let err = store.create_post(PostFields::default()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn get_after_create_returns_same_record() {
        let store = MemoryStore::new();
        let created = store
            .create_post(fields(Some("A"), Some("B")))
            .await
            .unwrap();
        let fetched = store.get_post(created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_exactly_the_supplied_fields() {
        let store = MemoryStore::new();
        let post = store
            .create_post(fields(Some("A"), Some("B")))
            .await
            .unwrap();

        let updated = store
            .update_post(post.id, fields(Some("A2"), None))
            .await
            .unwrap();

        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title.as_deref(), Some("A2"));
        assert_eq!(updated.content.as_deref(), Some("B"));
        assert_eq!(updated.created_at, post.created_at);

        let refreshed = store.get_post(post.id).await.unwrap();
        assert_eq!(refreshed, updated);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_post(42, fields(Some("A"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let post = store.create_post(fields(Some("A"), None)).await.unwrap();

        store.delete_post(post.id).await.unwrap();
        let err = store.get_post(post.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_is_idempotent_successful() {
        let store = MemoryStore::new();
        store.delete_post(999).await.unwrap();
    }

    #[tokio::test]
    async fn comment_round_trip() {
        let store = MemoryStore::new();
        let post = store.create_post(fields(Some("A"), None)).await.unwrap();

        let comment = store
            .add_comment(
                post.id,
                NewComment {
                    author: Some("Jane".to_owned()),
                    content: Some("Nice".to_owned()),
                },
            )
            .await
            .unwrap();
        assert_eq!(comment.post_id, post.id);

        let listed = store.comments(post.id).await.unwrap();
        assert_eq!(listed, vec![comment.clone()]);

        store.remove_comment(post.id, comment.id).await.unwrap();
        assert!(store.comments(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_operations_on_missing_post_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.comments(1).await.unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            store
                .add_comment(
                    1,
                    NewComment {
                        author: None,
                        content: None
                    }
                )
                .await
                .unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            store.remove_comment(1, 1).await.unwrap_err(),
            AppError::NotFound
        ));
    }

    #[tokio::test]
    async fn deleting_a_post_drops_its_comments() {
        let store = MemoryStore::new();
        let post = store.create_post(fields(Some("A"), None)).await.unwrap();
        store
            .add_comment(
                post.id,
                NewComment {
                    author: None,
                    content: Some("orphan?".to_owned()),
                },
            )
            .await
            .unwrap();

        store.delete_post(post.id).await.unwrap();

        let other = store.create_post(fields(Some("B"), None)).await.unwrap();
        assert!(store.comments(other.id).await.unwrap().is_empty());
    }
}
