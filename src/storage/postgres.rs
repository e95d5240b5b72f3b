use crate::error::AppError;
use crate::models::{Comment, NewComment, Post, PostFields};
use crate::storage::ContentStore;
use async_trait::async_trait;
use sqlx::PgPool;

const POST_COLUMNS: &str = "id, title, content, image_location, views, created_at, image_id";
const COMMENT_COLUMNS: &str = "id, post_id, author, content, created_at";

/// Postgres-backed store. `ready` reflects whether the schema bootstrap
/// succeeded at startup; when it did not, every call fails fast instead of
/// surfacing a driver error from a missing table.
pub struct PostgresStore {
    pool: PgPool,
    ready: bool,
}

impl PostgresStore {
    pub fn new(pool: PgPool, ready: bool) -> Self {
        Self { pool, ready }
    }

    fn ensure_ready(&self) -> Result<(), AppError> {
        if self.ready {
            Ok(())
        } else {
            Err(AppError::StorageUnavailable(
                "schema bootstrap failed at startup".to_owned(),
            ))
        }
    }
}

/// INSERT over exactly the supplied allow-listed columns, returning the
/// stored row. Placeholders are positional and must be bound in the same
/// order as `PostFields::columns`.
fn insert_sql(cols: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO posts ({}) VALUES ({}) RETURNING {}",
        cols.join(", "),
        placeholders.join(", "),
        POST_COLUMNS
    )
}

/// UPDATE over exactly the supplied allow-listed columns; the identity is
/// the final placeholder.
fn update_sql(cols: &[&str]) -> String {
    let assignments: Vec<String> = cols
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ${}", col, i + 1))
        .collect();
    format!(
        "UPDATE posts SET {} WHERE id = ${}",
        assignments.join(", "),
        cols.len() + 1
    )
}

#[async_trait]
impl ContentStore for PostgresStore {
    async fn create_post(&self, fields: PostFields) -> Result<Post, AppError> {
        self.ensure_ready()?;

        let cols = fields.columns();
        if cols.is_empty() {
            return Err(AppError::invalid_input(
                "post payload must contain at least one field",
            ));
        }

        let sql = insert_sql(&cols);
        let mut query = sqlx::query_as::<_, Post>(&sql);
        if let Some(v) = &fields.title {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.content {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.image_location {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.image_id {
            query = query.bind(v.as_str());
        }
        if let Some(v) = fields.views {
            query = query.bind(v);
        }

        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.ensure_ready()?;

        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, image_location, views, created_at, image_id FROM posts",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.ensure_ready()?;

        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, image_location, views, created_at, image_id
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(post)
    }

    async fn update_post(&self, id: i64, fields: PostFields) -> Result<Post, AppError> {
        self.ensure_ready()?;

        let cols = fields.columns();
        if cols.is_empty() {
            return Err(AppError::invalid_input(
                "update payload must contain at least one field",
            ));
        }

        let sql = update_sql(&cols);
        let mut query = sqlx::query(&sql);
        if let Some(v) = &fields.title {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.content {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.image_location {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &fields.image_id {
            query = query.bind(v.as_str());
        }
        if let Some(v) = fields.views {
            query = query.bind(v);
        }
        query.bind(id).execute(&self.pool).await?;

        // A missing row falls out of the refresh as NotFound.
        self.get_post(id).await
    }

    async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        self.ensure_ready()?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        self.get_post(post_id).await?;

        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author, content, created_at
             FROM comments WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn add_comment(&self, post_id: i64, new: NewComment) -> Result<Comment, AppError> {
        self.get_post(post_id).await?;

        let sql = format!(
            "INSERT INTO comments (post_id, author, content) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(post_id)
            .bind(&new.author)
            .bind(&new.content)
            .fetch_one(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn remove_comment(&self, post_id: i64, comment_id: i64) -> Result<(), AppError> {
        self.get_post(post_id).await?;

        sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2")
            .bind(comment_id)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn insert_sql_uses_exactly_the_supplied_columns() {
        let sql = insert_sql(&["title", "content"]);
        assert_eq!(
            sql,
            "INSERT INTO posts (title, content) VALUES ($1, $2) RETURNING \
             id, title, content, image_location, views, created_at, image_id"
        );
    }

    #[test]
    fn insert_sql_single_column() {
        let sql = insert_sql(&["image_id"]);
        assert!(sql.starts_with("INSERT INTO posts (image_id) VALUES ($1) RETURNING"));
    }

    #[test]
    fn update_sql_places_identity_last() {
        let sql = update_sql(&["title", "views"]);
        assert_eq!(sql, "UPDATE posts SET title = $1, views = $2 WHERE id = $3");
    }

    #[tokio::test]
    async fn not_ready_store_fails_fast() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let store = PostgresStore::new(pool, false);

        let err = store.list_posts().await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        let err = store.delete_post(1).await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
