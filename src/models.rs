use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_location: Option<String>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The writable columns of a post. Create and update both take this shape;
/// only the fields that are present are written, and unknown keys are
/// rejected at deserialization so request payloads can never reach the
/// column list of a statement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_location: Option<String>,
    pub image_id: Option<String>,
    pub views: Option<i32>,
}

impl PostFields {
    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// The column names of the supplied fields, in declaration order.
    /// Bind order in the storage backends must match.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = Vec::new();
        if self.title.is_some() {
            cols.push("title");
        }
        if self.content.is_some() {
            cols.push("content");
        }
        if self.image_location.is_some() {
            cols.push("image_location");
        }
        if self.image_id.is_some() {
            cols.push("image_id");
        }
        if self.views.is_some() {
            cols.push("views");
        }
        cols
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub author: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaLink {
    pub id: i32,
    pub url: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteIcon {
    pub id: i32,
    pub name: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_fields_reject_unknown_keys() {
        let err = serde_json::from_str::<PostFields>(r#"{"title": "A", "admin": true}"#);
        assert!(err.is_err());
    }

    #[test]
    fn post_fields_columns_follow_declaration_order() {
        let fields: PostFields =
            serde_json::from_str(r#"{"views": 3, "title": "A", "image_id": "img-1"}"#).unwrap();
        assert_eq!(fields.columns(), vec!["title", "image_id", "views"]);
        assert!(!fields.is_empty());
    }

    #[test]
    fn empty_payload_has_no_columns() {
        let fields: PostFields = serde_json::from_str("{}").unwrap();
        assert!(fields.is_empty());
    }
}
