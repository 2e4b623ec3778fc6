use chrono::{DateTime, Utc};
use garde::Validate;
use quill_core::not_blank;
use serde::Serialize;

use crate::entity::Entity;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_name: String,
    pub body: String,
    pub created_time: DateTime<Utc>,
    pub article_id: i64,
}

impl Entity for Comment {
    fn table_name() -> &'static str {
        "blog_comments"
    }

    fn label() -> &'static str {
        "Comment"
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewComment {
    #[garde(skip)]
    pub article_id: i64,
    #[garde(length(chars, min = 1, max = 100), custom(not_blank))]
    pub user_name: String,
    #[garde(length(min = 1), custom(not_blank))]
    pub body: String,
}
