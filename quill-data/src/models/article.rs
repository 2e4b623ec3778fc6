use chrono::{DateTime, Utc};
use garde::Validate;
use quill_core::not_blank;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Publication state of an article. Only `Published` articles are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Markdown source.
    pub body: String,
    pub created_time: DateTime<Utc>,
    pub last_modified_time: DateTime<Utc>,
    pub status: ArticleStatus,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub views: u32,
    pub likes: u32,
    /// Shown with a pin badge. Does not affect listing order.
    pub topped: bool,
    pub category_id: Option<i64>,
    /// Name of the referenced category, joined in by every article query.
    pub category_name: Option<String>,
}

impl Entity for Article {
    fn table_name() -> &'static str {
        "articles"
    }

    fn label() -> &'static str {
        "Article"
    }
}

/// Validated input for creating an article. Timestamps and counters are
/// always set by the repository.
#[derive(Debug, Clone, Validate)]
pub struct NewArticle {
    #[garde(length(chars, min = 1, max = 100), custom(not_blank))]
    pub title: String,
    #[garde(skip)]
    pub body: String,
    #[garde(skip)]
    pub status: ArticleStatus,
    #[garde(length(chars, max = 54))]
    pub summary: Option<String>,
    #[garde(skip)]
    pub topped: bool,
    #[garde(skip)]
    pub category_id: Option<i64>,
    #[garde(skip)]
    pub tag_ids: Vec<i64>,
}

impl NewArticle {
    /// A draft with the given title and body and every other field empty.
    pub fn draft(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            status: ArticleStatus::Draft,
            summary: None,
            topped: false,
            category_id: None,
            tag_ids: Vec::new(),
        }
    }

    /// Like [`draft`](Self::draft), but published.
    pub fn published(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status: ArticleStatus::Published,
            ..Self::draft(title, body)
        }
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Partial update of an article; `None` keeps the stored value.
///
/// `summary` and `category_id` are doubly optional so they can be cleared
/// with `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<ArticleStatus>,
    pub summary: Option<Option<String>>,
    pub topped: Option<bool>,
    pub category_id: Option<Option<i64>>,
}

impl ArticleChanges {
    pub(crate) fn apply(self, existing: Article) -> NewArticle {
        NewArticle {
            title: self.title.unwrap_or(existing.title),
            body: self.body.unwrap_or(existing.body),
            status: self.status.unwrap_or(existing.status),
            summary: self.summary.unwrap_or(existing.summary),
            topped: self.topped.unwrap_or(existing.topped),
            category_id: self.category_id.unwrap_or(existing.category_id),
            tag_ids: Vec::new(),
        }
    }
}
