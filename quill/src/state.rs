use std::sync::Arc;

use quill_core::HttpError;
use quill_data::{
    ArticleRepository, CategoryRepository, CommentRepository, SuggestionRepository, TagRepository,
};
use quill_notify::Notifier;
use sqlx::SqlitePool;
use tera::Context;

use crate::views::Views;

/// Fixed sender and recipients of suggestion notifications.
#[derive(Debug, Clone)]
pub struct NotifyAddresses {
    pub from: String,
    pub to: Vec<String>,
}

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleRepository,
    pub categories: CategoryRepository,
    pub tags: TagRepository,
    pub comments: CommentRepository,
    pub suggestions: SuggestionRepository,
    pub views: Arc<Views>,
    pub notifier: Arc<dyn Notifier>,
    pub addresses: Arc<NotifyAddresses>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        notifier: Arc<dyn Notifier>,
        addresses: NotifyAddresses,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            articles: ArticleRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            tags: TagRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            suggestions: SuggestionRepository::new(pool.clone()),
            views: Arc::new(Views::new()?),
            notifier,
            addresses: Arc::new(addresses),
            pool,
        })
    }

    /// Context every page starts from: the navigation lists plus empty
    /// defaults for the optional headings.
    pub async fn page_context(&self) -> Result<Context, HttpError> {
        let mut context = Context::new();
        context.insert("category_list", &self.categories.list().await?);
        context.insert("tag_list", &self.tags.list().await?);
        context.insert("cate_name", "");
        context.insert("tag_name", "");
        context.insert("search_for", "");
        Ok(context)
    }
}
