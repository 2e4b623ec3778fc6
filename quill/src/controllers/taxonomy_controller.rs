use axum::extract::State;
use axum::response::{IntoResponse, Response};
use quill_core::HttpError;

use crate::extract::IdPath;
use crate::state::AppState;
use crate::views::ArticleView;

/// `GET /category/{id}`
pub async fn category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, HttpError> {
    let category = state.categories.get(id).await?;
    let articles = state.articles.list_by_category(id).await?;
    let mut context = state.page_context().await?;
    context.insert("cate_name", &category.name);
    context.insert("article_list", &ArticleView::listing(articles));
    Ok(state.views.render("index.html", &context)?.into_response())
}

/// `GET /tag/{id}`
pub async fn tag(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, HttpError> {
    let tag = state.tags.get(id).await?;
    let articles = state.articles.list_by_tag(id).await?;
    let mut context = state.page_context().await?;
    context.insert("tag_name", &tag.name);
    context.insert("article_list", &ArticleView::listing(articles));
    Ok(state.views.render("index.html", &context)?.into_response())
}
