use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use quill_core::HttpError;

use crate::forms::SearchParams;
use crate::state::AppState;
use crate::views::ArticleView;

/// `GET /search?search_for=...`: title search over published articles.
///
/// A missing or empty query goes back to the index without scanning.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, HttpError> {
    let query = match params.search_for {
        Some(query) if !query.is_empty() => query,
        _ => return Ok(Redirect::to("/").into_response()),
    };
    let articles = state.articles.search(&query).await?;
    tracing::debug!(query = %query, hits = articles.len(), "search");

    let mut context = state.page_context().await?;
    context.insert("search_for", &query);
    context.insert("article_list", &ArticleView::listing(articles));
    Ok(state.views.render("index.html", &context)?.into_response())
}
