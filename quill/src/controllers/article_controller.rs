use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use quill_core::{FieldErrors, HttpError};
use quill_data::{Article, DataError, NewComment};
use quill_markup::MarkupOptions;

use crate::forms::CommentForm;
use crate::extract::IdPath;
use crate::state::AppState;
use crate::views::{ArticleView, CommentView};

/// `GET /`: every published article.
pub async fn index(State(state): State<AppState>) -> Result<Response, HttpError> {
    let articles = state.articles.list_published().await?;
    let mut context = state.page_context().await?;
    context.insert("article_list", &ArticleView::listing(articles));
    Ok(state.views.render("index.html", &context)?.into_response())
}

/// `GET /article/{id}`: counts the view before rendering.
pub async fn detail(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, HttpError> {
    let article = state.articles.record_view(id).await?;
    render_detail(&state, article, &CommentForm::default(), &FieldErrors::new(), StatusCode::OK).await
}

/// `POST /article/{id}/comment`
pub async fn comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Form(form): Form<CommentForm>,
) -> Result<Response, HttpError> {
    let article = state.articles.get_by_id(id).await?;
    let form = form.trimmed();
    let new = NewComment {
        article_id: id,
        user_name: form.user_name.clone(),
        body: form.body.clone(),
    };
    match state.comments.create(new).await {
        Ok(comment) => {
            tracing::info!(article_id = id, comment_id = comment.id, "comment posted");
            Ok(Redirect::to(&format!("/article/{id}")).into_response())
        }
        Err(DataError::Validation(errors)) => {
            tracing::debug!(article_id = id, %errors, "comment rejected");
            render_detail(&state, article, &form, &errors, StatusCode::BAD_REQUEST).await
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /article/{id}/like`
pub async fn like(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Redirect, HttpError> {
    state.articles.add_like(id).await?;
    Ok(Redirect::to(&format!("/article/{id}")))
}

async fn render_detail(
    state: &AppState,
    article: Article,
    form: &CommentForm,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, HttpError> {
    let comments: Vec<CommentView> = state
        .comments
        .list_for_article(article.id)
        .await?
        .into_iter()
        .map(CommentView::from)
        .collect();
    let tags = state.articles.tags_of(article.id).await?;

    let mut context = state.page_context().await?;
    context.insert("article", &ArticleView::new(article, &MarkupOptions::detail()));
    context.insert("article_tags", &tags);
    context.insert("comment_list", &comments);
    context.insert("form", form);
    context.insert("user_name_errors", errors.get("user_name"));
    context.insert("body_errors", errors.get("body"));
    state.views.render_with_status(status, "detail.html", &context)
}
