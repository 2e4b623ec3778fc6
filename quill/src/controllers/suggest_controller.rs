use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use quill_core::HttpError;
use quill_data::{DataError, NewSuggestion, SUGGESTION_MAX_CHARS};
use quill_notify::Notification;

use crate::forms::SuggestForm;
use crate::state::AppState;

/// Subject line of every suggestion notification.
pub const NOTIFICATION_SUBJECT: &str = "Visitor comment";

/// `GET /suggest`
pub async fn form(State(state): State<AppState>) -> Result<Response, HttpError> {
    let mut context = state.page_context().await?;
    context.insert("suggest", "");
    context.insert("suggest_errors", &Vec::<String>::new());
    context.insert("suggest_max", &SUGGESTION_MAX_CHARS);
    Ok(state.views.render("suggest.html", &context)?.into_response())
}

/// `POST /suggest`
///
/// Once the suggestion is stored the visitor always lands on `/thanks`;
/// a notification that cannot be queued is only logged.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SuggestForm>,
) -> Result<Response, HttpError> {
    let form = form.trimmed();
    let suggestion = match state.suggestions.create(NewSuggestion::new(&form.suggest)).await {
        Ok(suggestion) => suggestion,
        Err(DataError::Validation(errors)) => {
            let mut context = state.page_context().await?;
            context.insert("suggest", &form.suggest);
            context.insert("suggest_errors", errors.get("suggest"));
            context.insert("suggest_max", &SUGGESTION_MAX_CHARS);
            return state
                .views
                .render_with_status(StatusCode::BAD_REQUEST, "suggest.html", &context);
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(suggestion_id = suggestion.id, "suggestion received");

    let notification = Notification::new(
        NOTIFICATION_SUBJECT,
        suggestion.suggest,
        state.addresses.from.clone(),
        state.addresses.to.clone(),
    );
    if let Err(err) = state.notifier.enqueue(notification) {
        tracing::error!(error = %err, suggestion_id = suggestion.id, "E-mail failed to send");
    }
    Ok(Redirect::to("/thanks").into_response())
}

/// `GET /thanks`
pub async fn thanks(State(state): State<AppState>) -> Result<Response, HttpError> {
    let context = state.page_context().await?;
    Ok(state.views.render("thanks.html", &context)?.into_response())
}
