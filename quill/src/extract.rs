//! Request extractors shared by the handlers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use quill_core::HttpError;

/// A numeric `{id}` path segment. Anything that is not an integer cannot
/// name a row, so it is rejected with the regular 404 page.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdPath(id)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, path = %parts.uri.path(), "non-numeric id");
                Err(HttpError::NotFound(format!(
                    "There is nothing at {}.",
                    parts.uri.path()
                )))
            }
        }
    }
}
