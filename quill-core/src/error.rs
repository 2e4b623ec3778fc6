use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Errors surfaced to the browser as an HTML error page.
pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Build a minimal standalone error page.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<!DOCTYPE html>\n<html><head><title>{code} {title}</title></head>\
         <body><h1>{code} {title}</h1><p>{message}</p><p><a href=\"/\">Back to the blog</a></p></body></html>",
        code = status.as_u16(),
        message = html_escape::encode_text(message),
    );
    (status, Html(body)).into_response()
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            HttpError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                // Internal details stay in the log.
                error_page(status, "Something went wrong on our side.")
            }
            HttpError::NotFound(msg) | HttpError::BadRequest(msg) => error_page(status, &msg),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}
