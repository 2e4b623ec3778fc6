use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use quill_core::HttpError;

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn not_found_renders_html_page() {
    let resp = HttpError::NotFound("Article 7 not found".into()).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_text(resp).await;
    assert!(body.contains("404 Not Found"));
    assert!(body.contains("Article 7 not found"));
}

#[tokio::test]
async fn internal_error_hides_details() {
    let resp = HttpError::Internal("database is locked".into()).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert!(!body.contains("database is locked"));
}

#[tokio::test]
async fn messages_are_escaped() {
    let resp = HttpError::BadRequest("<script>alert(1)</script>".into()).into_response();
    let body = body_text(resp).await;
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>"));
}

#[test]
fn display_names_the_kind() {
    assert_eq!(HttpError::NotFound("x".into()).to_string(), "Not Found: x");
}
