use std::sync::Arc;

use quill::{AppState, NotifyAddresses};
use quill_notify::Notifier;
use quill_test::TestApp;

pub const FROM: &str = "blog@example.com";
pub const TO: &str = "admin@example.com";

/// A router over a fresh in-memory database, plus the state for seeding and
/// inspecting it.
pub async fn app_with(notifier: Arc<dyn Notifier>) -> (TestApp, AppState) {
    let pool = quill_test::test_pool().await;
    let state = AppState::new(
        pool,
        notifier,
        NotifyAddresses {
            from: FROM.into(),
            to: vec![TO.into()],
        },
    )
    .unwrap();
    (TestApp::new(quill::router(state.clone())), state)
}

pub async fn app() -> (TestApp, AppState) {
    app_with(Arc::new(quill_test::RecordingNotifier::new())).await
}
