mod app;
mod doubles;

pub use app::{TestApp, TestRequest, TestResponse};
pub use doubles::{FailingNotifier, RecordingNotifier};

use sqlx::SqlitePool;

/// A migrated, private in-memory database.
///
/// Limited to a single connection: every `sqlite::memory:` connection opens
/// its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = quill_data::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    quill_data::migrate(&pool)
        .await
        .expect("failed to migrate in-memory database");
    pool
}
