//! # quill
//!
//! The blog server: route table, handlers and process startup.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | published articles |
//! | `GET /article/{id}` | article detail, counts one view |
//! | `POST /article/{id}/comment` | post a comment, redirect to the detail page |
//! | `POST /article/{id}/like` | like, redirect to the detail page |
//! | `GET /category/{id}` | published articles in a category |
//! | `GET /tag/{id}` | published articles with a tag |
//! | `GET /search?search_for=` | title search |
//! | `GET, POST /suggest` | suggestion form, redirect to `/thanks` |
//! | `GET /thanks` | confirmation page |
//! | `GET /health` | database liveness |

pub mod controllers;
pub mod extract;
pub mod forms;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use quill_core::{catch_panic_layer, default_trace, error_page, Settings};
use quill_notify::MailQueue;

use controllers::{
    article_controller, health_controller, search_controller, suggest_controller,
    taxonomy_controller,
};
pub use state::{AppState, NotifyAddresses};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The complete route table with tracing and panic recovery applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(article_controller::index))
        .route("/article/{id}", get(article_controller::detail))
        .route("/article/{id}/comment", post(article_controller::comment))
        .route("/article/{id}/like", post(article_controller::like))
        .route("/category/{id}", get(taxonomy_controller::category))
        .route("/tag/{id}", get(taxonomy_controller::tag))
        .route("/search", get(search_controller::search))
        .route(
            "/suggest",
            get(suggest_controller::form).post(suggest_controller::submit),
        )
        .route("/thanks", get(suggest_controller::thanks))
        .route("/health", get(health_controller::health))
        .fallback(not_found)
        .with_state(state)
        .layer(catch_panic_layer())
        .layer(default_trace())
}

async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND, "There is nothing at this address.")
}

/// Open and migrate the database named in `settings`.
pub async fn prepare_database(settings: &Settings) -> Result<sqlx::SqlitePool, BoxError> {
    let pool =
        quill_data::connect(&settings.database.url, settings.database.max_connections).await?;
    quill_data::migrate(&pool).await?;
    Ok(pool)
}

/// Serve until Ctrl+C or SIGTERM, then drain queued mail and close the pool.
pub async fn run(settings: Settings) -> Result<(), BoxError> {
    let pool = prepare_database(&settings).await?;

    let mailer = quill_notify::mailer_from_settings(&settings.mail)?;
    let (queue, worker) = MailQueue::start(mailer, settings.mail.queue_capacity);
    let state = AppState::new(
        pool.clone(),
        Arc::new(queue),
        NotifyAddresses {
            from: settings.mail.from.clone(),
            to: settings.mail.to.clone(),
        },
    )?;

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    tracing::info!(
        addr = %settings.server.addr,
        transport = ?settings.mail.transport,
        "quill listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker.shutdown().await;
    pool.close().await;
    tracing::info!("quill stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
