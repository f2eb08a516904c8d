use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::quiz::{self, QuizDataset};
use crate::settings::Settings;


const INDEX_PAGE: &str = "index.html";

pub fn router(settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/quiz_data", get(quiz_data))
        .with_state(settings)
}

async fn index(State(settings): State<Arc<Settings>>) -> Response {
    let path = settings.static_dir.join(INDEX_PAGE);
    match tokio::fs::read(&path).await {
        Ok(page) => ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], page).into_response(),
        Err(e) => {
            warn!("could not serve {}: {}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn quiz_data(State(settings): State<Arc<Settings>>) -> Json<QuizDataset> {
    let dataset = tokio::task::spawn_blocking(move || quiz::load(&settings))
        .await
        .unwrap_or_else(|e| {
            error!("quiz loading task failed: {}", e);
            QuizDataset::default()
        });
    Json(dataset)
}

pub async fn run(settings: Settings) -> Result<()> {
    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("could not bind {}", address))?;
    info!(
        "serving {} on http://{}",
        settings.quiz_path().display(),
        address
    );

    axum::serve(listener, router(Arc::new(settings)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("could not listen for SIGTERM: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutting down");
}
