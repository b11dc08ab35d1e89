//! HTTP server for index question answering

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{AskRequest, AskResponse, BookEntry, ContextEngine, QaError};

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BooksResponse {
    pub books: Vec<BookEntry>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: QaError) -> ApiError {
    let status = match &err {
        QaError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        QaError::NotFound(_) | QaError::NoContent => StatusCode::NOT_FOUND,
        QaError::Upstream(_) => StatusCode::BAD_GATEWAY,
        QaError::IndexLoad { .. } | QaError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let details = match &err {
        QaError::Upstream(e) => Some(format!("{:#}", e)),
        QaError::IndexLoad { source, .. } => Some(format!("{:#}", source)),
        _ => None,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            details,
        }),
    )
}

/// Answer a question handler
async fn ask_handler(
    State(engine): State<Arc<ContextEngine>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    info!(
        "Received ask request: books={:?}, index_paths={:?}, top_k={:?}",
        req.books, req.index_paths, req.top_k
    );

    match engine.answer(req).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            match &e {
                QaError::Upstream(_) | QaError::IndexLoad { .. } => error!("Ask failed: {:?}", e),
                _ => warn!("Ask rejected: {}", e),
            }
            Err(error_response(e))
        }
    }
}

async fn books_handler(State(engine): State<Arc<ContextEngine>>) -> Json<BooksResponse> {
    Json(BooksResponse {
        books: engine.store.list_books(),
    })
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "pageindex-qa".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP server
pub fn create_router(engine: Arc<ContextEngine>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/books", get(books_handler))
        .route("/ask", post(ask_handler))
        .with_state(engine)
}

/// Run the HTTP server
pub async fn run_server(engine: Arc<ContextEngine>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting pageindex-qa server on {}", addr);

    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
