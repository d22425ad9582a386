//! vaultgate-api - HTTP API server for vaultgate
//!
//! Thin façade over `vaultgate-core`: mock semantic search endpoints, vault
//! enumeration with a recency filter, and a health probe. Every request
//! performs a fresh scan; the server holds no cross-request state beyond
//! its configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use vaultgate_core::{
    changed_since, documents_newest_first, ChangeQuery, FileRecord, MockSearchCatalog,
    VaultWalker, DEFAULT_TOP_K,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// correlating the scan logs of concurrent requests.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// STATE & CONFIGURATION
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Vault root directory; existence is re-checked on every request.
    vault_root: PathBuf,
    /// Canned search results standing in for the real search backend.
    catalog: MockSearchCatalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   RUST_LOG    - standard env filter (default: "vaultgate_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vaultgate_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Get configuration from environment
    let vault_root = PathBuf::from(
        std::env::var("VAULT_ROOT").unwrap_or_else(|_| "/obsidian-vaults/MyVault".to_string()),
    );
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3300".to_string())
        .parse()
        .unwrap_or(3300);

    let state = AppState {
        vault_root: vault_root.clone(),
        catalog: MockSearchCatalog::default(),
    };

    info!(
        vault_root = %vault_root.display(),
        vault_available = vault_root.exists(),
        "Vault configured"
    );

    let app = build_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router. Shared by `main` and the tests.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Mock search endpoints (real backend not yet integrated)
        .route("/api/v1/search/indexes", get(list_search_indexes))
        .route("/api/v1/search", post(search))
        // Vault enumeration endpoints
        .route("/api/v1/vault/files", get(list_vault_files))
        .route("/api/v1/vault/changes", get(list_vault_changes))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        // The façade serves internal automation; the original ran with
        // unrestricted CORS and consumers rely on it.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// =============================================================================
// HEALTH
// =============================================================================

/// `GET /health` — liveness probe plus vault availability.
///
/// Vault availability is a bare existence check on the configured root,
/// independent of the scan endpoints.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "search_available": true, // mock catalog is always "up"
        "vault_available": state.vault_root.exists(),
    }))
}

// =============================================================================
// SEARCH HANDLERS (MOCK)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchBody {
    index: Option<String>,
    query: Option<String>,
    top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    query: String,
    index: String,
    results: Vec<vaultgate_core::SearchHit>,
    mock: bool,
    message: String,
}

/// `GET /api/v1/search/indexes` — mock index inventory.
async fn list_search_indexes(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "data": state.catalog.render_listing(),
        "indexes": state.catalog.indexes(),
        "mock": true,
    }))
}

/// `POST /api/v1/search` — mock semantic search.
///
/// Rejects requests missing `index` or `query` with 400, mirroring the
/// contract the real integration will keep.
async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchBody>,
) -> Result<impl IntoResponse, ApiError> {
    let index = body.index.filter(|s| !s.is_empty());
    let query = body.query.filter(|s| !s.is_empty());
    let (index, query) = match (index, query) {
        (Some(index), Some(query)) => (index, query),
        _ => {
            return Err(vaultgate_core::Error::InvalidInput(
                "index and query are required".to_string(),
            )
            .into())
        }
    };

    let top_k = body.top_k.unwrap_or(DEFAULT_TOP_K);
    let results = state.catalog.search(&query, top_k);

    Ok(Json(SearchResponse {
        success: true,
        query,
        index,
        results,
        mock: true,
        message: "Using mock semantic search results - replace with real search integration"
            .to_string(),
    }))
}

// =============================================================================
// VAULT HANDLERS
// =============================================================================

#[derive(Debug, Serialize)]
struct VaultFilesResponse {
    success: bool,
    vault_root: String,
    total_files: usize,
    files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
struct ChangesParams {
    /// Reference timestamp (RFC 3339); defaults to now minus 24 hours.
    since: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct VaultChangesResponse {
    success: bool,
    since: DateTime<Utc>,
    count: usize,
    files: Vec<FileRecord>,
}

/// `GET /api/v1/vault/files` — all documents in the vault, newest first.
async fn list_vault_files(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let walker = VaultWalker::new(&state.vault_root);
    let records = walker.scan()?;
    let files = documents_newest_first(records);

    Ok(Json(VaultFilesResponse {
        success: true,
        vault_root: state.vault_root.display().to_string(),
        total_files: files.len(),
        files,
    }))
}

/// `GET /api/v1/vault/changes?since=<RFC3339>` — documents modified after
/// the reference timestamp, newest first.
async fn list_vault_changes(
    State(state): State<AppState>,
    Query(params): Query<ChangesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let since = ChangeQuery {
        since: params.since,
    }
    .effective_since();

    let walker = VaultWalker::new(&state.vault_root);
    let records = walker.scan()?;
    let files = changed_since(records, since);

    Ok(Json(VaultChangesResponse {
        success: true,
        since,
        count: files.len(),
        files,
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(vaultgate_core::Error),
}

impl From<vaultgate_core::Error> for ApiError {
    fn from(err: vaultgate_core::Error) -> Self {
        match &err {
            vaultgate_core::Error::RootNotFound(_) => ApiError::NotFound(err.to_string()),
            vaultgate_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================
