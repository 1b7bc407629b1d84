//! HTTP dashboard API.
//!
//! Every handler runs its store call on a blocking thread while holding the
//! session lock, so reads against one store are serialized.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use vecpeek_core::{CollisionPolicy, Error, Session, StoreEngine, Table, DEFAULT_K};

/// Shared server state.
pub struct AppState<E: StoreEngine> {
    session: Arc<Mutex<Session<E>>>,
    policy: CollisionPolicy,
}

impl<E: StoreEngine> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            policy: self.policy,
        }
    }
}

impl<E: StoreEngine> AppState<E> {
    pub fn new(session: Session<E>, policy: CollisionPolicy) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            policy,
        }
    }
}

/// Builds the router.
pub fn router<E>(state: AppState<E>) -> Router
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    Router::new()
        .route("/store", get(store_status::<E>).put(open_store::<E>))
        .route("/collections", get(list_collections::<E>))
        .route("/collections/:name/records", get(collection_records::<E>))
        .route("/collections/:name/query", post(query_collection::<E>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve<E>(addr: SocketAddr, state: AppState<E>) -> anyhow::Result<()>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {} failed", addr))?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// An error response with a JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::NoStore => StatusCode::CONFLICT,
            Error::Connection { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Engine(_) => StatusCode::BAD_GATEWAY,
        };
        let message = if err.is_store_unavailable() {
            format!("{}; enter a valid full persist path", err)
        } else {
            err.to_string()
        };
        if status == StatusCode::BAD_GATEWAY {
            tracing::error!(%err, "engine call failed");
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

// Runs `f` against the locked session on a blocking thread.
async fn with_session<E, T, F>(state: &AppState<E>, f: F) -> Result<T, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut Session<E>) -> vecpeek_core::Result<T> + Send + 'static,
{
    let session = Arc::clone(&state.session);
    let result = tokio::task::spawn_blocking(move || {
        let mut guard = session.lock();
        f(&mut *guard)
    })
    .await
    .map_err(|e| ApiError::internal(format!("spawn_blocking failed: {}", e)))?;
    result.map_err(ApiError::from)
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct StoreStatus {
    path: Option<String>,
}

#[derive(Deserialize)]
struct OpenStoreRequest {
    path: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct OpenStoreResponse {
    path: String,
    collections: Vec<String>,
}

#[derive(Deserialize)]
struct QueryRequest {
    text: String,
    #[serde(default = "default_k")]
    k: usize,
}

fn default_k() -> usize {
    DEFAULT_K
}

async fn store_status<E>(State(state): State<AppState<E>>) -> Result<Json<StoreStatus>, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    let path = with_session(&state, |session| {
        Ok(session.path().map(|p| p.display().to_string()))
    })
    .await?;
    Ok(Json(StoreStatus { path }))
}

async fn open_store<E>(
    State(state): State<AppState<E>>,
    Json(req): Json<OpenStoreRequest>,
) -> Result<Json<OpenStoreResponse>, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    let path = req.path.trim().to_string();
    if path.is_empty() {
        return Err(ApiError::bad_request("persist path is empty"));
    }

    let response = with_session(&state, move |session| {
        let collections = session.point_at(&path)?.list_collections()?;
        Ok(OpenStoreResponse { path, collections })
    })
    .await?;
    Ok(Json(response))
}

async fn list_collections<E>(
    State(state): State<AppState<E>>,
) -> Result<Json<Vec<String>>, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    let names = with_session(&state, |session| session.peeker()?.list_collections()).await?;
    Ok(Json(names))
}

async fn collection_records<E>(
    State(state): State<AppState<E>>,
    Path(name): Path<String>,
) -> Result<Json<Table>, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    let policy = state.policy;
    let table = with_session(&state, move |session| {
        session.peeker()?.collection_table(&name, policy)
    })
    .await?;
    Ok(Json(table))
}

async fn query_collection<E>(
    State(state): State<AppState<E>>,
    Path(name): Path<String>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Table>, ApiError>
where
    E: StoreEngine + Send + 'static,
    E::Store: Send + 'static,
{
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("query text is empty"));
    }

    let policy = state.policy;
    let table = with_session(&state, move |session| {
        session
            .peeker()?
            .query_table(&name, &req.text, req.k, policy)
    })
    .await?;
    Ok(Json(table))
}
