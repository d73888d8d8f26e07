//! REST API server for profit calculations

use anyhow::Result;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use super::response::{ApiError, ApiResponse, ApiResult, SaveResponse};
use crate::calculator::{
    compute, validate, CalculationInput, CalculationRecord, CalculationResult, CalculationSummary,
};
use crate::error::ProfitShareError;
use crate::storage::{CalculationStore, HealthStatus, DEFAULT_RECENT_LIMIT};

/// API server exposing the calculation store over HTTP
pub struct ApiServer {
    store: CalculationStore,
    bind_addr: String,
    recent_limit: usize,
}

impl ApiServer {
    /// Create new API server
    pub fn new(store: CalculationStore, bind_addr: impl Into<String>) -> Self {
        Self {
            store,
            bind_addr: bind_addr.into(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Default history length when a request gives no `limit`
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Start the API server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| {
                ProfitShareError::from(e).with_context(format!("Binding {}", self.bind_addr))
            })?;

        info!("Starting profit-sharing API server on {}", listener.local_addr()?);

        axum::serve(listener, build_router(self.store, self.recent_limit))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Shared API state
#[derive(Clone)]
struct ApiState {
    store: CalculationStore,
    recent_limit: usize,
}

/// Build API router
pub fn build_router(store: CalculationStore, recent_limit: usize) -> Router {
    let state = ApiState {
        store,
        recent_limit,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/compute", post(compute_only))
        .route("/api/calculate", post(calculate))
        .route(
            "/api/calculations",
            get(list_recent).delete(clear_calculations),
        )
        .route(
            "/api/calculations/{id}",
            get(get_calculation).delete(delete_calculation),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// History query parameters
#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

fn parse_input(
    payload: Result<Json<CalculationInput>, JsonRejection>,
) -> ApiResult<CalculationInput> {
    let Json(input) = payload.map_err(|rejection| {
        debug!("Rejected calculation body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;
    validate(&input)?;
    Ok(input)
}

// API Handlers

async fn health_check(State(state): State<ApiState>) -> ApiResult<Json<ApiResponse<HealthStatus>>> {
    let health = state.store.health_check().await?;
    Ok(Json(ApiResponse::success(health)))
}

async fn compute_only(
    payload: Result<Json<CalculationInput>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<CalculationResult>>> {
    let input = parse_input(payload)?;
    Ok(Json(ApiResponse::success(compute(&input))))
}

async fn calculate(
    State(state): State<ApiState>,
    payload: Result<Json<CalculationInput>, JsonRejection>,
) -> ApiResult<Json<SaveResponse>> {
    let input = parse_input(payload)?;
    let outcome = state.store.save(input).await?;

    Ok(Json(SaveResponse {
        success: true,
        id: outcome.id,
        data: outcome.result,
    }))
}

async fn get_calculation(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<CalculationRecord>>> {
    let record = state.store.get(&id).await?;
    Ok(Json(ApiResponse::success(record)))
}

async fn list_recent(
    State(state): State<ApiState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<CalculationSummary>>>> {
    let Query(params) = query.map_err(|rejection| {
        debug!("Rejected history query: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;
    let limit = params.limit.unwrap_or(state.recent_limit);
    let recent = state.store.list_recent(limit).await?;
    Ok(Json(ApiResponse::success(recent)))
}

async fn delete_calculation(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<bool>>> {
    if state.store.delete(&id).await? {
        Ok(Json(ApiResponse::success(true)))
    } else {
        Err(ApiError::NotFound)
    }
}

async fn clear_calculations(
    State(state): State<ApiState>,
) -> ApiResult<Json<ApiResponse<usize>>> {
    let removed = state.store.clear().await?;
    Ok(Json(ApiResponse::success(removed)))
}
