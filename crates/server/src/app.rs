use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use planboard_aggregate::{pivot, week_labels, weekly_margin, PivotRow, WeeklyMargin};
use planboard_model::{Dataset, PlanningFact, Sku, SkuInput, Store, StoreInput};
use planboard_viz::{margin_chart, ChartSpec};
use planboard_workbook::WorkbookSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared server state: the one dataset every view projects from, plus
/// the workbook source used for explicit reloads.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<Dataset>>,
    source: Option<WorkbookSource>,
}

impl AppState {
    #[must_use]
    pub fn new(dataset: Dataset, source: Option<WorkbookSource>) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            source,
        }
    }
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// The planning grid payload: the global week axis plus one dense row
/// per (store, sku) pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct PivotResponse {
    pub weeks: Vec<String>,
    pub rows: Vec<PivotRow>,
}

/// Record counts after a reload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadSummary {
    pub stores: usize,
    pub skus: usize,
    pub facts: usize,
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stores", get(list_stores).post(add_store))
        .route("/api/stores/:id", axum::routing::put(update_store).delete(remove_store))
        .route("/api/stores/:id/margin", get(store_margin))
        .route("/api/stores/:id/margin/chart", get(store_margin_chart))
        .route("/api/skus", get(list_skus).post(add_sku))
        .route("/api/skus/:id", axum::routing::put(update_sku).delete(remove_sku))
        .route("/api/planning", get(list_facts))
        .route("/api/planning/pivot", get(planning_pivot))
        .route("/api/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_stores(State(state): State<AppState>) -> Json<Vec<Store>> {
    Json(state.dataset.read().await.stores.clone())
}

async fn add_store(
    State(state): State<AppState>,
    Json(input): Json<StoreInput>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let store = state.dataset.write().await.add_store(input)?;
    tracing::info!(id = %store.id, "store created");
    Ok((StatusCode::CREATED, Json(store)))
}

async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StoreInput>,
) -> Result<Json<Store>, ApiError> {
    let store = state.dataset.write().await.update_store(&id, input)?;
    Ok(Json(store))
}

async fn remove_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    let store = state.dataset.write().await.remove_store(&id)?;
    tracing::info!(id = %store.id, "store removed");
    Ok(Json(store))
}

async fn list_skus(State(state): State<AppState>) -> Json<Vec<Sku>> {
    Json(state.dataset.read().await.skus.clone())
}

async fn add_sku(
    State(state): State<AppState>,
    Json(input): Json<SkuInput>,
) -> Result<(StatusCode, Json<Sku>), ApiError> {
    let sku = state.dataset.write().await.add_sku(input)?;
    tracing::info!(id = %sku.id, "sku created");
    Ok((StatusCode::CREATED, Json(sku)))
}

async fn update_sku(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SkuInput>,
) -> Result<Json<Sku>, ApiError> {
    let sku = state.dataset.write().await.update_sku(&id, input)?;
    Ok(Json(sku))
}

async fn remove_sku(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sku>, ApiError> {
    let sku = state.dataset.write().await.remove_sku(&id)?;
    tracing::info!(id = %sku.id, "sku removed");
    Ok(Json(sku))
}

async fn list_facts(State(state): State<AppState>) -> Json<Vec<PlanningFact>> {
    Json(state.dataset.read().await.facts.clone())
}

async fn planning_pivot(State(state): State<AppState>) -> Json<PivotResponse> {
    let dataset = state.dataset.read().await;
    Json(PivotResponse {
        weeks: week_labels(&dataset.facts),
        rows: pivot(&dataset.facts, &dataset.stores, &dataset.skus),
    })
}

async fn store_margin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<WeeklyMargin>>, ApiError> {
    let dataset = state.dataset.read().await;
    if dataset.store(&id).is_none() {
        return Err(ApiError::NotFound(format!("Store not found: {id}")));
    }
    Ok(Json(weekly_margin(&dataset.facts, &dataset.skus, &id)))
}

async fn store_margin_chart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChartSpec>, ApiError> {
    let dataset = state.dataset.read().await;
    let store = dataset
        .store(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Store not found: {id}")))?;
    let series = weekly_margin(&dataset.facts, &dataset.skus, &id);
    Ok(Json(margin_chart(&store.label, &series)))
}

/// Re-fetch the workbook source and replace the dataset wholesale.
async fn reload(State(state): State<AppState>) -> Result<Json<ReloadSummary>, ApiError> {
    let source = state.source.clone().ok_or(ApiError::NoSource)?;

    // Fetch and decode before taking the write lock; a failed reload
    // leaves the previous dataset in place.
    let dataset = planboard_workbook::load(&source).await?;
    let summary = ReloadSummary {
        stores: dataset.stores.len(),
        skus: dataset.skus.len(),
        facts: dataset.facts.len(),
    };

    *state.dataset.write().await = dataset;
    tracing::info!(
        stores = summary.stores,
        skus = summary.skus,
        facts = summary.facts,
        "dataset reloaded"
    );
    Ok(Json(summary))
}
