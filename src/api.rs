//! ==============================================================================
//! api.rs - http adapters over the reading store
//! ==============================================================================
//!
//! routes:
//!     POST /post-readings     add a batch, answer with the device's full set
//!     GET  /get-reading/:id   answer with the device's full set
//!
//! both answers are json arrays in no particular order. errors come back
//! as `{"message": ...}` (see error.rs).
//!
//! ==============================================================================

use crate::domain::{Reading, ReadingBatch};
use crate::error::ApiError;
use crate::store::ReadingStore;

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

// one lock around the whole store: a post holds the write side from insert
// through the snapshot it returns.
pub type SharedStore = Arc<RwLock<ReadingStore>>;

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/post-readings", post(post_readings))
        .route("/get-reading/:id", get(get_reading))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// body is decoded by hand so a missing or odd content-type still binds
async fn post_readings(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let batch: ReadingBatch = serde_json::from_slice(&body).map_err(|e| {
        warn!("rejecting reading batch: {}", e);
        ApiError::BadRequest
    })?;

    let mut store = store.write().await;
    if !store.contains_device(&batch.id) {
        info!(id = %batch.id, "new device");
    }
    debug!(id = %batch.id, count = batch.readings.len(), "adding readings");
    let current = store.add_readings(&batch.id, batch.readings);
    Ok(Json(current))
}

async fn get_reading(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let readings = store.read().await.get_readings(&id).map_err(|e| {
        warn!("{}", e);
        ApiError::from(e)
    })?;

    debug!(id = %id, count = readings.len(), "returning readings");
    Ok(Json(readings))
}
