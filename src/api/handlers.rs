//! API Handlers
//!
//! HTTP request handlers for each cache backend endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{Capabilities, CacheStore, Metadata};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_id, validate_tags, CleanRequest, CleanResponse, FillingResponse, HealthResponse,
    IdsResponse, LoadQuery, RemoveResponse, SaveQuery, SaveResponse, StatsResponse, TagsQuery,
    TagsResponse, TestResponse, TouchRequest, TouchResponse,
};

/// Application state shared across all handlers.
///
/// The cache backend takes `&self` everywhere, so it is shared through an
/// `Arc` without an outer lock.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheStore>,
}

impl AppState {
    /// Creates a new AppState with the given cache backend.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if no document store driver serves the configured target.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(CacheStore::from_config(config)?))
    }
}

fn checked_id(id: String) -> Result<String> {
    match validate_id(&id) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(id),
    }
}

/// Handler for PUT /entries/:id
///
/// Stores the raw request body under the id.
pub async fn save_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SaveQuery>,
    body: Bytes,
) -> Result<Json<SaveResponse>> {
    let id = checked_id(id)?;
    let tags = query.tags().map_err(CacheError::InvalidRequest)?;
    let lifetime = query.lifetime().map_err(CacheError::InvalidRequest)?;

    state.cache.save(body.to_vec(), &id, tags, lifetime).await?;

    Ok(Json(SaveResponse::new(id)))
}

/// Handler for GET /entries/:id
///
/// Returns the raw payload, or 404 if no readable entry exists.
pub async fn load_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LoadQuery>,
) -> Result<Vec<u8>> {
    let id = checked_id(id)?;

    let data = state.cache.load(&id, query.skip_validity).await?;
    data.ok_or(CacheError::NotFound(id))
}

/// Handler for GET /entries/:id/test
pub async fn test_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestResponse>> {
    let id = checked_id(id)?;
    let available = state.cache.test(&id).await?;

    Ok(Json(TestResponse { id, available }))
}

/// Handler for DELETE /entries/:id
///
/// Succeeds whether or not the entry existed.
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let id = checked_id(id)?;
    state.cache.remove(&id).await?;

    Ok(Json(RemoveResponse::new(id)))
}

/// Handler for GET /entries/:id/metadata
pub async fn metadata_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Metadata>> {
    let id = checked_id(id)?;

    let metadata = state.cache.get_metadatas(&id).await?;
    metadata.map(Json).ok_or(CacheError::NotFound(id))
}

/// Handler for POST /entries/:id/touch
pub async fn touch_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TouchRequest>,
) -> Result<Json<TouchResponse>> {
    let id = checked_id(id)?;

    if !state.cache.touch(&id, req.extra_lifetime).await? {
        return Err(CacheError::NotFound(id));
    }

    Ok(Json(TouchResponse {
        id,
        extra_lifetime: req.extra_lifetime,
    }))
}

/// Handler for POST /clean
pub async fn clean_handler(
    State(state): State<AppState>,
    Json(req): Json<CleanRequest>,
) -> Result<Json<CleanResponse>> {
    if let Some(error_msg) = validate_tags(&req.tags) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let success = state.cache.clean(req.mode, &req.tags).await?;

    Ok(Json(CleanResponse {
        mode: req.mode,
        success,
    }))
}

/// Handler for GET /ids
pub async fn ids_handler(State(state): State<AppState>) -> Result<Json<IdsResponse>> {
    let ids = state.cache.get_ids().await?;
    Ok(Json(IdsResponse { ids }))
}

/// Handler for GET /tags
pub async fn tags_handler(State(state): State<AppState>) -> Result<Json<TagsResponse>> {
    let tags = state.cache.get_tags().await?;
    Ok(Json(TagsResponse { tags }))
}

/// Handler for GET /ids/matching
pub async fn matching_tags_handler(
    State(state): State<AppState>,
    Query(query): Query<TagsQuery>,
) -> Result<Json<IdsResponse>> {
    let ids = state.cache.get_ids_matching_tags(&query.tags()).await?;
    Ok(Json(IdsResponse { ids }))
}

/// Handler for GET /ids/not-matching
pub async fn not_matching_tags_handler(
    State(state): State<AppState>,
    Query(query): Query<TagsQuery>,
) -> Result<Json<IdsResponse>> {
    let ids = state.cache.get_ids_not_matching_tags(&query.tags()).await?;
    Ok(Json(IdsResponse { ids }))
}

/// Handler for GET /ids/matching-any
pub async fn matching_any_tags_handler(
    State(state): State<AppState>,
    Query(query): Query<TagsQuery>,
) -> Result<Json<IdsResponse>> {
    let ids = state.cache.get_ids_matching_any_tags(&query.tags()).await?;
    Ok(Json(IdsResponse { ids }))
}

/// Handler for GET /capabilities
pub async fn capabilities_handler(State(state): State<AppState>) -> Json<Capabilities> {
    Json(state.cache.get_capabilities())
}

/// Handler for GET /filling
pub async fn filling_handler(State(state): State<AppState>) -> Json<FillingResponse> {
    Json(FillingResponse {
        percentage: state.cache.get_filling_percentage(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
