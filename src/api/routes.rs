//! API Routes
//!
//! Configures the Axum router with all cache backend endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    capabilities_handler, clean_handler, filling_handler, health_handler, ids_handler,
    load_handler, matching_any_tags_handler, matching_tags_handler, metadata_handler,
    not_matching_tags_handler, remove_handler, save_handler, stats_handler, tags_handler,
    test_handler, touch_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /entries/:id` - Save the request body (`?tags=a,b&lifetime=N|infinite`)
/// - `GET /entries/:id` - Load a payload (`?skip_validity=true` reads expired entries)
/// - `DELETE /entries/:id` - Remove an entry
/// - `GET /entries/:id/test` - Check whether an entry is readable
/// - `GET /entries/:id/metadata` - Expiry, tags and mtime
/// - `POST /entries/:id/touch` - Extend an entry's lifetime
/// - `POST /clean` - Remove entries by mode and tags
/// - `GET /ids`, `GET /tags` - Listings
/// - `GET /ids/matching`, `/ids/not-matching`, `/ids/matching-any` - Tag selections
/// - `GET /capabilities`, `/filling`, `/stats`, `/health`
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/entries/:id",
            get(load_handler).put(save_handler).delete(remove_handler),
        )
        .route("/entries/:id/test", get(test_handler))
        .route("/entries/:id/metadata", get(metadata_handler))
        .route("/entries/:id/touch", post(touch_handler))
        .route("/clean", post(clean_handler))
        .route("/ids", get(ids_handler))
        .route("/ids/matching", get(matching_tags_handler))
        .route("/ids/not-matching", get(not_matching_tags_handler))
        .route("/ids/matching-any", get(matching_any_tags_handler))
        .route("/tags", get(tags_handler))
        .route("/capabilities", get(capabilities_handler))
        .route("/filling", get(filling_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
