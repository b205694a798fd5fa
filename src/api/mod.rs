//! API Module
//!
//! HTTP handlers and routing exposing the cache backend over REST.
//!
//! # Endpoints
//! - `/entries/:id` - Save, load and remove payloads
//! - `/entries/:id/{test,metadata,touch}` - Per-entry queries and lifetime extension
//! - `/clean` - Bulk invalidation by mode and tags
//! - `/ids`, `/tags`, `/ids/{matching,not-matching,matching-any}` - Listings
//! - `/capabilities`, `/filling`, `/stats`, `/health` - Accessors

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
