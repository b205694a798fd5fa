//! Request and Response models for the cache backend API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    validate_id, validate_tags, CleanRequest, LoadQuery, SaveQuery, TagsQuery, TouchRequest,
};
pub use responses::{
    CleanResponse, FillingResponse, HealthResponse, IdsResponse, RemoveResponse, SaveResponse,
    StatsResponse, TagsResponse, TestResponse, TouchResponse,
};
