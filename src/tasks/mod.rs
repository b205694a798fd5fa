//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the server is up.
//!
//! # Tasks
//! - Expired entry sweep: runs `clean(Old)` at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
