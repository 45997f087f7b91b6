//! Data models
//!
//! Shared between the check-in client and the duty store service (via API).
//! All IDs are `i64`; all timestamps are Unix millis.

pub mod duty;
pub mod staff;

// Re-exports
pub use duty::*;
pub use staff::*;
