//! Shared types for the Vigil duty tracker
//!
//! Domain models, derived-status projections, attendance summaries,
//! error codes and the unified API response envelope used by both the
//! check-in client and the duty store service.

pub mod error;
pub mod models;
pub mod report;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{DutyRecord, DutyStatus, EmergencyReason, MobileLookup, StaffEntry};
pub use report::{DutyExport, DutySummary};
